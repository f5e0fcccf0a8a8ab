use crate::domain::logging::LogComponent;
use crate::domain::treemap::TreeNode;
use crate::log_warn;

/// Drill-down state held across data refreshes.
///
/// Only the name path survives a refresh; node references never outlive the
/// tree they came from. Every pipeline run re-resolves the path against the
/// freshly built tree and falls back to the root when the path has gone
/// stale.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    current_path: Option<Vec<String>>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a path persisted by the host; it is validated by the next
    /// `resolve` against whatever tree is current then.
    pub fn restore(path: Vec<String>) -> Self {
        Self {
            current_path: if path.is_empty() { None } else { Some(path) },
        }
    }

    pub fn path(&self) -> Option<&[String]> {
        self.current_path.as_deref()
    }

    /// Resolve the current view against a (re)built tree.
    ///
    /// The first call initializes the path to the root. A path that no longer
    /// matches resets to the root rather than erroring; the returned node is
    /// always a node of `root`'s tree.
    pub fn resolve<'a>(&mut self, root: &'a TreeNode) -> &'a TreeNode {
        match &self.current_path {
            Some(path) => match find_by_path(root, path) {
                Some(node) => node,
                None => {
                    log_warn!(
                        LogComponent::Domain("ViewState"),
                        "View path {:?} no longer resolves; falling back to root '{}'",
                        path,
                        root.name()
                    );
                    self.current_path = Some(vec![root.name().to_string()]);
                    root
                }
            },
            None => {
                self.current_path = Some(vec![root.name().to_string()]);
                root
            }
        }
    }

    /// Zoom into a direct branch child of the current view. Leaves are
    /// selectable, not zoomable.
    pub fn zoom_in(&mut self, root: &TreeNode, child_name: &str) -> bool {
        let view = self.resolve(root);
        match view.child(child_name) {
            Some(child) if !child.is_leaf() => {
                if let Some(path) = self.current_path.as_mut() {
                    path.push(child_name.to_string());
                }
                true
            }
            _ => false,
        }
    }

    /// Step back to the parent view. No-op at the root.
    pub fn zoom_out(&mut self) -> bool {
        match self.current_path.as_mut() {
            Some(path) if path.len() > 1 => {
                path.pop();
                true
            }
            _ => false,
        }
    }
}

/// Walk the tree child-by-child along `path`, starting only if the root name
/// matches the first segment.
fn find_by_path<'a>(root: &'a TreeNode, path: &[String]) -> Option<&'a TreeNode> {
    let (first, rest) = path.split_first()?;
    if root.name() != first {
        return None;
    }
    let mut current = root;
    for name in rest {
        current = current.child(name)?;
    }
    Some(current)
}
