use crate::domain::logging::LogComponent;
use crate::domain::treemap::entities::{BranchNode, LeafNode, TreeNode};
use crate::domain::treemap::layout::LayoutNode;
use crate::log_debug;

/// Rebuild a data tree from a laid-out one, dropping every leaf whose cell is
/// smaller than `min_pixel` in either dimension or carries no value, along
/// with any branch left childless.
///
/// The result is unaggregated; callers re-aggregate and re-lay it out at the
/// same viewport to close the gaps. At a fixed viewport that sequence is a
/// fixed point: a second prune removes nothing further.
///
/// If nothing survives the original root name is kept on an empty branch, so
/// downstream layout always has a valid tree to work with.
pub fn prune_below_min_pixel(layout: &LayoutNode, min_pixel: u32) -> TreeNode {
    match rebuild(layout, min_pixel as i32) {
        Some(tree) => tree,
        None => {
            log_debug!(
                LogComponent::Domain("Prune"),
                "No leaf of '{}' meets the {}px threshold; view collapses to an empty root",
                layout.name,
                min_pixel
            );
            TreeNode::empty_root(&layout.name)
        }
    }
}

fn rebuild(node: &LayoutNode, min_pixel: i32) -> Option<TreeNode> {
    if node.leaf {
        let survives = node.rect.width() >= min_pixel
            && node.rect.height() >= min_pixel
            && node.value > 0.0;
        return survives.then(|| {
            TreeNode::Leaf(LeafNode {
                name: node.name.clone(),
                symbol: node.symbol.clone(),
                value: node.value,
                change_rate: node.change_rate,
                current_price: node.current_price,
                instrument_count: node.instrument_count,
            })
        });
    }

    let children: Vec<TreeNode> = node
        .children
        .iter()
        .filter_map(|child| rebuild(child, min_pixel))
        .collect();
    if children.is_empty() {
        return None;
    }
    Some(TreeNode::Branch(BranchNode {
        name: node.name.clone(),
        value: 0.0,
        change_rate: 0.0,
        children,
    }))
}
