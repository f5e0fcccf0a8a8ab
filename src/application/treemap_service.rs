use serde::{Deserialize, Serialize};

use crate::domain::logging::LogComponent;
use crate::domain::market_data::MarketRecord;
use crate::domain::treemap::{
    HierarchyBuilder, LayoutEngine, LayoutNode, TilingStrategy, TreeNode, aggregation,
    prune_below_min_pixel,
};
use crate::log_debug;
use crate::view_state::ViewState;

pub const DEFAULT_MIN_PIXEL: u32 = 15;
pub const DEFAULT_PADDING: u32 = 2;
pub const DEFAULT_ROOT_NAME: &str = "Market";

/// Configuration surface exposed to the hosting widget.
#[derive(Debug, Clone)]
pub struct TreemapConfig {
    pub width: u32,
    pub height: u32,
    pub min_pixel: u32,
    pub padding: u32,
    pub tiling: TilingStrategy,
    pub bucket_tail: bool,
    pub root_name: String,
}

impl TreemapConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            min_pixel: DEFAULT_MIN_PIXEL,
            padding: DEFAULT_PADDING,
            tiling: TilingStrategy::default(),
            bucket_tail: false,
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }
}

/// One renderable rectangle handed to the drawing collaborator. Cells are
/// emitted in pre-order, siblings in layout order; `depth` is 1 for direct
/// children of the focused node. Color mapping and text layout happen on the
/// host side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderCell {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub value: f64,
    pub change_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_count: Option<u32>,
    pub leaf: bool,
    pub depth: u32,
}

/// The output of one pipeline run.
///
/// `revision` increases with every data update; a host juggling overlapping
/// async triggers keeps the highest revision it has seen and drops the rest
/// (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub revision: u64,
    pub breadcrumb: Vec<String>,
    pub cells: Vec<RenderCell>,
}

impl RenderFrame {
    fn empty(revision: u64, breadcrumb: Vec<String>) -> Self {
        Self { revision, breadcrumb, cells: Vec::new() }
    }
}

/// Application service running the full pipeline per refresh or interaction:
/// build, aggregate, resolve view, layout, prune, re-aggregate, re-layout.
///
/// The tree is rebuilt wholesale on every data update; only the view path
/// carries over. Each run reads the view state once at the start and writes
/// it at most once (zoom), so state is never read mid-update.
pub struct TreemapService {
    config: TreemapConfig,
    view: ViewState,
    tree: Option<TreeNode>,
    revision: u64,
}

impl TreemapService {
    pub fn new(config: TreemapConfig) -> Self {
        Self {
            config,
            view: ViewState::new(),
            tree: None,
            revision: 0,
        }
    }

    pub fn config(&self) -> &TreemapConfig {
        &self.config
    }

    pub fn view_path(&self) -> Option<&[String]> {
        self.view.path()
    }

    pub fn restore_view_path(&mut self, path: Vec<String>) {
        self.view = ViewState::restore(path);
    }

    pub fn set_tiling(&mut self, tiling: TilingStrategy) {
        self.config.tiling = tiling;
    }

    pub fn set_min_pixel(&mut self, min_pixel: u32) {
        self.config.min_pixel = min_pixel;
    }

    pub fn set_tail_bucketing(&mut self, enabled: bool) {
        self.config.bucket_tail = enabled;
    }

    /// Replace the tree from a fresh record batch and render.
    ///
    /// A failed upstream fetch never reaches this call, so the previously
    /// delivered tree stays on screen between successful refreshes.
    pub fn update_data(&mut self, records: &[MarketRecord]) -> RenderFrame {
        let builder = HierarchyBuilder::new(&self.config.root_name)
            .with_tail_bucketing(self.config.bucket_tail);
        let mut tree = builder.build(records);
        aggregation::aggregate(&mut tree);

        self.revision += 1;
        log_debug!(
            LogComponent::Application("TreemapService"),
            "Refresh #{}: {} records, {} nodes",
            self.revision,
            records.len(),
            tree.count()
        );

        self.tree = Some(tree);
        self.render()
    }

    /// Re-render at a new viewport size; the data tree is reused as-is.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderFrame {
        self.config.width = width;
        self.config.height = height;
        self.render()
    }

    /// Zoom into a named branch child of the current view.
    pub fn zoom_in(&mut self, child_name: &str) -> RenderFrame {
        if let Some(tree) = &self.tree {
            self.view.zoom_in(tree, child_name);
        }
        self.render()
    }

    /// Zoom back out one level; no-op at the root.
    pub fn zoom_out(&mut self) -> RenderFrame {
        self.view.zoom_out();
        self.render()
    }

    /// Run layout, prune, re-aggregate and final layout for the current view.
    pub fn render(&mut self) -> RenderFrame {
        let Some(tree) = &self.tree else {
            return RenderFrame::empty(self.revision, Vec::new());
        };

        let view = self.view.resolve(tree);
        let breadcrumb: Vec<String> =
            self.view.path().map(|p| p.to_vec()).unwrap_or_default();

        let engine = LayoutEngine::new(self.config.tiling, self.config.padding);
        let Some(first_pass) = engine.layout(view, self.config.width, self.config.height) else {
            // Zero-sized viewport: nothing to render, not an error.
            return RenderFrame::empty(self.revision, breadcrumb);
        };

        let mut pruned = prune_below_min_pixel(&first_pass, self.config.min_pixel);
        aggregation::aggregate(&mut pruned);

        let cells = match engine.layout(&pruned, self.config.width, self.config.height) {
            Some(final_pass) => flatten(&final_pass),
            None => Vec::new(),
        };

        RenderFrame { revision: self.revision, breadcrumb, cells }
    }
}

/// Flatten the laid-out tree, root excluded, parents before children.
fn flatten(root: &LayoutNode) -> Vec<RenderCell> {
    let mut cells = Vec::new();
    for child in &root.children {
        push_cells(child, 1, &mut cells);
    }
    cells
}

fn push_cells(node: &LayoutNode, depth: u32, cells: &mut Vec<RenderCell>) {
    cells.push(RenderCell {
        x0: node.rect.x0,
        y0: node.rect.y0,
        x1: node.rect.x1,
        y1: node.rect.y1,
        name: node.name.clone(),
        symbol: node.symbol.as_ref().map(|s| s.value().to_string()),
        value: node.value,
        change_rate: node.change_rate,
        current_price: node.current_price.map(|p| p.value()),
        instrument_count: node.instrument_count,
        leaf: node.leaf,
        depth,
    });
    for child in &node.children {
        push_cells(child, depth + 1, cells);
    }
}
