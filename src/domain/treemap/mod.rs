//! Treemap aggregate: tree entities, hierarchy construction, weighted
//! aggregation, viewport layout and pixel-threshold pruning.

pub mod aggregation;
pub mod entities;
pub mod hierarchy;
pub mod layout;
pub mod prune;

pub use entities::*;
pub use hierarchy::{HierarchyBuilder, OTHER_BUCKET_LABEL};
pub use layout::{LayoutEngine, LayoutNode, Rect, TilingStrategy};
pub use prune::prune_below_min_pixel;
