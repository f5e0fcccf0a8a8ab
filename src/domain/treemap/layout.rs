use derive_more::Display;
use strum::{AsRefStr, EnumIter, EnumString};

use crate::domain::market_data::{Price, Symbol};
use crate::domain::treemap::entities::TreeNode;

/// Value Object - Tiling strategy, a per-widget configuration choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr)]
pub enum TilingStrategy {
    #[default]
    #[display(fmt = "Squarified")]
    #[strum(serialize = "squarified")]
    Squarified,
    #[display(fmt = "Binary")]
    #[strum(serialize = "binary")]
    Binary,
}

/// Value Object - Integer pixel rectangle, `x0 <= x1`, `y0 <= y1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Shrink by `px` on every side, collapsing to a degenerate rect rather
    /// than inverting when the rect is too small.
    pub fn inset(&self, px: i32) -> Rect {
        let x0 = self.x0 + px;
        let y0 = self.y0 + px;
        Rect {
            x0,
            y0,
            x1: (self.x1 - px).max(x0),
            y1: (self.y1 - px).max(y0),
        }
    }

    pub fn contains(&self, other: &Rect) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && self.x1 >= other.x1 && self.y1 >= other.y1
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

/// A laid-out mirror of a `TreeNode`: node data plus the pixel rect assigned
/// by the tiler. Carries everything the pruner needs to rebuild a data tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub name: String,
    pub symbol: Option<Symbol>,
    pub value: f64,
    pub change_rate: f64,
    pub current_price: Option<Price>,
    pub instrument_count: Option<u32>,
    pub leaf: bool,
    pub rect: Rect,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    /// Visit every leaf of the laid-out tree.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a LayoutNode)) {
        if self.leaf {
            f(self);
        } else {
            for child in &self.children {
                child.for_each_leaf(f);
            }
        }
    }
}

/// Float rect used internally before rounding.
#[derive(Debug, Clone, Copy)]
struct FRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl FRect {
    fn degenerate(x: f64, y: f64) -> Self {
        Self { x, y, w: 0.0, h: 0.0 }
    }
}

/// Domain service - assigns viewport rectangles to a (sub)tree.
///
/// Children are ordered by descending value with names as the tie-break, so
/// layout is deterministic for equal-weight siblings. Every node's rect is
/// rounded to integers before its children are tiled inside it, which keeps
/// rounded children contained and non-overlapping.
pub struct LayoutEngine {
    strategy: TilingStrategy,
    padding: i32,
}

impl LayoutEngine {
    pub fn new(strategy: TilingStrategy, padding: u32) -> Self {
        Self {
            strategy,
            padding: padding as i32,
        }
    }

    pub fn strategy(&self) -> TilingStrategy {
        self.strategy
    }

    /// Lay the tree out over `[0,width] x [0,height]`.
    ///
    /// A zero-sized viewport produces no layout at all (`None`); degenerate
    /// geometry is never computed.
    pub fn layout(&self, node: &TreeNode, width: u32, height: u32) -> Option<LayoutNode> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(self.position(node, Rect::new(0, 0, width as i32, height as i32)))
    }

    fn position(&self, node: &TreeNode, rect: Rect) -> LayoutNode {
        let mut laid = match node {
            TreeNode::Leaf(leaf) => LayoutNode {
                name: leaf.name.clone(),
                symbol: leaf.symbol.clone(),
                value: leaf.value,
                change_rate: leaf.change_rate,
                current_price: leaf.current_price,
                instrument_count: leaf.instrument_count,
                leaf: true,
                rect,
                children: Vec::new(),
            },
            TreeNode::Branch(branch) => LayoutNode {
                name: branch.name.clone(),
                symbol: None,
                value: branch.value,
                change_rate: branch.change_rate,
                current_price: None,
                instrument_count: None,
                leaf: false,
                rect,
                children: Vec::new(),
            },
        };

        let children = node.children();
        if children.is_empty() {
            return laid;
        }

        let mut ordered: Vec<&TreeNode> = children.iter().collect();
        ordered.sort_by(|a, b| {
            b.value()
                .partial_cmp(&a.value())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name().cmp(b.name()))
        });

        let inner = rect.inset(self.padding);
        let values: Vec<f64> = ordered.iter().map(|c| c.value()).collect();
        let cells = self.tile(&values, &inner);

        laid.children = ordered
            .iter()
            .zip(cells)
            .map(|(child, cell)| self.position(child, round_into(&cell, &inner)))
            .collect();
        laid
    }

    /// Assign a float cell per value inside `inner`. Non-positive values get
    /// zero-area cells at the origin of the area; the caller's prune step
    /// discards them later.
    fn tile(&self, values: &[f64], inner: &Rect) -> Vec<FRect> {
        let x = inner.x0 as f64;
        let y = inner.y0 as f64;
        let w = inner.width() as f64;
        let h = inner.height() as f64;

        let mut cells = vec![FRect::degenerate(x, y); values.len()];
        // Values arrive sorted descending, so positives form a prefix.
        let positive = values.iter().take_while(|v| **v > 0.0).count();
        let total: f64 = values[..positive].iter().sum();
        if positive == 0 || total <= 0.0 || w <= 0.0 || h <= 0.0 {
            return cells;
        }

        let scale = w * h / total;
        let areas: Vec<f64> = values[..positive].iter().map(|v| v * scale).collect();
        let tiled = match self.strategy {
            TilingStrategy::Squarified => squarify(&areas, x, y, w, h),
            TilingStrategy::Binary => {
                let mut out = Vec::with_capacity(areas.len());
                binary(&areas, FRect { x, y, w, h }, w < h, &mut out);
                out
            }
        };
        cells[..positive].copy_from_slice(&tiled);
        cells
    }
}

/// Round a float cell to integers, clamped inside the (already integer)
/// parent area. Siblings share exact float boundaries, so rounding the
/// endpoints cannot make them overlap.
fn round_into(cell: &FRect, inner: &Rect) -> Rect {
    let x0 = (cell.x.round() as i32).clamp(inner.x0, inner.x1);
    let y0 = (cell.y.round() as i32).clamp(inner.y0, inner.y1);
    let x1 = ((cell.x + cell.w).round() as i32).clamp(x0, inner.x1);
    let y1 = ((cell.y + cell.h).round() as i32).clamp(y0, inner.y1);
    Rect::new(x0, y0, x1, y1)
}

/// Squarified tiling after Bruls et al.: grow the current row while its worst
/// aspect ratio does not degrade, then fix the row along the shorter side of
/// the remaining area. `areas` must be positive and sum to `w * h`.
fn squarify(areas: &[f64], mut x: f64, mut y: f64, mut w: f64, mut h: f64) -> Vec<FRect> {
    let mut out = Vec::with_capacity(areas.len());

    let mut idx = 0usize;
    let mut row_start = 0usize;
    let mut row_sum = 0.0f64;
    let mut row_min = f64::INFINITY;
    let mut row_max = 0.0f64;

    while idx < areas.len() {
        if w <= f64::EPSILON || h <= f64::EPSILON {
            // Remaining area exhausted by float error; everything left collapses.
            for _ in row_start..areas.len() {
                out.push(FRect::degenerate(x, y));
            }
            return out;
        }

        let area = areas[idx];
        let side = w.min(h);
        let current = worst_ratio(row_min, row_max, row_sum, side);
        let next = worst_ratio(row_min.min(area), row_max.max(area), row_sum + area, side);

        if row_sum <= 0.0 || next <= current {
            row_sum += area;
            row_min = row_min.min(area);
            row_max = row_max.max(area);
            idx += 1;
            continue;
        }

        layout_row(&areas[row_start..idx], row_sum, &mut x, &mut y, &mut w, &mut h, &mut out);
        row_start = idx;
        row_sum = 0.0;
        row_min = f64::INFINITY;
        row_max = 0.0;
    }

    if row_sum > 0.0 && row_start < idx {
        layout_row(&areas[row_start..idx], row_sum, &mut x, &mut y, &mut w, &mut h, &mut out);
    }

    out
}

/// Fix one row along the shorter side of the remaining area, shrinking the
/// area by the row's thickness. The last cell absorbs float remainder.
fn layout_row(
    row: &[f64],
    row_sum: f64,
    x: &mut f64,
    y: &mut f64,
    w: &mut f64,
    h: &mut f64,
    out: &mut Vec<FRect>,
) {
    let horizontal = *w <= *h;
    let short = if horizontal { *w } else { *h };
    let thickness = if short > 0.0 { row_sum / short } else { 0.0 };

    let mut offset = 0.0f64;
    for (i, &area) in row.iter().enumerate() {
        let mut length = if thickness > 0.0 { area / thickness } else { 0.0 };
        if i == row.len() - 1 {
            let remaining = (short - offset).max(0.0);
            if remaining > 0.0 {
                length = remaining;
            }
        }
        out.push(if horizontal {
            FRect { x: *x + offset, y: *y, w: length, h: thickness }
        } else {
            FRect { x: *x, y: *y + offset, w: thickness, h: length }
        });
        offset += length;
    }

    if horizontal {
        *y += thickness;
        *h = (*h - thickness).max(0.0);
    } else {
        *x += thickness;
        *w = (*w - thickness).max(0.0);
    }
}

fn worst_ratio(min_area: f64, max_area: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || min_area <= 0.0 || max_area <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    ((side_sq * max_area) / sum_sq).max(sum_sq / (side_sq * min_area))
}

/// Binary tiling: bisect the area at the value-balanced split point of the
/// (descending) child list, alternating cut orientation per level.
fn binary(areas: &[f64], rect: FRect, horizontal_cut: bool, out: &mut Vec<FRect>) {
    if areas.len() == 1 {
        out.push(rect);
        return;
    }

    let total: f64 = areas.iter().sum();
    let split = balanced_split(areas, total);
    let head: f64 = areas[..split].iter().sum();
    let ratio = if total > 0.0 { head / total } else { 0.0 };

    let (first, second) = if horizontal_cut {
        let cut = rect.h * ratio;
        (
            FRect { x: rect.x, y: rect.y, w: rect.w, h: cut },
            FRect { x: rect.x, y: rect.y + cut, w: rect.w, h: rect.h - cut },
        )
    } else {
        let cut = rect.w * ratio;
        (
            FRect { x: rect.x, y: rect.y, w: cut, h: rect.h },
            FRect { x: rect.x + cut, y: rect.y, w: rect.w - cut, h: rect.h },
        )
    };

    binary(&areas[..split], first, !horizontal_cut, out);
    binary(&areas[split..], second, !horizontal_cut, out);
}

/// First split index whose prefix sum is closest to half the total; ties go
/// to the earlier index, keeping the result deterministic.
fn balanced_split(areas: &[f64], total: f64) -> usize {
    let mut best = 1usize;
    let mut best_diff = f64::INFINITY;
    let mut prefix = 0.0f64;
    for (i, area) in areas[..areas.len() - 1].iter().enumerate() {
        prefix += area;
        let diff = (2.0 * prefix - total).abs();
        if diff < best_diff {
            best_diff = diff;
            best = i + 1;
        }
    }
    best
}
