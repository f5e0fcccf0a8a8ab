use std::collections::HashMap;

use crate::domain::logging::LogComponent;
use crate::domain::market_data::{MarketRecord, Symbol};
use crate::domain::treemap::entities::{BranchNode, LeafNode, TreeNode};
use crate::log_debug;

/// Name given to the synthetic leaf that buckets a sector's long tail.
pub const OTHER_BUCKET_LABEL: &str = "Other";

/// Domain service - turns a flat record list into a rooted sector hierarchy.
///
/// The produced tree is unordered and unaggregated; branch values stay zero
/// until a `aggregation::aggregate` pass runs.
pub struct HierarchyBuilder {
    root_name: String,
    bucket_tail: bool,
}

impl HierarchyBuilder {
    pub fn new(root_name: &str) -> Self {
        Self {
            root_name: root_name.to_string(),
            bucket_tail: false,
        }
    }

    /// Enable collapsing each sector's long tail into a single "Other" leaf.
    pub fn with_tail_bucketing(mut self, enabled: bool) -> Self {
        self.bucket_tail = enabled;
        self
    }

    /// Build the market tree. Never fails: empty input yields an empty root.
    pub fn build(&self, records: &[MarketRecord]) -> TreeNode {
        if records.is_empty() {
            log_debug!(
                LogComponent::Domain("Hierarchy"),
                "No records; producing empty root '{}'",
                self.root_name
            );
            return TreeNode::empty_root(&self.root_name);
        }

        // Group by sector, preserving first-seen sector order.
        let mut sector_order: Vec<String> = Vec::new();
        let mut by_sector: HashMap<String, Vec<LeafNode>> = HashMap::new();
        for record in records {
            let sector = record.sector_label().to_string();
            if !by_sector.contains_key(&sector) {
                sector_order.push(sector.clone());
            }
            by_sector.entry(sector).or_default().push(leaf_from(record));
        }

        let children = sector_order
            .into_iter()
            .map(|sector| {
                let mut leaves = by_sector.remove(&sector).unwrap_or_default();
                if self.bucket_tail {
                    leaves = bucket_long_tail(leaves);
                }
                TreeNode::Branch(BranchNode {
                    name: sector,
                    value: 0.0,
                    change_rate: 0.0,
                    children: leaves.into_iter().map(TreeNode::Leaf).collect(),
                })
            })
            .collect::<Vec<_>>();

        log_debug!(
            LogComponent::Domain("Hierarchy"),
            "Built '{}' from {} records across {} sectors",
            self.root_name,
            records.len(),
            children.len()
        );

        TreeNode::branch(&self.root_name, children)
    }
}

fn leaf_from(record: &MarketRecord) -> LeafNode {
    LeafNode {
        name: record.display_name().to_string(),
        symbol: record.symbol.clone().map(Symbol::from),
        value: record.market_cap().as_weight(),
        change_rate: record.change_rate,
        current_price: record.current_price.map(Into::into),
        instrument_count: None,
    }
}

/// Collapse the sector's long tail into one "Other" leaf.
///
/// Leaves are sorted descending by value; the cutoff is the first index `i`
/// whose remaining suffix sums to less than `values[i]`. Everything past the
/// cutoff becomes a single leaf carrying the summed value, a value-weighted
/// change rate and the bucketed instrument count. If the suffix at the first
/// qualifying index is empty there is nothing to bucket.
fn bucket_long_tail(mut leaves: Vec<LeafNode>) -> Vec<LeafNode> {
    leaves.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut cutoff = None;
    for i in 0..leaves.len() {
        let tail: f64 = leaves[i + 1..].iter().map(|l| l.value).sum();
        if tail < leaves[i].value {
            cutoff = Some(i);
            break;
        }
    }

    let Some(i) = cutoff else {
        return leaves;
    };
    if i + 1 >= leaves.len() {
        return leaves;
    }

    let tail = leaves.split_off(i + 1);
    let tail_value: f64 = tail.iter().map(|l| l.value).sum();
    let tail_rate = if tail_value > 0.0 {
        tail.iter().map(|l| l.value * l.change_rate).sum::<f64>() / tail_value
    } else {
        0.0
    };
    leaves.push(LeafNode {
        name: OTHER_BUCKET_LABEL.to_string(),
        symbol: None,
        value: tail_value,
        change_rate: tail_rate,
        current_price: None,
        instrument_count: Some(tail.len() as u32),
    });
    leaves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, value: f64) -> LeafNode {
        LeafNode {
            name: name.to_string(),
            symbol: None,
            value,
            change_rate: 0.0,
            current_price: None,
            instrument_count: None,
        }
    }

    #[test]
    fn tail_smaller_than_head_is_bucketed() {
        let leaves = vec![leaf("a", 100.0), leaf("b", 30.0), leaf("c", 20.0), leaf("d", 10.0)];
        let out = bucket_long_tail(leaves);
        // suffix after "a" sums to 60 < 100, so b/c/d collapse.
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].name, OTHER_BUCKET_LABEL);
        assert!((out[1].value - 60.0).abs() < 1e-9);
        assert_eq!(out[1].instrument_count, Some(3));
    }

    #[test]
    fn cutoff_at_last_leaf_buckets_nothing() {
        let leaves = vec![leaf("a", 10.0), leaf("b", 10.0), leaf("c", 10.0)];
        // First qualifying index is the last leaf (empty suffix), so no bucket.
        let out = bucket_long_tail(leaves);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|l| l.name != OTHER_BUCKET_LABEL));
    }
}
