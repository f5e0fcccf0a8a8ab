use market_treemap_wasm::domain::market_data::MarketRecord;
use market_treemap_wasm::domain::treemap::{
    HierarchyBuilder, LayoutEngine, TilingStrategy, TreeNode, aggregation, prune_below_min_pixel,
};

fn layout_and_prune(records: &[MarketRecord], width: u32, height: u32, min_pixel: u32) -> TreeNode {
    let mut tree = HierarchyBuilder::new("Market").build(records);
    aggregation::aggregate(&mut tree);
    let engine = LayoutEngine::new(TilingStrategy::Squarified, 0);
    let laid = engine.layout(&tree, width, height).expect("layout");
    prune_below_min_pixel(&laid, min_pixel)
}

#[test]
fn sliver_sector_disappears_along_with_its_branch() {
    let records = vec![
        MarketRecord::new("Tech", "A", 10_000.0, 1.0),
        MarketRecord::new("Tech", "B", 5_000.0, -2.0),
        MarketRecord::new("Micro", "C", 1.0, 9.0),
    ];
    let pruned = layout_and_prune(&records, 500, 500, 15);

    assert!(pruned.child("Micro").is_none(), "sliver sector must not survive");
    let tech = pruned.child("Tech").expect("Tech survives");
    assert!(tech.child("A").is_some());
    assert!(tech.child("B").is_some());
}

#[test]
fn zero_value_leaf_is_dropped_regardless_of_space() {
    let records = vec![
        MarketRecord::new("Tech", "A", 100.0, 1.0),
        MarketRecord::new("Tech", "Z", 0.0, 5.0),
    ];
    let pruned = layout_and_prune(&records, 400, 400, 15);

    let tech = pruned.child("Tech").expect("Tech survives");
    assert!(tech.child("A").is_some());
    assert!(tech.child("Z").is_none());
}

#[test]
fn nothing_surviving_collapses_to_an_empty_root_with_its_name() {
    let records = vec![
        MarketRecord::new("Tech", "A", 60.0, 0.0),
        MarketRecord::new("Tech", "B", 40.0, 0.0),
    ];
    let pruned = layout_and_prune(&records, 100, 100, 1_000);

    assert_eq!(pruned.name(), "Market");
    assert!(!pruned.is_leaf());
    assert!(pruned.children().is_empty());
}

#[test]
fn pruned_tree_needs_reaggregation_before_reuse() {
    let records = vec![
        MarketRecord::new("Tech", "A", 300.0, 2.0),
        MarketRecord::new("Tech", "B", 100.0, -2.0),
        MarketRecord::new("Micro", "C", 1.0, 0.0),
    ];
    let mut pruned = layout_and_prune(&records, 500, 500, 15);

    // Branch figures come back zeroed from the prune.
    assert_eq!(pruned.value(), 0.0);

    aggregation::aggregate(&mut pruned);
    assert!((pruned.value() - 400.0).abs() < 1e-9);
    // (300 * 2 + 100 * -2) / 400
    assert!((pruned.change_rate() - 1.0).abs() < 1e-9);
}
