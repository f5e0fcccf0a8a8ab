use market_treemap_wasm::domain::market_data::{FALLBACK_NAME, FALLBACK_SECTOR, MarketRecord};
use market_treemap_wasm::domain::treemap::{HierarchyBuilder, TreeNode, aggregation};

#[test]
fn groups_records_into_one_branch_per_sector() {
    let records = vec![
        MarketRecord::new("Tech", "A", 100.0, 5.0),
        MarketRecord::new("Tech", "B", 50.0, -10.0),
        MarketRecord::new("Energy", "C", 70.0, 1.0),
    ];
    let tree = HierarchyBuilder::new("Market").build(&records);

    assert_eq!(tree.name(), "Market");
    assert_eq!(tree.children().len(), 2);
    let tech = tree.child("Tech").expect("Tech sector");
    assert_eq!(tech.children().len(), 2);
    assert!(tech.child("A").is_some_and(TreeNode::is_leaf));
    assert!(tech.child("B").is_some_and(TreeNode::is_leaf));
}

#[test]
fn aggregated_tech_sector_matches_weighted_figures() {
    let records = vec![
        MarketRecord::new("Tech", "A", 100.0, 5.0),
        MarketRecord::new("Tech", "B", 50.0, -10.0),
    ];
    let mut tree = HierarchyBuilder::new("Market").build(&records);
    aggregation::aggregate(&mut tree);

    let tech = tree.child("Tech").expect("Tech sector");
    assert!((tech.value() - 150.0).abs() < 1e-9);
    // (100 * 5 + 50 * -10) / 150 == 0
    assert!(tech.change_rate().abs() < 1e-9);
    assert!((tree.value() - 150.0).abs() < 1e-9);
}

#[test]
fn empty_input_yields_empty_root_not_failure() {
    let tree = HierarchyBuilder::new("Market").build(&[]);
    assert_eq!(tree.name(), "Market");
    assert!(!tree.is_leaf());
    assert!(tree.children().is_empty());
}

#[test]
fn blank_sector_and_name_fall_back_to_fixed_labels() {
    let record = MarketRecord {
        sector_name: None,
        node_name: Some(String::new()),
        market_cap: 10.0,
        change_rate: 0.0,
        current_price: None,
        symbol: None,
    };
    let tree = HierarchyBuilder::new("Market").build(&[record]);

    let sector = tree.child(FALLBACK_SECTOR).expect("fallback sector");
    assert!(sector.child(FALLBACK_NAME).is_some());
}

#[test]
fn negative_market_cap_clamps_to_zero_weight() {
    let records = vec![MarketRecord::new("Tech", "A", -25.0, 3.0)];
    let tree = HierarchyBuilder::new("Market").build(&records);
    let leaf = tree.child("Tech").and_then(|s| s.child("A")).expect("leaf");
    assert_eq!(leaf.value(), 0.0);
}

#[test]
fn feed_field_aliases_deserialize() {
    let json = r#"[
        {"sectorName": "Tech", "nodeName": "Acme", "mktcap": 1000.0,
         "fluc_rate": 2.5, "cur_price": 77000.0, "symbol": "acme"}
    ]"#;
    let records: Vec<MarketRecord> = serde_json::from_str(json).expect("parse");
    assert_eq!(records[0].sector_label(), "Tech");
    assert_eq!(records[0].display_name(), "Acme");
    assert_eq!(records[0].market_cap, 1000.0);
    assert_eq!(records[0].change_rate, 2.5);
    assert_eq!(records[0].current_price, Some(77000.0));
}
