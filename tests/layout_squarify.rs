use market_treemap_wasm::domain::treemap::{
    LayoutEngine, LayoutNode, TilingStrategy, TreeNode, aggregation,
};
use quickcheck_macros::quickcheck;

fn flat_tree(values: &[f64]) -> TreeNode {
    let leaves = values
        .iter()
        .enumerate()
        .map(|(i, v)| TreeNode::leaf(&format!("N{i}"), *v, 0.0))
        .collect();
    let mut tree = TreeNode::branch("Market", leaves);
    aggregation::aggregate(&mut tree);
    tree
}

fn check_geometry(node: &LayoutNode) -> bool {
    let inner_ok = node.children.iter().all(|c| node.rect.contains(&c.rect));
    let disjoint = node.children.iter().enumerate().all(|(i, a)| {
        node.children[i + 1..].iter().all(|b| !a.rect.overlaps(&b.rect))
    });
    inner_ok && disjoint && node.children.iter().all(check_geometry)
}

#[test]
fn two_equal_leaves_split_the_viewport_exactly() {
    let tree = flat_tree(&[1.0, 1.0]);
    let engine = LayoutEngine::new(TilingStrategy::Squarified, 0);
    let laid = engine.layout(&tree, 100, 100).expect("layout");

    assert_eq!(laid.children.len(), 2);
    assert_eq!(laid.children[0].rect.area() + laid.children[1].rect.area(), 100 * 100);
    assert!(check_geometry(&laid));
}

#[test]
fn equal_values_break_ties_by_name() {
    let mut tree = TreeNode::branch(
        "Market",
        vec![TreeNode::leaf("B", 5.0, 0.0), TreeNode::leaf("A", 5.0, 0.0)],
    );
    aggregation::aggregate(&mut tree);
    let engine = LayoutEngine::new(TilingStrategy::Squarified, 0);
    let laid = engine.layout(&tree, 100, 100).expect("layout");

    assert_eq!(laid.children[0].name, "A");
    assert_eq!(laid.children[1].name, "B");
}

#[test]
fn zero_value_leaf_gets_a_degenerate_rect() {
    let tree = flat_tree(&[10.0, 0.0]);
    let engine = LayoutEngine::new(TilingStrategy::Squarified, 0);
    let laid = engine.layout(&tree, 200, 100).expect("layout");

    let zero = laid.children.iter().find(|c| c.value == 0.0).expect("zero leaf");
    assert_eq!(zero.rect.area(), 0);
    let full = laid.children.iter().find(|c| c.value == 10.0).expect("leaf");
    assert_eq!(full.rect.area(), 200 * 100);
}

#[test]
fn zero_viewport_produces_no_layout() {
    let tree = flat_tree(&[10.0, 5.0]);
    let engine = LayoutEngine::new(TilingStrategy::Squarified, 2);
    assert!(engine.layout(&tree, 0, 300).is_none());
    assert!(engine.layout(&tree, 400, 0).is_none());
}

#[test]
fn padding_insets_children_on_every_level() {
    let mut tree = TreeNode::branch(
        "Market",
        vec![
            TreeNode::branch(
                "Tech",
                vec![TreeNode::leaf("A", 100.0, 0.0), TreeNode::leaf("B", 50.0, 0.0)],
            ),
            TreeNode::branch("Energy", vec![TreeNode::leaf("C", 70.0, 0.0)]),
        ],
    );
    aggregation::aggregate(&mut tree);
    let engine = LayoutEngine::new(TilingStrategy::Squarified, 2);
    let laid = engine.layout(&tree, 400, 300).expect("layout");

    assert!(check_geometry(&laid));
    for sector in &laid.children {
        let inset = sector.rect.inset(2);
        for leaf in &sector.children {
            assert!(inset.contains(&leaf.rect), "{} escapes its sector", leaf.name);
        }
    }
}

#[quickcheck]
fn cells_stay_contained_and_disjoint(values: Vec<u16>) -> bool {
    if values.is_empty() {
        return true;
    }
    let floats: Vec<f64> = values.iter().map(|v| *v as f64).collect();
    let tree = flat_tree(&floats);
    let engine = LayoutEngine::new(TilingStrategy::Squarified, 0);
    match engine.layout(&tree, 640, 480) {
        Some(laid) => check_geometry(&laid),
        None => false,
    }
}
