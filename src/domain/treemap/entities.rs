use crate::domain::market_data::{Price, Symbol};

/// Domain entity - an instrument leaf in the market hierarchy.
///
/// `value` is the leaf's market-cap weight, already clamped non-negative by
/// the hierarchy builder. `instrument_count` is only present on synthetic
/// "Other" leaves that bucket a sector's long tail.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
    pub name: String,
    pub symbol: Option<Symbol>,
    pub value: f64,
    pub change_rate: f64,
    pub current_price: Option<Price>,
    pub instrument_count: Option<u32>,
}

/// Domain entity - a sector or market-root node.
///
/// `value` and `change_rate` are derived; they are only trustworthy
/// immediately after an aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchNode {
    pub name: String,
    pub value: f64,
    pub change_rate: f64,
    pub children: Vec<TreeNode>,
}

/// The market hierarchy. Leaf vs branch is a compile-time distinction rather
/// than a runtime null-children check.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf(LeafNode),
    Branch(BranchNode),
}

impl TreeNode {
    pub fn leaf(name: &str, value: f64, change_rate: f64) -> Self {
        TreeNode::Leaf(LeafNode {
            name: name.to_string(),
            symbol: None,
            value,
            change_rate,
            current_price: None,
            instrument_count: None,
        })
    }

    pub fn branch(name: &str, children: Vec<TreeNode>) -> Self {
        TreeNode::Branch(BranchNode {
            name: name.to_string(),
            value: 0.0,
            change_rate: 0.0,
            children,
        })
    }

    /// Empty branch used as the degenerate result of builds and prunes.
    pub fn empty_root(name: &str) -> Self {
        Self::branch(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::Leaf(leaf) => &leaf.name,
            TreeNode::Branch(branch) => &branch.name,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            TreeNode::Leaf(leaf) => leaf.value,
            TreeNode::Branch(branch) => branch.value,
        }
    }

    pub fn change_rate(&self) -> f64 {
        match self {
            TreeNode::Leaf(leaf) => leaf.change_rate,
            TreeNode::Branch(branch) => branch.change_rate,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Leaf(_) => &[],
            TreeNode::Branch(branch) => &branch.children,
        }
    }

    /// Direct child lookup by name; resolution of view paths goes through this.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children().iter().find(|c| c.name() == name)
    }

    /// Total node count, root included.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::count).sum::<usize>()
    }

    /// Number of instrument leaves in the subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Branch(branch) => branch.children.iter().map(TreeNode::leaf_count).sum(),
        }
    }
}
