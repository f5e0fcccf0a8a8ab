use crate::domain::treemap::entities::TreeNode;

/// Recompute every branch's value and change rate from its children.
///
/// Single post-order pass: branch value is the child sum, branch change rate
/// is the value-weighted mean of child change rates. Leaves keep the values
/// the builder (or a prune) gave them. Must run after every structural change
/// to the tree; branch figures are stale until it does.
pub fn aggregate(node: &mut TreeNode) {
    if let TreeNode::Branch(branch) = node {
        for child in &mut branch.children {
            aggregate(child);
        }

        let total: f64 = branch.children.iter().map(TreeNode::value).sum();
        branch.value = total;
        // Guard the division: an all-zero sector reports a flat 0, not NaN.
        branch.change_rate = if total > 0.0 {
            branch
                .children
                .iter()
                .map(|c| c.value() * c.change_rate())
                .sum::<f64>()
                / total
        } else {
            0.0
        };
    }
}
