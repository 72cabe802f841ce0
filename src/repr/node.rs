//! Owned policy tree nodes and prediction.
//!
//! A [`Node`] is a pure tree: each split exclusively owns its two
//! children, the root is exclusively owned by the [`PolicyTree`] the
//! search returns. No shared subtrees, no back-edges, no reference
//! counting.

use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::utils::Parallelism;

/// One node of a policy tree.
///
/// An internal node's reward equals the sum of its descendant leaf
/// rewards over the training rows that reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Terminal node assigning one action to every sample that reaches it.
    Leaf { action: usize, reward: f64 },
    /// Axis-aligned split: `X[·, feature] <= threshold` goes left.
    Split {
        feature: usize,
        threshold: f64,
        reward: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Total training reward collected under this node.
    #[inline]
    pub fn reward(&self) -> f64 {
        match self {
            Node::Leaf { reward, .. } | Node::Split { reward, .. } => *reward,
        }
    }

    /// Whether this node is terminal.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The assigned action, for leaves.
    #[inline]
    pub fn leaf_action(&self) -> Option<usize> {
        match self {
            Node::Leaf { action, .. } => Some(*action),
            Node::Split { .. } => None,
        }
    }

    /// Longest root-to-leaf path below this node, in splits.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Total node count of this subtree, itself included.
    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => 1 + left.n_nodes() + right.n_nodes(),
        }
    }

    /// Walk the tree with one feature row and return the leaf's action.
    pub fn assign(&self, row: ArrayView1<'_, f64>) -> usize {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { action, .. } => return *action,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

/// A fitted policy tree: the root node plus the training shape needed to
/// validate queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTree {
    root: Node,
    n_features: usize,
    n_actions: usize,
}

impl PolicyTree {
    pub(crate) fn new(root: Node, n_features: usize, n_actions: usize) -> Self {
        Self {
            root,
            n_features,
            n_actions,
        }
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of features the tree was trained on.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of actions the tree chooses between.
    #[inline]
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// Total training reward of the tree.
    #[inline]
    pub fn reward(&self) -> f64 {
        self.root.reward()
    }

    /// Depth of the tree in splits (0 for a single leaf).
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Total number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }

    /// Assign an action to each row of a query matrix.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidDimensions`] if the query column count does
    /// not match the training feature count.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Vec<usize>, SearchError> {
        self.predict_with(features, Parallelism::Sequential)
    }

    /// [`predict`](Self::predict), optionally running rows in parallel.
    ///
    /// Row order of the result is the same either way.
    pub fn predict_with(
        &self,
        features: ArrayView2<'_, f64>,
        parallelism: Parallelism,
    ) -> Result<Vec<usize>, SearchError> {
        if features.ncols() != self.n_features {
            return Err(SearchError::InvalidDimensions {
                what: "query feature columns",
                expected: self.n_features,
                actual: features.ncols(),
            });
        }

        let actions = if parallelism.is_parallel() {
            (0..features.nrows())
                .into_par_iter()
                .map(|i| self.root.assign(features.row(i)))
                .collect()
        } else {
            (0..features.nrows())
                .map(|i| self.root.assign(features.row(i)))
                .collect()
        };
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_leaf_tree() -> PolicyTree {
        PolicyTree::new(
            Node::Split {
                feature: 0,
                threshold: 1.0,
                reward: 4.0,
                left: Box::new(Node::Leaf {
                    action: 0,
                    reward: 2.0,
                }),
                right: Box::new(Node::Leaf {
                    action: 1,
                    reward: 2.0,
                }),
            },
            1,
            2,
        )
    }

    #[test]
    fn assign_follows_le_threshold_left() {
        let tree = two_leaf_tree();
        let queries = array![[0.5], [1.0], [1.0000001], [42.0]];
        let actions = tree.predict(queries.view()).unwrap();
        assert_eq!(actions, vec![0, 0, 1, 1]);
    }

    #[test]
    fn parallel_prediction_matches_sequential() {
        let tree = two_leaf_tree();
        let queries = array![[0.0], [2.0], [1.0], [-3.0], [7.0]];
        let sequential = tree.predict(queries.view()).unwrap();
        let parallel = tree
            .predict_with(queries.view(), Parallelism::Parallel)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn predict_rejects_column_mismatch() {
        let tree = two_leaf_tree();
        let queries = array![[0.5, 1.5]];
        let err = tree.predict(queries.view()).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidDimensions {
                what: "query feature columns",
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn shape_accessors() {
        let tree = two_leaf_tree();
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_features(), 1);
        assert_eq!(tree.n_actions(), 2);
        assert_eq!(tree.reward(), 4.0);
        assert!(!tree.root().is_leaf());
    }

    #[test]
    fn serde_round_trip_preserves_the_tree() {
        let tree = two_leaf_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let back: PolicyTree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
    }
}
