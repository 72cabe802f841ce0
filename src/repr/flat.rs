//! Flat numeric encoding of a policy tree for boundary transport.
//!
//! The tree crosses language boundaries as an `n_nodes × 8` `f64` matrix,
//! one row per node in breadth-first order. Node ids are contiguous and
//! equal the row index, so the encoding needs no side table.
//!
//! Columns:
//!
//! | # | column | leaves | splits |
//! |---|---|---|---|
//! | 0 | `node_id` | row index | row index |
//! | 1 | `is_leaf` | 1 | 0 |
//! | 2 | `split_var` | −1 | feature index |
//! | 3 | `split_val` | NaN | threshold |
//! | 4 | `left_child_id` | −1 | child row |
//! | 5 | `right_child_id` | −1 | child row |
//! | 6 | `action` | action index | −1 |
//! | 7 | `reward` | leaf reward | subtree reward |
//!
//! The encoding is lossless: decoding and predicting yields exactly the
//! outputs of predicting on the in-memory tree.

use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2};

use super::node::{Node, PolicyTree};

/// Number of columns in the flat tree matrix.
pub const FLAT_COLUMNS: usize = 8;

const COL_NODE_ID: usize = 0;
const COL_IS_LEAF: usize = 1;
const COL_SPLIT_VAR: usize = 2;
const COL_SPLIT_VAL: usize = 3;
const COL_LEFT: usize = 4;
const COL_RIGHT: usize = 5;
const COL_ACTION: usize = 6;
const COL_REWARD: usize = 7;

/// Errors from decoding a flat tree matrix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The matrix does not have [`FLAT_COLUMNS`] columns.
    #[error("flat tree must have {FLAT_COLUMNS} columns, got {0}")]
    WrongColumnCount(usize),

    /// The matrix has no rows.
    #[error("flat tree has no rows")]
    Empty,

    /// A `node_id` entry does not equal its row index.
    #[error("node id at row {row} does not equal the row index")]
    NodeIdMismatch { row: usize },

    /// A child id points outside the matrix or at the node itself.
    #[error("node {node} references child row {child} out of range")]
    ChildOutOfRange { node: usize, child: i64 },

    /// A node is reachable by more than one path (a cycle or a DAG).
    #[error("node {node} reached more than once")]
    DuplicateVisit { node: usize },

    /// A row is not reachable from the root.
    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: usize },

    /// A leaf's action is outside `[0, n_actions)`.
    #[error("leaf {node} carries invalid action {action} for {n_actions} actions")]
    InvalidAction {
        node: usize,
        action: i64,
        n_actions: usize,
    },

    /// A split's variable is outside `[0, n_features)`.
    #[error("split {node} carries invalid variable {var} for {n_features} features")]
    InvalidSplitVar {
        node: usize,
        var: i64,
        n_features: usize,
    },
}

impl PolicyTree {
    /// Encode the tree as a flat matrix, breadth-first.
    pub fn to_flat(&self) -> Array2<f64> {
        let mut flat = Array2::zeros((self.n_nodes(), FLAT_COLUMNS));

        let mut queue: VecDeque<&Node> = VecDeque::new();
        queue.push_back(self.root());
        let mut id = 0usize;
        // Ids are handed out in push order, which under a FIFO queue is
        // exactly breadth-first order.
        let mut next_id = 1usize;

        while let Some(node) = queue.pop_front() {
            let mut row = flat.row_mut(id);
            row[COL_NODE_ID] = id as f64;
            match node {
                Node::Leaf { action, reward } => {
                    row[COL_IS_LEAF] = 1.0;
                    row[COL_SPLIT_VAR] = -1.0;
                    row[COL_SPLIT_VAL] = f64::NAN;
                    row[COL_LEFT] = -1.0;
                    row[COL_RIGHT] = -1.0;
                    row[COL_ACTION] = *action as f64;
                    row[COL_REWARD] = *reward;
                }
                Node::Split {
                    feature,
                    threshold,
                    reward,
                    left,
                    right,
                } => {
                    row[COL_IS_LEAF] = 0.0;
                    row[COL_SPLIT_VAR] = *feature as f64;
                    row[COL_SPLIT_VAL] = *threshold;
                    row[COL_LEFT] = next_id as f64;
                    row[COL_RIGHT] = (next_id + 1) as f64;
                    row[COL_ACTION] = -1.0;
                    row[COL_REWARD] = *reward;
                    next_id += 2;
                    queue.push_back(left);
                    queue.push_back(right);
                }
            }
            id += 1;
        }

        flat
    }

    /// Decode a flat matrix back into an owned tree.
    ///
    /// Validates the structure the matrix claims: contiguous node ids,
    /// in-range children and payloads, every row reachable exactly once.
    pub fn from_flat(
        flat: ArrayView2<'_, f64>,
        n_features: usize,
        n_actions: usize,
    ) -> Result<Self, DecodeError> {
        if flat.ncols() != FLAT_COLUMNS {
            return Err(DecodeError::WrongColumnCount(flat.ncols()));
        }
        let n_nodes = flat.nrows();
        if n_nodes == 0 {
            return Err(DecodeError::Empty);
        }
        for row in 0..n_nodes {
            if flat[[row, COL_NODE_ID]] != row as f64 {
                return Err(DecodeError::NodeIdMismatch { row });
            }
        }

        let mut visited = vec![false; n_nodes];
        let root = decode_node(flat, 0, &mut visited, n_features, n_actions)?;

        if let Some(node) = visited.iter().position(|&v| !v) {
            return Err(DecodeError::UnreachableNode { node });
        }

        Ok(PolicyTree::new(root, n_features, n_actions))
    }
}

fn decode_node(
    flat: ArrayView2<'_, f64>,
    row: usize,
    visited: &mut [bool],
    n_features: usize,
    n_actions: usize,
) -> Result<Node, DecodeError> {
    if visited[row] {
        return Err(DecodeError::DuplicateVisit { node: row });
    }
    visited[row] = true;

    if flat[[row, COL_IS_LEAF]] != 0.0 {
        let action = flat[[row, COL_ACTION]] as i64;
        if action < 0 || action as usize >= n_actions {
            return Err(DecodeError::InvalidAction {
                node: row,
                action,
                n_actions,
            });
        }
        Ok(Node::Leaf {
            action: action as usize,
            reward: flat[[row, COL_REWARD]],
        })
    } else {
        let var = flat[[row, COL_SPLIT_VAR]] as i64;
        if var < 0 || var as usize >= n_features {
            return Err(DecodeError::InvalidSplitVar {
                node: row,
                var,
                n_features,
            });
        }
        let left = child_row(flat, row, COL_LEFT)?;
        let right = child_row(flat, row, COL_RIGHT)?;

        Ok(Node::Split {
            feature: var as usize,
            threshold: flat[[row, COL_SPLIT_VAL]],
            reward: flat[[row, COL_REWARD]],
            left: Box::new(decode_node(flat, left, visited, n_features, n_actions)?),
            right: Box::new(decode_node(flat, right, visited, n_features, n_actions)?),
        })
    }
}

fn child_row(flat: ArrayView2<'_, f64>, node: usize, col: usize) -> Result<usize, DecodeError> {
    let child = flat[[node, col]] as i64;
    if child < 0 || child as usize >= flat.nrows() || child as usize == node {
        return Err(DecodeError::ChildOutOfRange { node, child });
    }
    Ok(child as usize)
}
