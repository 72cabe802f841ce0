//! policytree: exact policy tree search over per-action reward matrices.
//!
//! Given a feature matrix `X` (n × p) and a reward matrix `Γ` (n × d),
//! [`tree_search`] finds the depth-bounded axis-aligned decision tree
//! whose leaves assign one action each, maximizing the total reward
//! collected when every sample takes the action of the leaf it falls
//! into. The search is exhaustive: with `split_step = 1` and
//! `min_node_size = 1` the returned tree is optimal among all trees of
//! the given depth.
//!
//! # Key Types
//!
//! - [`SearchParams`] - Depth and approximation hyperparameters
//! - [`PolicyTree`] / [`Node`] - The fitted tree, with prediction and a
//!   flat matrix encoding for boundary transport
//! - [`SearchError`] / [`DecodeError`] - Input validation failures
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use policytree::{tree_search, SearchParams};
//!
//! let x = array![[0.0], [1.0], [2.0], [3.0]];
//! let gamma = array![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0]];
//!
//! let tree = tree_search(x.view(), gamma.view(), &SearchParams::exact(1)).unwrap();
//! assert_eq!(tree.reward(), 4.0);
//! assert_eq!(tree.predict(x.view()).unwrap(), vec![0, 0, 1, 1]);
//! ```
//!
//! # Determinism
//!
//! Two searches over identical inputs return identical trees, down to
//! the serialized bytes: reward comparisons update on strict improvement
//! only, features are tried in ascending index order, and equal feature
//! values order by sample index.

// Re-export approx traits for users who want to compare rewards
pub use approx;

use ndarray::ArrayView2;

pub mod data;
mod error;
pub mod repr;
pub mod search;
pub mod testing;
mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::DataView;
pub use error::SearchError;
pub use repr::{DecodeError, Node, PolicyTree, FLAT_COLUMNS};
pub use search::SearchParams;
pub use utils::Parallelism;

/// Search for the reward-maximizing policy tree.
///
/// `features` is the n × p matrix `X`; `rewards` is the n × d matrix `Γ`
/// where `rewards[[i, a]]` is the payoff of assigning action `a` to
/// sample `i`.
///
/// Returns a tree of depth at most `params.depth` whose total training
/// reward is maximal under the hyperparameters. Internal nodes never
/// carry two identical-action leaf children (they are collapsed).
///
/// # Errors
///
/// - [`SearchError::EmptyInput`] if the matrices have no rows.
/// - [`SearchError::InvalidDimensions`] if `X` and `Γ` disagree on the
///   row count, or `X` has no columns.
/// - [`SearchError::InvalidHyperparameter`] if `Γ` has fewer than two
///   columns, or `split_step` / `min_node_size` is zero.
pub fn tree_search<'a>(
    features: ArrayView2<'a, f64>,
    rewards: ArrayView2<'a, f64>,
    params: &SearchParams,
) -> Result<PolicyTree, SearchError> {
    params.validate()?;
    let data = DataView::new(features, rewards)?;

    log::debug!(
        "tree search: {} samples, {} features, {} actions, depth {}, split_step {}, min_node_size {}",
        data.n_samples(),
        data.n_features(),
        data.n_actions(),
        params.depth,
        params.split_step,
        params.min_node_size,
    );

    let root = search::search(&data, params)?;

    log::debug!(
        "tree search done: reward {:.6}, {} nodes, depth {}",
        root.reward(),
        root.n_nodes(),
        root.depth(),
    );

    Ok(PolicyTree::new(root, data.n_features(), data.n_actions()))
}
