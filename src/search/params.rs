//! Search hyperparameters.

use bon::Builder;

use crate::error::SearchError;

/// Hyperparameters for [`tree_search`](crate::tree_search).
///
/// `depth` bounds the number of splits on any root-to-leaf path.
/// `split_step` trades exactness for speed: only every `split_step`-th
/// admissible split candidate is evaluated (1 = exact). `min_node_size`
/// rejects splits that would leave fewer training rows than that on
/// either side.
///
/// # Example
///
/// ```
/// use policytree::SearchParams;
///
/// let exact = SearchParams::exact(2);
/// assert_eq!(exact.split_step, 1);
///
/// let approximate = SearchParams::builder()
///     .depth(2)
///     .split_step(10)
///     .min_node_size(5)
///     .build();
/// assert!(approximate.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct SearchParams {
    /// Maximum tree depth; 0 returns a single leaf.
    pub depth: usize,

    /// Evaluate every `split_step`-th admissible split candidate. Must be
    /// at least 1.
    #[builder(default = 1)]
    pub split_step: usize,

    /// Minimum number of training rows required in each child of an
    /// evaluated split. Must be at least 1.
    #[builder(default = 1)]
    pub min_node_size: usize,
}

impl SearchParams {
    /// Construct with all three hyperparameters.
    pub fn new(depth: usize, split_step: usize, min_node_size: usize) -> Self {
        Self {
            depth,
            split_step,
            min_node_size,
        }
    }

    /// Exact search at the given depth: every candidate evaluated, no
    /// node-size constraint.
    pub fn exact(depth: usize) -> Self {
        Self::new(depth, 1, 1)
    }

    /// Check hyperparameter ranges.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.split_step < 1 {
            return Err(SearchError::InvalidHyperparameter {
                name: "split_step",
                requirement: ">= 1",
                value: self.split_step,
            });
        }
        if self.min_node_size < 1 {
            return Err(SearchError::InvalidHyperparameter {
                name: "min_node_size",
                requirement: ">= 1",
                value: self.min_node_size,
            });
        }
        Ok(())
    }
}
