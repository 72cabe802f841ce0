//! Error types for search and prediction entry points.
//!
//! All validation happens at the public entry points (`tree_search`,
//! `predict`) before any search state is allocated. Inside the recursion
//! nothing is recoverable: invariant breaches surface as
//! [`SearchError::InternalInvariantViolation`] and are additionally
//! `debug_assert!`ed at the breach site.

/// Errors reported by [`tree_search`](crate::tree_search) and
/// [`PolicyTree::predict`](crate::PolicyTree::predict).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The feature and reward matrices disagree on a dimension, or a query
    /// matrix does not match the training shape.
    #[error("{what}: expected {expected}, got {actual}")]
    InvalidDimensions {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A hyperparameter is out of range.
    #[error("{name} must be {requirement}, got {value}")]
    InvalidHyperparameter {
        name: &'static str,
        requirement: &'static str,
        value: usize,
    },

    /// The input matrices have no rows.
    #[error("input matrices have no rows")]
    EmptyInput,

    /// A search-internal invariant was broken. This indicates a bug in the
    /// search itself, never bad caller input.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(&'static str),
}
