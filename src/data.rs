//! Read-only views over the caller's feature and reward matrices.
//!
//! [`DataView`] bundles the two inputs of a search: the feature matrix
//! `X` with shape `[n_samples, n_features]` and the reward matrix `Γ`
//! with shape `[n_samples, n_actions]`. It is constructed once per
//! search, validated up front, and never mutated.
//!
//! The view works with ndarray arrays directly; both axes use the
//! sample-major convention of the caller (`[n_samples, ...]` on rows).

use ndarray::ArrayView2;

use crate::error::SearchError;

/// Immutable view of the training inputs for one search.
///
/// Rewards are per-sample, per-action: `reward(i, a)` is the payoff of
/// assigning action `a` to sample `i`.
#[derive(Debug, Clone, Copy)]
pub struct DataView<'a> {
    features: ArrayView2<'a, f64>,
    rewards: ArrayView2<'a, f64>,
}

impl<'a> DataView<'a> {
    /// Create a validated view over a feature and a reward matrix.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EmptyInput`] if the feature matrix has no rows.
    /// - [`SearchError::InvalidDimensions`] if the matrices disagree on the
    ///   number of rows, or the feature matrix has no columns.
    /// - [`SearchError::InvalidHyperparameter`] if there are fewer than two
    ///   reward columns (a one-action problem has nothing to search over).
    pub fn new(
        features: ArrayView2<'a, f64>,
        rewards: ArrayView2<'a, f64>,
    ) -> Result<Self, SearchError> {
        if features.nrows() == 0 {
            return Err(SearchError::EmptyInput);
        }
        if rewards.nrows() != features.nrows() {
            return Err(SearchError::InvalidDimensions {
                what: "reward matrix rows",
                expected: features.nrows(),
                actual: rewards.nrows(),
            });
        }
        if features.ncols() == 0 {
            return Err(SearchError::InvalidDimensions {
                what: "feature matrix columns",
                expected: 1,
                actual: 0,
            });
        }
        if rewards.ncols() < 2 {
            return Err(SearchError::InvalidHyperparameter {
                name: "reward matrix columns",
                requirement: ">= 2",
                value: rewards.ncols(),
            });
        }
        Ok(Self { features, rewards })
    }

    /// Number of samples (rows in both matrices).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features (columns of `X`).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Number of actions (columns of `Γ`).
    #[inline]
    pub fn n_actions(&self) -> usize {
        self.rewards.ncols()
    }

    /// Feature value `X[sample, dim]`.
    #[inline]
    pub fn feature(&self, sample: usize, dim: usize) -> f64 {
        self.features[[sample, dim]]
    }

    /// Reward `Γ[sample, action]`.
    #[inline]
    pub fn reward(&self, sample: usize, action: usize) -> f64 {
        self.rewards[[sample, action]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn accepts_matching_matrices() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let gamma = array![[0.0, 1.0], [1.0, 0.0]];
        let data = DataView::new(x.view(), gamma.view()).unwrap();

        assert_eq!(data.n_samples(), 2);
        assert_eq!(data.n_features(), 2);
        assert_eq!(data.n_actions(), 2);
        assert_eq!(data.feature(1, 0), 3.0);
        assert_eq!(data.reward(0, 1), 1.0);
    }

    #[test]
    fn rejects_empty_input() {
        let x = ndarray::Array2::<f64>::zeros((0, 2));
        let gamma = ndarray::Array2::<f64>::zeros((0, 2));
        let err = DataView::new(x.view(), gamma.view()).unwrap_err();
        assert_eq!(err, SearchError::EmptyInput);
    }

    #[test]
    fn rejects_row_mismatch() {
        let x = array![[1.0], [2.0], [3.0]];
        let gamma = array![[0.0, 1.0], [1.0, 0.0]];
        let err = DataView::new(x.view(), gamma.view()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidDimensions { .. }));
    }

    #[test]
    fn rejects_single_action() {
        let x = array![[1.0], [2.0]];
        let gamma = array![[0.0], [1.0]];
        let err = DataView::new(x.view(), gamma.view()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidHyperparameter { .. }));
    }

    #[test]
    fn rejects_zero_features() {
        let x = ndarray::Array2::<f64>::zeros((2, 0));
        let gamma = array![[0.0, 1.0], [1.0, 0.0]];
        let err = DataView::new(x.view(), gamma.view()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidDimensions { .. }));
    }

    #[test]
    fn view_is_cheap_to_copy() {
        let x = array![[1.0], [2.0]];
        let gamma = array![[0.0, 1.0], [1.0, 0.0]];
        let data = DataView::new(x.view(), gamma.view()).unwrap();
        let copy = data;
        assert_eq!(copy.n_samples(), data.n_samples());
    }
}
