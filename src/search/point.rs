//! Sample handles used inside the search.

use crate::data::DataView;

/// Handle to one training sample.
///
/// Points are what the per-dimension sorted sets store; they are plain
/// indices into the [`DataView`] and cheap to copy. Ordering is not
/// intrinsic: a point sorts differently along each feature dimension,
/// so comparisons live with the sorted sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Point(pub(crate) u32);

impl Point {
    /// The sample's row index.
    #[inline]
    pub(crate) fn sample(self) -> usize {
        self.0 as usize
    }

    /// Feature value `X[sample, dim]`.
    #[inline]
    pub(crate) fn value(self, data: &DataView<'_>, dim: usize) -> f64 {
        data.feature(self.sample(), dim)
    }

    /// Reward `Γ[sample, action]`.
    #[inline]
    pub(crate) fn reward(self, data: &DataView<'_>, action: usize) -> f64 {
        data.reward(self.sample(), action)
    }
}
