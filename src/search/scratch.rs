//! Cumulative reward sums for the leaf-parent fast path.

use crate::data::DataView;

use super::sorted_sets::SortedSet;

/// Per-action cumulative reward sums over one sorted sweep order.
///
/// Conceptually a `(n_actions × (n_samples + 1))` array where entry
/// `(a, k)` is the sum of `Γ[·, a]` over the first `k` points of the
/// current sweep; column 0 is the zero sentinel. One scratch is allocated
/// per search and reused by every leaf-parent call down the recursion.
/// [`fill`](RewardScratch::fill) overwrites columns `1..=len` for the set
/// at hand; the sentinel column is never written after construction.
#[derive(Debug)]
pub(crate) struct RewardScratch {
    stride: usize,
    sums: Vec<f64>,
}

impl RewardScratch {
    pub(crate) fn new(n_actions: usize, n_samples: usize) -> Self {
        let stride = n_samples + 1;
        Self {
            stride,
            sums: vec![0.0; n_actions * stride],
        }
    }

    /// Recompute the cumulative sums for `set`'s iteration order.
    ///
    /// Sums accumulate in natural forward order, action by action, so the
    /// result is deterministic for a given sweep order.
    pub(crate) fn fill(&mut self, set: &SortedSet, data: &DataView<'_>) {
        for action in 0..data.n_actions() {
            let base = action * self.stride;
            let mut running = 0.0;
            for (k, point) in set.iter().enumerate() {
                running += point.reward(data, action);
                self.sums[base + k + 1] = running;
            }
        }
    }

    /// Sum of `Γ[·, action]` over the first `count` points of the last
    /// filled sweep order.
    #[inline]
    pub(crate) fn prefix(&self, action: usize, count: usize) -> f64 {
        self.sums[action * self.stride + count]
    }
}
