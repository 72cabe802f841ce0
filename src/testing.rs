//! Testing utilities: seeded synthetic inputs and a brute-force
//! reference search.
//!
//! Used by the integration tests and benches. The reference search is
//! exponential and only meant for small instances.

use ndarray::{Array2, ArrayView2};
use rand::prelude::*;

/// Random feature matrix with values uniform in `[0, 1)`.
pub fn random_features(n_samples: usize, n_features: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n_samples, n_features), |_| rng.gen::<f64>())
}

/// Random feature matrix drawn from a small integer grid, to exercise
/// duplicate values and tie-breaking.
pub fn gridded_features(
    n_samples: usize,
    n_features: usize,
    n_levels: usize,
    seed: u64,
) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n_samples, n_features), |_| {
        rng.gen_range(0..n_levels) as f64
    })
}

/// Random reward matrix with values uniform in `[-1, 1)`.
pub fn random_rewards(n_samples: usize, n_actions: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n_samples, n_actions), |_| rng.gen::<f64>() * 2.0 - 1.0)
}

/// Best achievable reward of any depth-bounded axis-aligned tree, by
/// exhaustive enumeration over row subsets.
///
/// Same split semantics as the real search: thresholds at observed
/// feature values, `value <= threshold` goes left, both children of every
/// split must keep at least `min_node_size` rows. A leaf is always an
/// alternative, so the result is the maximum over all trees of depth at
/// most `depth`.
pub fn naive_best_reward(
    features: ArrayView2<'_, f64>,
    rewards: ArrayView2<'_, f64>,
    depth: usize,
    min_node_size: usize,
) -> f64 {
    let rows: Vec<usize> = (0..features.nrows()).collect();
    brute_force(features, rewards, &rows, depth, min_node_size)
}

fn best_leaf_reward(rewards: ArrayView2<'_, f64>, rows: &[usize]) -> f64 {
    (0..rewards.ncols())
        .map(|action| rows.iter().map(|&i| rewards[[i, action]]).sum::<f64>())
        .fold(f64::NEG_INFINITY, f64::max)
}

fn brute_force(
    features: ArrayView2<'_, f64>,
    rewards: ArrayView2<'_, f64>,
    rows: &[usize],
    depth: usize,
    min_node_size: usize,
) -> f64 {
    let mut best = best_leaf_reward(rewards, rows);
    if depth == 0 || rows.len() < 2 {
        return best;
    }

    for feature in 0..features.ncols() {
        let mut values: Vec<f64> = rows.iter().map(|&i| features[[i, feature]]).collect();
        values.sort_unstable_by(f64::total_cmp);
        values.dedup();
        // Every distinct value except the largest is a candidate threshold.
        for &threshold in &values[..values.len().saturating_sub(1)] {
            let (left, right): (Vec<usize>, Vec<usize>) = rows
                .iter()
                .copied()
                .partition(|&i| features[[i, feature]] <= threshold);
            if left.len() < min_node_size || right.len() < min_node_size {
                continue;
            }
            let score = brute_force(features, rewards, &left, depth - 1, min_node_size)
                + brute_force(features, rewards, &right, depth - 1, min_node_size);
            if score > best {
                best = score;
            }
        }
    }

    best
}
