//! Optimality and monotonicity checks against a brute-force reference.

use approx::assert_abs_diff_eq;
use ndarray::ArrayView2;
use policytree::testing::{gridded_features, naive_best_reward, random_features, random_rewards};
use policytree::{tree_search, SearchParams};

fn collected_reward(gamma: ArrayView2<'_, f64>, actions: &[usize]) -> f64 {
    actions
        .iter()
        .enumerate()
        .map(|(i, &a)| gamma[[i, a]])
        .sum()
}

/// The exact search matches exhaustive enumeration over all depth-bounded
/// trees, across a grid of shapes and seeds.
#[test]
fn exact_search_matches_brute_force() {
    for (seed, n, p, d, depth) in [
        (1u64, 8usize, 1usize, 2usize, 1usize),
        (2, 10, 2, 2, 1),
        (3, 10, 2, 3, 2),
        (4, 12, 3, 2, 2),
        (5, 9, 1, 3, 2),
        (6, 12, 2, 2, 2),
    ] {
        let x = random_features(n, p, seed);
        let gamma = random_rewards(n, d, seed.wrapping_mul(31));

        let tree = tree_search(x.view(), gamma.view(), &SearchParams::exact(depth)).unwrap();
        let reference = naive_best_reward(x.view(), gamma.view(), depth, 1);

        assert_abs_diff_eq!(tree.reward(), reference, epsilon = 1e-9);
    }
}

/// Duplicate-heavy features: equal values are never split apart, and the
/// search still matches the reference (which can only threshold at
/// observed values).
#[test]
fn exact_search_matches_brute_force_with_ties() {
    for seed in [7u64, 8, 9, 10] {
        let x = gridded_features(12, 2, 3, seed);
        let gamma = random_rewards(12, 2, seed.wrapping_mul(17));

        let tree = tree_search(x.view(), gamma.view(), &SearchParams::exact(2)).unwrap();
        let reference = naive_best_reward(x.view(), gamma.view(), 2, 1);

        assert_abs_diff_eq!(tree.reward(), reference, epsilon = 1e-9);
    }
}

/// min_node_size constrains both implementations identically.
#[test]
fn constrained_search_matches_brute_force() {
    for seed in [11u64, 12, 13] {
        let x = random_features(12, 2, seed);
        let gamma = random_rewards(12, 2, seed.wrapping_mul(7));

        for q in [2usize, 3, 4] {
            let tree = tree_search(x.view(), gamma.view(), &SearchParams::new(2, 1, q)).unwrap();
            let reference = naive_best_reward(x.view(), gamma.view(), 2, q);
            assert_abs_diff_eq!(tree.reward(), reference, epsilon = 1e-9);
        }
    }
}

/// Exact search never does worse than the split-stepped approximation.
#[test]
fn split_step_is_monotone() {
    for seed in [21u64, 22, 23, 24] {
        let x = random_features(20, 2, seed);
        let gamma = random_rewards(20, 3, seed.wrapping_mul(13));

        let exact = tree_search(x.view(), gamma.view(), &SearchParams::exact(2)).unwrap();
        for s in [2usize, 3, 5] {
            let stepped =
                tree_search(x.view(), gamma.view(), &SearchParams::new(2, s, 1)).unwrap();
            assert!(
                exact.reward() >= stepped.reward(),
                "seed {seed}, split_step {s}: exact {} < stepped {}",
                exact.reward(),
                stepped.reward()
            );
        }
    }
}

/// The root reward is exactly the reward the tree collects on its own
/// training data.
#[test]
fn training_predictions_account_for_the_reward() {
    for seed in [31u64, 32, 33, 34, 35] {
        let n = 10 + (seed as usize % 40);
        let p = 1 + (seed as usize % 3);
        let d = 2 + (seed as usize % 2);
        let depth = seed as usize % 3;

        let x = random_features(n, p, seed);
        let gamma = random_rewards(n, d, seed.wrapping_mul(41));

        let tree = tree_search(x.view(), gamma.view(), &SearchParams::exact(depth)).unwrap();
        let actions = tree.predict(x.view()).unwrap();

        assert_abs_diff_eq!(
            collected_reward(gamma.view(), &actions),
            tree.reward(),
            epsilon = 1e-9
        );
    }
}

/// Depth budgets are respected.
#[test]
fn returned_depth_never_exceeds_budget() {
    for depth in 0..4usize {
        let x = gridded_features(24, 3, 5, 77);
        let gamma = random_rewards(24, 3, 78);
        let tree = tree_search(x.view(), gamma.view(), &SearchParams::exact(depth)).unwrap();
        assert!(tree.depth() <= depth, "depth {} > budget {depth}", tree.depth());
    }
}
