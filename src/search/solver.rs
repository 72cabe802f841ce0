//! The exhaustive split search.
//!
//! Three code paths, dispatched on the remaining depth:
//!
//! - level 0: scan the points once and pick the single best action.
//! - level 1: the leaf-parent fast path. Both children are leaves, so the
//!   best split under each feature falls out of one cumulative-sum sweep
//!   in O(n·d) per feature, with no recursion and no set maintenance.
//! - level ≥ 2: for every feature, sweep the candidate boundary from left
//!   to right, migrating one point at a time between the left and right
//!   per-dimension sorted views, and recurse on both sides.
//!
//! Tie-breaking is strict-greater everywhere: the first feature (lowest
//! index) and then the first split position reaching the best reward is
//! the one kept. Candidate gating (duplicate feature values, minimum node
//! size, split stepping) is identical between the two split paths.

use crate::data::DataView;
use crate::error::SearchError;
use crate::repr::Node;

use super::params::SearchParams;
use super::scratch::RewardScratch;
use super::sorted_sets::SortedSets;

/// Run the search over the full point set.
pub(crate) fn search(data: &DataView<'_>, params: &SearchParams) -> Result<Node, SearchError> {
    let sets = SortedSets::full(data);
    let mut scratch = RewardScratch::new(data.n_actions(), data.n_samples());
    find_best_split(&sets, params.depth, data, &mut scratch, params)
}

/// Best single action over the points: the leaf solver.
fn level_zero(sets: &SortedSets, data: &DataView<'_>) -> Node {
    let mut best_action = 0;
    let mut best_reward = f64::NEG_INFINITY;

    for action in 0..data.n_actions() {
        let mut sum = 0.0;
        for point in sets.set(0).iter() {
            sum += point.reward(data, action);
        }
        if sum > best_reward {
            best_reward = sum;
            best_action = action;
        }
    }

    Node::Leaf {
        action: best_action,
        reward: best_reward,
    }
}

/// The best split candidate seen so far in the leaf-parent sweep.
struct LeafPairChoice {
    score: f64,
    left_reward: f64,
    right_reward: f64,
    left_action: usize,
    right_action: usize,
    feature: usize,
    threshold: f64,
}

/// Best split with two leaf children: the leaf-parent fast path.
///
/// For each feature the cumulative sums over the sweep order give every
/// prefix/suffix reward pair in O(1), so all candidate boundaries of all
/// features cost O(p·n·d) total.
fn level_one(
    sets: &SortedSets,
    data: &DataView<'_>,
    scratch: &mut RewardScratch,
    params: &SearchParams,
) -> Node {
    let m = sets.len();
    let mut best: Option<LeafPairChoice> = None;

    for feature in 0..data.n_features() {
        let set = sets.set(feature);
        scratch.fill(set, data);

        let mut split_counter = 0usize;
        for (idx, point) in set.iter().enumerate() {
            // `n_left` points would go left if we split after `point`.
            let n_left = idx + 1;
            if n_left == m {
                break;
            }
            let value = point.value(data, feature);
            let next_value = set.get(n_left).value(data, feature);
            split_counter += 1;
            if value == next_value {
                continue;
            }
            if n_left < params.min_node_size || m - n_left < params.min_node_size {
                continue;
            }
            if split_counter >= params.split_step {
                split_counter = 0;
            } else {
                continue;
            }

            let mut left_best = f64::NEG_INFINITY;
            let mut left_action = 0;
            let mut right_best = f64::NEG_INFINITY;
            let mut right_action = 0;
            for action in 0..data.n_actions() {
                let left_reward = scratch.prefix(action, n_left);
                let right_reward = scratch.prefix(action, m) - left_reward;
                if left_best < left_reward {
                    left_best = left_reward;
                    left_action = action;
                }
                if right_best < right_reward {
                    right_best = right_reward;
                    right_action = action;
                }
            }

            let score = left_best + right_best;
            let adopt = match &best {
                None => true,
                Some(b) => b.score < score,
            };
            if adopt {
                best = Some(LeafPairChoice {
                    score,
                    left_reward: left_best,
                    right_reward: right_best,
                    left_action,
                    right_action,
                    feature,
                    threshold: value,
                });
            }
        }
    }

    match best {
        // No admissible boundary (constant features, or the node-size
        // constraint rejected everything): one leaf over the whole set.
        None => level_zero(sets, data),
        // Both sides want the same action: collapse into one leaf.
        Some(b) if b.left_action == b.right_action => Node::Leaf {
            action: b.left_action,
            reward: b.score,
        },
        Some(b) => Node::Split {
            feature: b.feature,
            threshold: b.threshold,
            reward: b.score,
            left: Box::new(Node::Leaf {
                action: b.left_action,
                reward: b.left_reward,
            }),
            right: Box::new(Node::Leaf {
                action: b.right_action,
                reward: b.right_reward,
            }),
        },
    }
}

/// Recursive search for the best tree of at most `level` splits.
pub(crate) fn find_best_split(
    sets: &SortedSets,
    level: usize,
    data: &DataView<'_>,
    scratch: &mut RewardScratch,
    params: &SearchParams,
) -> Result<Node, SearchError> {
    if sets.is_empty() {
        debug_assert!(false, "recursion reached an empty point set");
        return Err(SearchError::InternalInvariantViolation(
            "recursion reached an empty point set",
        ));
    }

    match level {
        // Only reachable when the entry point is called with depth 0.
        0 => Ok(level_zero(sets, data)),
        1 => Ok(level_one(sets, data, scratch, params)),
        _ => {
            let m = sets.len();
            let mut best: Option<(Node, Node, usize, f64)> = None;

            for feature in 0..data.n_features() {
                let mut right = sets.clone();
                let mut left = SortedSets::empty(data);
                let mut split_counter = 0usize;

                for n_left in 1..m {
                    let Some(point) = right.set(feature).first() else {
                        return Err(SearchError::InternalInvariantViolation(
                            "right sorted set drained before the sweep finished",
                        ));
                    };
                    if !right.migrate(&mut left, point, data) {
                        return Err(SearchError::InternalInvariantViolation(
                            "point absent from a sorted set during migration",
                        ));
                    }
                    let Some(next) = right.set(feature).first() else {
                        return Err(SearchError::InternalInvariantViolation(
                            "right sorted set drained before the sweep finished",
                        ));
                    };

                    split_counter += 1;
                    let value = point.value(data, feature);
                    if value == next.value(data, feature) {
                        continue;
                    }
                    if n_left < params.min_node_size || m - n_left < params.min_node_size {
                        continue;
                    }
                    if split_counter >= params.split_step {
                        split_counter = 0;
                    } else {
                        continue;
                    }

                    let left_child = find_best_split(&left, level - 1, data, scratch, params)?;
                    let right_child = find_best_split(&right, level - 1, data, scratch, params)?;
                    let score = left_child.reward() + right_child.reward();

                    let adopt = match &best {
                        None => true,
                        Some((bl, br, _, _)) => bl.reward() + br.reward() < score,
                    };
                    if adopt {
                        best = Some((left_child, right_child, feature, value));
                    }
                }
            }

            match best {
                None => Ok(level_zero(sets, data)),
                Some((left, right, feature, threshold)) => {
                    let reward = left.reward() + right.reward();
                    // Two leaves carrying the same action collapse into one.
                    if let (Some(a), Some(b)) = (left.leaf_action(), right.leaf_action()) {
                        if a == b {
                            return Ok(Node::Leaf { action: a, reward });
                        }
                    }
                    Ok(Node::Split {
                        feature,
                        threshold,
                        reward,
                        left: Box::new(left),
                        right: Box::new(right),
                    })
                }
            }
        }
    }
}
