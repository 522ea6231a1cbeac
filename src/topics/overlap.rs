// Topic overlap between two periods.
//
// Weighted Jaccard over the flattened keyword weights:
//
//   sum(min(weight_1, weight_2)) / sum(max(weight_1, weight_2))
//
// 1.0 means both periods talk about the same things in the same
// proportions; 0.0 means no shared topics at all.

use std::collections::{HashMap, HashSet};

use super::clusters::{keyword_weights, TopicCluster};

/// Weighted Jaccard similarity between two periods' topic clusters.
pub fn topic_overlap(period1: &[TopicCluster], period2: &[TopicCluster]) -> f64 {
    jaccard_from_weights(&keyword_weights(period1), &keyword_weights(period2))
}

/// Weighted Jaccard from raw keyword weight maps.
pub fn jaccard_from_weights(
    weights_a: &HashMap<String, f64>,
    weights_b: &HashMap<String, f64>,
) -> f64 {
    let all_keys: HashSet<&String> = weights_a.keys().chain(weights_b.keys()).collect();

    let mut min_sum = 0.0;
    let mut max_sum = 0.0;

    for key in all_keys {
        // Negative weights are not meaningful here
        let a = weights_a.get(key).copied().unwrap_or(0.0).max(0.0);
        let b = weights_b.get(key).copied().unwrap_or(0.0).max(0.0);
        min_sum += a.min(b);
        max_sum += a.max(b);
    }

    if max_sum <= f64::EPSILON {
        0.0
    } else {
        min_sum / max_sum
    }
}
