// Topic clusters: groups of related keywords with a prominence weight.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single topic cluster: a group of related keywords with a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCluster {
    /// Human-readable label built from the leading keywords
    pub label: String,
    /// The keywords that make up this cluster, in descending score order
    pub keywords: Vec<String>,
    /// Normalized weight (0.0 to 1.0); weights of one period sum to 1.0
    pub weight: f64,
}

/// Flatten clusters into keyword -> weight, splitting each cluster's weight
/// evenly across its keywords. A keyword in several clusters accumulates.
pub fn keyword_weights(clusters: &[TopicCluster]) -> HashMap<String, f64> {
    let mut weights = HashMap::new();
    for cluster in clusters {
        let per_keyword = cluster.weight / cluster.keywords.len().max(1) as f64;
        for keyword in &cluster.keywords {
            *weights.entry(keyword.clone()).or_insert(0.0) += per_keyword;
        }
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(label: &str, keywords: &[&str], weight: f64) -> TopicCluster {
        TopicCluster {
            label: label.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            weight,
        }
    }

    #[test]
    fn test_keyword_weights_split_evenly() {
        let weights = keyword_weights(&[cluster("a / b", &["a", "b"], 0.6), cluster("c", &["c"], 0.4)]);
        assert!((weights["a"] - 0.3).abs() < 0.001);
        assert!((weights["b"] - 0.3).abs() < 0.001);
        assert!((weights["c"] - 0.4).abs() < 0.001);
    }

    #[test]
    fn test_keyword_weights_accumulate() {
        let weights = keyword_weights(&[cluster("x", &["shared"], 0.3), cluster("y", &["shared"], 0.2)]);
        assert!((weights["shared"] - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_empty_keywords_contribute_nothing() {
        assert!(keyword_weights(&[cluster("empty", &[], 0.5)]).is_empty());
    }
}
