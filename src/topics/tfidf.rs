// TF-IDF topic modeling for one comparison period.
//
// Each comment is a separate document for IDF purposes, so words that appear
// in nearly every comment of the period are downweighted and words specific
// to a subset of comments rise. The top keywords are then grouped greedily by
// how often they co-occur in the same comment.

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};
use tracing::{debug, info};

use super::clusters::TopicCluster;
use super::traits::TopicModeler;

/// Related keywords pulled into a cluster besides its seed.
const MAX_RELATED_PER_CLUSTER: usize = 5;

pub struct TfIdfTopicModeler {
    /// How many top keywords to extract before clustering
    pub top_n_keywords: usize,
    /// Upper bound on clusters per period
    pub max_clusters: usize,
}

impl Default for TfIdfTopicModeler {
    fn default() -> Self {
        Self {
            top_n_keywords: 40,
            max_clusters: 6,
        }
    }
}

impl TopicModeler for TfIdfTopicModeler {
    fn model(&self, texts: &[String]) -> Result<Vec<TopicCluster>> {
        let documents: Vec<String> = texts
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.to_lowercase())
            .collect();
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let stop_words: Vec<String> = get(LANGUAGE::English);
        let tfidf = TfIdf::new(TfIdfParams::UnprocessedDocuments(
            &documents,
            &stop_words,
            None,
        ));
        let ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(self.top_n_keywords);

        if ranked.is_empty() {
            debug!(documents = documents.len(), "TF-IDF produced no keywords");
            return Ok(Vec::new());
        }

        info!(
            keywords = ranked.len(),
            top_keyword = &ranked[0].0,
            top_score = ranked[0].1,
            "Extracted TF-IDF keywords for period"
        );

        Ok(cluster_keywords(&ranked, &documents, self.max_clusters))
    }
}

/// Greedy co-occurrence clustering.
///
/// Seeds are taken in score order; each seed pulls in the unassigned
/// keywords it shares the most comments with. Weights are the share of total
/// keyword score held by each cluster and sum to 1.0.
fn cluster_keywords(
    ranked: &[(String, f32)],
    documents: &[String],
    max_clusters: usize,
) -> Vec<TopicCluster> {
    let n = ranked.len();

    // Which keywords appear in each document
    let doc_keywords: Vec<Vec<usize>> = documents
        .iter()
        .map(|doc| {
            ranked
                .iter()
                .enumerate()
                .filter(|(_, (kw, _))| doc.contains(kw.as_str()))
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    let mut cooccurrence = vec![vec![0u32; n]; n];
    for present in &doc_keywords {
        for &i in present {
            for &j in present {
                if i != j {
                    cooccurrence[i][j] += 1;
                }
            }
        }
    }

    let total_score: f32 = ranked.iter().map(|(_, s)| s).sum();
    let mut assigned = vec![false; n];
    let mut clusters = Vec::new();

    for seed in 0..n {
        if clusters.len() >= max_clusters {
            break;
        }
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;

        let mut candidates: Vec<(usize, u32)> = (0..n)
            .filter(|&i| !assigned[i] && cooccurrence[seed][i] > 0)
            .map(|i| (i, cooccurrence[seed][i]))
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut members = vec![seed];
        for (idx, _) in candidates.into_iter().take(MAX_RELATED_PER_CLUSTER) {
            assigned[idx] = true;
            members.push(idx);
        }

        let score: f32 = members.iter().map(|&i| ranked[i].1).sum();
        let keywords: Vec<String> = members.iter().map(|&i| ranked[i].0.clone()).collect();

        clusters.push(TopicCluster {
            label: keywords.iter().take(3).cloned().collect::<Vec<_>>().join(" / "),
            keywords,
            weight: if total_score > 0.0 {
                (score / total_score) as f64
            } else {
                0.0
            },
        });
    }

    let weight_sum: f64 = clusters.iter().map(|c| c.weight).sum();
    if weight_sum > 0.0 {
        for cluster in &mut clusters {
            cluster.weight /= weight_sum;
        }
    }

    clusters.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    clusters
}
