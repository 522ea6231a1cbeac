// Keyword frequency tables and cross-period deltas.
//
// A table is built once per period by counting every phrase the extractor
// returns for every comment. Comparing two tables walks the union of their
// keywords, so a keyword present in only one period still shows up with its
// full count as the delta.

use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::traits::KeywordExtractor;

/// Keyword -> occurrence count for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u32>,
}

impl FrequencyTable {
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = HashMap::new();
        for kw in keywords {
            *counts.entry(kw.into()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count for `keyword`, 0 if absent.
    pub fn get(&self, keyword: &str) -> u32 {
        self.counts.get(keyword).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Total number of extracted phrases, duplicates included.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// Keywords by descending count, ties in lexical order.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> =
            self.counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Change in a keyword's count from period 1 to period 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyDelta {
    pub keyword: String,
    pub delta: i64,
}

/// Run the extractor over each lower-cased text and count every phrase returned.
pub fn extract_frequencies(
    extractor: &dyn KeywordExtractor,
    texts: &[String],
    top_n: usize,
) -> Result<FrequencyTable> {
    let mut phrases = Vec::new();
    for text in texts {
        phrases.extend(extractor.extract(&text.to_lowercase(), top_n)?);
    }

    let table = FrequencyTable::from_keywords(phrases);
    debug!(
        texts = texts.len(),
        distinct = table.len(),
        total = table.total(),
        "Built keyword frequency table"
    );
    Ok(table)
}

/// Delta (b - a) for every keyword in either table.
///
/// Sorted by delta descending; equal deltas are ordered by keyword so the
/// output does not depend on hash iteration order.
pub fn compare(a: &FrequencyTable, b: &FrequencyTable) -> Vec<FrequencyDelta> {
    let universe: BTreeSet<&str> = a.keywords().chain(b.keywords()).collect();

    let mut deltas: Vec<FrequencyDelta> = universe
        .into_iter()
        .map(|kw| FrequencyDelta {
            keyword: kw.to_string(),
            delta: b.get(kw) as i64 - a.get(kw) as i64,
        })
        .collect();

    deltas.sort_by(|x, y| y.delta.cmp(&x.delta).then_with(|| x.keyword.cmp(&y.keyword)));
    deltas
}
