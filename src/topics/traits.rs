// Topic modeler trait: swap-ready abstraction.
//
// Topic modeling is an optional step of a comparison. The default
// implementation groups co-occurring TF-IDF keywords; a clustering model
// could be slotted in behind the same trait.

use anyhow::Result;

use super::clusters::TopicCluster;

/// Trait for grouping a period's comments into weighted topic clusters.
pub trait TopicModeler {
    /// Analyze the comment texts of one period. An empty result is valid
    /// when the texts carry no usable keywords.
    fn model(&self, texts: &[String]) -> Result<Vec<TopicCluster>>;
}
