// Topic modeling: optional per-period topic clusters and their overlap.

pub mod clusters;
pub mod overlap;
pub mod tfidf;
pub mod traits;
