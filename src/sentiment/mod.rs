// Sentiment classification: trait-based abstraction for swappable models.
//
// The SentimentClassifier trait defines the interface. OnnxSentimentClassifier
// implements it with a local twitter-roberta model; the handle is built once
// at startup and passed into the pipeline.

pub mod download;
pub mod onnx;
pub mod tally;
pub mod traits;
