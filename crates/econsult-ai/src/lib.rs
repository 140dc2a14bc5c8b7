//! Sentiment classification for consultation comments: an ONNX Runtime
//! sequence classifier when a model is available, keyword rules otherwise.

pub mod classifier;
pub mod labels;
pub mod rules;

#[cfg(feature = "onnx")]
mod model;
#[cfg(feature = "onnx")]
pub use model::OnnxSentimentModel;

pub use classifier::{SentenceModel, SentimentClassifier, global, install};
pub use labels::LabelMap;
