//! Error types for annotation pipelines.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while annotating a document.
///
/// Pipeline stages that sit behind a trait ([`Segmenter`](crate::Segmenter),
/// [`SentimentModel`](crate::SentimentModel), [`KnowledgeBase`](crate::KnowledgeBase))
/// report failures through these variants. The annotator degrades gracefully
/// where the contract allows it and propagates the rest.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The segmentation backend failed to produce a token stream.
    #[error("segmentation failed: {0}")]
    Segmentation(String),

    /// The sentiment model failed to score the document.
    #[error("sentiment scoring failed: {0}")]
    Sentiment(String),

    /// The knowledge base could not be read or written.
    #[error("knowledge base error: {0}")]
    Knowledge(String),

    /// A single recognizer failed on this document.
    #[error("recognizer {recognizer} failed: {message}")]
    Recognition {
        /// Stable name of the recognizer that failed.
        recognizer: &'static str,
        /// Human-readable description of the failure.
        message: String,
    },

    /// The caller handed us input the pipeline cannot accept.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Segmentation failure with a formatted message.
    pub fn segmentation(msg: impl Into<String>) -> Self {
        Error::Segmentation(msg.into())
    }

    /// Sentiment failure with a formatted message.
    pub fn sentiment(msg: impl Into<String>) -> Self {
        Error::Sentiment(msg.into())
    }

    /// Knowledge-base failure with a formatted message.
    pub fn knowledge(msg: impl Into<String>) -> Self {
        Error::Knowledge(msg.into())
    }

    /// Recognizer failure tagged with the recognizer's stable name.
    pub fn recognition(recognizer: &'static str, msg: impl Into<String>) -> Self {
        Error::Recognition {
            recognizer,
            message: msg.into(),
        }
    }

    /// Invalid caller input.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
