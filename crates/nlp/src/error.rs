//! Error types for tree construction and composition.

use compositional_core::CoreError;
use thiserror::Error;

/// Errors that can occur while building or evaluating a parse tree.
///
/// A token without a vector is not an error: it resolves to an absent
/// value and the composition rules decide what happens to it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NlpError {
    /// Malformed bracket string.
    #[error("Parse error at byte {position}: {message}")]
    Parse { position: usize, message: String },

    /// Tag count differs from token count in a flat sentence.
    #[error("Shape mismatch: {tags} tags for {tokens} tokens")]
    ShapeMismatch { tags: usize, tokens: usize },

    /// A leaf already holds a value and a second one was inserted.
    #[error("The node already has child '{existing}'. Cannot insert '{new}'")]
    ChildAlreadyExists { existing: String, new: String },

    /// A vector of the wrong dimension was added to a vector source.
    #[error("Vector for '{word}' has dimension {got}, expected {expected}")]
    DimensionMismatch {
        word: String,
        expected: usize,
        got: usize,
    },

    /// Two operands could not be composed.
    #[error("Composition failed: {0}")]
    Composition(#[from] CoreError),
}

impl NlpError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        NlpError::Parse {
            position,
            message: message.into(),
        }
    }
}
