//! Error types for gnnx_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur in gnnx operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid tensor shape provided.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        got: String,
    },

    /// Shape mismatch between tensors.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Target node index outside the graph.
    #[error("Node index {node} out of bounds for graph with {nodes} nodes")]
    NodeOutOfBounds {
        /// The requested node index.
        node: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },

    /// Target class index outside the model output.
    #[error("Class index {class} out of bounds for model with {classes} classes")]
    ClassOutOfBounds {
        /// The requested class index.
        class: usize,
        /// Number of classes the model scores.
        classes: usize,
    },

    /// A gradient could not be extracted from the autodiff graph.
    #[error("Gradient unavailable: {0}")]
    GradientUnavailable(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}
