//! # gnnx_core
//!
//! Core types and traits for gnnx graph neural network explainability.
//!
//! This crate provides:
//! - [`Seed`] for deterministic random number generation
//! - [`GraphShape`] for graph tensor shape metadata
//! - [`Graph`] pairing node features with a dense adjacency matrix
//! - [`NodeClassificationModel`] and [`AttentionModel`] traits that
//!   saliency computations differentiate through
//! - Error types and common utilities
//!
//! ## Shape Convention
//!
//! Graph data follows the convention `(N, F)`:
//! - `N`: Number of nodes
//! - `F`: Feature dimension per node
//!
//! The adjacency matrix is dense `N x N` with non-negative edge weights
//! and a zero diagonal; models insert self-loops themselves.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod graph;
mod model_trait;
mod seed;
mod shape;

pub use error::{CoreError, Result};
pub use graph::Graph;
pub use model_trait::{AttentionModel, NodeClassificationModel};
pub use seed::Seed;
pub use shape::GraphShape;

/// Backend type aliases for convenience
pub mod backend {
    pub use burn_autodiff::Autodiff;

    #[cfg(feature = "backend-ndarray")]
    pub use burn_ndarray::NdArray;
}
