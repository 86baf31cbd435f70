//! # gnnx_models
//!
//! Reference graph models for gnnx explainability.
//!
//! This crate provides the models that saliency maps are computed against:
//!
//! - [`Gcn`] - graph convolutional network with symmetric adjacency
//!   normalization
//! - [`Gat`] - graph attention network exposing per-layer attention
//!   coefficients
//!
//! Both models keep the adjacency matrix on the differentiation path, so
//! edge-level attributions are available to the explain crate.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod gat;
pub mod gcn;
pub mod traits;

pub use gat::{Gat, GatConfig};
pub use gcn::{Gcn, GcnConfig};
