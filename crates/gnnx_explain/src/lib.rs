//! # gnnx_explain
//!
//! Saliency maps for graph neural networks.
//!
//! This crate provides:
//! - [`IntegratedGradients`] - path-integral attributions over node
//!   features and edges for any node classification model
//! - [`IntegratedGradientsGAT`] - the same attributions specialised to
//!   graph attention networks
//! - [`GradientSaliencyGAT`] - single-evaluation gradient saliency and
//!   attention-coefficient explanations for graph attention networks

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod integrated_gradients;
mod integrated_gradients_gat;
mod saliency;
mod saliency_gat;

pub use integrated_gradients::IntegratedGradients;
pub use integrated_gradients_gat::IntegratedGradientsGAT;
pub use saliency::{
    random_baseline, zero_baseline, AttentionAggregation, BaselineType, EdgePath,
    IntegratedGradientsConfig, SaliencyKind, SaliencyMap,
};
pub use saliency_gat::GradientSaliencyGAT;
