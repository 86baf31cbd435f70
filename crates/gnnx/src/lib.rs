//! # gnnx
//!
//! Graph neural network explainability in Rust.
//!
//! gnnx computes saliency maps for graph neural networks: which node
//! features and which edges a trained model relied on for a prediction.
//!
//! - **Core**: graph container, shape metadata, model traits
//! - **Models**: reference GCN and GAT implementations to explain
//! - **Explain**: integrated gradients and gradient/attention saliency
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gnnx::prelude::*;
//!
//! // Wrap features and adjacency into a graph
//! let graph = Graph::from_arrays(features, adjacency, &device)?;
//!
//! // A trained model implementing NodeClassificationModel
//! let model = GcnConfig::new(n_feats, n_classes).init(&device);
//!
//! // Attribute a node's class score to features and edges
//! let ig = IntegratedGradients::new(model);
//! let node_masks = ig.node_masks(&graph, target_node, target_class)?;
//! let link_masks = ig.link_masks(&graph, target_node, target_class, EdgePath::Existing)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all crates
pub use gnnx_core as core;
pub use gnnx_explain as explain;
pub use gnnx_models as models;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use gnnx::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gnnx_core::{
        AttentionModel, Graph, GraphShape, NodeClassificationModel, Result, Seed,
    };

    // Models
    pub use gnnx_models::{Gat, GatConfig, Gcn, GcnConfig};

    // Explain
    pub use gnnx_explain::{
        AttentionAggregation, BaselineType, EdgePath, GradientSaliencyGAT, IntegratedGradients,
        IntegratedGradientsConfig, IntegratedGradientsGAT, SaliencyKind, SaliencyMap,
    };
}

/// All module for importing everything, including the baseline helpers.
pub mod all {
    pub use super::prelude::*;

    // Additional exports
    pub use gnnx_core::backend;
    pub use gnnx_core::CoreError;
    pub use gnnx_explain::{random_baseline, zero_baseline};
}
