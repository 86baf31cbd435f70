//! Graph convolutional network (GCN) model.

use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::{relu, softmax};
use serde::{Deserialize, Serialize};

/// Configuration for the GCN model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcnConfig {
    /// Feature dimension per node.
    pub in_features: usize,
    /// Number of output classes.
    pub n_classes: usize,
    /// Hidden layer width.
    pub hidden_dim: usize,
    /// Number of graph convolution layers.
    pub n_layers: usize,
    /// Dropout rate between layers. Keep at 0.0 when the model is used for
    /// saliency computation, so that explanation passes are deterministic.
    pub dropout: f64,
}

impl Default for GcnConfig {
    fn default() -> Self {
        Self {
            in_features: 1,
            n_classes: 2,
            hidden_dim: 16,
            n_layers: 2,
            dropout: 0.0,
        }
    }
}

impl GcnConfig {
    /// Create a new config.
    pub fn new(in_features: usize, n_classes: usize) -> Self {
        Self {
            in_features,
            n_classes,
            ..Default::default()
        }
    }

    /// Initialize the model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Gcn<B> {
        Gcn::new(self.clone(), device)
    }
}

/// Graph convolutional network for node classification.
///
/// Each layer propagates node representations through the symmetrically
/// normalized adjacency `D^-1/2 (A + I) D^-1/2` followed by a linear
/// projection. The normalization is recomputed inside `forward` from the
/// raw adjacency, so gradients of the output with respect to individual
/// edge weights are available to attribution methods.
///
/// Reference: Kipf & Welling, "Semi-Supervised Classification with Graph
/// Convolutional Networks", ICLR 2017.
#[derive(Module, Debug)]
pub struct Gcn<B: Backend> {
    /// Per-layer linear projections.
    layers: Vec<Linear<B>>,
    /// Dropout between layers.
    dropout: Dropout,
}

impl<B: Backend> Gcn<B> {
    /// Create a new GCN model.
    pub fn new(config: GcnConfig, device: &B::Device) -> Self {
        let n_layers = config.n_layers.max(1);

        let mut dims = Vec::with_capacity(n_layers + 1);
        dims.push(config.in_features);
        for _ in 1..n_layers {
            dims.push(config.hidden_dim);
        }
        dims.push(config.n_classes);

        let layers: Vec<_> = dims
            .windows(2)
            .map(|pair| LinearConfig::new(pair[0], pair[1]).init(device))
            .collect();

        let dropout = DropoutConfig::new(config.dropout).init();

        Self { layers, dropout }
    }

    /// Symmetrically normalize an adjacency matrix with self-loops.
    ///
    /// Degrees are clamped away from zero so isolated nodes do not produce
    /// non-finite values; with self-loops every degree is at least one.
    fn normalize(adjacency: Tensor<B, 2>) -> Tensor<B, 2> {
        let [n, _] = adjacency.dims();
        let device = adjacency.device();

        let with_loops = adjacency + Tensor::eye(n, &device);
        let degrees = with_loops.clone().sum_dim(1);
        let inv_sqrt = degrees.clamp_min(1e-12).sqrt().recip();

        with_loops * inv_sqrt.clone() * inv_sqrt.transpose()
    }

    /// Forward pass.
    ///
    /// # Arguments
    ///
    /// * `features` - Node features of shape `(n_nodes, in_features)`
    /// * `adjacency` - Edge weights of shape `(n_nodes, n_nodes)`
    ///
    /// # Returns
    ///
    /// Per-node logits of shape `(n_nodes, n_classes)`.
    pub fn forward(&self, features: Tensor<B, 2>, adjacency: Tensor<B, 2>) -> Tensor<B, 2> {
        let propagate = Self::normalize(adjacency);

        let mut h = features;
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            h = propagate.clone().matmul(layer.forward(h));
            if i < last {
                h = relu(h);
                h = self.dropout.forward(h);
            }
        }
        h
    }

    /// Forward pass returning per-node class probabilities.
    pub fn forward_probs(&self, features: Tensor<B, 2>, adjacency: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.forward(features, adjacency), 1)
    }
}
