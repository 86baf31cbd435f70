//! Graph attention network (GAT) model.

use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::{leaky_relu, softmax};
use serde::{Deserialize, Serialize};

/// Configuration for the GAT model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatConfig {
    /// Feature dimension per node.
    pub in_features: usize,
    /// Number of output classes.
    pub n_classes: usize,
    /// Hidden dimension per attention head.
    pub hidden_dim: usize,
    /// Number of attention heads in the hidden layer. The output layer
    /// always uses a single head.
    pub n_heads: usize,
    /// Negative slope of the leaky ReLU applied to attention scores.
    pub negative_slope: f64,
    /// Dropout rate between layers. Keep at 0.0 when the model is used for
    /// saliency computation, so that explanation passes are deterministic.
    pub dropout: f64,
}

impl Default for GatConfig {
    fn default() -> Self {
        Self {
            in_features: 1,
            n_classes: 2,
            hidden_dim: 8,
            n_heads: 4,
            negative_slope: 0.2,
            dropout: 0.0,
        }
    }
}

impl GatConfig {
    /// Create a new config.
    pub fn new(in_features: usize, n_classes: usize) -> Self {
        Self {
            in_features,
            n_classes,
            ..Default::default()
        }
    }

    /// Initialize the model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Gat<B> {
        Gat::new(self.clone(), device)
    }
}

/// A single attention head.
#[derive(Module, Debug)]
struct GatHead<B: Backend> {
    proj: Linear<B>,
    attn_src: Linear<B>,
    attn_dst: Linear<B>,
}

impl<B: Backend> GatHead<B> {
    fn new(d_in: usize, d_out: usize, device: &B::Device) -> Self {
        let proj = LinearConfig::new(d_in, d_out).init(device);
        let attn_src = LinearConfig::new(d_out, 1).with_bias(false).init(device);
        let attn_dst = LinearConfig::new(d_out, 1).with_bias(false).init(device);

        Self {
            proj,
            attn_src,
            attn_dst,
        }
    }

    /// Attend over the neighborhood defined by `support`.
    ///
    /// `weights` carries the (possibly fractional) edge weights including
    /// self-loops. Attention scores are soft-maxed over the binary support
    /// and then rescaled by `weights`, which keeps the coefficients
    /// differentiable with respect to the adjacency entries.
    fn forward(
        &self,
        x: Tensor<B, 2>,
        weights: Tensor<B, 2>,
        support: Tensor<B, 2, Bool>,
        negative_slope: f64,
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let z = self.proj.forward(x);

        let f_src = self.attn_src.forward(z.clone());
        let f_dst = self.attn_dst.forward(z.clone());

        // (N, 1) + (1, N) broadcasts to pairwise scores (N, N).
        let scores = f_src + f_dst.transpose();
        let scores = leaky_relu(scores, negative_slope);
        let scores = scores.mask_fill(support.bool_not(), -1e9);

        let alpha = softmax(scores, 1) * weights;
        (alpha.clone().matmul(z), alpha)
    }
}

/// One multi-head attention layer.
#[derive(Module, Debug)]
struct GatLayer<B: Backend> {
    heads: Vec<GatHead<B>>,
    concat: bool,
}

impl<B: Backend> GatLayer<B> {
    fn new(d_in: usize, d_out: usize, n_heads: usize, concat: bool, device: &B::Device) -> Self {
        let heads: Vec<_> = (0..n_heads.max(1))
            .map(|_| GatHead::new(d_in, d_out, device))
            .collect();

        Self { heads, concat }
    }

    fn forward(
        &self,
        x: Tensor<B, 2>,
        weights: Tensor<B, 2>,
        support: Tensor<B, 2, Bool>,
        negative_slope: f64,
    ) -> (Tensor<B, 2>, Tensor<B, 3>) {
        let mut outputs = Vec::with_capacity(self.heads.len());
        let mut coefficients = Vec::with_capacity(self.heads.len());

        for head in &self.heads {
            let (out, alpha) =
                head.forward(x.clone(), weights.clone(), support.clone(), negative_slope);
            outputs.push(out);
            coefficients.push(alpha);
        }

        let stacked: Tensor<B, 3> = Tensor::stack(coefficients, 0);

        let combined = if self.concat {
            Tensor::cat(outputs, 1)
        } else {
            let all: Tensor<B, 3> = Tensor::stack(outputs, 0);
            all.mean_dim(0).squeeze(0)
        };

        (combined, stacked)
    }
}

/// Graph attention network for node classification.
///
/// A hidden layer with `n_heads` concatenated attention heads feeds a
/// single averaged-head output layer. Attention coefficients of both
/// layers are available through
/// [`forward_with_attention`](Gat::forward_with_attention).
///
/// Reference: Velickovic et al., "Graph Attention Networks", ICLR 2018.
#[derive(Module, Debug)]
pub struct Gat<B: Backend> {
    hidden: GatLayer<B>,
    output: GatLayer<B>,
    dropout: Dropout,
    negative_slope: f64,
}

impl<B: Backend> Gat<B> {
    /// Create a new GAT model.
    pub fn new(config: GatConfig, device: &B::Device) -> Self {
        let n_heads = config.n_heads.max(1);

        let hidden = GatLayer::new(config.in_features, config.hidden_dim, n_heads, true, device);
        let output = GatLayer::new(
            config.hidden_dim * n_heads,
            config.n_classes,
            1,
            false,
            device,
        );
        let dropout = DropoutConfig::new(config.dropout).init();

        Self {
            hidden,
            output,
            dropout,
            negative_slope: config.negative_slope,
        }
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
        self.forward_with_attention(features, adjacency).0
    }

    /// Forward pass that also returns the attention coefficients of each
    /// layer as `(n_heads, n_nodes, n_nodes)` tensors.
    pub fn forward_with_attention(
        &self,
        features: Tensor<B, 2>,
        adjacency: Tensor<B, 2>,
    ) -> (Tensor<B, 2>, Vec<Tensor<B, 3>>) {
        let [n, _] = features.dims();
        let device = features.device();

        let weights = adjacency + Tensor::eye(n, &device);
        let support = weights.clone().greater_elem(0.0);

        let (h, alpha_hidden) = self.hidden.forward(
            features,
            weights.clone(),
            support.clone(),
            self.negative_slope,
        );
        let h = elu(h);
        let h = self.dropout.forward(h);

        let (logits, alpha_out) = self.output.forward(h, weights, support, self.negative_slope);

        (logits, vec![alpha_hidden, alpha_out])
    }

    /// Forward pass returning per-node class probabilities.
    pub fn forward_probs(&self, features: Tensor<B, 2>, adjacency: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.forward(features, adjacency), 1)
    }
}

/// Exponential linear unit.
fn elu<B: Backend>(x: Tensor<B, 2>) -> Tensor<B, 2> {
    x.clone().clamp_min(0.0) + (x.clamp_max(0.0).exp() - 1.0)
}
