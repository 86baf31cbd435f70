//! Vanilla gradient saliency for graph attention networks.

use std::marker::PhantomData;

use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use gnnx_core::{AttentionModel, CoreError, Graph, Result};

use crate::saliency::{check_class, check_node, AttentionAggregation, SaliencyKind, SaliencyMap};

/// Gradient saliency for graph attention network models.
///
/// Computes single-evaluation gradients of a target node's class score
/// with respect to the node features and the adjacency matrix, and can
/// additionally read the model's own attention coefficients as an
/// edge-level explanation.
///
/// # Example
///
/// ```rust,ignore
/// use gnnx_explain::{AttentionAggregation, GradientSaliencyGAT};
///
/// let saliency = GradientSaliencyGAT::new(model);
/// let node_masks = saliency.node_masks(&graph, target_node, target_class)?;
/// let attention = saliency.attention_masks(&graph, AttentionAggregation::Rollout)?;
/// ```
#[derive(Clone)]
pub struct GradientSaliencyGAT<B, M>
where
    B: AutodiffBackend,
    M: AttentionModel<B>,
{
    model: M,
    _backend: PhantomData<B>,
}

impl<B, M> GradientSaliencyGAT<B, M>
where
    B: AutodiffBackend,
    M: AttentionModel<B>,
{
    /// Create a new explainer.
    pub fn new(model: M) -> Self {
        Self {
            model,
            _backend: PhantomData,
        }
    }

    /// Gradient of the target score with respect to the node features.
    ///
    /// # Arguments
    ///
    /// * `graph` - The graph to explain
    /// * `node` - The node whose score is explained
    /// * `class` - The class of interest
    ///
    /// # Returns
    ///
    /// A `(n_nodes, n_feats)` saliency map over the node features.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or class index is out of bounds, or if
    /// the model detaches its inputs from the autodiff graph.
    pub fn node_masks(&self, graph: &Graph<B>, node: usize, class: usize) -> Result<SaliencyMap<B::InnerBackend>> {
        check_node(graph.num_nodes(), node)?;

        let features = graph.features().clone().detach().require_grad();
        let adjacency = graph.adjacency().clone().detach();

        let scores = self.model.forward(features.clone(), adjacency);
        check_class(scores.dims()[1], class)?;

        let objective = scores.slice([node..node + 1, class..class + 1]).sum();
        let grads = objective.backward();
        let grad = features.grad(&grads).ok_or_else(|| {
            CoreError::GradientUnavailable("features are not on the autodiff path".to_string())
        })?;

        Ok(SaliencyMap::new(grad, SaliencyKind::NodeFeatures).with_target(node, class))
    }

    /// Gradient of the target score with respect to the adjacency matrix.
    ///
    /// # Returns
    ///
    /// A `(n_nodes, n_nodes)` saliency map over the edges.
    pub fn link_masks(&self, graph: &Graph<B>, node: usize, class: usize) -> Result<SaliencyMap<B::InnerBackend>> {
        check_node(graph.num_nodes(), node)?;

        let features = graph.features().clone().detach();
        let adjacency = graph.adjacency().clone().detach().require_grad();

        let scores = self.model.forward(features, adjacency.clone());
        check_class(scores.dims()[1], class)?;

        let objective = scores.slice([node..node + 1, class..class + 1]).sum();
        let grads = objective.backward();
        let grad = adjacency.grad(&grads).ok_or_else(|| {
            CoreError::GradientUnavailable("adjacency is not on the autodiff path".to_string())
        })?;

        Ok(SaliencyMap::new(grad, SaliencyKind::Links).with_target(node, class))
    }

    /// Aggregate the model's attention coefficients into an edge-level
    /// explanation.
    ///
    /// Heads are averaged within each layer; layers are combined according
    /// to `aggregation`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model reports no attention layers.
    pub fn attention_masks(
        &self,
        graph: &Graph<B>,
        aggregation: AttentionAggregation,
    ) -> Result<SaliencyMap<B::InnerBackend>> {
        let n = graph.num_nodes();
        let device = graph.device();

        let features = graph.features().clone().detach();
        let adjacency = graph.adjacency().clone().detach();

        let (_, attention) = self.model.forward_with_attention(features, adjacency);
        if attention.is_empty() {
            return Err(CoreError::Other(
                "model reported no attention layers".to_string(),
            ));
        }

        let n_layers = attention.len();

        // Average heads within each layer: (heads, N, N) -> (N, N).
        let layers: Vec<Tensor<B::InnerBackend, 2>> = attention
            .into_iter()
            .map(|a| {
                let layer: Tensor<B, 2> = a.mean_dim(0).squeeze(0);
                layer.inner()
            })
            .collect();

        let mut aggregated: Tensor<B::InnerBackend, 2> = match aggregation {
            AttentionAggregation::Rollout => Tensor::eye(n, &device),
            AttentionAggregation::Mean | AttentionAggregation::Last => {
                Tensor::zeros([n, n], &device)
            }
        };

        for (layer_idx, layer) in layers.iter().enumerate() {
            match aggregation {
                AttentionAggregation::Rollout => {
                    // Attention rollout: multiply attention matrices with a
                    // residual connection folded in.
                    let eye = Tensor::eye(n, &device);
                    let with_residual = (layer.clone() + eye) / 2.0;
                    aggregated = aggregated.matmul(with_residual);
                }
                AttentionAggregation::Mean => {
                    aggregated = aggregated + layer.clone();
                }
                AttentionAggregation::Last => {
                    if layer_idx == n_layers - 1 {
                        aggregated = layer.clone();
                    }
                }
            }
        }

        if matches!(aggregation, AttentionAggregation::Mean) {
            aggregated = aggregated / n_layers as f32;
        }

        Ok(SaliencyMap::new(aggregated, SaliencyKind::Attention))
    }
}
