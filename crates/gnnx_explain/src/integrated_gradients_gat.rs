//! Integrated Gradients for graph attention networks.

use std::marker::PhantomData;

use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use gnnx_core::{AttentionModel, Graph, Result};

use crate::integrated_gradients::{integrate_feature_gradients, integrate_link_gradients};
use crate::saliency::{EdgePath, IntegratedGradientsConfig, SaliencyKind, SaliencyMap};

/// Integrated Gradients attribution for graph attention network models.
///
/// Shares the path-integral machinery of
/// [`IntegratedGradients`](crate::IntegratedGradients) but targets models
/// that expose attention coefficients. Edge attributions integrate through
/// the attention rescaling, so a GAT's link importance reflects how much
/// each edge's weight contributed to the attended message passing.
///
/// # Example
///
/// ```rust,ignore
/// use gnnx_explain::IntegratedGradientsGAT;
///
/// let ig = IntegratedGradientsGAT::new(model);
/// let importance = ig.node_importance(&graph, target_node, target_class)?;
/// ```
#[derive(Clone)]
pub struct IntegratedGradientsGAT<B, M>
where
    B: AutodiffBackend,
    M: AttentionModel<B>,
{
    model: M,
    config: IntegratedGradientsConfig,
    _backend: PhantomData<B>,
}

impl<B, M> IntegratedGradientsGAT<B, M>
where
    B: AutodiffBackend,
    M: AttentionModel<B>,
{
    /// Create a new explainer with the default configuration.
    pub fn new(model: M) -> Self {
        Self::with_config(model, IntegratedGradientsConfig::default())
    }

    /// Create a new explainer with an explicit configuration.
    pub fn with_config(model: M, config: IntegratedGradientsConfig) -> Self {
        Self {
            model,
            config,
            _backend: PhantomData,
        }
    }

    /// Integrated gradients of the target score with respect to the node
    /// features.
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
        let values = integrate_feature_gradients(&self.model, graph, node, class, &self.config)?;
        Ok(SaliencyMap::new(values, SaliencyKind::NodeFeatures).with_target(node, class))
    }

    /// Total absolute feature attribution per node.
    ///
    /// This is the usual summary for GAT explanations: one score per node
    /// describing how much its features mattered for the target.
    pub fn node_importance(&self, graph: &Graph<B>, node: usize, class: usize) -> Result<Tensor<B::InnerBackend, 1>> {
        Ok(self.node_masks(graph, node, class)?.node_totals())
    }

    /// Integrated gradients of the target score with respect to the
    /// adjacency matrix.
    ///
    /// # Arguments
    ///
    /// * `graph` - The graph to explain
    /// * `node` - The node whose score is explained
    /// * `class` - The class of interest
    /// * `path` - Whether to score the graph's existing edges or its
    ///   missing ones
    ///
    /// # Returns
    ///
    /// A `(n_nodes, n_nodes)` saliency map over the edges.
    pub fn link_importance(
        &self,
        graph: &Graph<B>,
        node: usize,
        class: usize,
        path: EdgePath,
    ) -> Result<SaliencyMap<B::InnerBackend>> {
        let values =
            integrate_link_gradients(&self.model, graph, node, class, path, self.config.steps)?;
        Ok(SaliencyMap::new(values, SaliencyKind::Links).with_target(node, class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saliency::BaselineType;
    use gnnx_core::backend::{Autodiff, NdArray};
    use gnnx_core::CoreError;
    use gnnx_models::{Gat, GatConfig};

    type TestBackend = Autodiff<NdArray>;

    fn toy_graph(device: &<TestBackend as Backend>::Device) -> Graph<TestBackend> {
        let features = Tensor::<TestBackend, 1>::from_floats(
            [1.0, 0.5, -0.5, 2.0, 0.0, 1.0, 1.5, -1.0],
            device,
        )
        .reshape([4, 2]);

        // Star graph centered on node 0.
        let mut data = vec![0.0f32; 16];
        for i in 1..4 {
            data[i] = 1.0;
            data[i * 4] = 1.0;
        }
        let adjacency =
            Tensor::<TestBackend, 1>::from_floats(data.as_slice(), device).reshape([4, 4]);

        Graph::new(features, adjacency).unwrap()
    }

    fn small_config() -> IntegratedGradientsConfig {
        IntegratedGradientsConfig {
            steps: 6,
            baseline: BaselineType::Zeros,
        }
    }

    fn gat_model(device: &<TestBackend as Backend>::Device) -> Gat<TestBackend> {
        GatConfig {
            in_features: 2,
            n_classes: 2,
            hidden_dim: 4,
            n_heads: 2,
            negative_slope: 0.2,
            dropout: 0.0,
        }
        .init(device)
    }

    #[test]
    fn test_node_masks_shape() {
        let device = Default::default();
        let graph = toy_graph(&device);
        let ig = IntegratedGradientsGAT::with_config(gat_model(&device), small_config());

        let masks = ig.node_masks(&graph, 0, 1).unwrap();
        assert_eq!(masks.shape(), [4, 2]);
        assert_eq!(masks.kind, SaliencyKind::NodeFeatures);

        let total: f32 = masks.values.abs().sum().into_scalar().elem();
        assert!(total.is_finite());
    }

    #[test]
    fn test_node_importance() {
        let device = Default::default();
        let graph = toy_graph(&device);
        let ig = IntegratedGradientsGAT::with_config(gat_model(&device), small_config());

        let importance = ig.node_importance(&graph, 0, 0).unwrap();
        assert_eq!(importance.dims(), [4]);

        let total: f32 = importance.sum().into_scalar().elem();
        assert!(total.is_finite());
        assert!(total >= 0.0);
    }

    #[test]
    fn test_link_importance_existing() {
        let device = Default::default();
        let graph = toy_graph(&device);
        let ig = IntegratedGradientsGAT::with_config(gat_model(&device), small_config());

        let masks = ig
            .link_importance(&graph, 0, 0, EdgePath::Existing)
            .unwrap();
        assert_eq!(masks.shape(), [4, 4]);
        assert_eq!(masks.kind, SaliencyKind::Links);

        // The path difference vanishes off the support, so absent edges
        // carry no attribution on the existing-edge path.
        let absent: f32 = masks.values.clone().slice([1..2, 2..3]).into_scalar().elem();
        assert!(absent.abs() < 1e-6);

        let total: f32 = masks.values.abs().sum().into_scalar().elem();
        assert!(total.is_finite());
    }

    #[test]
    fn test_link_importance_non_existing() {
        let device = Default::default();
        let graph = toy_graph(&device);
        let ig = IntegratedGradientsGAT::with_config(gat_model(&device), small_config());

        let masks = ig
            .link_importance(&graph, 1, 0, EdgePath::NonExisting)
            .unwrap();
        assert_eq!(masks.shape(), [4, 4]);

        let total: f32 = masks.values.abs().sum().into_scalar().elem();
        assert!(total.is_finite());
    }

    #[test]
    fn test_rejects_bad_targets() {
        let device = Default::default();
        let graph = toy_graph(&device);
        let ig = IntegratedGradientsGAT::with_config(gat_model(&device), small_config());

        assert!(matches!(
            ig.node_masks(&graph, 9, 0),
            Err(CoreError::NodeOutOfBounds { .. })
        ));
        assert!(matches!(
            ig.link_importance(&graph, 0, 9, EdgePath::Existing),
            Err(CoreError::ClassOutOfBounds { .. })
        ));
    }
}
