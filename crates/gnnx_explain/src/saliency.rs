//! Saliency map types and shared vocabulary.

use burn::prelude::*;
use serde::{Deserialize, Serialize};

use gnnx_core::{CoreError, Result};

/// What a saliency map scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaliencyKind {
    /// Per node-feature scores, shape `(n_nodes, n_feats)`.
    NodeFeatures,
    /// Per edge scores, shape `(n_nodes, n_nodes)`.
    Links,
    /// Aggregated attention coefficients, shape `(n_nodes, n_nodes)`.
    Attention,
}

/// A saliency map over a graph.
///
/// Values are signed: a positive score means the element pushed the target
/// score up, a negative score means it pushed it down.
#[derive(Debug, Clone)]
pub struct SaliencyMap<B: Backend> {
    /// The saliency values.
    pub values: Tensor<B, 2>,
    /// What the values score.
    pub kind: SaliencyKind,
    /// The explained node, if the map targets one.
    pub target_node: Option<usize>,
    /// The explained class, if the map targets one.
    pub target_class: Option<usize>,
}

impl<B: Backend> SaliencyMap<B> {
    /// Create a new saliency map.
    pub fn new(values: Tensor<B, 2>, kind: SaliencyKind) -> Self {
        Self {
            values,
            kind,
            target_node: None,
            target_class: None,
        }
    }

    /// Set the explained node and class.
    pub fn with_target(mut self, node: usize, class: usize) -> Self {
        self.target_node = Some(node);
        self.target_class = Some(class);
        self
    }

    /// Get the shape of the saliency map.
    pub fn shape(&self) -> [usize; 2] {
        self.values.dims()
    }

    /// Normalize the saliency values to [0, 1].
    pub fn normalize(&self) -> Self {
        let min_val: f32 = self.values.clone().min().into_scalar().elem();
        let max_val: f32 = self.values.clone().max().into_scalar().elem();
        let range = max_val - min_val;

        // A constant map stays as-is rather than dividing by zero.
        let normalized = if range > 1e-8 {
            (self.values.clone() - min_val) / range
        } else {
            self.values.clone()
        };

        Self {
            values: normalized,
            kind: self.kind,
            target_node: self.target_node,
            target_class: self.target_class,
        }
    }

    /// Total absolute saliency per node.
    ///
    /// Sums `|values|` over the second dimension, giving one score per node
    /// for any map kind.
    pub fn node_totals(&self) -> Tensor<B, 1> {
        let [n, _] = self.values.dims();
        self.values.clone().abs().sum_dim(1).reshape([n])
    }

    /// The `k` highest-scoring nodes as `(index, score)` pairs, sorted by
    /// descending total absolute saliency.
    ///
    /// # Errors
    ///
    /// Returns an error if the scores cannot be read back from the device.
    pub fn top_nodes(&self, k: usize) -> Result<Vec<(usize, f32)>> {
        let totals = self
            .node_totals()
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| CoreError::Other(format!("failed to read saliency values: {:?}", e)))?;

        let mut pairs: Vec<(usize, f32)> = totals.into_iter().enumerate().collect();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        pairs.truncate(k);
        Ok(pairs)
    }
}

/// Type of baseline to use for Integrated Gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineType {
    /// Zero baseline (most common).
    Zeros,
    /// Random baseline sampled from standard normal. Seed the backend for
    /// reproducible draws.
    Random,
}

/// Which edges a link-level path integral scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgePath {
    /// Integrate from the empty graph up to the observed adjacency,
    /// scoring the edges the graph actually has.
    Existing,
    /// Integrate from the observed adjacency toward the fully-connected
    /// graph (zero diagonal), scoring the edges the graph is missing.
    NonExisting,
}

/// How to aggregate attention coefficients across layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionAggregation {
    /// Attention rollout: multiply residual-averaged attention matrices.
    /// Reference: Abnar & Zuidema, "Quantifying Attention Flow in Transformers", ACL 2020.
    Rollout,
    /// Simple mean across all layers.
    Mean,
    /// Use only the last layer's attention.
    Last,
}

/// Configuration for Integrated Gradients.
#[derive(Debug, Clone)]
pub struct IntegratedGradientsConfig {
    /// Number of steps for the Riemann approximation of the integral.
    pub steps: usize,
    /// Baseline type for the feature path integral.
    pub baseline: BaselineType,
}

impl Default for IntegratedGradientsConfig {
    fn default() -> Self {
        Self {
            steps: 50,
            baseline: BaselineType::Zeros,
        }
    }
}

/// Create a zero baseline.
///
/// # Arguments
///
/// * `shape` - Shape of the baseline `(n_nodes, n_feats)`
/// * `device` - Device to create the tensor on
pub fn zero_baseline<B: Backend>(shape: [usize; 2], device: &B::Device) -> Tensor<B, 2> {
    Tensor::zeros(shape, device)
}

/// Create a random baseline sampled from a standard normal distribution.
///
/// # Arguments
///
/// * `shape` - Shape of the baseline `(n_nodes, n_feats)`
/// * `device` - Device to create the tensor on
pub fn random_baseline<B: Backend>(shape: [usize; 2], device: &B::Device) -> Tensor<B, 2> {
    Tensor::random(shape, burn::tensor::Distribution::Normal(0.0, 1.0), device)
}

pub(crate) fn check_node(nodes: usize, node: usize) -> Result<()> {
    if node >= nodes {
        return Err(CoreError::NodeOutOfBounds { node, nodes });
    }
    Ok(())
}

pub(crate) fn check_class(classes: usize, class: usize) -> Result<()> {
    if class >= classes {
        return Err(CoreError::ClassOutOfBounds { class, classes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnnx_core::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_saliency_map_shape_and_target() {
        let device = Default::default();
        let values = Tensor::<TestBackend, 2>::zeros([4, 3], &device);
        let map = SaliencyMap::new(values, SaliencyKind::NodeFeatures).with_target(2, 1);

        assert_eq!(map.shape(), [4, 3]);
        assert_eq!(map.kind, SaliencyKind::NodeFeatures);
        assert_eq!(map.target_node, Some(2));
        assert_eq!(map.target_class, Some(1));
    }

    #[test]
    fn test_saliency_map_normalize() {
        let device = Default::default();
        let data: Vec<f32> = (0..12).map(|i| i as f32 - 6.0).collect();
        let values = Tensor::<TestBackend, 1>::from_floats(data.as_slice(), &device).reshape([4, 3]);
        let map = SaliencyMap::new(values, SaliencyKind::NodeFeatures);

        let normalized = map.normalize();
        let min: f32 = normalized.values.clone().min().into_scalar().elem();
        let max: f32 = normalized.values.max().into_scalar().elem();

        assert!(min >= -1e-6);
        assert!(max <= 1.0 + 1e-6);
    }

    #[test]
    fn test_saliency_map_normalize_constant() {
        let device = Default::default();
        let values = Tensor::<TestBackend, 2>::ones([4, 3], &device);
        let map = SaliencyMap::new(values, SaliencyKind::Links);

        let normalized = map.normalize();
        let total: f32 = normalized.values.sum().into_scalar().elem();
        assert!((total - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_node_totals() {
        let device = Default::default();
        let data: Vec<f32> = vec![1.0, -2.0, 3.0, 0.0, 0.5, -0.5];
        let values = Tensor::<TestBackend, 1>::from_floats(data.as_slice(), &device).reshape([2, 3]);
        let map = SaliencyMap::new(values, SaliencyKind::NodeFeatures);

        let totals = map.node_totals();
        assert_eq!(totals.dims(), [2]);

        let first: f32 = totals.clone().slice([0..1]).into_scalar().elem();
        let second: f32 = totals.slice([1..2]).into_scalar().elem();
        assert!((first - 6.0).abs() < 1e-6);
        assert!((second - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_top_nodes() {
        let device = Default::default();
        let data: Vec<f32> = vec![0.1, 0.0, 5.0, 0.0, 1.0, 1.0];
        let values = Tensor::<TestBackend, 1>::from_floats(data.as_slice(), &device).reshape([3, 2]);
        let map = SaliencyMap::new(values, SaliencyKind::NodeFeatures);

        let top = map.top_nodes(2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, 1);
        assert!((top[0].1 - 5.0).abs() < 1e-6);
        assert_eq!(top[1].0, 2);
    }

    #[test]
    fn test_ig_config_defaults() {
        let config = IntegratedGradientsConfig::default();
        assert_eq!(config.steps, 50);
        assert_eq!(config.baseline, BaselineType::Zeros);
    }

    #[test]
    fn test_zero_baseline() {
        let device = Default::default();
        let baseline = zero_baseline::<TestBackend>([4, 3], &device);
        assert_eq!(baseline.dims(), [4, 3]);

        let sum: f32 = baseline.sum().into_scalar().elem();
        assert!(sum.abs() < 1e-6);
    }

    #[test]
    fn test_random_baseline_shape() {
        let device = Default::default();
        let baseline = random_baseline::<TestBackend>([4, 3], &device);
        assert_eq!(baseline.dims(), [4, 3]);
    }

    #[test]
    fn test_baseline_type_serde() {
        let baseline = BaselineType::Random;
        let json = serde_json::to_string(&baseline).unwrap();
        let decoded: BaselineType = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, BaselineType::Random);
    }

    #[test]
    fn test_edge_path_serde() {
        let path = EdgePath::NonExisting;
        let json = serde_json::to_string(&path).unwrap();
        let decoded: EdgePath = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, EdgePath::NonExisting);
    }

    #[test]
    fn test_check_helpers() {
        assert!(check_node(5, 4).is_ok());
        assert!(check_node(5, 5).is_err());
        assert!(check_class(3, 2).is_ok());
        assert!(check_class(3, 3).is_err());
    }
}
