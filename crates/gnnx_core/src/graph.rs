//! Node-attributed graph container.

use burn::prelude::*;
use burn::tensor::TensorData;

use crate::error::{CoreError, Result};
use crate::shape::GraphShape;

/// A dense node-attributed graph.
///
/// Pairs a node feature matrix with a dense adjacency matrix and ensures
/// they agree on the node count:
/// - `features`: `(N, F)` node feature matrix
/// - `adjacency`: `(N, N)` edge weight matrix, non-negative, zero diagonal
///   (models insert self-loops themselves where required)
///
/// # Type Parameters
///
/// * `B` - The Burn backend type
///
/// # Example
///
/// ```rust,ignore
/// use gnnx_core::Graph;
/// use burn::prelude::*;
///
/// let features = Tensor::<B, 2>::zeros([5, 3], &device);
/// let adjacency = Tensor::<B, 2>::zeros([5, 5], &device);
/// let graph = Graph::new(features, adjacency)?;
/// ```
#[derive(Debug, Clone)]
pub struct Graph<B: Backend> {
    features: Tensor<B, 2>,
    adjacency: Tensor<B, 2>,
    shape: GraphShape,
}

impl<B: Backend> Graph<B> {
    /// Create a new graph from a feature matrix and an adjacency matrix.
    ///
    /// # Arguments
    ///
    /// * `features` - Node features of shape `(N, F)`
    /// * `adjacency` - Edge weights of shape `(N, N)`
    ///
    /// # Errors
    ///
    /// Returns an error if the adjacency matrix is not square or its
    /// dimension does not match the number of feature rows.
    pub fn new(features: Tensor<B, 2>, adjacency: Tensor<B, 2>) -> Result<Self> {
        let [n_nodes, n_feats] = features.dims();
        let [a_rows, a_cols] = adjacency.dims();

        if a_rows != a_cols {
            return Err(CoreError::InvalidShape {
                expected: "square adjacency matrix".to_string(),
                got: format!("({}, {})", a_rows, a_cols),
            });
        }
        if a_rows != n_nodes {
            return Err(CoreError::ShapeMismatch(format!(
                "features have {} nodes but adjacency is ({}, {})",
                n_nodes, a_rows, a_cols
            )));
        }

        Ok(Self {
            features,
            adjacency,
            shape: GraphShape::new(n_nodes, n_feats),
        })
    }

    /// Create a graph from host arrays.
    ///
    /// # Arguments
    ///
    /// * `features` - Node features of shape `(N, F)`
    /// * `adjacency` - Edge weights of shape `(N, N)`
    /// * `device` - Device to place the tensors on
    ///
    /// # Errors
    ///
    /// Returns an error if the array shapes are inconsistent.
    pub fn from_arrays(
        features: ndarray::Array2<f32>,
        adjacency: ndarray::Array2<f32>,
        device: &B::Device,
    ) -> Result<Self> {
        let f_dims = [features.nrows(), features.ncols()];
        let a_dims = [adjacency.nrows(), adjacency.ncols()];

        let f_data: Vec<f32> = features.iter().copied().collect();
        let a_data: Vec<f32> = adjacency.iter().copied().collect();

        let features = Tensor::from_data(TensorData::new(f_data, f_dims), device);
        let adjacency = Tensor::from_data(TensorData::new(a_data, a_dims), device);

        Self::new(features, adjacency)
    }

    /// Get the shape metadata.
    #[must_use]
    pub const fn shape(&self) -> GraphShape {
        self.shape
    }

    /// Get the number of nodes.
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.shape.nodes()
    }

    /// Get the feature dimension.
    #[must_use]
    pub const fn num_feats(&self) -> usize {
        self.shape.feats()
    }

    /// Get a reference to the node feature matrix.
    #[must_use]
    pub const fn features(&self) -> &Tensor<B, 2> {
        &self.features
    }

    /// Get a reference to the adjacency matrix.
    #[must_use]
    pub const fn adjacency(&self) -> &Tensor<B, 2> {
        &self.adjacency
    }

    /// Consume self and return the underlying tensors.
    #[must_use]
    pub fn into_parts(self) -> (Tensor<B, 2>, Tensor<B, 2>) {
        (self.features, self.adjacency)
    }

    /// Get the device the graph is on.
    pub fn device(&self) -> B::Device {
        self.features.device()
    }

    /// Clone the graph to a new device.
    pub fn to_device(&self, device: &B::Device) -> Self {
        Self {
            features: self.features.clone().to_device(device),
            adjacency: self.adjacency.clone().to_device(device),
            shape: self.shape,
        }
    }

    /// Replace the feature matrix, keeping the adjacency.
    ///
    /// # Errors
    ///
    /// Returns an error if the new features disagree on the node count.
    pub fn with_features(&self, features: Tensor<B, 2>) -> Result<Self> {
        Self::new(features, self.adjacency.clone())
    }

    /// Replace the adjacency matrix, keeping the features.
    ///
    /// # Errors
    ///
    /// Returns an error if the new adjacency disagrees on the node count.
    pub fn with_adjacency(&self, adjacency: Tensor<B, 2>) -> Result<Self> {
        Self::new(self.features.clone(), adjacency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_graph_creation() {
        let device = Default::default();
        let features = Tensor::<TestBackend, 2>::zeros([5, 3], &device);
        let adjacency = Tensor::<TestBackend, 2>::zeros([5, 5], &device);

        let graph = Graph::new(features, adjacency).unwrap();
        assert_eq!(graph.num_nodes(), 5);
        assert_eq!(graph.num_feats(), 3);
        assert_eq!(graph.shape(), GraphShape::new(5, 3));
    }

    #[test]
    fn test_graph_rejects_non_square_adjacency() {
        let device = Default::default();
        let features = Tensor::<TestBackend, 2>::zeros([5, 3], &device);
        let adjacency = Tensor::<TestBackend, 2>::zeros([5, 4], &device);

        assert!(matches!(
            Graph::new(features, adjacency),
            Err(CoreError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_graph_rejects_node_count_mismatch() {
        let device = Default::default();
        let features = Tensor::<TestBackend, 2>::zeros([5, 3], &device);
        let adjacency = Tensor::<TestBackend, 2>::zeros([4, 4], &device);

        assert!(matches!(
            Graph::new(features, adjacency),
            Err(CoreError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_graph_from_arrays() {
        let device = Default::default();
        let features = ndarray::Array2::<f32>::ones((4, 2));
        let mut adjacency = ndarray::Array2::<f32>::zeros((4, 4));
        adjacency[[0, 1]] = 1.0;
        adjacency[[1, 0]] = 1.0;

        let graph = Graph::<TestBackend>::from_arrays(features, adjacency, &device).unwrap();
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_feats(), 2);

        let total: f32 = graph.adjacency().clone().sum().into_scalar().elem();
        assert!((total - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_graph_with_adjacency_checks_shape() {
        let device = Default::default();
        let features = Tensor::<TestBackend, 2>::zeros([5, 3], &device);
        let adjacency = Tensor::<TestBackend, 2>::zeros([5, 5], &device);
        let graph = Graph::new(features, adjacency).unwrap();

        let bad = Tensor::<TestBackend, 2>::zeros([6, 6], &device);
        assert!(graph.with_adjacency(bad).is_err());

        let good = Tensor::<TestBackend, 2>::ones([5, 5], &device);
        assert!(graph.with_adjacency(good).is_ok());
    }
}
