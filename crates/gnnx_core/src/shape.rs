//! Graph shape metadata.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Shape metadata for a node-attributed graph.
///
/// Follows the convention `(N, F)`:
/// - `N`: Number of nodes
/// - `F`: Feature dimension per node
///
/// The adjacency matrix of a graph with this shape is `N x N`.
///
/// # Example
///
/// ```rust
/// use gnnx_core::GraphShape;
///
/// let shape = GraphShape::new(2708, 1433);
/// assert_eq!(shape.nodes(), 2708);
/// assert_eq!(shape.feats(), 1433);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphShape {
    nodes: usize,
    feats: usize,
}

impl GraphShape {
    /// Create a new GraphShape with the specified dimensions.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Number of nodes
    /// * `feats` - Feature dimension per node
    #[must_use]
    pub const fn new(nodes: usize, feats: usize) -> Self {
        Self { nodes, feats }
    }

    /// Create a GraphShape from a slice of dimensions.
    ///
    /// # Arguments
    ///
    /// * `dims` - A slice containing exactly 2 dimensions: [nodes, feats]
    ///
    /// # Errors
    ///
    /// Returns an error if the slice doesn't contain exactly 2 elements.
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        if dims.len() != 2 {
            return Err(CoreError::InvalidShape {
                expected: "2 dimensions".to_string(),
                got: format!("{} dimensions", dims.len()),
            });
        }
        Ok(Self::new(dims[0], dims[1]))
    }

    /// Get the number of nodes.
    #[must_use]
    pub const fn nodes(&self) -> usize {
        self.nodes
    }

    /// Get the feature dimension.
    #[must_use]
    pub const fn feats(&self) -> usize {
        self.feats
    }

    /// Check if this is an empty shape (any dimension is zero).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes == 0 || self.feats == 0
    }

    /// Get the total number of feature elements.
    #[must_use]
    pub const fn numel(&self) -> usize {
        self.nodes * self.feats
    }

    /// Shape of the feature matrix as an array.
    #[must_use]
    pub const fn feature_dims(&self) -> [usize; 2] {
        [self.nodes, self.feats]
    }

    /// Shape of the adjacency matrix as an array.
    #[must_use]
    pub const fn adjacency_dims(&self) -> [usize; 2] {
        [self.nodes, self.nodes]
    }

    /// Check if this shape describes the same graph structure as another
    /// (same node count; feature dimensions may differ).
    #[must_use]
    pub const fn is_compatible(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl std::fmt::Display for GraphShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(N={}, F={})", self.nodes, self.feats)
    }
}

impl From<(usize, usize)> for GraphShape {
    fn from((nodes, feats): (usize, usize)) -> Self {
        Self::new(nodes, feats)
    }
}

impl From<[usize; 2]> for GraphShape {
    fn from([nodes, feats]: [usize; 2]) -> Self {
        Self::new(nodes, feats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_creation() {
        let shape = GraphShape::new(34, 8);
        assert_eq!(shape.nodes(), 34);
        assert_eq!(shape.feats(), 8);
    }

    #[test]
    fn test_shape_from_dims() {
        let shape = GraphShape::from_dims(&[34, 8]).unwrap();
        assert_eq!(shape.feature_dims(), [34, 8]);
        assert_eq!(shape.adjacency_dims(), [34, 34]);

        assert!(GraphShape::from_dims(&[34]).is_err());
        assert!(GraphShape::from_dims(&[34, 8, 1]).is_err());
    }

    #[test]
    fn test_shape_numel() {
        let shape = GraphShape::new(34, 8);
        assert_eq!(shape.numel(), 34 * 8);
    }

    #[test]
    fn test_shape_is_empty() {
        assert!(!GraphShape::new(34, 8).is_empty());
        assert!(GraphShape::new(0, 8).is_empty());
        assert!(GraphShape::new(34, 0).is_empty());
    }

    #[test]
    fn test_shape_compatibility() {
        let shape1 = GraphShape::new(34, 8);
        let shape2 = GraphShape::new(34, 16);
        let shape3 = GraphShape::new(35, 8);

        assert!(shape1.is_compatible(&shape2)); // different feats is ok
        assert!(!shape1.is_compatible(&shape3)); // different nodes is not ok
    }

    #[test]
    fn test_shape_display() {
        let shape = GraphShape::new(34, 8);
        assert_eq!(shape.to_string(), "(N=34, F=8)");
    }

    #[test]
    fn test_shape_serialization() {
        let shape = GraphShape::new(34, 8);
        let json = serde_json::to_string(&shape).unwrap();
        let restored: GraphShape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, restored);
    }
}
