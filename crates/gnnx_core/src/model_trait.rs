//! Model traits for explanation.
//!
//! Defines the traits a graph model must implement for saliency maps to be
//! computed against it.

use burn::prelude::*;

/// Trait for node classification models over dense graphs.
///
/// Implementors score every node of the graph in a single forward pass.
/// The forward pass must be a pure function of its tensor inputs so that
/// gradients with respect to the features and the adjacency are meaningful.
pub trait NodeClassificationModel<B: Backend>: Clone {
    /// Forward pass returning per-node logits.
    ///
    /// # Arguments
    ///
    /// * `features` - Node features of shape `(n_nodes, n_feats)`
    /// * `adjacency` - Edge weights of shape `(n_nodes, n_nodes)`
    ///
    /// # Returns
    ///
    /// Logits tensor of shape `(n_nodes, n_classes)`
    fn forward(&self, features: Tensor<B, 2>, adjacency: Tensor<B, 2>) -> Tensor<B, 2>;

    /// Forward pass returning per-node class probabilities.
    fn forward_probs(&self, features: Tensor<B, 2>, adjacency: Tensor<B, 2>) -> Tensor<B, 2> {
        let logits = self.forward(features, adjacency);
        burn::tensor::activation::softmax(logits, 1)
    }
}

/// Trait for models that expose attention coefficients, such as graph
/// attention networks.
pub trait AttentionModel<B: Backend>: NodeClassificationModel<B> {
    /// Forward pass that also returns each attention layer's coefficients.
    ///
    /// # Arguments
    ///
    /// * `features` - Node features of shape `(n_nodes, n_feats)`
    /// * `adjacency` - Edge weights of shape `(n_nodes, n_nodes)`
    ///
    /// # Returns
    ///
    /// Logits of shape `(n_nodes, n_classes)` and one coefficient tensor of
    /// shape `(n_heads, n_nodes, n_nodes)` per attention layer, ordered from
    /// input to output.
    fn forward_with_attention(
        &self,
        features: Tensor<B, 2>,
        adjacency: Tensor<B, 2>,
    ) -> (Tensor<B, 2>, Vec<Tensor<B, 3>>);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_trait_definitions() {
        // Traits are defined, implementation tests live in the model crate
    }
}
