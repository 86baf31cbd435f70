//! Trait implementations for explanation.
//!
//! Implements the `gnnx_core` model traits for the reference models.

use burn::prelude::*;
use gnnx_core::{AttentionModel, NodeClassificationModel};

use crate::gat::Gat;
use crate::gcn::Gcn;

impl<B: Backend> NodeClassificationModel<B> for Gcn<B> {
    fn forward(&self, features: Tensor<B, 2>, adjacency: Tensor<B, 2>) -> Tensor<B, 2> {
        self.forward(features, adjacency)
    }
}

impl<B: Backend> NodeClassificationModel<B> for Gat<B> {
    fn forward(&self, features: Tensor<B, 2>, adjacency: Tensor<B, 2>) -> Tensor<B, 2> {
        self.forward(features, adjacency)
    }
}

impl<B: Backend> AttentionModel<B> for Gat<B> {
    fn forward_with_attention(
        &self,
        features: Tensor<B, 2>,
        adjacency: Tensor<B, 2>,
    ) -> (Tensor<B, 2>, Vec<Tensor<B, 3>>) {
        self.forward_with_attention(features, adjacency)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_traits_compile() {
        // Trait implementations compile - behavior tests live alongside the models
    }
}
