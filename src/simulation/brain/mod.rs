//! Neural network pilot for evolved agents.
//!
//! A [`Brain`] is a small stack of tanh layers. It reads the three-value
//! [`Observation`] and its single output is the jump signal, so it plugs
//! straight into the arena as a [`Pilot`].

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::BrainError;
use super::pilot::{Observation, Pilot};

pub mod mlp;

pub use mlp::Mlp;

/// Feed-forward network controlling one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Mlp>,
}

impl Brain {
    /// Creates a brain with random weights in `[-scale, scale)`.
    ///
    /// `layer_sizes` lists the width of every layer including input and
    /// output; fewer than two sizes give a brain without layers.
    pub fn new(layer_sizes: &[usize], scale: f32) -> Self {
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Mlp::new_random(pair[0], pair[1], scale))
            .collect();
        Self { layers }
    }

    /// Creates a brain from explicit layers.
    pub fn from_layers(layers: Vec<Mlp>) -> Self {
        Self { layers }
    }

    /// Inputs expected by the first layer, if any.
    pub fn input_size(&self) -> Option<usize> {
        self.layers.first().map(Mlp::input_size)
    }

    /// Runs a forward pass through every layer.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Blends two parent brains, `weight1` for the first parent.
    ///
    /// Parents must share a shape; extra layers of the longer parent are
    /// dropped.
    pub fn crossover_weighted(parent1: &Brain, parent2: &Brain, weight1: f32) -> Self {
        let layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(layer1, layer2)| Mlp::crossover_weighted(layer1, layer2, weight1))
            .collect();
        Self { layers }
    }

    /// Adds uniform noise to every parameter.
    pub fn mutate(&mut self, mutation_scale: f32) {
        for layer in &mut self.layers {
            layer.mutate(mutation_scale);
        }
    }
}

impl Pilot for Brain {
    type Error = BrainError;

    fn decide(&mut self, observation: &Observation) -> Result<f32, BrainError> {
        let actual = self.input_size().ok_or(BrainError::Empty)?;
        if actual != Observation::SIZE {
            return Err(BrainError::InputSize {
                expected: Observation::SIZE,
                actual,
            });
        }

        let output = self.think(&observation.to_array());
        output.first().copied().ok_or(BrainError::Empty)
    }
}
