//! Dense layer with tanh activation.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use serde::{Deserialize, Serialize};

/// A single fully connected layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mlp {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Mlp {
    /// Creates a layer with weights and biases drawn from `[-scale, scale)`.
    pub fn new_random(input_size: usize, output_size: usize, scale: f32) -> Self {
        Self {
            weights: Array2::random((output_size, input_size), Uniform::new(-scale, scale)),
            biases: Array1::random(output_size, Uniform::new(-scale, scale)),
        }
    }

    /// Creates a layer from explicit parameters.
    pub fn from_parts(weights: Array2<f32>, biases: Array1<f32>) -> Self {
        Self { weights, biases }
    }

    /// Number of inputs the layer expects.
    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of activations the layer produces.
    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    /// Forward pass: `tanh(W · x + b)`.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(f32::tanh);
        output
    }

    /// Adds uniform noise in `[-mutation_scale, mutation_scale)` to every
    /// parameter.
    pub fn mutate(&mut self, mutation_scale: f32) {
        self.weights += &Array2::random(
            self.weights.dim(),
            Uniform::new(-mutation_scale, mutation_scale),
        );
        self.biases += &Array1::random(
            self.biases.len(),
            Uniform::new(-mutation_scale, mutation_scale),
        );
    }

    /// Blends two parent layers, `weight1` for the first and the rest for
    /// the second.
    pub fn crossover_weighted(parent1: &Mlp, parent2: &Mlp, weight1: f32) -> Self {
        let weight2 = 1.0 - weight1;
        Self {
            weights: &parent1.weights * weight1 + &parent2.weights * weight2,
            biases: &parent1.biases * weight1 + &parent2.biases * weight2,
        }
    }
}
