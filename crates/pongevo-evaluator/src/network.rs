//! Fixed-topology feedforward network: input → hidden (tanh) → output (tanh).
//!
//! The network is a pure function of its parameters and its input. Parameters are
//! loaded from a flat genome laid out as:
//!
//! ```text
//! [ W1 (hidden × input, row-major) | b1 (hidden) | W2 (output × hidden, row-major) | b2 (output) ]
//! ```
//!
//! Layer buffers are allocated once per network and reused by every [`NeuralNetwork::forward`]
//! call; nothing carries over from one call to the next.

use serde::{Deserialize, Serialize};

use crate::DimensionMismatch;

/// Layer sizes of a [`NeuralNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl Default for Topology {
    fn default() -> Self {
        Self::PONG
    }
}

impl Topology {
    /// Topology of the Pong controller: 6 observations, 8 hidden units, 1 action.
    pub const PONG: Self = Self {
        input_size: 6,
        hidden_size: 8,
        output_size: 1,
    };

    /// Total number of weights and biases; the length of a genome for this topology.
    ///
    /// ```
    /// use pongevo_evaluator::network::Topology;
    ///
    /// assert_eq!(Topology::PONG.parameter_count(), 6 * 8 + 8 + 8 * 1 + 1);
    /// ```
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        self.input_size * self.hidden_size
            + self.hidden_size
            + self.hidden_size * self.output_size
            + self.output_size
    }
}

/// Activations produced by one forward pass.
///
/// Hidden activations are exposed for inspection; controllers only use `output`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activations<'a> {
    pub hidden: &'a [f64],
    pub output: &'a [f64],
}

#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    topology: Topology,
    w1: Vec<f64>,
    b1: Vec<f64>,
    w2: Vec<f64>,
    b2: Vec<f64>,
    hidden: Vec<f64>,
    output: Vec<f64>,
}

impl NeuralNetwork {
    /// Creates a network with every parameter set to zero.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        let Topology {
            input_size,
            hidden_size,
            output_size,
        } = topology;
        Self {
            topology,
            w1: vec![0.0; hidden_size * input_size],
            b1: vec![0.0; hidden_size],
            w2: vec![0.0; output_size * hidden_size],
            b2: vec![0.0; output_size],
            hidden: vec![0.0; hidden_size],
            output: vec![0.0; output_size],
        }
    }

    pub fn from_parameters(
        topology: Topology,
        parameters: &[f64],
    ) -> Result<Self, DimensionMismatch> {
        let mut network = Self::new(topology);
        network.load_parameters(parameters)?;
        Ok(network)
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.topology.parameter_count()
    }

    /// Copies a flat parameter vector into the layer matrices.
    ///
    /// Fails with [`DimensionMismatch`] unless `parameters.len()` equals
    /// [`parameter_count`](Self::parameter_count); the network is left unchanged in
    /// that case.
    pub fn load_parameters(&mut self, parameters: &[f64]) -> Result<(), DimensionMismatch> {
        let expected = self.parameter_count();
        if parameters.len() != expected {
            return Err(DimensionMismatch {
                expected,
                actual: parameters.len(),
            });
        }
        let (w1, rest) = parameters.split_at(self.w1.len());
        let (b1, rest) = rest.split_at(self.b1.len());
        let (w2, b2) = rest.split_at(self.w2.len());
        self.w1.copy_from_slice(w1);
        self.b1.copy_from_slice(b1);
        self.w2.copy_from_slice(w2);
        self.b2.copy_from_slice(b2);
        Ok(())
    }

    /// Flattens the parameters back into genome order.
    #[must_use]
    pub fn parameters(&self) -> Vec<f64> {
        let mut parameters = Vec::with_capacity(self.parameter_count());
        parameters.extend_from_slice(&self.w1);
        parameters.extend_from_slice(&self.b1);
        parameters.extend_from_slice(&self.w2);
        parameters.extend_from_slice(&self.b2);
        parameters
    }

    /// Input→hidden weights, row-major (`hidden × input`).
    #[must_use]
    pub fn input_hidden_weights(&self) -> &[f64] {
        &self.w1
    }

    #[must_use]
    pub fn hidden_biases(&self) -> &[f64] {
        &self.b1
    }

    /// Hidden→output weights, row-major (`output × hidden`).
    #[must_use]
    pub fn hidden_output_weights(&self) -> &[f64] {
        &self.w2
    }

    #[must_use]
    pub fn output_biases(&self) -> &[f64] {
        &self.b2
    }

    /// Runs a forward pass.
    ///
    /// ```text
    /// hidden[h] = tanh(b1[h] + Σ_i input[i] · W1[h][i])
    /// output[o] = tanh(b2[o] + Σ_h hidden[h] · W2[o][h])
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `input.len()` differs from the topology's input size.
    pub fn forward(&mut self, input: &[f64]) -> Activations<'_> {
        let Topology {
            input_size,
            hidden_size,
            ..
        } = self.topology;
        assert_eq!(
            input.len(),
            input_size,
            "input has {} values, network expects {input_size}",
            input.len()
        );

        for (h, activation) in self.hidden.iter_mut().enumerate() {
            let row = &self.w1[h * input_size..(h + 1) * input_size];
            let sum = row
                .iter()
                .zip(input)
                .fold(self.b1[h], |acc, (w, x)| acc + x * w);
            *activation = sum.tanh();
        }

        for (o, activation) in self.output.iter_mut().enumerate() {
            let row = &self.w2[o * hidden_size..(o + 1) * hidden_size];
            let sum = row
                .iter()
                .zip(&self.hidden)
                .fold(self.b2[o], |acc, (w, x)| acc + x * w);
            *activation = sum.tanh();
        }

        Activations {
            hidden: &self.hidden,
            output: &self.output,
        }
    }
}
