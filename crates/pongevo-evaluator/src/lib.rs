//! Controllers and fitness evaluation for Pong agents.
//!
//! This crate implements the evaluation side of training in three levels:
//!
//! 1. **Network** ([`network`]) - A fixed-topology feedforward network whose parameters
//!    are loaded from a flat genome.
//!
//! 2. **Controller** ([`controller`]) - Turns observations into paddle actions and plays
//!    whole episodes against an [`Environment`](pongevo_engine::Environment).
//!
//! 3. **Fitness** ([`fitness_evaluator`]) - Plays several fresh episodes per genome and
//!    reduces their statistics to a single scalar fitness.
//!
//! # Architecture
//!
//! ```text
//! Fitness Evaluator (mean fitness over episodes)
//!     ↓ uses
//! Controller (observe → act → step loop)
//!     ↓ uses
//! Neural Network (observation → action)
//! ```
//!
//! # Example
//!
//! ```
//! use pongevo_engine::{FieldSize, RngSeed};
//! use pongevo_evaluator::{
//!     fitness_evaluator::{DefaultFitnessEvaluator, FitnessEvaluator, RallyFitness},
//!     network::{NeuralNetwork, Topology},
//! };
//!
//! let mut network = NeuralNetwork::new(Topology::PONG);
//! let genome = vec![0.1; Topology::PONG.parameter_count()];
//! let evaluator = DefaultFitnessEvaluator::new(FieldSize::TRAINING, 2, 600, RallyFitness::new());
//!
//! let mut rng = RngSeed::from_u128(1).rng();
//! let fitness = evaluator.evaluate_genome(&mut network, &genome, &mut rng).unwrap();
//! assert!(fitness >= 1.0);
//! ```

pub mod controller;
pub mod fitness_evaluator;
pub mod network;

/// Error returned when a parameter vector does not fit a network topology.
///
/// This always indicates a wiring bug: genomes are sized from the same topology the
/// network is built from.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("parameter vector has {actual} values, network expects {expected}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub actual: usize,
}
