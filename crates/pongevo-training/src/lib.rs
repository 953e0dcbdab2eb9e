//! Training system evolving Pong controller networks with a genetic algorithm.
//!
//! Each individual is a flat genome holding every weight and bias of a fixed-topology
//! network. Its fitness is the mean rally score of the episodes it plays as the agent
//! paddle (see [`pongevo_evaluator::fitness_evaluator`]).
//!
//! # How Training Works
//!
//! 1. **Population** - Create a population of random genomes
//! 2. **Evaluation** - Each genome is loaded into the network and plays several episodes
//! 3. **Fitness** - Episode statistics are reduced to a scalar fitness per genome
//! 4. **Selection** - Elites are kept; parents are chosen by tournament
//! 5. **Reproduction** - Children are made by single-point crossover and Gaussian mutation
//! 6. **Repeat** - Continue for as many generations as requested
//!
//! # Architecture
//!
//! ```text
//! Trainer (orchestrator, history)
//!     ↓ steps
//! Genetic Algorithm (population, fitnesses)
//!     ↓ evaluates genomes with
//! Fitness Evaluator (pongevo-evaluator)
//!     ↓ plays
//! Environment (pongevo-engine)
//! ```
//!
//! # Modules
//!
//! - [`config`] - Training options and the validation boundary
//! - [`genetic`] - Population, selection and generational replacement
//! - [`genome`] - Initialization, crossover and mutation operators
//! - [`history`] - Generation records and best genomes
//! - [`trainer`] - Orchestrator running generation steps
//!
//! # Current Limitations
//!
//! - **Sequential evaluation**: genomes are evaluated one after another on one thread
//! - **Fixed schedule**: mutation rate and strength never adapt during a run
//! - **Single objective**: rally length and survival are folded into one scalar

pub mod config;
pub mod genetic;
pub mod genome;
pub mod history;
pub mod trainer;
