//! Fitness evaluation: scoring a genome by the episodes its network plays.
//!
//! # How It Works
//!
//! 1. **Load** - The genome is copied into a reusable [`NeuralNetwork`]
//! 2. **Play** - The network controls the agent paddle in `episodes_per_genome` fresh
//!    environments, each capped at `max_steps_per_episode` steps
//! 3. **Score** - Each episode's [`EpisodeStats`] is reduced to a scalar by a fitness
//!    function, and the fitness of the genome is the mean over its episodes
//!
//! Episodes never share state: every episode starts from a new [`Environment`] whose
//! ball launch is drawn from the supplied generator.
//!
//! # Rally Fitness
//!
//! ```text
//! fitness = steps_survived + rebounds × 200
//! ```
//!
//! Returning the ball dominates the score; survival time breaks ties between genomes
//! with the same number of returns.

use std::fmt;

use pongevo_engine::{Environment, EpisodeStats, FieldSize};
use rand::RngCore;

use crate::{
    DimensionMismatch,
    controller::{Controller, NetworkController, play_episode},
    network::NeuralNetwork,
};

/// Reduces the statistics of one episode to a fitness score (higher is better).
pub trait EvaluateEpisodeStats {
    fn evaluate_episode_stats(&self, stats: &EpisodeStats, max_steps: usize) -> f64;
}

/// Evaluates controllers and genomes over several episodes.
pub trait FitnessEvaluator: fmt::Debug + Send + Sync {
    /// Plays and scores a single fresh episode.
    fn play_and_evaluate_episode(
        &self,
        controller: &mut dyn Controller,
        rng: &mut dyn RngCore,
    ) -> f64;

    /// Plays and scores every episode, returning the mean fitness.
    fn play_and_evaluate_episodes(
        &self,
        controller: &mut dyn Controller,
        rng: &mut dyn RngCore,
    ) -> f64;

    /// Loads `genome` into `network` and returns its mean fitness.
    fn evaluate_genome(
        &self,
        network: &mut NeuralNetwork,
        genome: &[f64],
        rng: &mut dyn RngCore,
    ) -> Result<f64, DimensionMismatch> {
        network.load_parameters(genome)?;
        let mut controller = NetworkController::new(network);
        let fitness = self.play_and_evaluate_episodes(&mut controller, rng);
        tracing::trace!(fitness, "genome evaluated");
        Ok(fitness)
    }
}

/// Fitness evaluator playing a fixed number of capped episodes on a fixed field.
#[derive(Debug, Clone)]
pub struct DefaultFitnessEvaluator<E> {
    field: FieldSize,
    episodes_per_genome: usize,
    max_steps_per_episode: usize,
    evaluator: E,
}

impl<E> DefaultFitnessEvaluator<E> {
    /// Creates a new fitness evaluator.
    ///
    /// # Arguments
    ///
    /// * `field` - Field every episode is played on
    /// * `episodes_per_genome` - Number of independent episodes averaged per genome
    /// * `max_steps_per_episode` - Step cap of each episode
    /// * `evaluator` - Fitness function applied to each episode's statistics
    pub fn new(
        field: FieldSize,
        episodes_per_genome: usize,
        max_steps_per_episode: usize,
        evaluator: E,
    ) -> Self {
        Self {
            field,
            episodes_per_genome,
            max_steps_per_episode,
            evaluator,
        }
    }

    #[must_use]
    pub fn episodes_per_genome(&self) -> usize {
        self.episodes_per_genome
    }

    #[must_use]
    pub fn max_steps_per_episode(&self) -> usize {
        self.max_steps_per_episode
    }
}

impl<E> FitnessEvaluator for DefaultFitnessEvaluator<E>
where
    E: EvaluateEpisodeStats + fmt::Debug + Send + Sync,
{
    fn play_and_evaluate_episode(
        &self,
        controller: &mut dyn Controller,
        rng: &mut dyn RngCore,
    ) -> f64 {
        let mut env = Environment::new(self.field, rng);
        let stats = play_episode(controller, &mut env, self.max_steps_per_episode);
        self.evaluator
            .evaluate_episode_stats(&stats, self.max_steps_per_episode)
    }

    #[expect(clippy::cast_precision_loss)]
    fn play_and_evaluate_episodes(
        &self,
        controller: &mut dyn Controller,
        rng: &mut dyn RngCore,
    ) -> f64 {
        let mut total_fitness = 0.0;
        for _ in 0..self.episodes_per_genome {
            total_fitness += self.play_and_evaluate_episode(controller, rng);
        }
        total_fitness / self.episodes_per_genome as f64
    }
}

/// Rewards returned balls first and survival time second.
///
/// **Formula:**
/// ```text
/// fitness = steps + rebounds × rebound_reward
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RallyFitness {
    rebound_reward: f64,
}

impl Default for RallyFitness {
    fn default() -> Self {
        Self::new()
    }
}

impl RallyFitness {
    pub const DEFAULT_REBOUND_REWARD: f64 = 200.0;

    #[must_use]
    pub const fn new() -> Self {
        Self::with_rebound_reward(Self::DEFAULT_REBOUND_REWARD)
    }

    #[must_use]
    pub const fn with_rebound_reward(rebound_reward: f64) -> Self {
        Self { rebound_reward }
    }
}

impl EvaluateEpisodeStats for RallyFitness {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_episode_stats(&self, stats: &EpisodeStats, _max_steps: usize) -> f64 {
        stats.steps() as f64 + stats.rebounds() as f64 * self.rebound_reward
    }
}
