//! Training orchestrator: ties a configuration to repeated generation steps.

use pongevo_engine::RngSeed;
use pongevo_evaluator::{
    DimensionMismatch,
    fitness_evaluator::{DefaultFitnessEvaluator, FitnessEvaluator as _, RallyFitness},
    network::NeuralNetwork,
};
use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{
    config::{ConfigurationError, TrainingConfig},
    genetic::{GenerationRecord, GeneticAlgorithm},
    history::{BestGenome, TrainingHistory},
};

/// Runs the genetic algorithm against the rally fitness function.
///
/// A trainer owns two random streams derived from one master seed: one for the genetic
/// algorithm and one for episode launches. Building two trainers from the same seeded
/// configuration yields identical runs.
///
/// # Example
///
/// ```
/// use pongevo_engine::RngSeed;
/// use pongevo_training::{config::TrainingConfig, trainer::Trainer};
///
/// let config = TrainingConfig {
///     population_size: 8,
///     elite_count: 2,
///     max_steps_per_episode: 100,
///     seed: Some(RngSeed::from_u128(42)),
///     ..TrainingConfig::default()
/// };
/// let mut trainer = Trainer::new(config).unwrap();
/// trainer.run(3).unwrap();
///
/// assert_eq!(trainer.history().records().len(), 3);
/// assert_eq!(trainer.generation(), 3);
/// assert!(trainer.best_genome().is_some());
/// ```
#[derive(Debug)]
pub struct Trainer {
    config: TrainingConfig,
    seed: RngSeed,
    algorithm: GeneticAlgorithm,
    evaluator: DefaultFitnessEvaluator<RallyFitness>,
    network: NeuralNetwork,
    episode_rng: Pcg32,
    history: TrainingHistory,
}

impl Trainer {
    /// Validates `config` and builds a fresh population.
    pub fn new(config: TrainingConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut master = seed.rng();
        let algorithm_seed: RngSeed = master.random();
        let episode_seed: RngSeed = master.random();

        let network = NeuralNetwork::new(config.topology);
        let algorithm = GeneticAlgorithm::new(
            config.genetic_params(),
            network.parameter_count(),
            algorithm_seed,
        );
        let evaluator = DefaultFitnessEvaluator::new(
            config.field,
            config.episodes_per_genome,
            config.max_steps_per_episode,
            RallyFitness::new(),
        );
        tracing::debug!(%seed, genome_length = algorithm.genome_length(), "trainer created");

        Ok(Self {
            config,
            seed,
            algorithm,
            evaluator,
            network,
            episode_rng: episode_seed.rng(),
            history: TrainingHistory::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Master seed of this run, drawn at random when the configuration has none.
    #[must_use]
    pub fn seed(&self) -> RngSeed {
        self.seed
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.algorithm.generation()
    }

    #[must_use]
    pub fn algorithm(&self) -> &GeneticAlgorithm {
        &self.algorithm
    }

    #[must_use]
    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    /// Best genome of the most recently evaluated generation.
    #[must_use]
    pub fn best_genome(&self) -> Option<&BestGenome> {
        self.history.latest_best()
    }

    /// Fittest genome evaluated since the last reset.
    #[must_use]
    pub fn champion(&self) -> Option<&BestGenome> {
        self.history.champion()
    }

    /// Evaluates the current generation, records it, then breeds the next one.
    pub fn step(&mut self) -> Result<GenerationRecord, DimensionMismatch> {
        let Self {
            algorithm,
            evaluator,
            network,
            episode_rng,
            history,
            ..
        } = self;

        let record = algorithm.try_evaluate_population(|genome| {
            evaluator.evaluate_genome(network, genome, &mut *episode_rng)
        })?;
        history.record(record, &algorithm.genomes()[record.best_index]);
        algorithm.next_generation();

        tracing::info!(
            generation = record.generation,
            best_fitness = record.best_fitness,
            mean_fitness = record.mean_fitness,
            "generation evaluated"
        );
        Ok(record)
    }

    /// Runs `generations` steps.
    pub fn run(&mut self, generations: usize) -> Result<(), DimensionMismatch> {
        for _ in 0..generations {
            self.step()?;
        }
        Ok(())
    }

    /// Restarts the population from generation 0 and clears the history.
    pub fn reset(&mut self) {
        self.algorithm.reset();
        self.history.clear();
        tracing::info!("training reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u128) -> TrainingConfig {
        TrainingConfig {
            population_size: 6,
            elite_count: 2,
            episodes_per_genome: 1,
            max_steps_per_episode: 20,
            seed: Some(RngSeed::from_u128(seed)),
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = TrainingConfig {
            elite_count: 6,
            ..small_config(1)
        };
        assert_eq!(
            Trainer::new(config).unwrap_err(),
            ConfigurationError::TooManyElites {
                elite_count: 6,
                population_size: 6,
            }
        );
    }

    #[test]
    fn test_step_appends_history() {
        let mut trainer = Trainer::new(small_config(2)).unwrap();
        assert_eq!(trainer.algorithm().genome_length(), 65);

        for generation in 0..4 {
            let record = trainer.step().unwrap();
            assert_eq!(record.generation, generation);
            assert!(record.best_fitness >= record.mean_fitness);
            // Episodes are capped at 20 steps and a return needs more than 20 steps.
            assert!((1.0..=20.0).contains(&record.best_fitness));
        }
        assert_eq!(trainer.generation(), 4);
        assert_eq!(trainer.history().records().len(), 4);

        let latest = trainer.best_genome().unwrap();
        assert_eq!(latest.generation, 3);
        assert_eq!(latest.genome.len(), 65);
        let champion = trainer.champion().unwrap();
        assert!(champion.fitness >= latest.fitness);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Trainer::new(small_config(3)).unwrap();
        let mut b = Trainer::new(small_config(3)).unwrap();
        a.run(3).unwrap();
        b.run(3).unwrap();
        assert_eq!(a.history(), b.history());
        assert_eq!(a.algorithm().genomes(), b.algorithm().genomes());
    }

    #[test]
    fn test_unseeded_trainer_reports_its_seed() {
        let config = TrainingConfig {
            seed: None,
            ..small_config(0)
        };
        let trainer = Trainer::new(config.clone()).unwrap();
        let replay = Trainer::new(TrainingConfig {
            seed: Some(trainer.seed()),
            ..config
        })
        .unwrap();
        assert_eq!(trainer.algorithm().genomes(), replay.algorithm().genomes());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut trainer = Trainer::new(small_config(4)).unwrap();
        trainer.run(2).unwrap();
        trainer.reset();
        assert_eq!(trainer.generation(), 0);
        assert!(trainer.history().is_empty());
        assert!(trainer.best_genome().is_none());
        assert_eq!(trainer.step().unwrap().generation, 0);
    }
}
