//! Genetic algorithm evolving flat network genomes.
//!
//! The algorithm owns a population of fixed-length genomes and a parallel vector of
//! fitness values. Each generation goes through the same cycle:
//!
//! 1. **Evaluate** - A fitness function scores every genome in index order
//! 2. **Rank** - Genome indices are stable-sorted by descending fitness
//! 3. **Elitism** - The top `elite_count` genomes are copied unchanged
//! 4. **Reproduce** - Remaining slots are filled with children of two tournament-selected
//!    parents, combined by single-point crossover and then mutated
//! 5. **Replace** - The new population replaces the old one and the generation counter
//!    advances
//!
//! All random draws (initial genes, tournaments, crossover points, mutation) come from a
//! single [`Pcg32`] stream owned by the algorithm, so a run is reproducible from its
//! [`RngSeed`].
//!
//! # Example
//!
//! ```
//! use pongevo_engine::RngSeed;
//! use pongevo_training::genetic::{GeneticAlgorithm, GeneticAlgorithmParams};
//!
//! let params = GeneticAlgorithmParams::default();
//! let mut ga = GeneticAlgorithm::new(params, 4, RngSeed::from_u128(7));
//!
//! for _ in 0..5 {
//!     // Maximize the sum of genes.
//!     let record = ga.evaluate_population(|genome| genome.iter().sum());
//!     assert_eq!(record.generation, ga.generation());
//!     ga.next_generation();
//! }
//! assert_eq!(ga.generation(), 5);
//! assert_eq!(ga.genomes().len(), params.population_size);
//! ```

use std::convert::Infallible;

use pongevo_engine::RngSeed;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::genome;

/// Parameters controlling selection and variation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticAlgorithmParams {
    /// Number of genomes per generation
    pub population_size: usize,
    /// Number of top genomes copied unchanged into the next generation
    pub elite_count: usize,
    /// Per-gene probability of Gaussian mutation
    pub mutation_rate: f64,
    /// Standard deviation of the mutation noise
    pub mutation_std_dev: f64,
    /// Number of draws per tournament (larger = stronger selection pressure)
    pub tournament_size: usize,
}

impl Default for GeneticAlgorithmParams {
    fn default() -> Self {
        Self {
            population_size: 30,
            elite_count: 4,
            mutation_rate: 0.15,
            mutation_std_dev: 0.3,
            tournament_size: 3,
        }
    }
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: f64,
    /// Index of the best genome; the lowest index wins ties
    pub best_index: usize,
    pub mean_fitness: f64,
}

#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    params: GeneticAlgorithmParams,
    genome_length: usize,
    genomes: Vec<Vec<f64>>,
    fitnesses: Vec<f64>,
    generation: usize,
    rng: Pcg32,
}

impl GeneticAlgorithm {
    /// Creates a population of random genomes with all fitnesses set to 0.
    ///
    /// Parameters are not validated here beyond what the algorithm needs to run; reject
    /// bad configurations before constructing the algorithm (see
    /// [`TrainingConfig::validate`](crate::config::TrainingConfig::validate)).
    ///
    /// # Panics
    ///
    /// Panics if `population_size`, `tournament_size` or `genome_length` is 0.
    #[must_use]
    pub fn new(params: GeneticAlgorithmParams, genome_length: usize, seed: RngSeed) -> Self {
        assert!(params.population_size > 0);
        assert!(params.tournament_size > 0);
        assert!(genome_length > 0);
        let mut ga = Self {
            params,
            genome_length,
            genomes: vec![],
            fitnesses: vec![],
            generation: 0,
            rng: seed.rng(),
        };
        ga.populate();
        ga
    }

    fn populate(&mut self) {
        self.genomes = (0..self.params.population_size)
            .map(|_| genome::random(&mut self.rng, self.genome_length))
            .collect();
        self.fitnesses = vec![0.0; self.params.population_size];
    }

    #[must_use]
    pub fn params(&self) -> &GeneticAlgorithmParams {
        &self.params
    }

    #[must_use]
    pub fn genome_length(&self) -> usize {
        self.genome_length
    }

    /// Number of completed [`next_generation`](Self::next_generation) calls since
    /// construction or the last reset.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn genomes(&self) -> &[Vec<f64>] {
        &self.genomes
    }

    /// Fitness of each genome, index-aligned with [`genomes`](Self::genomes).
    #[must_use]
    pub fn fitnesses(&self) -> &[f64] {
        &self.fitnesses
    }

    /// Scores every genome with `fitness_fn` and records the results.
    pub fn evaluate_population<F>(&mut self, mut fitness_fn: F) -> GenerationRecord
    where
        F: FnMut(&[f64]) -> f64,
    {
        match self.try_evaluate_population(|genome| Ok::<_, Infallible>(fitness_fn(genome))) {
            Ok(record) => record,
            Err(never) => match never {},
        }
    }

    /// Fallible version of [`evaluate_population`](Self::evaluate_population).
    ///
    /// Stops at the first error; recorded fitnesses are left untouched in that case.
    pub fn try_evaluate_population<F, E>(
        &mut self,
        mut fitness_fn: F,
    ) -> Result<GenerationRecord, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let fitnesses = self
            .genomes
            .iter()
            .map(|genome| fitness_fn(genome))
            .collect::<Result<Vec<_>, _>>()?;
        self.fitnesses = fitnesses;

        let (best_index, best_fitness) = self
            .fitnesses
            .iter()
            .copied()
            .enumerate()
            .fold((0, self.fitnesses[0]), |best, (i, fitness)| {
                if fitness > best.1 { (i, fitness) } else { best }
            });
        #[expect(clippy::cast_precision_loss)]
        let mean_fitness = self.fitnesses.iter().sum::<f64>() / self.fitnesses.len() as f64;

        let record = GenerationRecord {
            generation: self.generation,
            best_fitness,
            best_index,
            mean_fitness,
        };
        tracing::debug!(
            generation = record.generation,
            best_fitness,
            best_index,
            mean_fitness,
            "population evaluated"
        );
        Ok(record)
    }

    /// Replaces the population with the next generation.
    ///
    /// Elites are deep copies of the best genomes; children never alias them.
    pub fn next_generation(&mut self) {
        let mut ranking = (0..self.genomes.len()).collect::<Vec<_>>();
        ranking.sort_by(|&a, &b| self.fitnesses[b].total_cmp(&self.fitnesses[a]));

        let mut next_genomes = Vec::with_capacity(self.params.population_size);
        next_genomes.extend(
            ranking
                .iter()
                .take(self.params.elite_count)
                .map(|&i| self.genomes[i].clone()),
        );

        while next_genomes.len() < self.params.population_size {
            let tournament_size = self.params.tournament_size;
            let p1 = tournament_select(&self.fitnesses, tournament_size, &mut self.rng);
            let p2 = tournament_select(&self.fitnesses, tournament_size, &mut self.rng);
            let mut child =
                genome::single_point_crossover(&self.genomes[p1], &self.genomes[p2], &mut self.rng);
            genome::mutate(
                &mut child,
                self.params.mutation_rate,
                self.params.mutation_std_dev,
                &mut self.rng,
            );
            next_genomes.push(child);
        }

        self.genomes = next_genomes;
        self.fitnesses = vec![0.0; self.params.population_size];
        self.generation += 1;
        tracing::debug!(generation = self.generation, "next generation created");
    }

    /// Reinitializes the population with fresh random genomes and zeroes the generation
    /// counter.
    ///
    /// The random stream continues from its current position rather than restarting.
    pub fn reset(&mut self) {
        self.populate();
        self.generation = 0;
    }
}

/// Selects a parent index by tournament selection.
///
/// Draws `tournament_size` indices uniformly with replacement from the whole population
/// and returns the fittest of them. A later draw replaces the current winner only when
/// its fitness is strictly greater.
///
/// # Panics
///
/// Panics if `fitnesses` is empty or `tournament_size` is 0.
pub fn tournament_select<R>(fitnesses: &[f64], tournament_size: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    assert!(!fitnesses.is_empty());
    let mut winner = rng.random_range(0..fitnesses.len());
    for _ in 1..tournament_size {
        let candidate = rng.random_range(0..fitnesses.len());
        if fitnesses[candidate] > fitnesses[winner] {
            winner = candidate;
        }
    }
    winner
}
