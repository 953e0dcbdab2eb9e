//! Training configuration and its validation boundary.
//!
//! A [`TrainingConfig`] is an immutable value: changing any option means building a new
//! [`Trainer`](crate::trainer::Trainer), which restarts the population. Every option has
//! a default, so a partial JSON document is a valid configuration:
//!
//! ```
//! use pongevo_training::config::TrainingConfig;
//!
//! let config: TrainingConfig = serde_json::from_str(r#"{ "population_size": 50 }"#).unwrap();
//! assert_eq!(config.population_size, 50);
//! assert_eq!(config.elite_count, 4);
//! config.validate().unwrap();
//! ```

use pongevo_engine::{FieldSize, OBSERVATION_LEN, RngSeed};
use pongevo_evaluator::network::Topology;
use serde::{Deserialize, Serialize};

use crate::genetic::GeneticAlgorithmParams;

/// A configuration rejected before any training state is built.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("elite count {elite_count} must be less than population size {population_size}")]
    TooManyElites {
        elite_count: usize,
        population_size: usize,
    },
    #[display("mutation rate {mutation_rate} must be within [0, 1]")]
    InvalidMutationRate { mutation_rate: f64 },
    #[display("mutation standard deviation {mutation_std_dev} must be finite and non-negative")]
    InvalidMutationStdDev { mutation_std_dev: f64 },
    #[display("tournament size must be at least 1")]
    EmptyTournament,
    #[display("episodes per genome must be at least 1")]
    NoEpisodes,
    #[display("max steps per episode must be at least 1")]
    NoSteps,
    #[display("network input size {input_size} does not match observation length {expected}")]
    InputSizeMismatch { input_size: usize, expected: usize },
    #[display("network hidden and output layers must not be empty")]
    EmptyLayer,
}

/// Every recognized training option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub population_size: usize,
    pub elite_count: usize,
    pub mutation_rate: f64,
    pub mutation_std_dev: f64,
    pub tournament_size: usize,
    pub episodes_per_genome: usize,
    pub max_steps_per_episode: usize,
    pub topology: Topology,
    pub field: FieldSize,
    /// Master seed; a random one is drawn when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<RngSeed>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let ga = GeneticAlgorithmParams::default();
        Self {
            population_size: ga.population_size,
            elite_count: ga.elite_count,
            mutation_rate: ga.mutation_rate,
            mutation_std_dev: ga.mutation_std_dev,
            tournament_size: ga.tournament_size,
            episodes_per_genome: 2,
            max_steps_per_episode: 600,
            topology: Topology::PONG,
            field: FieldSize::TRAINING,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Checks every option against its allowed range.
    ///
    /// The field size needs no check here: [`FieldSize`] can only be built valid.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.population_size == 0 {
            return Err(ConfigurationError::EmptyPopulation);
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigurationError::TooManyElites {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigurationError::InvalidMutationRate {
                mutation_rate: self.mutation_rate,
            });
        }
        if !self.mutation_std_dev.is_finite() || self.mutation_std_dev < 0.0 {
            return Err(ConfigurationError::InvalidMutationStdDev {
                mutation_std_dev: self.mutation_std_dev,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigurationError::EmptyTournament);
        }
        if self.episodes_per_genome == 0 {
            return Err(ConfigurationError::NoEpisodes);
        }
        if self.max_steps_per_episode == 0 {
            return Err(ConfigurationError::NoSteps);
        }
        if self.topology.input_size != OBSERVATION_LEN {
            return Err(ConfigurationError::InputSizeMismatch {
                input_size: self.topology.input_size,
                expected: OBSERVATION_LEN,
            });
        }
        if self.topology.hidden_size == 0 || self.topology.output_size == 0 {
            return Err(ConfigurationError::EmptyLayer);
        }
        Ok(())
    }

    #[must_use]
    pub fn genetic_params(&self) -> GeneticAlgorithmParams {
        GeneticAlgorithmParams {
            population_size: self.population_size,
            elite_count: self.elite_count,
            mutation_rate: self.mutation_rate,
            mutation_std_dev: self.mutation_std_dev,
            tournament_size: self.tournament_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TrainingConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.genetic_params(), GeneticAlgorithmParams::default());
        assert_eq!(config.topology.parameter_count(), 65);
    }

    #[test]
    fn test_rejects_out_of_range_options() {
        let cases: [(fn(&mut TrainingConfig), ConfigurationError); 9] = [
            (
                |c| c.population_size = 0,
                ConfigurationError::EmptyPopulation,
            ),
            (
                |c| c.elite_count = 30,
                ConfigurationError::TooManyElites {
                    elite_count: 30,
                    population_size: 30,
                },
            ),
            (
                |c| c.mutation_rate = 1.5,
                ConfigurationError::InvalidMutationRate { mutation_rate: 1.5 },
            ),
            (
                |c| c.mutation_std_dev = -0.1,
                ConfigurationError::InvalidMutationStdDev {
                    mutation_std_dev: -0.1,
                },
            ),
            (
                |c| c.tournament_size = 0,
                ConfigurationError::EmptyTournament,
            ),
            (
                |c| c.episodes_per_genome = 0,
                ConfigurationError::NoEpisodes,
            ),
            (|c| c.max_steps_per_episode = 0, ConfigurationError::NoSteps),
            (
                |c| c.topology.input_size = 4,
                ConfigurationError::InputSizeMismatch {
                    input_size: 4,
                    expected: 6,
                },
            ),
            (|c| c.topology.hidden_size = 0, ConfigurationError::EmptyLayer),
        ];
        for (modify, expected) in cases {
            let mut config = TrainingConfig::default();
            modify(&mut config);
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_rejects_non_finite_rates() {
        let config = TrainingConfig {
            mutation_rate: f64::NAN,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidMutationRate { .. })
        ));

        let config = TrainingConfig {
            mutation_std_dev: f64::INFINITY,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidMutationStdDev { .. })
        ));
    }

    #[test]
    fn test_boundary_values_are_accepted() {
        let config = TrainingConfig {
            population_size: 1,
            elite_count: 0,
            mutation_rate: 1.0,
            mutation_std_dev: 0.0,
            tournament_size: 1,
            episodes_per_genome: 1,
            max_steps_per_episode: 1,
            ..TrainingConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_json_round_trip_with_seed() {
        let config = TrainingConfig {
            seed: Some(RngSeed::from_u128(0xabc)),
            field: FieldSize::COMPACT,
            ..TrainingConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"seed\":\"00000000000000000000000000000abc\""));
        let parsed: TrainingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_rejects_tiny_field() {
        let result = serde_json::from_str::<TrainingConfig>(
            r#"{ "field": { "width": 10.0, "height": 10.0 } }"#,
        );
        assert!(result.is_err());
    }
}
