use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use pongevo_engine::OBSERVATION_LEN;
use pongevo_evaluator::network::{NeuralNetwork, Topology};
use pongevo_training::history::BestGenome;
use serde::{Deserialize, Serialize};

use crate::util;

/// A trained controller: the genome of a network and where it came from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PongModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub generation: usize,
    pub fitness: f64,
    pub topology: Topology,
    pub genome: Vec<f64>,
}

impl PongModel {
    pub fn from_best_genome(name: String, topology: Topology, best: &BestGenome) -> Self {
        Self {
            name,
            trained_at: Utc::now(),
            generation: best.generation,
            fitness: best.fitness,
            topology,
            genome: best.genome.clone(),
        }
    }

    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("model", path)
    }

    /// Builds the network encoded by this model.
    pub fn to_network(&self) -> anyhow::Result<NeuralNetwork> {
        anyhow::ensure!(
            self.topology.input_size == OBSERVATION_LEN,
            "Model {} expects {} inputs, observations have {OBSERVATION_LEN}",
            self.name,
            self.topology.input_size,
        );
        anyhow::ensure!(
            self.topology.output_size > 0,
            "Model {} has no output unit to drive the paddle",
            self.name,
        );
        NeuralNetwork::from_parameters(self.topology, &self.genome)
            .with_context(|| format!("Model {} does not match its topology", self.name))
    }
}
