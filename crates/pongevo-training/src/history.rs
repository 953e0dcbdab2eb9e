//! Run history: generation records and the best genomes seen so far.

use serde::{Deserialize, Serialize};

use crate::genetic::GenerationRecord;

/// A genome together with the fitness it was scored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestGenome {
    pub generation: usize,
    pub fitness: f64,
    pub genome: Vec<f64>,
}

/// Append-only history of a training run.
///
/// Besides the per-generation records, the history keeps two genomes:
///
/// - the best genome of the most recently evaluated generation
/// - the all-time champion, replaced only by a strictly fitter genome
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    records: Vec<GenerationRecord>,
    latest_best: Option<BestGenome>,
    champion: Option<BestGenome>,
}

impl TrainingHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record`, where `genome` is the genome at `record.best_index`.
    pub fn record(&mut self, record: GenerationRecord, genome: &[f64]) {
        let best = BestGenome {
            generation: record.generation,
            fitness: record.best_fitness,
            genome: genome.to_vec(),
        };
        if self
            .champion
            .as_ref()
            .is_none_or(|champion| best.fitness > champion.fitness)
        {
            self.champion = Some(best.clone());
        }
        self.latest_best = Some(best);
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    #[must_use]
    pub fn latest_best(&self) -> Option<&BestGenome> {
        self.latest_best.as_ref()
    }

    #[must_use]
    pub fn champion(&self) -> Option<&BestGenome> {
        self.champion.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(generation: usize, best_fitness: f64) -> GenerationRecord {
        GenerationRecord {
            generation,
            best_fitness,
            best_index: 0,
            mean_fitness: best_fitness / 2.0,
        }
    }

    #[test]
    fn test_empty_history() {
        let history = TrainingHistory::new();
        assert!(history.is_empty());
        assert!(history.latest_best().is_none());
        assert!(history.champion().is_none());
    }

    #[test]
    fn test_champion_keeps_first_of_equal_fitness() {
        let mut history = TrainingHistory::new();
        history.record(record(0, 100.0), &[0.0]);
        history.record(record(1, 300.0), &[1.0]);
        history.record(record(2, 300.0), &[2.0]);
        history.record(record(3, 50.0), &[3.0]);

        assert_eq!(history.records().len(), 4);
        assert_eq!(history.records()[2], record(2, 300.0));

        let latest = history.latest_best().unwrap();
        assert_eq!(latest.generation, 3);
        assert_eq!(latest.genome, vec![3.0]);

        let champion = history.champion().unwrap();
        assert_eq!(champion.generation, 1);
        assert_eq!(champion.fitness, 300.0);
        assert_eq!(champion.genome, vec![1.0]);
    }

    #[test]
    fn test_clear() {
        let mut history = TrainingHistory::new();
        history.record(record(0, 1.0), &[0.5]);
        history.clear();
        assert_eq!(history, TrainingHistory::new());
    }
}
