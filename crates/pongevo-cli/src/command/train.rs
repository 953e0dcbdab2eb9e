use std::path::PathBuf;

use anyhow::Context;
use pongevo_engine::RngSeed;
use pongevo_training::{config::TrainingConfig, trainer::Trainer};

use crate::{
    model::pong_model::PongModel,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Training configuration file (JSON); missing options use their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of generations to evolve
    #[arg(long, default_value_t = 100)]
    generations: usize,
    #[arg(long)]
    population_size: Option<usize>,
    #[arg(long)]
    elite_count: Option<usize>,
    #[arg(long)]
    mutation_rate: Option<f64>,
    #[arg(long)]
    mutation_std_dev: Option<f64>,
    #[arg(long)]
    tournament_size: Option<usize>,
    #[arg(long)]
    episodes_per_genome: Option<usize>,
    #[arg(long)]
    max_steps_per_episode: Option<usize>,
    /// Master seed as 32 hex digits
    #[arg(long)]
    seed: Option<RngSeed>,
    /// Name stored in the model file
    #[arg(long, default_value = "pong")]
    name: String,
    /// Output file path for the model
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output file path for the generation history
    #[arg(long)]
    history: Option<PathBuf>,
}

impl TrainArg {
    fn load_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("training config", path)?,
            None => TrainingConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut TrainingConfig) {
        if let Some(value) = self.population_size {
            config.population_size = value;
        }
        if let Some(value) = self.elite_count {
            config.elite_count = value;
        }
        if let Some(value) = self.mutation_rate {
            config.mutation_rate = value;
        }
        if let Some(value) = self.mutation_std_dev {
            config.mutation_std_dev = value;
        }
        if let Some(value) = self.tournament_size {
            config.tournament_size = value;
        }
        if let Some(value) = self.episodes_per_genome {
            config.episodes_per_genome = value;
        }
        if let Some(value) = self.max_steps_per_episode {
            config.max_steps_per_episode = value;
        }
        if let Some(value) = self.seed {
            config.seed = Some(value);
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.load_config()?;
    let topology = config.topology;
    let mut trainer = Trainer::new(config).context("Invalid training configuration")?;
    tracing::info!(seed = %trainer.seed(), generations = arg.generations, "training started");

    for _ in 0..arg.generations {
        trainer.step()?;
    }

    let Some(champion) = trainer.champion() else {
        anyhow::bail!("No generation was evaluated; nothing to save");
    };
    let model = PongModel::from_best_genome(arg.name.clone(), topology, champion);
    Output::save_json(&model, arg.output.clone())?;

    if let Some(path) = &arg.history {
        Output::save_json(trainer.history(), Some(path.clone()))?;
    }

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Generation: {}", model.generation);
    eprintln!("  Fitness: {:.3}", model.fitness);
    eprintln!("  Genome: {} parameters", model.genome.len());

    Ok(())
}
