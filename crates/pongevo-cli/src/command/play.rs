use std::path::PathBuf;

use anyhow::Context;
use pongevo_engine::{Environment, FieldSize, RngSeed};
use pongevo_evaluator::{
    controller::{Controller, NetworkController, TrackingController, play_episode},
    fitness_evaluator::{EvaluateEpisodeStats as _, RallyFitness},
};
use rand::Rng as _;

use crate::model::pong_model::PongModel;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum ControllerKind {
    #[default]
    Network,
    Tracker,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the model file (JSON format)
    #[arg(long)]
    model: Option<PathBuf>,
    /// Which controller drives the agent paddle
    #[arg(long, default_value = "network")]
    controller: ControllerKind,
    /// Number of episodes to play
    #[arg(long, default_value_t = 5)]
    episodes: usize,
    /// Step cap of each episode
    #[arg(long, default_value_t = 600)]
    max_steps: usize,
    /// Seed for ball launches as 32 hex digits
    #[arg(long)]
    seed: Option<RngSeed>,
    /// Play on the small 200×150 field
    #[arg(long, default_value_t = false)]
    compact: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        model,
        controller,
        episodes,
        max_steps,
        seed,
        compact,
    } = arg;

    let mut network = match controller {
        ControllerKind::Network => {
            let path = model
                .as_ref()
                .context("--model is required for the network controller")?;
            let model = PongModel::open(path)?;
            eprintln!(
                "Model: {} (generation {}, fitness {:.3})",
                model.name, model.generation, model.fitness
            );
            Some(model.to_network()?)
        }
        ControllerKind::Tracker => None,
    };
    let mut network_controller;
    let mut tracker;
    let controller: &mut dyn Controller = match &mut network {
        Some(network) => {
            network_controller = NetworkController::new(network);
            &mut network_controller
        }
        None => {
            tracker = TrackingController::default();
            &mut tracker
        }
    };

    let field = if *compact {
        FieldSize::COMPACT
    } else {
        FieldSize::TRAINING
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = seed.rng();
    let fitness_fn = RallyFitness::new();
    eprintln!("Seed: {seed}");

    let mut total_fitness = 0.0;
    for episode in 0..*episodes {
        let mut env = Environment::new(field, &mut rng);
        let stats = play_episode(controller, &mut env, *max_steps);
        let fitness = fitness_fn.evaluate_episode_stats(&stats, *max_steps);
        total_fitness += fitness;
        eprintln!(
            "  Episode {episode:2}: steps {:4}, rebounds {:3}, fitness {fitness:.1}{}",
            stats.steps(),
            stats.rebounds(),
            if env.is_terminated() { "" } else { " (step cap)" },
        );
    }
    if *episodes > 0 {
        #[expect(clippy::cast_precision_loss)]
        let mean = total_fitness / *episodes as f64;
        eprintln!("Mean fitness: {mean:.3}");
    }

    Ok(())
}
