use clap::{Parser, Subcommand};

use self::{play::PlayArg, print_config::PrintConfigArg, train::TrainArg};

mod play;
mod print_config;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a Pong controller with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Play headless episodes with a trained model
    Play(#[clap(flatten)] PlayArg),
    /// Print the default training configuration as JSON
    PrintConfig(#[clap(flatten)] PrintConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::PrintConfig(arg) => print_config::run(&arg)?,
    }
    Ok(())
}
