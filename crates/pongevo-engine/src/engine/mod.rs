//! Episode logic on top of the core bodies.
//!
//! - [`Environment`] - Single-episode simulation with `reset`/`step`
//! - [`EnvironmentState`] - Snapshot of every mutable quantity of an episode
//! - [`EpisodeStats`] - Steps survived and successful returns
//! - [`Observation`] - Normalized 6-vector fed to controllers
//! - [`RngSeed`] - Seed for reproducible random streams
//!
//! # Episode Flow
//!
//! 1. Create an [`Environment`] (launches the ball with a random angle and side)
//! 2. Read an [`Observation`], choose an action in `[-1, 1]`
//! 3. Call [`Environment::step`]
//! 4. Repeat until the step reports termination or a step cap is reached
//!
//! # Example
//!
//! ```
//! use pongevo_engine::{Environment, FieldSize, RngSeed};
//!
//! let mut rng = RngSeed::from_u128(7).rng();
//! let mut env = Environment::new(FieldSize::TRAINING, &mut rng);
//!
//! let mut steps = 0;
//! while steps < 100 && !env.step(0.0).terminated {
//!     steps += 1;
//! }
//! assert_eq!(env.stats().steps(), steps + usize::from(env.is_terminated()));
//! ```

pub use self::{environment::*, episode_stats::*, observation::*, seed::*};

mod environment;
mod episode_stats;
mod observation;
mod seed;
