//! Deterministic Pong simulation used as the fitness signal for evolved controllers.
//!
//! The engine is split in two layers:
//!
//! - [`core`] - Field geometry and the kinematic bodies (ball and paddles)
//! - [`engine`] - The episode state machine ([`Environment`]), episode statistics,
//!   observations and seeded randomness
//!
//! The agent always controls the left paddle. The right paddle is a scripted opponent
//! that follows the ball. Only the agent can lose an episode.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a field cannot hold both paddles and the ball.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display(
    "field {width}x{height} is too small (width must exceed {min_width}, height must exceed {min_height})"
)]
pub struct FieldSizeError {
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

/// Error returned when a seed string is not a 32-character hex number.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: {reason}")]
pub struct ParseSeedError {
    pub input: String,
    pub reason: String,
}
