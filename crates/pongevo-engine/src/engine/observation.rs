use crate::core::{BALL_SPEED, FieldSize};

use super::environment::EnvironmentState;

/// Number of components in an [`Observation`].
pub const OBSERVATION_LEN: usize = 6;

/// Normalized view of the environment handed to controllers.
///
/// Components, in order:
///
/// | index | value                                   |
/// |-------|-----------------------------------------|
/// | 0     | ball x mapped over the field width      |
/// | 1     | ball y mapped over the field height     |
/// | 2     | ball x-velocity / base ball speed       |
/// | 3     | ball y-velocity / base ball speed       |
/// | 4     | agent paddle y mapped over the height   |
/// | 5     | `(ball y - paddle y) / height`          |
///
/// Values are not clamped: velocities grow past 1 after enough returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation([f64; OBSERVATION_LEN]);

impl Observation {
    #[must_use]
    pub fn from_state(field: FieldSize, state: &EnvironmentState) -> Self {
        let ball = &state.ball;
        let paddle = &state.agent_paddle;
        Self([
            field.normalize_x(ball.x),
            field.normalize_y(ball.y),
            ball.vx / BALL_SPEED,
            ball.vy / BALL_SPEED,
            field.normalize_y(paddle.y),
            (ball.y - paddle.y) / field.height(),
        ])
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; OBSERVATION_LEN] {
        &self.0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub const fn ball_paddle_offset(&self) -> f64 {
        self.0[5]
    }
}

impl AsRef<[f64]> for Observation {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
