use serde::{Deserialize, Serialize};

use super::field::{BALL_RADIUS, BALL_SPEED, FieldSize};

/// The ball: center position and per-step velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Ball {
    /// Places the ball at the field center moving at [`BALL_SPEED`].
    ///
    /// `angle` is measured from the horizontal axis; `direction` is `-1.0` (towards the
    /// agent) or `1.0` (towards the opponent).
    #[must_use]
    pub fn launch(field: FieldSize, angle: f64, direction: f64) -> Self {
        Self {
            x: field.width() / 2.0,
            y: field.height() / 2.0,
            vx: angle.cos() * BALL_SPEED * direction,
            vy: angle.sin() * BALL_SPEED,
        }
    }

    pub(crate) fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Reflects off the top and bottom walls, clamping the ball inside the field.
    pub(crate) fn bounce_off_walls(&mut self, field: FieldSize) {
        if self.y < BALL_RADIUS {
            self.y = BALL_RADIUS;
            self.vy = -self.vy;
        }
        if self.y > field.height() - BALL_RADIUS {
            self.y = field.height() - BALL_RADIUS;
            self.vy = -self.vy;
        }
    }

    /// Sends the ball back horizontally from `x` and speeds it up by `factor`.
    pub(crate) fn return_from(&mut self, x: f64, factor: f64) {
        self.x = x;
        self.vx = -self.vx * factor;
        self.vy *= factor;
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}
