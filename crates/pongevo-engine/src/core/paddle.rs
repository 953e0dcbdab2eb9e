use serde::{Deserialize, Serialize};

use super::field::{FieldSize, PADDLE_HEIGHT, PADDLE_SPEED};

const HALF_PADDLE: f64 = PADDLE_HEIGHT / 2.0;

/// The opponent moves at this fraction of the paddle speed.
pub const OPPONENT_SPEED_FACTOR: f64 = 0.9;
/// The opponent holds still while the ball is within this vertical distance.
pub const OPPONENT_DEAD_BAND: f64 = 5.0;

/// A paddle, identified by the vertical position of its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f64,
}

impl Paddle {
    #[must_use]
    pub fn centered(field: FieldSize) -> Self {
        Self {
            y: field.height() / 2.0,
        }
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y - HALF_PADDLE
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + HALF_PADDLE
    }

    /// Returns `true` if `y` lies within the paddle span, edges included.
    #[must_use]
    pub fn covers(&self, y: f64) -> bool {
        self.top() <= y && y <= self.bottom()
    }

    /// Moves by `dy` and keeps the whole paddle inside the field.
    pub(crate) fn shift(&mut self, dy: f64, field: FieldSize) {
        self.y += dy;
        self.clamp(field);
    }

    /// Scripted opponent rule: step towards `ball_y` unless already close enough.
    pub(crate) fn follow(&mut self, ball_y: f64, field: FieldSize) {
        let speed = PADDLE_SPEED * OPPONENT_SPEED_FACTOR;
        if ball_y < self.y - OPPONENT_DEAD_BAND {
            self.y -= speed;
        }
        if ball_y > self.y + OPPONENT_DEAD_BAND {
            self.y += speed;
        }
        self.clamp(field);
    }

    fn clamp(&mut self, field: FieldSize) {
        if self.y < HALF_PADDLE {
            self.y = HALF_PADDLE;
        }
        if self.y > field.height() - HALF_PADDLE {
            self.y = field.height() - HALF_PADDLE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_clamps_to_field() {
        let field = FieldSize::TRAINING;
        let mut paddle = Paddle { y: 26.0 };
        paddle.shift(-3.0, field);
        assert_eq!(paddle.y, 25.0);

        let mut paddle = Paddle { y: 274.0 };
        paddle.shift(3.0, field);
        assert_eq!(paddle.y, 275.0);
    }

    #[test]
    fn test_covers_includes_edges() {
        let paddle = Paddle { y: 150.0 };
        assert!(paddle.covers(125.0));
        assert!(paddle.covers(175.0));
        assert!(!paddle.covers(175.5));
    }

    #[test]
    fn test_follow_respects_dead_band() {
        let field = FieldSize::TRAINING;
        let mut paddle = Paddle { y: 150.0 };
        paddle.follow(154.0, field);
        assert_eq!(paddle.y, 150.0);

        paddle.follow(200.0, field);
        assert!((paddle.y - 152.7).abs() < 1e-12);

        paddle.follow(100.0, field);
        assert!((paddle.y - 150.0).abs() < 1e-12);
    }
}
