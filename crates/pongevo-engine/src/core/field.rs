use serde::{Deserialize, Serialize};

use crate::FieldSizeError;

/// Height of both paddles.
pub const PADDLE_HEIGHT: f64 = 50.0;
/// Width of both paddles; each paddle's inner face sits this far from its wall.
pub const PADDLE_WIDTH: f64 = 8.0;
/// Maximum paddle displacement unit per step.
pub const PADDLE_SPEED: f64 = 3.0;
/// Radius of the ball.
pub const BALL_RADIUS: f64 = 5.0;
/// Launch speed of the ball; also the scale used to normalize velocities.
pub const BALL_SPEED: f64 = 5.0;

/// Dimensions of the playing field.
///
/// A `FieldSize` always has room for a paddle on each side plus the ball between
/// them, and for a full paddle vertically. Deserialization enforces the same bounds
/// as [`FieldSize::new`].
///
/// # Example
///
/// ```
/// use pongevo_engine::FieldSize;
///
/// let field = FieldSize::new(200.0, 150.0).unwrap();
/// assert_eq!(field.width(), 200.0);
/// assert!(FieldSize::new(20.0, 150.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldSizeRepr")]
pub struct FieldSize {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct FieldSizeRepr {
    width: f64,
    height: f64,
}

impl TryFrom<FieldSizeRepr> for FieldSize {
    type Error = FieldSizeError;

    fn try_from(repr: FieldSizeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.width, repr.height)
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::TRAINING
    }
}

impl FieldSize {
    /// Field used for fitness evaluation.
    pub const TRAINING: Self = Self {
        width: 400.0,
        height: 300.0,
    };

    /// Smaller field used when replaying a controller for display.
    pub const COMPACT: Self = Self {
        width: 200.0,
        height: 150.0,
    };

    const MIN_WIDTH: f64 = 2.0 * (PADDLE_WIDTH + BALL_RADIUS);
    const MIN_HEIGHT: f64 = PADDLE_HEIGHT;

    pub fn new(width: f64, height: f64) -> Result<Self, FieldSizeError> {
        let fits = width.is_finite()
            && height.is_finite()
            && width > Self::MIN_WIDTH
            && height > Self::MIN_HEIGHT;
        if !fits {
            return Err(FieldSizeError {
                width,
                height,
                min_width: Self::MIN_WIDTH,
                min_height: Self::MIN_HEIGHT,
            });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Maps a horizontal position onto `[-1, 1]`.
    #[must_use]
    pub fn normalize_x(&self, x: f64) -> f64 {
        (x / self.width) * 2.0 - 1.0
    }

    /// Maps a vertical position onto `[-1, 1]`.
    #[must_use]
    pub fn normalize_y(&self, y: f64) -> f64 {
        (y / self.height) * 2.0 - 1.0
    }
}
