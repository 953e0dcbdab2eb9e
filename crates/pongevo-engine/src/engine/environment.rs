use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{BALL_RADIUS, Ball, FieldSize, PADDLE_SPEED, PADDLE_WIDTH, Paddle};

use super::{episode_stats::EpisodeStats, observation::Observation};

/// Actions with magnitude at or below this value leave the agent paddle in place.
pub const ACTION_DEAD_ZONE: f64 = 0.15;
/// Action magnitudes above this value move the paddle no faster.
pub const ACTION_CAP: f64 = 0.7;
/// Speed multiplier applied to the ball on every paddle return.
pub const RETURN_ACCELERATION: f64 = 1.03;
/// Launch angles are drawn uniformly from `[-LAUNCH_ANGLE_MAX, LAUNCH_ANGLE_MAX)`.
pub const LAUNCH_ANGLE_MAX: f64 = 0.4 * PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum EpisodeState {
    Active,
    Terminated,
}

/// Every mutable quantity of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentState {
    pub ball: Ball,
    /// Left paddle, driven by the controller under evaluation.
    pub agent_paddle: Paddle,
    /// Right paddle, driven by the scripted follow rule.
    pub opponent_paddle: Paddle,
    pub stats: EpisodeStats,
    pub episode_state: EpisodeState,
}

/// Result of a single [`Environment::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    pub terminated: bool,
}

/// Single-episode Pong simulation.
///
/// The transition function is deterministic; randomness only enters through
/// [`Environment::reset`], which draws the launch angle and side from the supplied
/// generator.
///
/// # Step Order
///
/// Each step resolves, in order: agent paddle move, opponent paddle move, ball
/// integration, top/bottom walls, left paddle, right paddle. The order is the
/// tie-break when several collisions happen in the same step.
///
/// # Termination
///
/// The episode terminates only when the ball passes the agent (left) paddle. A ball
/// that passes the opponent bounces off the right wall instead.
#[derive(Debug, Clone)]
pub struct Environment {
    field: FieldSize,
    state: EnvironmentState,
}

impl Environment {
    /// Creates an environment and starts its first episode.
    pub fn new<R>(field: FieldSize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut this = Self {
            field,
            state: EnvironmentState {
                ball: Ball::launch(field, 0.0, 1.0),
                agent_paddle: Paddle::centered(field),
                opponent_paddle: Paddle::centered(field),
                stats: EpisodeStats::new(),
                episode_state: EpisodeState::Active,
            },
        };
        this.reset(rng);
        this
    }

    /// Creates an environment positioned at an arbitrary state.
    #[must_use]
    pub fn from_state(field: FieldSize, state: EnvironmentState) -> Self {
        Self { field, state }
    }

    #[must_use]
    pub fn field(&self) -> FieldSize {
        self.field
    }

    #[must_use]
    pub fn state(&self) -> &EnvironmentState {
        &self.state
    }

    #[must_use]
    pub fn stats(&self) -> &EpisodeStats {
        &self.state.stats
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state.episode_state.is_terminated()
    }

    /// Starts a new episode.
    ///
    /// Centers both paddles, places the ball at the field center with a random launch
    /// angle and side, and clears the episode statistics.
    pub fn reset<R>(&mut self, rng: &mut R) -> Observation
    where
        R: Rng + ?Sized,
    {
        let angle = rng.random_range(-LAUNCH_ANGLE_MAX..LAUNCH_ANGLE_MAX);
        let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        self.state = EnvironmentState {
            ball: Ball::launch(self.field, angle, direction),
            agent_paddle: Paddle::centered(self.field),
            opponent_paddle: Paddle::centered(self.field),
            stats: EpisodeStats::new(),
            episode_state: EpisodeState::Active,
        };
        self.observe()
    }

    #[must_use]
    pub fn observe(&self) -> Observation {
        Observation::from_state(self.field, &self.state)
    }

    /// Advances the simulation by one step with the agent action `action`.
    ///
    /// Stepping a terminated episode leaves the state untouched and reports
    /// termination again.
    pub fn step(&mut self, action: f64) -> StepOutcome {
        if self.is_terminated() {
            return StepOutcome {
                observation: self.observe(),
                terminated: true,
            };
        }

        let field = self.field;
        let state = &mut self.state;
        state.stats.record_step();

        state.agent_paddle.shift(paddle_delta(action), field);
        state.opponent_paddle.follow(state.ball.y, field);

        state.ball.advance();
        state.ball.bounce_off_walls(field);

        let mut terminated = false;

        let ball = &mut state.ball;
        if ball.x - BALL_RADIUS < PADDLE_WIDTH {
            if state.agent_paddle.covers(ball.y) {
                ball.return_from(PADDLE_WIDTH + BALL_RADIUS, RETURN_ACCELERATION);
                state.stats.record_rebound();
            } else {
                terminated = true;
            }
        }

        if ball.x + BALL_RADIUS > field.width() - PADDLE_WIDTH {
            if state.opponent_paddle.covers(ball.y) {
                ball.return_from(
                    field.width() - PADDLE_WIDTH - BALL_RADIUS,
                    RETURN_ACCELERATION,
                );
            } else if ball.x > field.width() - BALL_RADIUS {
                ball.x = field.width() - BALL_RADIUS;
                ball.vx = -ball.vx;
            }
        }

        if terminated {
            state.episode_state = EpisodeState::Terminated;
        }

        StepOutcome {
            observation: self.observe(),
            terminated,
        }
    }
}

/// Converts an action into a vertical paddle displacement.
fn paddle_delta(action: f64) -> f64 {
    if action.abs() <= ACTION_DEAD_ZONE || action.is_nan() {
        return 0.0;
    }
    action.signum() * action.abs().min(ACTION_CAP) * PADDLE_SPEED
}

#[cfg(test)]
mod tests {
    use crate::RngSeed;

    use super::*;

    fn state_with_ball(ball: Ball, agent_y: f64) -> EnvironmentState {
        EnvironmentState {
            ball,
            agent_paddle: Paddle { y: agent_y },
            opponent_paddle: Paddle { y: 150.0 },
            stats: EpisodeStats::new(),
            episode_state: EpisodeState::Active,
        }
    }

    #[test]
    fn test_reset_launches_within_angle_bounds() {
        let mut rng = RngSeed::from_u128(1).rng();
        let mut env = Environment::new(FieldSize::TRAINING, &mut rng);
        for _ in 0..200 {
            env.reset(&mut rng);
            let state = env.state();
            assert_eq!((state.ball.x, state.ball.y), (200.0, 150.0));
            assert_eq!(state.agent_paddle.y, 150.0);
            assert_eq!(state.opponent_paddle.y, 150.0);
            assert_eq!(state.stats, EpisodeStats::new());
            assert!(state.ball.vx.abs() >= 5.0 * LAUNCH_ANGLE_MAX.cos() - 1e-9);
            assert!(state.ball.vy.abs() <= 5.0 * LAUNCH_ANGLE_MAX.sin() + 1e-9);
        }
    }

    #[test]
    fn test_reset_draws_both_directions() {
        let mut rng = RngSeed::from_u128(2).rng();
        let mut env = Environment::new(FieldSize::TRAINING, &mut rng);
        let mut left = 0;
        let mut right = 0;
        for _ in 0..100 {
            env.reset(&mut rng);
            if env.state().ball.vx < 0.0 {
                left += 1;
            } else {
                right += 1;
            }
        }
        assert!(left > 0 && right > 0);
    }

    #[test]
    fn test_identical_seeds_give_identical_trajectories() {
        let actions = [0.9, -0.3, 0.1, -1.0, 0.5, 0.0, 0.2, -0.16];
        let run = || {
            let mut rng = RngSeed::from_u128(99).rng();
            let mut env = Environment::new(FieldSize::TRAINING, &mut rng);
            let mut trajectory = vec![*env.state()];
            for step in 0..300 {
                env.step(actions[step % actions.len()]);
                trajectory.push(*env.state());
            }
            trajectory
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_agent_return_when_paddle_covers_ball() {
        let ball = Ball {
            x: 14.0,
            y: 150.0,
            vx: -5.0,
            vy: 0.0,
        };
        let mut env = Environment::from_state(FieldSize::TRAINING, state_with_ball(ball, 150.0));

        let outcome = env.step(0.0);

        assert!(!outcome.terminated);
        let state = env.state();
        assert_eq!(state.stats.rebounds(), 1);
        assert!(state.ball.vx > 0.0);
        assert!((state.ball.vx - 5.15).abs() < 1e-12);
        assert_eq!(state.ball.x, PADDLE_WIDTH + BALL_RADIUS);
        assert!(state.episode_state.is_active());
    }

    #[test]
    fn test_agent_miss_terminates() {
        let ball = Ball {
            x: 14.0,
            y: 250.0,
            vx: -5.0,
            vy: 0.0,
        };
        let mut env = Environment::from_state(FieldSize::TRAINING, state_with_ball(ball, 150.0));

        let outcome = env.step(0.0);

        assert!(outcome.terminated);
        assert!(env.is_terminated());
        assert_eq!(env.stats().rebounds(), 0);
    }

    #[test]
    fn test_terminated_episode_does_not_advance() {
        let ball = Ball {
            x: 14.0,
            y: 250.0,
            vx: -5.0,
            vy: 0.0,
        };
        let mut env = Environment::from_state(FieldSize::TRAINING, state_with_ball(ball, 150.0));
        env.step(0.0);
        let frozen = *env.state();

        let outcome = env.step(1.0);

        assert!(outcome.terminated);
        assert_eq!(*env.state(), frozen);

        let mut rng = RngSeed::from_u128(3).rng();
        env.reset(&mut rng);
        assert!(!env.is_terminated());
    }

    #[test]
    fn test_opponent_miss_bounces_off_right_wall() {
        let ball = Ball {
            x: 392.0,
            y: 20.0,
            vx: 5.0,
            vy: 0.0,
        };
        let mut state = state_with_ball(ball, 150.0);
        state.opponent_paddle = Paddle { y: 275.0 };
        let mut env = Environment::from_state(FieldSize::TRAINING, state);

        let outcome = env.step(0.0);

        assert!(!outcome.terminated);
        assert_eq!(env.state().ball.x, 395.0);
        assert_eq!(env.state().ball.vx, -5.0);
    }

    #[test]
    fn test_opponent_return_accelerates_ball() {
        let ball = Ball {
            x: 385.0,
            y: 150.0,
            vx: 5.0,
            vy: 1.0,
        };
        let mut env = Environment::from_state(FieldSize::TRAINING, state_with_ball(ball, 150.0));

        env.step(0.0);

        let ball = env.state().ball;
        assert_eq!(ball.x, 400.0 - PADDLE_WIDTH - BALL_RADIUS);
        assert!((ball.vx + 5.15).abs() < 1e-12);
        assert!((ball.vy - 1.03).abs() < 1e-12);
        assert_eq!(env.stats().rebounds(), 0);
    }

    #[test]
    fn test_dead_zone_keeps_paddle_still() {
        let mut rng = RngSeed::from_u128(4).rng();
        let mut env = Environment::new(FieldSize::TRAINING, &mut rng);
        env.step(0.9);
        let before = env.state().agent_paddle.y;

        env.step(0.10);
        assert_eq!(env.state().agent_paddle.y, before);

        env.step(-0.15);
        assert_eq!(env.state().agent_paddle.y, before);
    }

    #[test]
    fn test_action_magnitude_is_capped() {
        assert_eq!(paddle_delta(0.5), 1.5);
        assert!((paddle_delta(1.0) - 2.1).abs() < 1e-12);
        assert!((paddle_delta(-0.7) + 2.1).abs() < 1e-12);
        assert_eq!(paddle_delta(f64::NAN), 0.0);
    }

    #[test]
    fn test_top_wall_checked_before_paddle() {
        // Ball crosses the paddle plane while also passing the top wall: it is clamped
        // to the wall first and then judged against the paddle span.
        let ball = Ball {
            x: 14.0,
            y: 7.0,
            vx: -5.0,
            vy: -4.0,
        };
        let mut env = Environment::from_state(FieldSize::TRAINING, state_with_ball(ball, 25.0));

        let outcome = env.step(0.0);

        assert!(!outcome.terminated);
        let state = env.state();
        assert_eq!(state.ball.y, BALL_RADIUS);
        assert!(state.ball.vy > 0.0);
        assert_eq!(state.stats.rebounds(), 1);
    }

    #[test]
    fn test_observation_layout() {
        let ball = Ball {
            x: 300.0,
            y: 75.0,
            vx: 2.5,
            vy: -5.0,
        };
        let env = Environment::from_state(FieldSize::TRAINING, state_with_ball(ball, 150.0));
        let obs = env.observe();
        assert_eq!(obs.as_array(), &[0.5, -0.5, 0.5, -1.0, 0.0, -0.25]);
    }
}
