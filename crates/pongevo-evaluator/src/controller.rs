//! Controllers: turning observations into paddle actions.
//!
//! A [`Controller`] is asked for one action per step. [`play_episode`] runs the
//! observe → act → step loop until the episode terminates or a step cap is hit; it is
//! shared by fitness evaluation and by headless replays of trained models.
//!
//! Two controllers are provided:
//!
//! - [`NetworkController`] - Uses the first output of a [`NeuralNetwork`]
//! - [`TrackingController`] - Scripted baseline that chases the ball

use pongevo_engine::{Environment, EpisodeStats, Observation};

use crate::network::NeuralNetwork;

/// Chooses an action in `[-1, 1]` for the agent paddle.
///
/// Negative actions move the paddle up (towards `y = 0`), positive actions move it down.
pub trait Controller {
    fn select_action(&mut self, observation: &Observation) -> f64;
}

/// Controller driven by a loaded [`NeuralNetwork`].
#[derive(Debug)]
pub struct NetworkController<'a> {
    network: &'a mut NeuralNetwork,
}

impl<'a> NetworkController<'a> {
    #[must_use]
    pub fn new(network: &'a mut NeuralNetwork) -> Self {
        Self { network }
    }
}

impl Controller for NetworkController<'_> {
    fn select_action(&mut self, observation: &Observation) -> f64 {
        self.network.forward(observation.as_slice()).output[0]
    }
}

/// Scripted controller that moves towards the ball proportionally to the vertical
/// offset, saturating at ±1.
#[derive(Debug, Clone, Copy)]
pub struct TrackingController {
    gain: f64,
}

impl Default for TrackingController {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl TrackingController {
    #[must_use]
    pub const fn new(gain: f64) -> Self {
        Self { gain }
    }
}

impl Controller for TrackingController {
    fn select_action(&mut self, observation: &Observation) -> f64 {
        (observation.ball_paddle_offset() * self.gain).clamp(-1.0, 1.0)
    }
}

/// Plays `env` with `controller` for at most `max_steps` steps.
///
/// Returns the episode statistics; the step that terminates the episode is counted.
pub fn play_episode<C>(controller: &mut C, env: &mut Environment, max_steps: usize) -> EpisodeStats
where
    C: Controller + ?Sized,
{
    let mut observation = env.observe();
    for _ in 0..max_steps {
        let action = controller.select_action(&observation);
        let outcome = env.step(action);
        if outcome.terminated {
            break;
        }
        observation = outcome.observation;
    }
    *env.stats()
}

#[cfg(test)]
mod tests {
    use pongevo_engine::{Ball, EnvironmentState, EpisodeState, FieldSize, Paddle, RngSeed};

    use super::*;
    use crate::network::Topology;

    fn straight_rally() -> Environment {
        Environment::from_state(
            FieldSize::TRAINING,
            EnvironmentState {
                ball: Ball {
                    x: 100.0,
                    y: 150.0,
                    vx: -5.0,
                    vy: 0.0,
                },
                agent_paddle: Paddle { y: 150.0 },
                opponent_paddle: Paddle { y: 150.0 },
                stats: EpisodeStats::new(),
                episode_state: EpisodeState::Active,
            },
        )
    }

    #[test]
    fn test_episode_stops_at_step_cap() {
        let mut env = straight_rally();
        let stats = play_episode(&mut TrackingController::default(), &mut env, 100);
        assert_eq!(stats.steps(), 100);
        assert!(stats.rebounds() >= 1);
        assert!(!env.is_terminated());
    }

    #[test]
    fn test_episode_counts_terminating_step() {
        // Always moves down, away from a ball travelling along y = 150.
        struct Flee;
        impl Controller for Flee {
            fn select_action(&mut self, _observation: &Observation) -> f64 {
                1.0
            }
        }

        let mut env = straight_rally();
        let stats = play_episode(&mut Flee, &mut env, 1000);
        assert!(env.is_terminated());
        assert_eq!(stats.rebounds(), 0);
        assert_eq!(stats.steps(), 18);
    }

    #[test]
    fn test_network_controller_uses_first_output() {
        let topology = Topology {
            input_size: 6,
            hidden_size: 1,
            output_size: 2,
        };
        // Hidden unit saturates at tanh(10); outputs copy it with opposite signs.
        let mut parameters = vec![0.0; topology.parameter_count()];
        parameters[6] = 10.0;
        parameters[7] = 1.0;
        parameters[8] = -1.0;
        let mut network = NeuralNetwork::from_parameters(topology, &parameters).unwrap();
        let mut controller = NetworkController::new(&mut network);

        let mut rng = RngSeed::from_u128(5).rng();
        let env = Environment::new(FieldSize::TRAINING, &mut rng);
        let action = controller.select_action(&env.observe());

        assert!((action - 10.0_f64.tanh().tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_tracking_controller_saturates() {
        let env = straight_rally();
        let mut controller = TrackingController::default();
        assert_eq!(controller.select_action(&env.observe()), 0.0);

        let mut state = *env.state();
        state.ball.y = 290.0;
        let env = Environment::from_state(FieldSize::TRAINING, state);
        assert_eq!(controller.select_action(&env.observe()), 1.0);
    }
}
