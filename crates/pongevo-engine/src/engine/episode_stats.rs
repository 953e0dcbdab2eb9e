use serde::{Deserialize, Serialize};

/// Statistics of a single episode.
///
/// - **Steps**: number of simulation steps taken since the last reset
/// - **Rebounds**: number of times the agent paddle returned the ball
///
/// # Example
///
/// ```
/// use pongevo_engine::EpisodeStats;
///
/// let mut stats = EpisodeStats::new();
/// stats.record_step();
/// stats.record_rebound();
///
/// assert_eq!(stats.steps(), 1);
/// assert_eq!(stats.rebounds(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeStats {
    steps: usize,
    rebounds: usize,
}

impl EpisodeStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps: 0,
            rebounds: 0,
        }
    }

    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub const fn rebounds(&self) -> usize {
        self.rebounds
    }

    pub const fn record_step(&mut self) {
        self.steps += 1;
    }

    pub const fn record_rebound(&mut self) {
        self.rebounds += 1;
    }
}
