//! Rollout driver: runs one policy episode and records the trace the
//! visualiser consumes.
//!
//! The trace is four parallel per-step arrays (position, move target, look
//! target, yaw). It records the post-reset state and then one entry per
//! step, and is frozen once the episode ends. An explicit step cap bounds
//! the loop even against an environment that never signals done.

use std::fmt;

use crate::config::{ConfigError, RolloutConfig};
use crate::env::DroneEnv;
use crate::policy::{Policy, PolicyError};
use crate::types::Vec3;

/// Errors from the rollout driver.
#[derive(Debug)]
pub enum RolloutError {
    /// Invalid rollout configuration.
    Config(ConfigError),
    /// The policy failed to produce an action.
    Policy(PolicyError),
}

impl fmt::Display for RolloutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolloutError::Config(e) => write!(f, "rollout configuration error: {}", e),
            RolloutError::Policy(e) => write!(f, "rollout policy error: {}", e),
        }
    }
}

impl std::error::Error for RolloutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RolloutError::Config(e) => Some(e),
            RolloutError::Policy(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RolloutError {
    fn from(e: ConfigError) -> Self {
        RolloutError::Config(e)
    }
}

impl From<PolicyError> for RolloutError {
    fn from(e: PolicyError) -> Self {
        RolloutError::Policy(e)
    }
}

/// How the episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RolloutOutcome {
    /// The environment signalled terminal (out of bounds or path complete).
    Terminated,
    /// The environment signalled truncation (move budget exhausted).
    Truncated,
    /// The driver's step cap fired before the environment ended the episode.
    StepCapReached,
}

impl fmt::Display for RolloutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolloutOutcome::Terminated => write!(f, "terminated"),
            RolloutOutcome::Truncated => write!(f, "truncated"),
            RolloutOutcome::StepCapReached => write!(f, "step cap reached"),
        }
    }
}

/// Recorded episode: four parallel per-step arrays.
///
/// Invariant: all arrays always have identical length. Entries are appended
/// together through [`EpisodeTrace::push`] only.
#[derive(Clone, Debug, Default)]
pub struct EpisodeTrace {
    positions: Vec<Vec3>,
    move_targets: Vec<Vec3>,
    look_targets: Vec<Vec3>,
    yaws: Vec<f32>,
}

impl EpisodeTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty trace with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            move_targets: Vec::with_capacity(capacity),
            look_targets: Vec::with_capacity(capacity),
            yaws: Vec::with_capacity(capacity),
        }
    }

    /// Append one per-step record.
    pub fn push(&mut self, position: Vec3, move_target: Vec3, look_target: Vec3, yaw: f32) {
        self.positions.push(position);
        self.move_targets.push(move_target);
        self.look_targets.push(look_target);
        self.yaws.push(yaw);
    }

    /// Number of recorded frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the trace is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position at a frame.
    #[inline]
    pub fn position(&self, frame: usize) -> Vec3 {
        self.positions[frame]
    }

    /// Move target at a frame.
    #[inline]
    pub fn move_target(&self, frame: usize) -> Vec3 {
        self.move_targets[frame]
    }

    /// Look target at a frame.
    #[inline]
    pub fn look_target(&self, frame: usize) -> Vec3 {
        self.look_targets[frame]
    }

    /// Yaw at a frame.
    #[inline]
    pub fn yaw(&self, frame: usize) -> f32 {
        self.yaws[frame]
    }

    /// All recorded positions.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Trajectory prefix strictly before `frame`: the trail drawn behind
    /// the current position marker.
    #[inline]
    pub fn trail(&self, frame: usize) -> &[Vec3] {
        &self.positions[..frame.min(self.positions.len())]
    }
}

/// Per-episode statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EpisodeLog {
    /// Sum of rewards over the episode.
    pub episode_return: f32,
    /// Environment steps taken.
    pub episode_length: u32,
    /// Targets reached.
    pub score: u32,
}

impl EpisodeLog {
    /// Average a batch of episode logs.
    pub fn aggregate(logs: &[EpisodeLog]) -> LogSummary {
        if logs.is_empty() {
            return LogSummary::default();
        }
        let n = logs.len() as f32;
        LogSummary {
            episodes: logs.len(),
            mean_return: logs.iter().map(|l| l.episode_return).sum::<f32>() / n,
            mean_length: logs.iter().map(|l| l.episode_length as f32).sum::<f32>() / n,
            mean_score: logs.iter().map(|l| l.score as f32).sum::<f32>() / n,
        }
    }
}

/// Aggregated statistics over a batch of episodes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogSummary {
    /// Number of episodes aggregated.
    pub episodes: usize,
    /// Mean episode return.
    pub mean_return: f32,
    /// Mean episode length in steps.
    pub mean_length: f32,
    /// Mean targets reached.
    pub mean_score: f32,
}

/// A completed rollout: the trace plus how and how well it ended.
#[derive(Clone, Debug)]
pub struct Rollout {
    /// The recorded episode.
    pub trace: EpisodeTrace,
    /// How the episode ended.
    pub outcome: RolloutOutcome,
    /// Episode statistics.
    pub log: EpisodeLog,
}

/// Run one episode of `policy` against `env` and record the trace.
///
/// The environment is reset with `config.seed`; the loop ends on the
/// environment's terminal/truncation signal or, failing that, on
/// `config.max_steps`.
pub fn run_episode<P: Policy>(
    policy: &mut P,
    env: &mut DroneEnv,
    config: &RolloutConfig,
) -> Result<Rollout, RolloutError> {
    config.validate()?;

    let mut trace = EpisodeTrace::with_capacity(config.max_steps as usize + 1);
    let mut obs = env.reset(config.seed);
    trace.push(env.pos(), env.move_target(), env.look_target(), env.yaw());

    let mut episode_return = 0.0f32;
    let mut steps = 0u32;

    let outcome = loop {
        let action = policy.action(&obs)?;
        let step = env.step(&action);

        obs = step.observation;
        episode_return += step.reward;
        steps += 1;
        trace.push(env.pos(), env.move_target(), env.look_target(), env.yaw());

        if step.terminated {
            break RolloutOutcome::Terminated;
        }
        if step.truncated {
            break RolloutOutcome::Truncated;
        }
        if steps >= config.max_steps {
            log::warn!(
                "episode did not end within {} steps, stopping at the cap",
                config.max_steps
            );
            break RolloutOutcome::StepCapReached;
        }
    };

    Ok(Rollout {
        trace,
        outcome,
        log: EpisodeLog {
            episode_return,
            episode_length: steps,
            score: env.targets_reached(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_arrays_stay_parallel() {
        let mut trace = EpisodeTrace::new();
        for i in 0..10 {
            trace.push([i as f32; 3], [0.0; 3], [1.0; 3], 0.1 * i as f32);
            assert_eq!(trace.len(), i + 1);
        }
        assert_eq!(trace.trail(4).len(), 4);
        assert_eq!(trace.trail(100).len(), 10);
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = EpisodeLog::aggregate(&[]);
        assert_eq!(summary.episodes, 0);
        assert_eq!(summary.mean_return, 0.0);
    }

    #[test]
    fn test_aggregate_means() {
        let logs = [
            EpisodeLog {
                episode_return: 1.0,
                episode_length: 10,
                score: 1,
            },
            EpisodeLog {
                episode_return: 3.0,
                episode_length: 30,
                score: 3,
            },
        ];
        let summary = EpisodeLog::aggregate(&logs);
        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.mean_return, 2.0);
        assert_eq!(summary.mean_length, 20.0);
        assert_eq!(summary.mean_score, 2.0);
    }
}
