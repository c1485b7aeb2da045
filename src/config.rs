//! Configuration for the environment and the rollout driver.
//!
//! Builder-pattern configs with explicit validation: invalid parameter
//! combinations surface as [`ConfigError`] before an episode starts rather
//! than as runtime faults mid-rollout.

use std::fmt;

use crate::constants::{
    DEFAULT_MOVE_BUDGET, DEFAULT_N_TARGETS, DT, GRID_SIZE, MAX_SPEED, MAX_YAW_RATE, SPAWN_MARGIN,
    TARGET_RADIUS,
};
use crate::types::Collider;

/// Number of targets denoting an unbounded flight path.
pub const UNBOUNDED_TARGETS: i32 = -1;

/// Configuration error for environment or rollout parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter has an invalid value.
    InvalidParam {
        param: &'static str,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParam { param, message } => {
                write!(f, "invalid value for '{}': {}", param, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Environment configuration.
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// Targets in the flight path; [`UNBOUNDED_TARGETS`] for an endless path.
    pub n_targets: i32,
    /// Moves available before the episode truncates.
    pub move_budget: u32,
    /// Speed a full-scale action commands (m/s).
    pub max_speed: f32,
    /// Control timestep (s).
    pub dt: f32,
    /// Yaw slew rate limit (rad/s).
    pub max_yaw_rate: f32,
    /// Reach distance for move targets (m).
    pub target_radius: f32,
    /// Arena half-extent per axis (m).
    pub half_extent: f32,
    /// Margin between spawned points and the arena walls (m).
    pub spawn_margin: f32,
    /// Static obstacle geometry, rendered but not collided with.
    pub colliders: Vec<Collider>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            n_targets: DEFAULT_N_TARGETS,
            move_budget: DEFAULT_MOVE_BUDGET,
            max_speed: MAX_SPEED,
            dt: DT,
            max_yaw_rate: MAX_YAW_RATE,
            target_radius: TARGET_RADIUS,
            half_extent: GRID_SIZE,
            spawn_margin: SPAWN_MARGIN,
            colliders: Vec::new(),
        }
    }
}

impl EnvConfig {
    /// Create a config with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of targets in the flight path (-1 for unbounded).
    pub fn with_n_targets(mut self, n_targets: i32) -> Self {
        self.n_targets = n_targets;
        self
    }

    /// Set the per-episode move budget.
    pub fn with_move_budget(mut self, budget: u32) -> Self {
        self.move_budget = budget;
        self
    }

    /// Set the commanded speed of a full-scale action.
    pub fn with_max_speed(mut self, speed: f32) -> Self {
        self.max_speed = speed;
        self
    }

    /// Set the reach distance for move targets.
    pub fn with_target_radius(mut self, radius: f32) -> Self {
        self.target_radius = radius;
        self
    }

    /// Set the static obstacle geometry.
    pub fn with_colliders(mut self, colliders: Vec<Collider>) -> Self {
        self.colliders = colliders;
        self
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_targets != UNBOUNDED_TARGETS && self.n_targets < 1 {
            return Err(ConfigError::InvalidParam {
                param: "n_targets",
                message: format!("must be -1 or >= 1, got {}", self.n_targets),
            });
        }
        if self.move_budget == 0 {
            return Err(ConfigError::InvalidParam {
                param: "move_budget",
                message: "must be > 0".into(),
            });
        }
        if !(self.max_speed > 0.0) {
            return Err(ConfigError::InvalidParam {
                param: "max_speed",
                message: format!("must be > 0, got {}", self.max_speed),
            });
        }
        if !(self.dt > 0.0) {
            return Err(ConfigError::InvalidParam {
                param: "dt",
                message: format!("must be > 0, got {}", self.dt),
            });
        }
        if !(self.target_radius > 0.0) {
            return Err(ConfigError::InvalidParam {
                param: "target_radius",
                message: format!("must be > 0, got {}", self.target_radius),
            });
        }
        if !(self.half_extent > 0.0) {
            return Err(ConfigError::InvalidParam {
                param: "half_extent",
                message: format!("must be > 0, got {}", self.half_extent),
            });
        }
        if self.spawn_margin < 0.0 || self.spawn_margin >= self.half_extent {
            return Err(ConfigError::InvalidParam {
                param: "spawn_margin",
                message: format!(
                    "must be in [0, half_extent), got {} with half_extent {}",
                    self.spawn_margin, self.half_extent
                ),
            });
        }
        Ok(())
    }

    /// Whether the flight path has no target-count stop.
    #[inline]
    pub fn unbounded_targets(&self) -> bool {
        self.n_targets == UNBOUNDED_TARGETS
    }
}

/// Rollout driver configuration.
///
/// `max_steps` is the explicit step cap: an environment that never signals
/// termination or truncation cannot hang the driver.
#[derive(Clone, Debug)]
pub struct RolloutConfig {
    /// Hard cap on environment steps per episode.
    pub max_steps: u32,
    /// Seed for the environment reset.
    pub seed: u64,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            seed: 42,
        }
    }
}

impl RolloutConfig {
    /// Create a config with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step cap.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the reset seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::InvalidParam {
                param: "max_steps",
                message: "must be > 0".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(EnvConfig::default().validate().is_ok());
        assert!(RolloutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unbounded_targets_valid() {
        let config = EnvConfig::new().with_n_targets(UNBOUNDED_TARGETS);
        assert!(config.validate().is_ok());
        assert!(config.unbounded_targets());
    }

    #[test]
    fn test_zero_targets_rejected() {
        let config = EnvConfig::new().with_n_targets(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_targets_rejected() {
        // Only -1 is special; other negatives are invalid.
        let config = EnvConfig::new().with_n_targets(-3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = EnvConfig::new().with_move_budget(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_step_cap_rejected() {
        let config = RolloutConfig::new().with_max_steps(0);
        assert!(config.validate().is_err());
    }
}
