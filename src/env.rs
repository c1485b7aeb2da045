//! Kinematic drone environment.
//!
//! The drone flies through a sequence of move targets inside a cubic arena
//! while keeping its heading slewed toward a separate look target. Actions
//! are normalized per-axis velocity commands; the model is a bounded
//! integrator, not a flight dynamics simulation.
//!
//! Episodes end terminal when the drone leaves the arena or finishes a
//! bounded flight path, and truncated when the move budget runs out.

use std::f32::consts::PI;

use crate::config::EnvConfig;
use crate::constants::{ACTION_SIZE, OBS_SIZE};
use crate::observation::write_observation;
use crate::termination::{budget_exhausted, out_of_bounds, path_complete, TerminationResult};
use crate::types::{dist3, sub3, Collider, Vec3};

/// Result of one environment step.
#[derive(Clone, Copy, Debug)]
pub struct StepOutcome {
    /// Observation after the step.
    pub observation: [f32; OBS_SIZE],
    /// Reward for the step.
    pub reward: f32,
    /// Episode ended by the environment.
    pub terminated: bool,
    /// Episode ended by the move budget.
    pub truncated: bool,
}

impl StepOutcome {
    /// Episode is over for either reason.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Single drone environment with reset/step semantics.
pub struct DroneEnv {
    config: EnvConfig,
    rng: fastrand::Rng,
    pos: Vec3,
    yaw: f32,
    move_target: Vec3,
    look_target: Vec3,
    targets_reached: u32,
    moves_left: u32,
    prev_target_dist: f32,
}

impl DroneEnv {
    /// Create an environment from a validated configuration.
    pub fn from_config(config: EnvConfig) -> Result<Self, crate::config::ConfigError> {
        config.validate()?;

        Ok(Self {
            rng: fastrand::Rng::with_seed(0),
            pos: [0.0; 3],
            yaw: 0.0,
            move_target: [0.0; 3],
            look_target: [0.0; 3],
            targets_reached: 0,
            moves_left: config.move_budget,
            prev_target_dist: 0.0,
            config,
        })
    }

    /// Reset the episode with deterministic seeding and return the initial
    /// observation.
    pub fn reset(&mut self, seed: u64) -> [f32; OBS_SIZE] {
        self.rng = fastrand::Rng::with_seed(seed);

        self.pos = self.sample_point();
        self.move_target = self.sample_point();
        self.look_target = self.sample_point();
        self.yaw = 0.0;
        self.targets_reached = 0;
        self.moves_left = self.config.move_budget;
        self.prev_target_dist = dist3(self.pos, self.move_target);

        self.observation()
    }

    /// Advance the simulation by one control step.
    ///
    /// `action` components are clamped to [-1, 1] and command a velocity per
    /// world axis. Yaw slews toward the look-target bearing at the configured
    /// rate limit.
    pub fn step(&mut self, action: &[f32; ACTION_SIZE]) -> StepOutcome {
        let dt = self.config.dt;
        for axis in 0..3 {
            let v = action[axis].clamp(-1.0, 1.0) * self.config.max_speed;
            self.pos[axis] += v * dt;
        }
        self.slew_yaw(dt);

        self.moves_left = self.moves_left.saturating_sub(1);

        let mut reward;
        let mut terminal = false;

        if out_of_bounds(self.pos, self.config.half_extent) {
            reward = -1.0;
            terminal = true;
        } else {
            let dist = dist3(self.pos, self.move_target);
            reward = self.prev_target_dist - dist;
            self.prev_target_dist = dist;

            if dist < self.config.target_radius {
                reward += 1.0;
                self.targets_reached += 1;

                if path_complete(self.targets_reached, self.config.n_targets) {
                    terminal = true;
                } else {
                    self.move_target = self.sample_point();
                    self.look_target = self.sample_point();
                    self.prev_target_dist = dist3(self.pos, self.move_target);
                }
            }
        }

        let result = TerminationResult {
            terminal,
            truncated: !terminal && budget_exhausted(self.moves_left),
        };

        StepOutcome {
            observation: self.observation(),
            reward,
            terminated: result.terminal,
            truncated: result.truncated,
        }
    }

    /// Current position in world frame.
    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    /// Current yaw (rad), wrapped to [-pi, pi].
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current move target.
    #[inline]
    pub fn move_target(&self) -> Vec3 {
        self.move_target
    }

    /// Current look target.
    #[inline]
    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    /// Static obstacle geometry.
    #[inline]
    pub fn colliders(&self) -> &[Collider] {
        &self.config.colliders
    }

    /// Targets reached so far this episode.
    #[inline]
    pub fn targets_reached(&self) -> u32 {
        self.targets_reached
    }

    /// Moves remaining before truncation.
    #[inline]
    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Environment configuration.
    #[inline]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    fn observation(&self) -> [f32; OBS_SIZE] {
        let mut obs = [0.0f32; OBS_SIZE];
        write_observation(
            self.pos,
            self.move_target,
            self.yaw,
            self.config.half_extent,
            &mut obs,
        );
        obs
    }

    /// Uniform point inside the arena, respecting the spawn margin.
    fn sample_point(&mut self) -> Vec3 {
        let extent = self.config.half_extent - self.config.spawn_margin;
        let mut p = [0.0f32; 3];
        for v in &mut p {
            *v = (self.rng.f32() * 2.0 - 1.0) * extent;
        }
        p
    }

    /// Rotate yaw toward the look-target bearing, rate limited.
    fn slew_yaw(&mut self, dt: f32) {
        let to_look = sub3(self.look_target, self.pos);
        let planar_sq = to_look[0] * to_look[0] + to_look[1] * to_look[1];
        if planar_sq < 1e-12 {
            return; // directly above/below the look target, bearing undefined
        }

        let bearing = to_look[1].atan2(to_look[0]);
        let delta = wrap_angle(bearing - self.yaw);
        let max_step = self.config.max_yaw_rate * dt;
        self.yaw = wrap_angle(self.yaw + delta.clamp(-max_step, max_step));
    }
}

/// Wrap an angle to [-pi, pi].
#[inline]
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}
