//! Drone policy evaluation and 3D visualization harness.
//!
//! Loads a pretrained flight policy, rolls out one episode in a kinematic
//! drone environment and replays the recorded trajectory as a 3D animation:
//! trail, position marker, move/look targets, heading arrow and static
//! collider geometry inside a fixed [-10, 10] arena cube.
//!
//! # Architecture
//!
//! - [`env::DroneEnv`]: reset/step environment with an 8-dim observation
//! - [`policy::Policy`]: observation-to-action seam; [`policy::PpoPolicy`]
//!   evaluates a burn checkpoint deterministically on CPU
//! - [`rollout::run_episode`]: records an [`rollout::EpisodeTrace`] with an
//!   explicit step cap
//! - [`renderer`]: frame-by-frame full redraw of the trace (feature
//!   `render`), live window (`render-realtime`), GIF export (`render-gif`)
//!
//! # Example
//!
//! ```rust,ignore
//! use drone_viz::{DroneEnv, EnvConfig, PpoPolicy, RolloutConfig, run_episode};
//! use drone_viz::renderer::{RealtimeWindow, VisualizationConfig};
//!
//! let mut env = DroneEnv::from_config(EnvConfig::new().with_n_targets(5))?;
//! let mut policy = PpoPolicy::load("ppo_4096000.bin")?;
//!
//! let rollout = run_episode(&mut policy, &mut env, &RolloutConfig::new())?;
//! println!("{}: return {:.2}", rollout.outcome, rollout.log.episode_return);
//!
//! let mut window = RealtimeWindow::new("Drone Flight Viewer", VisualizationConfig::new())?;
//! window.play(&rollout.trace, env.colliders())?; // blocks until closed
//! ```

// Core modules
pub mod config;
pub mod constants;
pub mod types;

// Environment
pub mod env;
pub mod observation;
pub mod termination;

// Policy and rollout
pub mod policy;
pub mod rollout;

// Visualization (optional)
#[cfg(feature = "render")]
pub mod renderer;

// Test suites
#[cfg(test)]
pub mod tests;

// Re-exports for convenience
pub use config::{ConfigError, EnvConfig, RolloutConfig, UNBOUNDED_TARGETS};
pub use constants::{ACTION_SIZE, GRID_SIZE, OBS_SIZE};
pub use env::{DroneEnv, StepOutcome};
pub use policy::{Policy, PolicyError, PolicyNet, PpoPolicy};
pub use rollout::{
    run_episode, EpisodeLog, EpisodeTrace, LogSummary, Rollout, RolloutError, RolloutOutcome,
};
pub use termination::TerminationResult;
pub use types::{Collider, Vec3};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
