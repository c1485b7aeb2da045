//! Policy seam and pretrained-policy loading.
//!
//! The rollout driver only needs something that maps an observation to an
//! action; [`Policy`] is that seam. [`PpoPolicy`] is the shipped
//! implementation: a PPO actor-critic checkpoint loaded from disk and
//! evaluated deterministically on CPU.

pub mod network;

pub use network::{PolicyNet, PpoPolicy};

use std::fmt;
use std::path::PathBuf;

use crate::constants::{ACTION_SIZE, OBS_SIZE};

/// Errors from loading or evaluating a policy.
#[derive(Debug)]
pub enum PolicyError {
    /// The checkpoint file could not be loaded.
    Checkpoint { path: PathBuf, message: String },
    /// A forward pass failed to produce an action.
    Inference(String),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::Checkpoint { path, message } => {
                write!(f, "failed to load checkpoint {}: {}", path.display(), message)
            }
            PolicyError::Inference(message) => write!(f, "policy inference failed: {}", message),
        }
    }
}

impl std::error::Error for PolicyError {}

/// Maps observations to actions.
///
/// Implementations must be deterministic with respect to the observation;
/// any exploration noise belongs to training, not to this harness.
pub trait Policy {
    /// Select an action for the given observation.
    fn action(&mut self, observation: &[f32; OBS_SIZE]) -> Result<[f32; ACTION_SIZE], PolicyError>;
}
