//! Rollout driver invariants.

use crate::config::{EnvConfig, RolloutConfig};
use crate::constants::{ACTION_SIZE, OBS_SIZE};
use crate::env::DroneEnv;
use crate::policy::{Policy, PolicyError};
use crate::rollout::{run_episode, RolloutError, RolloutOutcome};

/// Policy that always commands zero velocity.
struct ZeroPolicy;

impl Policy for ZeroPolicy {
    fn action(&mut self, _obs: &[f32; OBS_SIZE]) -> Result<[f32; ACTION_SIZE], PolicyError> {
        Ok([0.0; ACTION_SIZE])
    }
}

/// Policy that always commands the same action.
struct ConstantPolicy([f32; ACTION_SIZE]);

impl Policy for ConstantPolicy {
    fn action(&mut self, _obs: &[f32; OBS_SIZE]) -> Result<[f32; ACTION_SIZE], PolicyError> {
        Ok(self.0)
    }
}

/// Policy that fails on the first query.
struct FailingPolicy;

impl Policy for FailingPolicy {
    fn action(&mut self, _obs: &[f32; OBS_SIZE]) -> Result<[f32; ACTION_SIZE], PolicyError> {
        Err(PolicyError::Inference("broken".into()))
    }
}

fn create_env() -> DroneEnv {
    DroneEnv::from_config(EnvConfig::default()).unwrap()
}

#[test]
fn test_trace_length_matches_steps() {
    let mut env = create_env();
    let rollout = run_episode(&mut ZeroPolicy, &mut env, &RolloutConfig::new()).unwrap();

    // One record for the reset state plus one per step.
    assert_eq!(
        rollout.trace.len(),
        rollout.log.episode_length as usize + 1
    );
    assert!(!rollout.trace.is_empty());
}

#[test]
fn test_single_target_zero_action_truncates() {
    // Spec scenario: n_targets = 1, zero action every step. The drone never
    // moves, so the move budget ends the episode.
    let mut env = DroneEnv::from_config(EnvConfig::new().with_n_targets(1)).unwrap();
    let rollout = run_episode(&mut ZeroPolicy, &mut env, &RolloutConfig::new()).unwrap();

    assert_eq!(rollout.outcome, RolloutOutcome::Truncated);
    assert_eq!(
        rollout.log.episode_length,
        env.config().move_budget,
        "truncation should fire exactly at the budget"
    );
    assert_eq!(rollout.log.score, 0);
    assert!(rollout.trace.len() > 0);
}

#[test]
fn test_step_cap_bounds_the_loop() {
    // A budget far above the cap: only the cap can end this episode.
    let mut env = DroneEnv::from_config(
        EnvConfig::new().with_move_budget(1_000_000),
    )
    .unwrap();
    let config = RolloutConfig::new().with_max_steps(50);
    let rollout = run_episode(&mut ZeroPolicy, &mut env, &config).unwrap();

    assert_eq!(rollout.outcome, RolloutOutcome::StepCapReached);
    assert_eq!(rollout.log.episode_length, 50);
    assert_eq!(rollout.trace.len(), 51);
}

#[test]
fn test_out_of_bounds_terminates_rollout() {
    let mut env = create_env();
    let mut policy = ConstantPolicy([1.0, 1.0, 1.0]);
    let rollout = run_episode(&mut policy, &mut env, &RolloutConfig::new()).unwrap();

    assert_eq!(rollout.outcome, RolloutOutcome::Terminated);
    assert!(rollout.log.episode_length < env.config().move_budget);
}

#[test]
fn test_fixed_seed_reproduces_trace() {
    let config = RolloutConfig::new().with_seed(123);

    let mut env_a = create_env();
    let a = run_episode(&mut ConstantPolicy([0.2, -0.1, 0.05]), &mut env_a, &config).unwrap();

    let mut env_b = create_env();
    let b = run_episode(&mut ConstantPolicy([0.2, -0.1, 0.05]), &mut env_b, &config).unwrap();

    assert_eq!(a.trace.len(), b.trace.len());
    assert_eq!(a.log, b.log);
    for frame in 0..a.trace.len() {
        assert_eq!(a.trace.position(frame), b.trace.position(frame));
        assert_eq!(a.trace.yaw(frame), b.trace.yaw(frame));
    }
}

#[test]
fn test_trace_starts_at_reset_state() {
    let config = RolloutConfig::new().with_seed(55);

    let mut env = create_env();
    let expected_pos = {
        env.reset(55);
        env.pos()
    };

    let rollout = run_episode(&mut ZeroPolicy, &mut env, &config).unwrap();
    assert_eq!(rollout.trace.position(0), expected_pos);
}

#[test]
fn test_policy_failure_propagates() {
    let mut env = create_env();
    let err = run_episode(&mut FailingPolicy, &mut env, &RolloutConfig::new()).unwrap_err();
    assert!(matches!(err, RolloutError::Policy(_)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut env = create_env();
    let config = RolloutConfig::new().with_max_steps(0);
    let err = run_episode(&mut ZeroPolicy, &mut env, &config).unwrap_err();
    assert!(matches!(err, RolloutError::Config(_)));
}
