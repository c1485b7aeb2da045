//! Environment contract tests.

use crate::config::{EnvConfig, UNBOUNDED_TARGETS};
use crate::constants::OBS_SIZE;
use crate::env::DroneEnv;
use crate::types::dist3;

fn create_env(config: EnvConfig) -> DroneEnv {
    DroneEnv::from_config(config).unwrap()
}

#[test]
fn test_observation_matches_state() {
    let mut env = create_env(EnvConfig::default());
    let obs = env.reset(11);
    assert_eq!(obs.len(), OBS_SIZE);

    let half_extent = env.config().half_extent;
    let move_target = env.move_target();
    let pos = env.pos();

    for axis in 0..3 {
        assert!((obs[axis] - move_target[axis] / half_extent).abs() < 1e-6);
        assert!((obs[3 + axis] - pos[axis] / half_extent).abs() < 1e-6);
    }
    assert!((obs[6] - env.yaw().sin()).abs() < 1e-6);
    assert!((obs[7] - env.yaw().cos()).abs() < 1e-6);
}

#[test]
fn test_reach_completes_bounded_path() {
    // A huge reach radius makes the very first step a target hit.
    let mut env = create_env(
        EnvConfig::new()
            .with_n_targets(1)
            .with_target_radius(100.0),
    );
    env.reset(5);

    let outcome = env.step(&[0.0; 3]);
    assert!(outcome.terminated, "single-target path should complete");
    assert!(!outcome.truncated);
    assert_eq!(env.targets_reached(), 1);
    assert!(outcome.reward >= 1.0, "reach bonus missing: {}", outcome.reward);
}

#[test]
fn test_unbounded_path_resamples_targets() {
    let mut env = create_env(
        EnvConfig::new()
            .with_n_targets(UNBOUNDED_TARGETS)
            .with_target_radius(100.0),
    );
    env.reset(5);

    let first_target = env.move_target();
    let outcome = env.step(&[0.0; 3]);

    assert!(!outcome.terminated, "unbounded path must not stop by count");
    assert!(env.targets_reached() >= 1);
    assert_ne!(
        env.move_target(),
        first_target,
        "reached target should be replaced"
    );
}

#[test]
fn test_unbounded_path_keeps_counting() {
    let mut env = create_env(
        EnvConfig::new()
            .with_n_targets(UNBOUNDED_TARGETS)
            .with_target_radius(100.0),
    );
    env.reset(9);

    for step in 0..20 {
        let outcome = env.step(&[0.0; 3]);
        assert!(!outcome.terminated, "terminated at step {}", step);
    }
    assert_eq!(env.targets_reached(), 20);
}

#[test]
fn test_flying_out_of_bounds_terminates() {
    let mut env = create_env(EnvConfig::default());
    env.reset(2);

    // Full-throttle diagonal flight has to leave the arena well before the
    // move budget runs out.
    let mut terminated = false;
    for _ in 0..env.config().move_budget {
        let outcome = env.step(&[1.0, 1.0, 1.0]);
        if outcome.terminated {
            assert_eq!(outcome.reward, -1.0, "out-of-bounds penalty missing");
            terminated = true;
            break;
        }
        assert!(!outcome.truncated);
    }

    assert!(terminated, "drone never left the arena");
    let pos = env.pos();
    let half_extent = env.config().half_extent;
    assert!(
        pos.iter().any(|v| v.abs() > half_extent),
        "terminal position {:?} still inside bounds",
        pos
    );
}

#[test]
fn test_move_budget_counts_down() {
    let mut env = create_env(EnvConfig::default());
    env.reset(4);
    let budget = env.config().move_budget;

    env.step(&[0.0; 3]);
    assert_eq!(env.moves_left(), budget - 1);
    env.step(&[0.0; 3]);
    assert_eq!(env.moves_left(), budget - 2);
}

#[test]
fn test_progress_toward_target_is_rewarded() {
    let mut env = create_env(EnvConfig::default());
    env.reset(8);

    // Command straight at the target; progress shaping must be positive.
    let to_target = {
        let d = crate::types::sub3(env.move_target(), env.pos());
        crate::types::normalize3(d)
    };
    let before = dist3(env.pos(), env.move_target());
    let outcome = env.step(&to_target);
    let after = dist3(env.pos(), env.move_target());

    assert!(after < before);
    assert!(outcome.reward > 0.0, "reward {} for progress", outcome.reward);
}

#[test]
fn test_identical_seeds_give_identical_episodes() {
    let mut env_a = create_env(EnvConfig::default());
    let mut env_b = create_env(EnvConfig::default());
    env_a.reset(77);
    env_b.reset(77);

    for i in 0..50 {
        let action = [(i as f32 * 0.37).sin(), (i as f32 * 0.19).cos(), 0.1];
        let a = env_a.step(&action);
        let b = env_b.step(&action);
        assert_eq!(a.observation, b.observation, "diverged at step {}", i);
        assert_eq!(a.reward, b.reward);
    }
}

#[test]
fn test_yaw_slews_toward_look_target() {
    // A tiny reach radius keeps the targets fixed while the drone hovers.
    let mut env = create_env(EnvConfig::new().with_target_radius(1e-3));
    env.reset(13);

    let bearing = {
        let d = crate::types::sub3(env.look_target(), env.pos());
        d[1].atan2(d[0])
    };
    let error_before = (bearing - env.yaw()).abs().min(
        2.0 * std::f32::consts::PI - (bearing - env.yaw()).abs(),
    );

    // Hold position so the bearing stays put while yaw converges.
    for _ in 0..200 {
        env.step(&[0.0; 3]);
    }

    let error_after = (bearing - env.yaw()).abs().min(
        2.0 * std::f32::consts::PI - (bearing - env.yaw()).abs(),
    );
    assert!(
        error_after <= error_before,
        "yaw error grew: {} -> {}",
        error_before,
        error_after
    );
    assert!(error_after < 0.05, "yaw never converged: {}", error_after);
}
