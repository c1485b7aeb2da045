//! Test suites for the harness.
//!
//! Covers the environment contract, the rollout driver invariants and the
//! renderer. Module-local unit tests live next to the code they exercise;
//! these suites test across module boundaries.

pub mod env_tests;
pub mod rollout_tests;

#[cfg(feature = "render")]
pub mod renderer_tests;
