//! Physical and structural constants for the drone arena.
//!
//! The arena is a cube of half-extent [`GRID_SIZE`] centred on the origin.
//! All positions, targets and scene bounds are expressed in the same world
//! frame, with Z pointing up.

/// Half-extent of the cubic arena (m). Scene bounds are [-GRID_SIZE, GRID_SIZE]
/// on every axis.
pub const GRID_SIZE: f32 = 10.0;

/// Margin kept between spawned positions/targets and the arena walls (m).
pub const SPAWN_MARGIN: f32 = 1.0;

/// Maximum commanded speed (m/s). A normalized action of ±1 on an axis maps
/// to this speed.
pub const MAX_SPEED: f32 = 5.0;

/// Control timestep (s).
pub const DT: f32 = 0.02;

/// Maximum yaw slew rate toward the look target (rad/s).
pub const MAX_YAW_RATE: f32 = 3.0;

/// Distance at which a move target counts as reached (m).
pub const TARGET_RADIUS: f32 = 0.5;

/// Moves available per episode before truncation.
pub const DEFAULT_MOVE_BUDGET: u32 = 1500;

/// Default number of targets in the flight path.
pub const DEFAULT_N_TARGETS: i32 = 5;

/// Observation size: scaled move target (3) + scaled position (3) +
/// sin(yaw) + cos(yaw).
pub const OBS_SIZE: usize = 8;

/// Action size: velocity command per world axis.
pub const ACTION_SIZE: usize = 3;

/// World-space length of the rendered heading arrow.
pub const HEADING_ARROW_SCALE: f32 = 3.0;
