//! 3D visualization of a recorded episode.
//!
//! The renderer replays a frozen [`EpisodeTrace`](crate::rollout::EpisodeTrace)
//! frame by frame, fully redrawing the scene each time: the trajectory
//! prefix up to the current frame, the current position marker, both target
//! markers, a heading arrow and the static collider geometry, all inside a
//! fixed [-10, 10] bounding cube.
//!
//! # Features
//!
//! - `render`: software rasterization into an RGB buffer (plotters) and PNG
//!   export
//! - `render-realtime`: blocking interactive window (minifb)
//! - `render-gif`: animated GIF export
//!
//! # Architecture
//!
//! 1. [`Playback`] walks the trace frame indices on a fixed interval
//! 2. [`PerspectiveProjection`] maps world points to screen coordinates
//! 3. [`ImageBackend`] rasterizes one frame into an RGB buffer
//! 4. [`RealtimeWindow`] presents buffers until the user closes the window

pub mod backends;
pub mod config;
pub mod heading;
pub mod playback;
pub mod projection;

#[cfg(feature = "render-gif")]
pub mod gif;

#[cfg(feature = "render-realtime")]
pub mod realtime;

pub use backends::{ImageBackend, RenderError, RenderResult};
pub use config::{CameraConfig, MarkerConfig, SceneConfig, TrajectoryConfig, VisualizationConfig};
pub use playback::Playback;
pub use projection::PerspectiveProjection;

#[cfg(feature = "render-gif")]
pub use gif::GifRecorder;

#[cfg(feature = "render-realtime")]
pub use realtime::RealtimeWindow;

/// Trajectory trail color.
pub const TRAIL_COLOR: [u8; 3] = [128, 128, 128];

/// Current drone position marker color.
pub const DRONE_COLOR: [u8; 3] = [50, 100, 220];

/// Move target marker color.
pub const MOVE_TARGET_COLOR: [u8; 3] = [220, 50, 50];

/// Look target marker color.
pub const LOOK_TARGET_COLOR: [u8; 3] = [50, 180, 50];

/// Heading arrow color.
pub const HEADING_COLOR: [u8; 3] = [20, 20, 20];

/// Collider face color.
pub const COLLIDER_COLOR: [u8; 3] = [100, 120, 160];
