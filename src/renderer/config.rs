//! Configuration types for visualization.

use crate::constants::{GRID_SIZE, HEADING_ARROW_SCALE};

/// Main visualization configuration.
#[derive(Clone, Debug)]
pub struct VisualizationConfig {
    /// Window/image width in pixels.
    pub width: u32,
    /// Window/image height in pixels.
    pub height: u32,
    /// Camera configuration.
    pub camera: CameraConfig,
    /// Trajectory trail configuration.
    pub trajectory: TrajectoryConfig,
    /// Marker configuration.
    pub markers: MarkerConfig,
    /// Scene configuration.
    pub scene: SceneConfig,
    /// Frame interval in milliseconds.
    pub interval_ms: u64,
    /// Restart the animation from frame 0 after the last frame.
    pub loop_playback: bool,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            camera: CameraConfig::default(),
            trajectory: TrajectoryConfig::default(),
            markers: MarkerConfig::default(),
            scene: SceneConfig::default(),
            interval_ms: 10,
            loop_playback: true,
        }
    }
}

impl VisualizationConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set window dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set camera configuration.
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Set trajectory configuration.
    pub fn with_trajectory(mut self, trajectory: TrajectoryConfig) -> Self {
        self.trajectory = trajectory;
        self
    }

    /// Set marker configuration.
    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }

    /// Set the frame interval in milliseconds.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Enable/disable looping playback.
    pub fn with_loop(mut self, loop_playback: bool) -> Self {
        self.loop_playback = loop_playback;
        self
    }
}

/// 3D camera configuration for perspective projection.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Camera position in world frame [x, y, z].
    pub position: [f32; 3],
    /// Look-at target point [x, y, z].
    pub target: [f32; 3],
    /// Up vector [x, y, z].
    pub up: [f32; 3],
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// Enable automatic camera orbit animation.
    pub auto_orbit: bool,
    /// Orbit speed in radians per second.
    pub orbit_speed: f32,
    /// Orbit radius (distance from target).
    pub orbit_radius: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [22.0, 22.0, 16.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 0.0, 1.0],
            fov_degrees: 55.0,
            near: 0.1,
            far: 200.0,
            auto_orbit: false,
            orbit_speed: 0.2,
            orbit_radius: 34.0,
        }
    }
}

impl CameraConfig {
    /// Create a camera config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Set look-at target.
    pub fn with_target(mut self, x: f32, y: f32, z: f32) -> Self {
        self.target = [x, y, z];
        self
    }

    /// Set field of view.
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    /// Enable auto-orbit with the specified speed.
    pub fn with_auto_orbit(mut self, speed: f32) -> Self {
        self.auto_orbit = true;
        self.orbit_speed = speed;
        self
    }

    /// Set orbit radius.
    pub fn with_orbit_radius(mut self, radius: f32) -> Self {
        self.orbit_radius = radius;
        self
    }
}

/// Trajectory trail configuration.
#[derive(Clone, Debug)]
pub struct TrajectoryConfig {
    /// Draw the trajectory prefix trail.
    pub enabled: bool,
    /// Line width in pixels.
    pub line_width: u32,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            line_width: 1,
        }
    }
}

impl TrajectoryConfig {
    /// Create a trajectory config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle trail display.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the trail line width.
    pub fn with_line_width(mut self, line_width: u32) -> Self {
        self.line_width = line_width;
        self
    }
}

/// Marker appearance configuration.
#[derive(Clone, Debug)]
pub struct MarkerConfig {
    /// Drone position marker radius in pixels.
    pub drone_radius: i32,
    /// Target cross half-size in pixels.
    pub target_size: i32,
    /// Draw the heading arrow.
    pub show_heading: bool,
    /// World-space length of the heading arrow.
    pub heading_scale: f32,
    /// Draw the marker legend.
    pub show_legend: bool,
    /// Draw the frame counter overlay.
    pub show_hud: bool,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            drone_radius: 6,
            target_size: 9,
            show_heading: true,
            heading_scale: HEADING_ARROW_SCALE,
            show_legend: true,
            show_hud: true,
        }
    }
}

impl MarkerConfig {
    /// Create a marker config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the heading arrow.
    pub fn with_heading(mut self, show: bool) -> Self {
        self.show_heading = show;
        self
    }

    /// Toggle the legend.
    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }
}

/// Scene configuration.
///
/// Bounds default to the fixed [-10, 10] cube and do not follow the
/// trajectory; points outside are clipped visually.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// World bounds [x_min, x_max, y_min, y_max, z_min, z_max].
    pub bounds: [f32; 6],
    /// Draw the bounding cube wireframe.
    pub show_bounding_box: bool,
    /// Draw grid lines on the floor of the cube.
    pub show_grid: bool,
    /// Grid spacing in world units.
    pub grid_spacing: f32,
    /// Draw X/Y/Z labels at the positive axis corners.
    pub show_axis_labels: bool,
    /// Background color [R, G, B].
    pub background_color: [u8; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bounds: [
                -GRID_SIZE, GRID_SIZE, -GRID_SIZE, GRID_SIZE, -GRID_SIZE, GRID_SIZE,
            ],
            show_bounding_box: true,
            show_grid: false,
            grid_spacing: 5.0,
            show_axis_labels: true,
            background_color: [250, 250, 250],
        }
    }
}

impl SceneConfig {
    /// Create a scene config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the bounding cube.
    pub fn with_bounding_box(mut self, show: bool) -> Self {
        self.show_bounding_box = show;
        self
    }

    /// Toggle the floor grid.
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }
}
