//! Blocking window playback using minifb.

use std::time::{Duration, Instant};

use minifb::{Key, Window, WindowOptions};

use super::backends::{ImageBackend, RenderError, RenderResult};
use super::config::{CameraConfig, VisualizationConfig};
use super::playback::Playback;
use super::projection::{orbit_camera_position, PerspectiveProjection};
use crate::rollout::EpisodeTrace;
use crate::types::Collider;

/// Interactive playback window.
///
/// [`RealtimeWindow::play`] blocks until the user closes the window or
/// presses ESC; the process keeps control of the thread for the whole
/// animation, as the original tool did.
pub struct RealtimeWindow {
    /// minifb window handle.
    window: Window,
    /// ARGB pixel buffer for minifb.
    buffer: Vec<u32>,
    /// Rasterization backend.
    backend: ImageBackend,
    /// Perspective projection.
    projection: PerspectiveProjection,
    /// Visualization configuration.
    config: VisualizationConfig,
    /// Current camera (may be modified interactively).
    camera: CameraConfig,
    /// Timestamp of the last rendered frame.
    last_frame: Instant,
    /// Target frame duration.
    frame_duration: Duration,
    /// Current orbit angle (radians).
    orbit_angle: f32,
    /// Orbit elevation angle (radians).
    orbit_elevation: f32,
}

impl RealtimeWindow {
    /// Open a playback window.
    pub fn new(title: &str, config: VisualizationConfig) -> RenderResult<Self> {
        let window = Window::new(
            title,
            config.width as usize,
            config.height as usize,
            WindowOptions {
                resize: true,
                scale_mode: minifb::ScaleMode::AspectRatioStretch,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| RenderError::Init(e.to_string()))?;

        let buffer = vec![0u32; (config.width * config.height) as usize];
        let backend = ImageBackend::new(config.width, config.height);
        let projection = PerspectiveProjection::new(&config.camera, config.width, config.height);
        let camera = config.camera.clone();
        let frame_duration = Duration::from_millis(config.interval_ms.max(1));

        Ok(Self {
            window,
            buffer,
            backend,
            projection,
            camera,
            frame_duration,
            config,
            last_frame: Instant::now(),
            orbit_angle: 0.0,
            orbit_elevation: 0.5,
        })
    }

    /// Whether the window is still open.
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Play the trace until the window is closed.
    ///
    /// Blocks the calling thread. Playback loops according to the
    /// configuration; space pauses, `,`/`.` step frames while paused.
    pub fn play(&mut self, trace: &EpisodeTrace, colliders: &[Collider]) -> RenderResult<()> {
        if trace.is_empty() {
            return Err(RenderError::EmptyTrace);
        }

        let mut playback = Playback::new(trace.len(), self.config.loop_playback);

        while self.is_open() {
            self.handle_input(&mut playback);
            self.handle_resize();

            let now = Instant::now();
            if now.duration_since(self.last_frame) >= self.frame_duration {
                self.last_frame = now;
                playback.advance();

                if self.camera.auto_orbit {
                    self.orbit_angle +=
                        self.camera.orbit_speed * self.frame_duration.as_secs_f32();
                    self.camera.position = orbit_camera_position(
                        self.camera.target,
                        self.camera.orbit_radius,
                        self.orbit_elevation,
                        self.orbit_angle,
                    );
                    self.projection.update_camera(&self.camera);
                }

                self.backend.render_frame(
                    trace,
                    colliders,
                    playback.frame(),
                    &self.projection,
                    &self.config,
                )?;
                self.rgb_to_argb();
            }

            self.window
                .update_with_buffer(
                    &self.buffer,
                    self.config.width as usize,
                    self.config.height as usize,
                )
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        Ok(())
    }

    /// Handle keyboard input.
    fn handle_input(&mut self, playback: &mut Playback) {
        // Space: pause/resume
        if self.window.is_key_pressed(Key::Space, minifb::KeyRepeat::No) {
            playback.toggle_pause();
        }

        // , / . : single-frame stepping
        if self.window.is_key_pressed(Key::Comma, minifb::KeyRepeat::Yes) {
            playback.step_backward();
        }
        if self.window.is_key_pressed(Key::Period, minifb::KeyRepeat::Yes) {
            playback.step_forward();
        }

        // T: toggle trajectory trail
        if self.window.is_key_pressed(Key::T, minifb::KeyRepeat::No) {
            self.config.trajectory.enabled = !self.config.trajectory.enabled;
        }

        // B: toggle bounding cube
        if self.window.is_key_pressed(Key::B, minifb::KeyRepeat::No) {
            self.config.scene.show_bounding_box = !self.config.scene.show_bounding_box;
        }

        // G: toggle floor grid
        if self.window.is_key_pressed(Key::G, minifb::KeyRepeat::No) {
            self.config.scene.show_grid = !self.config.scene.show_grid;
        }

        // O: toggle camera orbit
        if self.window.is_key_pressed(Key::O, minifb::KeyRepeat::No) {
            self.camera.auto_orbit = !self.camera.auto_orbit;
        }

        // R: reset camera and rewind
        if self.window.is_key_pressed(Key::R, minifb::KeyRepeat::No) {
            self.camera = self.config.camera.clone();
            self.orbit_angle = 0.0;
            self.orbit_elevation = 0.5;
            self.projection.update_camera(&self.camera);
            playback.rewind();
        }

        // Arrow keys: pan camera target
        let pan = 0.3;
        let mut moved = false;
        if self.window.is_key_down(Key::Left) {
            self.camera.target[0] -= pan;
            self.camera.position[0] -= pan;
            moved = true;
        }
        if self.window.is_key_down(Key::Right) {
            self.camera.target[0] += pan;
            self.camera.position[0] += pan;
            moved = true;
        }
        if self.window.is_key_down(Key::Up) {
            self.camera.target[1] += pan;
            self.camera.position[1] += pan;
            moved = true;
        }
        if self.window.is_key_down(Key::Down) {
            self.camera.target[1] -= pan;
            self.camera.position[1] -= pan;
            moved = true;
        }

        // +/-: zoom along the view direction
        let zoom = 0.5;
        if self.window.is_key_down(Key::Equal) || self.window.is_key_down(Key::NumPadPlus) {
            self.camera.orbit_radius = (self.camera.orbit_radius - zoom).max(4.0);
            moved = true;
        }
        if self.window.is_key_down(Key::Minus) || self.window.is_key_down(Key::NumPadMinus) {
            self.camera.orbit_radius = (self.camera.orbit_radius + zoom).min(80.0);
            moved = true;
        }

        // PageUp/PageDown: orbit elevation
        if self.window.is_key_down(Key::PageUp) {
            self.orbit_elevation = (self.orbit_elevation + 0.02).min(1.4);
            moved = true;
        }
        if self.window.is_key_down(Key::PageDown) {
            self.orbit_elevation = (self.orbit_elevation - 0.02).max(0.05);
            moved = true;
        }

        if moved {
            if self.camera.auto_orbit {
                self.camera.position = orbit_camera_position(
                    self.camera.target,
                    self.camera.orbit_radius,
                    self.orbit_elevation,
                    self.orbit_angle,
                );
            }
            self.projection.update_camera(&self.camera);
        }
    }

    /// Track window resizes.
    fn handle_resize(&mut self) {
        let (new_width, new_height) = self.window.get_size();
        if new_width != self.config.width as usize || new_height != self.config.height as usize {
            self.config.width = new_width as u32;
            self.config.height = new_height as u32;
            self.buffer.resize(new_width * new_height, 0);
            self.backend = ImageBackend::new(self.config.width, self.config.height);
            self.projection
                .update_viewport(self.config.width, self.config.height, &self.camera);
        }
    }

    /// Convert the backend's RGB buffer to ARGB for minifb.
    fn rgb_to_argb(&mut self) {
        let rgb = self.backend.buffer();
        let pixels = self.config.width as usize * self.config.height as usize;

        for i in 0..pixels {
            let r = rgb[i * 3] as u32;
            let g = rgb[i * 3 + 1] as u32;
            let b = rgb[i * 3 + 2] as u32;
            self.buffer[i] = 0xFF00_0000 | (r << 16) | (g << 8) | b;
        }
    }
}
