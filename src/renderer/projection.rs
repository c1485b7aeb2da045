//! 3D to 2D perspective projection.

use std::f32::consts::PI;

use super::config::CameraConfig;
use crate::types::{cross3, dot3, normalize3, sub3, Vec3};

/// Perspective projection from world space to screen coordinates.
#[derive(Clone, Debug)]
pub struct PerspectiveProjection {
    /// View matrix (world -> camera space), column-major.
    view: [[f32; 4]; 4],
    /// Projection matrix (camera -> clip space), column-major.
    proj: [[f32; 4]; 4],
    /// Viewport width in pixels.
    width: f32,
    /// Viewport height in pixels.
    height: f32,
    /// Camera position for depth queries.
    camera_pos: Vec3,
}

impl PerspectiveProjection {
    /// Create a projection for the given camera and viewport.
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut projection = Self {
            view: [[0.0; 4]; 4],
            proj: [[0.0; 4]; 4],
            width: width as f32,
            height: height as f32,
            camera_pos: config.position,
        };
        projection.update_camera(config);
        projection
    }

    /// Recompute matrices after a camera change.
    pub fn update_camera(&mut self, config: &CameraConfig) {
        self.camera_pos = config.position;
        self.view = look_at(config.position, config.target, config.up);
        self.proj = perspective(
            config.fov_degrees,
            self.width / self.height,
            config.near,
            config.far,
        );
    }

    /// Recompute the projection matrix after a viewport resize.
    pub fn update_viewport(&mut self, width: u32, height: u32, config: &CameraConfig) {
        self.width = width as f32;
        self.height = height as f32;
        self.proj = perspective(
            config.fov_degrees,
            self.width / self.height,
            config.near,
            config.far,
        );
    }

    /// Project a world point to screen coordinates.
    ///
    /// Returns `None` if the point is behind the camera.
    pub fn project(&self, point: Vec3) -> Option<(f32, f32)> {
        let cam = mul_point(&self.view, point);
        if cam[2] >= 0.0 {
            return None; // behind the camera in right-handed view space
        }

        let clip = mul_vec4(&self.proj, cam);
        if clip[3].abs() < 1e-10 {
            return None;
        }

        let ndc_x = clip[0] / clip[3];
        let ndc_y = clip[1] / clip[3];

        let screen_x = (ndc_x + 1.0) * 0.5 * self.width;
        let screen_y = (1.0 - ndc_y) * 0.5 * self.height;
        Some((screen_x, screen_y))
    }

    /// Project a line segment; `None` unless both endpoints are visible.
    pub fn project_segment(&self, a: Vec3, b: Vec3) -> Option<((f32, f32), (f32, f32))> {
        Some((self.project(a)?, self.project(b)?))
    }

    /// Project a direction vector of the given world length from an origin.
    pub fn project_direction(
        &self,
        origin: Vec3,
        direction: Vec3,
        length: f32,
    ) -> Option<((f32, f32), (f32, f32))> {
        let tip = [
            origin[0] + direction[0] * length,
            origin[1] + direction[1] * length,
            origin[2] + direction[2] * length,
        ];
        self.project_segment(origin, tip)
    }

    /// Distance from the camera to a world point, for depth sorting.
    pub fn distance_to_camera(&self, point: Vec3) -> f32 {
        let d = sub3(point, self.camera_pos);
        dot3(d, d).sqrt()
    }
}

/// Camera position on an orbit around a target point.
pub fn orbit_camera_position(target: Vec3, radius: f32, elevation: f32, azimuth: f32) -> Vec3 {
    let cos_elev = elevation.cos();
    [
        target[0] + radius * cos_elev * azimuth.cos(),
        target[1] + radius * cos_elev * azimuth.sin(),
        target[2] + radius * elevation.sin(),
    ]
}

/// Right-handed look-at view matrix.
fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> [[f32; 4]; 4] {
    let forward = normalize3(sub3(target, eye));
    let right = normalize3(cross3(forward, up));
    let true_up = cross3(right, forward);

    [
        [right[0], true_up[0], -forward[0], 0.0],
        [right[1], true_up[1], -forward[1], 0.0],
        [right[2], true_up[2], -forward[2], 0.0],
        [
            -dot3(right, eye),
            -dot3(true_up, eye),
            dot3(forward, eye),
            1.0,
        ],
    ]
}

/// Perspective projection matrix.
fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> [[f32; 4]; 4] {
    let f = 1.0 / (fov_degrees * PI / 360.0).tan();
    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) / (near - far), -1.0],
        [0.0, 0.0, (2.0 * far * near) / (near - far), 0.0],
    ]
}

/// Multiply a column-major 4x4 matrix by a point (w = 1).
fn mul_point(m: &[[f32; 4]; 4], p: Vec3) -> [f32; 4] {
    mul_vec4(m, [p[0], p[1], p[2], 1.0])
}

/// Multiply a column-major 4x4 matrix by a 4-vector.
fn mul_vec4(m: &[[f32; 4]; 4], v: [f32; 4]) -> [f32; 4] {
    [
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2] + m[3][0] * v[3],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2] + m[3][1] * v[3],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2] + m[3][2] * v[3],
        m[0][3] * v[0] + m[1][3] * v[1] + m[2][3] * v[2] + m[3][3] * v[3],
    ]
}
