//! Software rasterization backend using plotters.

use std::path::Path;

use plotters::backend::BitMapBackend;
use plotters::prelude::*;

use super::{RenderError, RenderResult};
use crate::renderer::config::{MarkerConfig, SceneConfig, TrajectoryConfig, VisualizationConfig};
use crate::renderer::heading::heading_direction;
use crate::renderer::projection::PerspectiveProjection;
use crate::renderer::{
    COLLIDER_COLOR, DRONE_COLOR, HEADING_COLOR, LOOK_TARGET_COLOR, MOVE_TARGET_COLOR, TRAIL_COLOR,
};
use crate::rollout::EpisodeTrace;
use crate::types::{Collider, Vec3};

/// Renders episode frames into an RGB pixel buffer.
pub struct ImageBackend {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl ImageBackend {
    /// Create a backend with the given pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0u8; (width * height * 3) as usize],
        }
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rendered frame as RGB bytes.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Render one frame of the trace into the internal buffer.
    ///
    /// The whole scene is redrawn: bounding cube, colliders, the trajectory
    /// prefix up to `frame`, target markers, the position marker and the
    /// heading arrow.
    pub fn render_frame(
        &mut self,
        trace: &EpisodeTrace,
        colliders: &[Collider],
        frame: usize,
        projection: &PerspectiveProjection,
        config: &VisualizationConfig,
    ) -> RenderResult<()> {
        if trace.is_empty() {
            return Err(RenderError::EmptyTrace);
        }
        let frame = frame.min(trace.len() - 1);

        let bg = config.scene.background_color;
        {
            let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
                .into_drawing_area();
            let _ = root.fill(&RGBColor(bg[0], bg[1], bg[2]));

            Self::draw_scene(&root, projection, &config.scene);
            Self::draw_colliders(&root, colliders, projection);
            if config.trajectory.enabled {
                Self::draw_trail(&root, trace.trail(frame), projection, &config.trajectory);
            }
            Self::draw_markers(&root, trace, frame, projection, &config.markers);
            Self::draw_overlay(&root, trace, frame, config);

            let _ = root.present();
        }

        Ok(())
    }

    /// Save the current buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        image::save_buffer(
            path.as_ref(),
            &self.buffer,
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| RenderError::ImageEncoding(e.to_string()))
    }

    /// Draw the fixed bounding cube, floor grid and axis labels.
    fn draw_scene(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        projection: &PerspectiveProjection,
        config: &SceneConfig,
    ) {
        let [x_min, x_max, y_min, y_max, z_min, z_max] = config.bounds;

        if config.show_grid {
            let grid_color = RGBColor(210, 210, 210);
            let spacing = config.grid_spacing;

            let mut x = x_min;
            while x <= x_max + 1e-3 {
                if let Some((a, b)) =
                    projection.project_segment([x, y_min, z_min], [x, y_max, z_min])
                {
                    let _ = root.draw(&PathElement::new(
                        [to_px(a), to_px(b)],
                        grid_color.stroke_width(1),
                    ));
                }
                x += spacing;
            }

            let mut y = y_min;
            while y <= y_max + 1e-3 {
                if let Some((a, b)) =
                    projection.project_segment([x_min, y, z_min], [x_max, y, z_min])
                {
                    let _ = root.draw(&PathElement::new(
                        [to_px(a), to_px(b)],
                        grid_color.stroke_width(1),
                    ));
                }
                y += spacing;
            }
        }

        if config.show_bounding_box {
            let corners: [Vec3; 8] = [
                [x_min, y_min, z_min],
                [x_max, y_min, z_min],
                [x_max, y_max, z_min],
                [x_min, y_max, z_min],
                [x_min, y_min, z_max],
                [x_max, y_min, z_max],
                [x_max, y_max, z_max],
                [x_min, y_max, z_max],
            ];
            const EDGES: [(usize, usize); 12] = [
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 0),
                (4, 5),
                (5, 6),
                (6, 7),
                (7, 4),
                (0, 4),
                (1, 5),
                (2, 6),
                (3, 7),
            ];

            let edge_color = RGBColor(120, 120, 120);
            for (i, j) in EDGES {
                if let Some((a, b)) = projection.project_segment(corners[i], corners[j]) {
                    let _ = root.draw(&PathElement::new(
                        [to_px(a), to_px(b)],
                        edge_color.stroke_width(1),
                    ));
                }
            }
        }

        if config.show_axis_labels {
            let offset = 0.8;
            let labels = [
                ("X", [x_max + offset, y_min, z_min]),
                ("Y", [x_min, y_max + offset, z_min]),
                ("Z", [x_min, y_min, z_max + offset]),
            ];
            for (label, point) in labels {
                if let Some(p) = projection.project(point) {
                    let _ = root.draw(&Text::new(
                        label,
                        to_px(p),
                        ("sans-serif", 14).into_font().color(&BLACK),
                    ));
                }
            }
        }
    }

    /// Draw collider quads back-to-front.
    fn draw_colliders(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        colliders: &[Collider],
        projection: &PerspectiveProjection,
    ) {
        let mut order: Vec<usize> = (0..colliders.len()).collect();
        order.sort_by(|&a, &b| {
            let da = projection.distance_to_camera(colliders[a].centroid());
            let db = projection.distance_to_camera(colliders[b].centroid());
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
        });

        let face = RGBColor(COLLIDER_COLOR[0], COLLIDER_COLOR[1], COLLIDER_COLOR[2]);
        for idx in order {
            let quad = &colliders[idx];
            let projected: Option<Vec<(i32, i32)>> = quad
                .vertices
                .iter()
                .map(|&v| projection.project(v).map(to_px))
                .collect();

            let Some(points) = projected else {
                continue; // partially behind the camera
            };

            let _ = root.draw(&Polygon::new(points.clone(), face.mix(0.45).filled()));

            let mut outline = points;
            outline.push(outline[0]);
            let _ = root.draw(&PathElement::new(outline, face.stroke_width(1)));
        }
    }

    /// Draw the trajectory prefix as a polyline.
    fn draw_trail(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        trail: &[Vec3],
        projection: &PerspectiveProjection,
        config: &TrajectoryConfig,
    ) {
        if trail.len() < 2 {
            return;
        }

        let color = RGBColor(TRAIL_COLOR[0], TRAIL_COLOR[1], TRAIL_COLOR[2]);
        for pair in trail.windows(2) {
            if let Some((a, b)) = projection.project_segment(pair[0], pair[1]) {
                let _ = root.draw(&PathElement::new(
                    [to_px(a), to_px(b)],
                    color.stroke_width(config.line_width),
                ));
            }
        }
    }

    /// Draw the target crosses, position marker and heading arrow.
    fn draw_markers(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        trace: &EpisodeTrace,
        frame: usize,
        projection: &PerspectiveProjection,
        config: &MarkerConfig,
    ) {
        if let Some(p) = projection.project(trace.move_target(frame)) {
            let color = RGBColor(
                MOVE_TARGET_COLOR[0],
                MOVE_TARGET_COLOR[1],
                MOVE_TARGET_COLOR[2],
            );
            let _ = root.draw(&Cross::new(to_px(p), config.target_size, color.stroke_width(2)));
        }

        if let Some(p) = projection.project(trace.look_target(frame)) {
            let color = RGBColor(
                LOOK_TARGET_COLOR[0],
                LOOK_TARGET_COLOR[1],
                LOOK_TARGET_COLOR[2],
            );
            let _ = root.draw(&Cross::new(to_px(p), config.target_size, color.stroke_width(2)));
        }

        let pos = trace.position(frame);
        if let Some(p) = projection.project(pos) {
            let color = RGBColor(DRONE_COLOR[0], DRONE_COLOR[1], DRONE_COLOR[2]);
            let _ = root.draw(&Circle::new(to_px(p), config.drone_radius, color.filled()));
        }

        if config.show_heading {
            let direction = heading_direction(trace.yaw(frame));
            if let Some((origin, tip)) =
                projection.project_direction(pos, direction, config.heading_scale)
            {
                let color = RGBColor(HEADING_COLOR[0], HEADING_COLOR[1], HEADING_COLOR[2]);
                let _ = root.draw(&PathElement::new(
                    [to_px(origin), to_px(tip)],
                    color.stroke_width(2),
                ));
                Self::draw_arrowhead(root, origin, tip, &color);
            }
        }
    }

    /// Draw two barbs at the arrow tip, in screen space.
    fn draw_arrowhead(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        origin: (f32, f32),
        tip: (f32, f32),
        color: &RGBColor,
    ) {
        let dx = tip.0 - origin.0;
        let dy = tip.1 - origin.1;
        let shaft = (dx * dx + dy * dy).sqrt();
        if shaft < 1e-3 {
            return;
        }

        let (ux, uy) = (dx / shaft, dy / shaft);
        let barb = (shaft * 0.2).clamp(4.0, 14.0);
        let angle = 28.0f32.to_radians();
        let (sin, cos) = angle.sin_cos();

        for side in [-1.0f32, 1.0] {
            // Rotate the reversed shaft direction by ±angle.
            let bx = -ux * cos - side * -uy * sin;
            let by = side * -ux * sin + -uy * cos;
            let end = (tip.0 + bx * barb, tip.1 + by * barb);
            let _ = root.draw(&PathElement::new(
                [to_px(tip), to_px(end)],
                color.stroke_width(2),
            ));
        }
    }

    /// Draw the frame counter and the marker legend.
    fn draw_overlay(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        trace: &EpisodeTrace,
        frame: usize,
        config: &VisualizationConfig,
    ) {
        let text_color = RGBColor(60, 60, 60);

        if config.markers.show_hud {
            let _ = root.draw(&Text::new(
                format!("Frame {}/{}", frame + 1, trace.len()),
                (10, 20),
                ("sans-serif", 16).into_font().color(&text_color),
            ));
            let _ = root.draw(&Text::new(
                format!("Yaw {:+.2} rad", trace.yaw(frame)),
                (10, 40),
                ("sans-serif", 14).into_font().color(&text_color),
            ));
        }

        if config.markers.show_legend {
            let entries: [(&str, [u8; 3]); 3] = [
                ("Drone Position", DRONE_COLOR),
                ("Move Target", MOVE_TARGET_COLOR),
                ("Look Target", LOOK_TARGET_COLOR),
            ];

            let legend_y = config.height as i32 - 28;
            let mut x = 14;
            for (label, color) in entries {
                let _ = root.draw(&Rectangle::new(
                    [(x, legend_y), (x + 12, legend_y + 12)],
                    RGBColor(color[0], color[1], color[2]).filled(),
                ));
                let _ = root.draw(&Text::new(
                    label,
                    (x + 18, legend_y + 11),
                    ("sans-serif", 13).into_font().color(&text_color),
                ));
                x += 18 + 8 * label.len() as i32 + 24;
            }
        }
    }
}

/// Round a projected point to pixel coordinates.
#[inline]
fn to_px(p: (f32, f32)) -> (i32, i32) {
    (p.0 as i32, p.1 as i32)
}
