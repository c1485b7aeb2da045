//! Animated GIF export of a recorded episode.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gif::{Encoder, Frame, Repeat};

use super::backends::{ImageBackend, RenderError, RenderResult};
use super::config::VisualizationConfig;
use super::projection::PerspectiveProjection;
use crate::rollout::EpisodeTrace;
use crate::types::Collider;

/// Records trace frames and writes them as an animated GIF.
pub struct GifRecorder {
    frames: Vec<Vec<u8>>,
    width: u16,
    height: u16,
    frame_delay: u16,
    max_frames: usize,
}

impl GifRecorder {
    /// Create a recorder.
    ///
    /// `fps` determines the playback speed; GIF frame delays are stored in
    /// centiseconds, so the effective rate is capped at 100 fps.
    pub fn new(width: u16, height: u16, fps: u16) -> Self {
        let frame_delay = (100 / fps.max(1)).max(1);
        Self {
            frames: Vec::new(),
            width,
            height,
            frame_delay,
            max_frames: 600,
        }
    }

    /// Set the maximum number of frames kept in memory.
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Number of recorded frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Render every frame of the trace into the recorder.
    ///
    /// Traces longer than the frame budget are subsampled evenly so the
    /// whole episode is still covered; the stride is logged.
    pub fn record(
        &mut self,
        trace: &EpisodeTrace,
        colliders: &[Collider],
        config: &VisualizationConfig,
    ) -> RenderResult<()> {
        if trace.is_empty() {
            return Err(RenderError::EmptyTrace);
        }

        let stride = trace.len().div_ceil(self.max_frames.max(1));
        if stride > 1 {
            log::info!(
                "trace has {} frames, recording every {}th to stay within {} GIF frames",
                trace.len(),
                stride,
                self.max_frames
            );
        }

        let mut backend = ImageBackend::new(self.width as u32, self.height as u32);
        let projection =
            PerspectiveProjection::new(&config.camera, self.width as u32, self.height as u32);

        let mut frame = 0;
        while frame < trace.len() {
            backend.render_frame(trace, colliders, frame, &projection, config)?;
            self.frames.push(rgb_to_rgba(backend.buffer()));
            frame += stride;
        }

        Ok(())
    }

    /// Write the recorded frames to a GIF file.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        if self.frames.is_empty() {
            return Err(RenderError::EmptyTrace);
        }

        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);

        let mut encoder = Encoder::new(writer, self.width, self.height, &[])
            .map_err(|e| RenderError::GifEncoding(e.to_string()))?;
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| RenderError::GifEncoding(e.to_string()))?;

        for frame_data in &self.frames {
            let mut frame = Frame::from_rgba_speed(
                self.width,
                self.height,
                &mut frame_data.clone(),
                10, // quantization speed, 1-30
            );
            frame.delay = self.frame_delay;

            encoder
                .write_frame(&frame)
                .map_err(|e| RenderError::GifEncoding(e.to_string()))?;
        }

        Ok(())
    }
}

/// Convert an RGB buffer to RGBA.
fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let pixels = rgb.len() / 3;
    let mut rgba = Vec::with_capacity(pixels * 4);
    for i in 0..pixels {
        rgba.push(rgb[i * 3]);
        rgba.push(rgb[i * 3 + 1]);
        rgba.push(rgb[i * 3 + 2]);
        rgba.push(255);
    }
    rgba
}
