//! Renderer tests: projection, playback and rasterization.

use crate::renderer::backends::{ImageBackend, RenderError};
use crate::renderer::config::VisualizationConfig;
use crate::renderer::projection::PerspectiveProjection;
use crate::rollout::EpisodeTrace;
use crate::types::Collider;

fn create_trace(frames: usize) -> EpisodeTrace {
    let mut trace = EpisodeTrace::new();
    for i in 0..frames {
        let t = i as f32 / frames.max(1) as f32;
        trace.push(
            [8.0 * t - 4.0, 3.0 * (t * 6.0).sin(), 2.0 * t],
            [5.0, 5.0, 5.0],
            [-5.0, 5.0, 0.0],
            t * 2.0,
        );
    }
    trace
}

fn render_one(
    trace: &EpisodeTrace,
    colliders: &[Collider],
    frame: usize,
    config: &VisualizationConfig,
) -> Result<Vec<u8>, RenderError> {
    let mut backend = ImageBackend::new(config.width, config.height);
    let projection = PerspectiveProjection::new(&config.camera, config.width, config.height);
    backend.render_frame(trace, colliders, frame, &projection, config)?;
    Ok(backend.buffer().to_vec())
}

#[test]
fn test_render_produces_non_background_pixels() {
    let config = VisualizationConfig::new().with_size(120, 90);
    let trace = create_trace(30);

    let buffer = render_one(&trace, &[], 20, &config).unwrap();
    let bg = config.scene.background_color;

    let foreground = buffer
        .chunks_exact(3)
        .filter(|px| px[0] != bg[0] || px[1] != bg[1] || px[2] != bg[2])
        .count();
    assert!(foreground > 100, "only {} foreground pixels", foreground);
}

#[test]
fn test_render_empty_trace_is_an_error() {
    let config = VisualizationConfig::new().with_size(64, 48);
    let trace = EpisodeTrace::new();
    let err = render_one(&trace, &[], 0, &config).unwrap_err();
    assert!(matches!(err, RenderError::EmptyTrace));
}

#[test]
fn test_render_clamps_frame_index() {
    let config = VisualizationConfig::new().with_size(64, 48);
    let trace = create_trace(5);
    // Frame beyond the trace must render the last frame, not panic.
    render_one(&trace, &[], 500, &config).unwrap();
}

#[test]
fn test_render_with_colliders() {
    let config = VisualizationConfig::new().with_size(120, 90);
    let trace = create_trace(10);
    let colliders = Collider::box_faces([4.0, -3.0, -5.0], [1.0, 1.0, 5.0]);

    let plain = render_one(&trace, &[], 5, &config).unwrap();
    let with_colliders = render_one(&trace, &colliders, 5, &config).unwrap();
    assert_ne!(plain, with_colliders, "colliders drew nothing");
}

#[test]
fn test_trail_grows_with_frame_index() {
    let config = VisualizationConfig::new().with_size(120, 90);
    let trace = create_trace(40);
    let bg = config.scene.background_color;

    let count_foreground = |buffer: &[u8]| {
        buffer
            .chunks_exact(3)
            .filter(|px| px[0] != bg[0] || px[1] != bg[1] || px[2] != bg[2])
            .count()
    };

    let early = count_foreground(&render_one(&trace, &[], 1, &config).unwrap());
    let late = count_foreground(&render_one(&trace, &[], 39, &config).unwrap());
    assert!(
        late > early,
        "trail did not grow: {} -> {}",
        early,
        late
    );
}

#[test]
fn test_save_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");

    let config = VisualizationConfig::new().with_size(64, 48);
    let trace = create_trace(10);
    let mut backend = ImageBackend::new(config.width, config.height);
    let projection = PerspectiveProjection::new(&config.camera, config.width, config.height);
    backend
        .render_frame(&trace, &[], 5, &projection, &config)
        .unwrap();
    backend.save_png(&path).unwrap();

    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
