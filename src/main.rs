//! Evaluation CLI: load a pretrained policy, roll out episodes and replay
//! the last one in a 3D viewer.
//!
//! ```bash
//! cargo run --release --features render-realtime -- -n 5 --policy ppo_4096000.bin
//! ```
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | Space | Pause/resume |
//! | , / . | Step one frame back/forward |
//! | T | Toggle trajectory trail |
//! | B | Toggle bounding cube |
//! | G | Toggle floor grid |
//! | O | Toggle camera orbit |
//! | R | Reset camera and rewind |
//! | Arrows | Pan camera |
//! | +/- | Zoom |
//! | PgUp/PgDn | Orbit elevation |
//! | ESC | Quit |

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use drone_viz::{
    run_episode, Collider, DroneEnv, EnvConfig, EpisodeLog, PpoPolicy, RolloutConfig,
};

/// Roll out a pretrained drone policy and replay the episode in 3D.
#[derive(Parser)]
#[command(name = "drone_viz", version, about)]
struct Cli {
    /// Enable model training (accepted for compatibility; this tool only
    /// evaluates)
    #[arg(short = 't', long = "train")]
    train: bool,

    /// Total number of targets in the drone's flight path (-1 for inf)
    #[arg(short = 'n', long = "n-targets", default_value_t = 5)]
    n_targets: i32,

    /// Path to the pretrained policy checkpoint
    #[arg(long, default_value = "ppo_4096000.bin")]
    policy: PathBuf,

    /// Environment reset seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Hard cap on environment steps per episode
    #[arg(long, default_value_t = 10_000)]
    max_steps: u32,

    /// Episodes to roll out; stats are aggregated and the last is rendered
    #[arg(long, default_value_t = 1)]
    episodes: u32,

    /// Frame interval of the animation in milliseconds
    #[arg(long, default_value_t = 10)]
    interval_ms: u64,

    /// Skip the interactive window
    #[arg(long)]
    headless: bool,

    /// Save the final frame as a PNG
    #[cfg(feature = "render")]
    #[arg(long)]
    png: Option<PathBuf>,

    /// Save the animation as an animated GIF
    #[cfg(feature = "render-gif")]
    #[arg(long)]
    gif: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.train {
        log::warn!("--train is accepted for compatibility; this tool only evaluates a checkpoint");
    }

    let env_config = EnvConfig::new()
        .with_n_targets(cli.n_targets)
        .with_colliders(default_colliders());
    let mut env = DroneEnv::from_config(env_config)?;
    let mut policy = PpoPolicy::load(&cli.policy)?;

    let episodes = cli.episodes.max(1);
    let mut logs = Vec::with_capacity(episodes as usize);
    let mut last = None;

    println!(
        "{:>8} {:>16} {:>10} {:>8} {:>8}",
        "Episode", "Outcome", "Return", "Steps", "Targets"
    );
    for episode in 0..episodes {
        let rollout_config = RolloutConfig::new()
            .with_max_steps(cli.max_steps)
            .with_seed(cli.seed.wrapping_add(episode as u64));

        let rollout = run_episode(&mut policy, &mut env, &rollout_config)?;
        println!(
            "{:>8} {:>16} {:>10.2} {:>8} {:>8}",
            episode,
            rollout.outcome.to_string(),
            rollout.log.episode_return,
            rollout.log.episode_length,
            rollout.log.score,
        );

        logs.push(rollout.log);
        last = Some(rollout);
    }

    if logs.len() > 1 {
        let summary = EpisodeLog::aggregate(&logs);
        println!(
            "{:>8} {:>16} {:>10.2} {:>8.1} {:>8.2}",
            "mean", "", summary.mean_return, summary.mean_length, summary.mean_score
        );
    }

    let Some(rollout) = last else {
        return Ok(());
    };

    #[cfg(feature = "render")]
    render_outputs(&cli, &env, &rollout)?;

    #[cfg(not(feature = "render"))]
    if !cli.headless {
        eprintln!("built without the render feature; rollout stats only");
    }

    Ok(())
}

#[cfg(feature = "render")]
fn render_outputs(
    cli: &Cli,
    env: &DroneEnv,
    rollout: &drone_viz::Rollout,
) -> Result<(), Box<dyn Error>> {
    use drone_viz::renderer::{ImageBackend, PerspectiveProjection, VisualizationConfig};

    let config = VisualizationConfig::new().with_interval_ms(cli.interval_ms);
    let colliders = env.colliders();

    if let Some(path) = &cli.png {
        let mut backend = ImageBackend::new(config.width, config.height);
        let projection = PerspectiveProjection::new(&config.camera, config.width, config.height);
        backend.render_frame(
            &rollout.trace,
            colliders,
            rollout.trace.len().saturating_sub(1),
            &projection,
            &config,
        )?;
        backend.save_png(path)?;
        println!("wrote {}", path.display());
    }

    #[cfg(feature = "render-gif")]
    if let Some(path) = &cli.gif {
        use drone_viz::renderer::GifRecorder;

        let fps = (1000 / cli.interval_ms.max(1)).clamp(1, 100) as u16;
        let mut recorder = GifRecorder::new(config.width as u16, config.height as u16, fps);
        recorder.record(&rollout.trace, colliders, &config)?;
        recorder.save(path)?;
        println!("wrote {} ({} frames)", path.display(), recorder.frame_count());
    }

    if !cli.headless {
        #[cfg(feature = "render-realtime")]
        {
            use drone_viz::renderer::RealtimeWindow;

            let mut window = RealtimeWindow::new("Drone Flight Viewer", config)?;
            window.play(&rollout.trace, colliders)?;
        }

        #[cfg(not(feature = "render-realtime"))]
        {
            eprintln!("interactive playback requires the render-realtime feature:");
            eprintln!("  cargo run --release --features render-realtime");
        }
    }

    Ok(())
}

/// Static obstacle scenery: two pillars standing on the arena floor.
fn default_colliders() -> Vec<Collider> {
    let mut colliders = Collider::box_faces([4.0, -3.0, -5.0], [1.0, 1.0, 5.0]);
    colliders.extend(Collider::box_faces([-5.0, 4.0, -7.0], [1.5, 1.5, 3.0]));
    colliders
}
