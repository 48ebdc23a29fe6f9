pub mod export;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use nearfar::util::Timed;
use nearfar::{
    link_segments, Drift, FrameScheduler, LinkStats, PointSet, SceneConfig, SchedulerConfig,
    SchedulerError,
};

/// Configuration for a run, assembled from CLI arguments.
pub struct AppConfig {
    pub seed: Option<u64>,
    /// Frames to simulate.
    pub frames: u64,
    /// Simulated seconds per frame.
    pub dt: f32,
    pub scene: SceneConfig,
    pub scheduler: SchedulerConfig,
    /// Spawn `spawn_batch` more points every this many frames.
    pub spawn_every: Option<u64>,
    pub spawn_batch: usize,
    /// Log link statistics every this many frames (0 = never).
    pub report_every: u64,
    pub export_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("export failed: {0}")]
    Export(#[from] io::Error),
}

/// What a finished run reports back to `main`.
pub struct RunSummary {
    pub seed: u64,
    pub frames: u64,
    pub num_points: usize,
    pub spawn_time: Duration,
    pub mean_latency: Duration,
    pub last_stats: LinkStats,
    pub segments_drawn: usize,
}

/// Drive the frame loop: dispatch early, move points, complete late, consume.
pub fn run(config: AppConfig) -> Result<RunSummary, AppError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    log::info!(
        "Run: seed={}, points={}, placement={}, frames={}",
        seed,
        config.scene.point_count,
        config.scene.placement,
        config.frames
    );

    let mut scheduler = FrameScheduler::new(config.scheduler.clone())?;
    let mut points = PointSet::new();
    let spawn_timer = Timed::info("Spawn points");
    scheduler.spawn_points(&mut points, config.scene.point_count, &mut rng);
    let spawn_time = spawn_timer.finish();
    let mut drift = Drift::new(config.scene.bounds_radius(), config.scene.max_speed);
    drift.sync(&points, &mut rng);

    let mut total_latency = Duration::ZERO;
    let mut last_stats = LinkStats::default();
    let mut segments_drawn = 0usize;
    let mut report_start = Instant::now();

    for frame in 0..config.frames {
        if let Some(every) = config.spawn_every.filter(|&e| e > 0) {
            if frame > 0 && frame % every == 0 {
                scheduler.spawn_points(&mut points, config.spawn_batch, &mut rng);
                drift.sync(&points, &mut rng);
            }
        }

        scheduler.tick_dispatch(&points)?;

        // Everything between the two phases overlaps the pass
        drift.advance(&mut points, config.dt);

        let results = scheduler.tick_complete()?;
        total_latency += results.latency;

        let segments = link_segments(&results.links, points.positions());
        segments_drawn = segments.len();

        let is_last = frame + 1 == config.frames;
        if is_last || (config.report_every > 0 && (frame + 1) % config.report_every == 0) {
            last_stats = LinkStats::from_links(&results.links, points.positions());
            let frames_in_window = match config.report_every {
                0 => frame + 1,
                every if is_last => frame % every + 1,
                every => every,
            };
            let fps = frames_in_window as f64 / report_start.elapsed().as_secs_f64().max(1e-9);
            log::info!(
                "Frame {}: {} points, {} links, nearest {:.2}, farthest {:.2}, pass {:.3?}, {:.0} fps",
                results.frame,
                results.len(),
                segments_drawn,
                last_stats.mean_nearest,
                last_stats.mean_farthest,
                results.latency,
                fps
            );
            report_start = Instant::now();
        }
    }

    if let Some(path) = &config.export_path {
        match scheduler.latest() {
            Some(results) => export::export_frame(results, seed, path)?,
            None => log::warn!("No completed frame to export"),
        }
    }

    let mean_latency = if config.frames > 0 {
        total_latency / config.frames.min(u32::MAX as u64) as u32
    } else {
        Duration::ZERO
    };

    Ok(RunSummary {
        seed,
        frames: config.frames,
        num_points: points.len(),
        spawn_time,
        mean_latency,
        last_stats,
        segments_drawn,
    })
}
