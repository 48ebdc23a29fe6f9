mod app;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use nearfar::scene::{DEFAULT_POINT_COUNT, DEFAULT_SPAWN_RADIUS};
use nearfar::util::{parse_count, parse_non_negative};
use nearfar::{Placement, SceneConfig, SchedulerConfig, SolverConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliPlacement {
    /// Uniform inside the sphere
    #[value(name = "ball")]
    Ball,
    /// Uniform on the sphere's surface
    #[value(name = "shell")]
    Shell,
}

impl CliPlacement {
    fn with_radius(self, radius: f32) -> Placement {
        match self {
            CliPlacement::Ball => Placement::Ball { radius },
            CliPlacement::Shell => Placement::Shell { radius },
        }
    }
}

/// nearfar - three-nearest and farthest neighbor links for a drifting point cloud
#[derive(Parser, Debug)]
#[command(name = "nearfar", version, about)]
struct Cli {
    /// Number of points spawned at startup (accepts k/m suffixes)
    #[arg(long, short = 'n', value_parser = parse_count, default_value_t = DEFAULT_POINT_COUNT)]
    count: usize,

    /// Radius of the bounding sphere
    #[arg(long, default_value_t = DEFAULT_SPAWN_RADIUS)]
    radius: f32,

    /// Initial placement strategy
    #[arg(long, value_enum, default_value_t = CliPlacement::Ball)]
    placement: CliPlacement,

    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Maximum drift speed (units per second)
    #[arg(long, default_value_t = 10.0, value_parser = parse_non_negative)]
    speed: f32,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads for solver passes (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Run each pass on a single worker instead of splitting it
    #[arg(long)]
    serial: bool,

    /// Fail a frame whose pass takes longer than this many milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Spawn more points every N frames
    #[arg(long, value_name = "FRAMES")]
    spawn_every: Option<u64>,

    /// Points added per on-demand spawn
    #[arg(long, default_value_t = 10)]
    spawn_batch: usize,

    /// Log link statistics every N frames (0 = only the last frame)
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Export the last frame to file (supports .json and .json.gz)
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let placement = cli.placement.with_radius(cli.radius);
    let solver = if cli.serial {
        SolverConfig::serial()
    } else {
        SolverConfig::default()
    };

    let config = app::AppConfig {
        seed: cli.seed,
        frames: cli.frames,
        dt: cli.dt,
        scene: SceneConfig {
            point_count: cli.count,
            placement,
            max_speed: cli.speed,
        },
        scheduler: SchedulerConfig {
            worker_threads: cli.threads,
            solver,
            pass_timeout: cli.timeout_ms.map(Duration::from_millis),
            placement,
        },
        spawn_every: cli.spawn_every,
        spawn_batch: cli.spawn_batch,
        report_every: cli.report_every,
        export_path: cli.export,
    };

    match app::run(config) {
        Ok(summary) => {
            println!(
                "Run complete: seed={}, {} frames, {} points (spawned in {:.3?}), mean pass {:.3?}, {} links last frame",
                summary.seed,
                summary.frames,
                summary.num_points,
                summary.spawn_time,
                summary.mean_latency,
                summary.segments_drawn
            );
            println!(
                "  mean nearest {:.3}, mean farthest {:.3}, diameter {:.3}, incomplete {}",
                summary.last_stats.mean_nearest,
                summary.last_stats.mean_farthest,
                summary.last_stats.max_farthest,
                summary.last_stats.incomplete
            );
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
