// Benchmark solver passes: serial vs parallel, direct vs through the frame scheduler
use std::time::{Duration, Instant};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use closest_farthest::{compute_into, SolverConfig};
use nearfar::util::parse_count;
use nearfar::{FrameScheduler, Placement, PointSet, SchedulerConfig};

#[derive(Parser, Debug)]
#[command(name = "bench_passes", about = "Time nearest/farthest passes")]
struct Args {
    /// Point counts to benchmark (accepts k/m suffixes)
    #[arg(value_parser = parse_count, default_values_t = vec![500usize, 2_000, 8_000])]
    sizes: Vec<usize>,

    /// Passes per measurement
    #[arg(long, default_value_t = 10)]
    repeats: usize,

    /// Skip the serial baseline (slow for large counts)
    #[arg(long)]
    skip_serial: bool,

    #[arg(long, default_value_t = 12345)]
    seed: u64,
}

fn mean_ms(total: Duration, repeats: usize) -> f64 {
    total.as_secs_f64() * 1000.0 / repeats.max(1) as f64
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let repeats = args.repeats.max(1);

    let mut scheduler = match FrameScheduler::new(SchedulerConfig::default()) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    for &n in &args.sizes {
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        let mut points = PointSet::new();
        points.spawn(n, &Placement::Ball { radius: 100.0 }, &mut rng);
        let mut out = Vec::with_capacity(n);

        println!("n={}:", n);

        let mut serial_ms = None;
        if !args.skip_serial {
            let config = SolverConfig::serial();
            let start = Instant::now();
            for _ in 0..repeats {
                compute_into(points.positions(), &mut out, &config);
            }
            let ms = mean_ms(start.elapsed(), repeats);
            println!("  serial:    {:>9.2}ms", ms);
            serial_ms = Some(ms);
        }

        let config = SolverConfig {
            parallel: true,
            min_parallel_len: 0,
        };
        let start = Instant::now();
        for _ in 0..repeats {
            compute_into(points.positions(), &mut out, &config);
        }
        let parallel_ms = mean_ms(start.elapsed(), repeats);
        match serial_ms {
            Some(s) => println!("  parallel:  {:>9.2}ms ({:.2}x)", parallel_ms, s / parallel_ms),
            None => println!("  parallel:  {:>9.2}ms", parallel_ms),
        }

        // Full frame: dispatch, then block on completion
        let start = Instant::now();
        let mut latency = Duration::ZERO;
        for _ in 0..repeats {
            let frame = scheduler
                .tick_dispatch(&points)
                .and_then(|()| scheduler.tick_complete().map(|r| r.latency));
            match frame {
                Ok(l) => latency += l,
                Err(err) => {
                    eprintln!("error: {}", err);
                    std::process::exit(1);
                }
            }
        }
        println!(
            "  scheduled: {:>9.2}ms/frame (pass latency {:.2}ms)",
            mean_ms(start.elapsed(), repeats),
            mean_ms(latency, repeats)
        );

        let pairs = n as f64 * n.saturating_sub(1) as f64;
        println!(
            "  throughput: {:.1} Mpairs/s\n",
            pairs / (parallel_ms / 1000.0) / 1e6
        );
    }
}
