//! Frame export for external analysis.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;

use nearfar::{FrameResults, LinkStats};

/// Export one frame's snapshot and links to a JSON file (gzipped for `.gz`).
pub fn export_frame(results: &FrameResults, seed: u64, path: &Path) -> io::Result<()> {
    let _t = nearfar::util::Timed::info("Export");

    let data = FrameExport::from_results(results, seed);
    let file = File::create(path)?;

    // Check if we should gzip based on extension
    let is_gzip = path.extension().map(|ext| ext == "gz").unwrap_or(false);

    if is_gzip {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        serde_json::to_writer(&mut encoder, &data)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &data)?;
        writer.flush()?;
    }

    log::info!("Exported frame {} to {}", results.frame, path.display());
    Ok(())
}

#[derive(Serialize)]
struct FrameExport {
    metadata: Metadata,
    positions: Vec<[f32; 3]>,
    links: LinkData,
}

#[derive(Serialize)]
struct Metadata {
    seed: u64,
    frame: u64,
    num_points: usize,
    latency_ms: f64,
    mean_nearest_dist: f32,
    mean_farthest_dist: f32,
    max_farthest_dist: f32,
}

/// One column per slot; `null` marks an empty slot.
#[derive(Serialize)]
struct LinkData {
    first: Vec<Option<u32>>,
    second: Vec<Option<u32>>,
    third: Vec<Option<u32>>,
    farthest: Vec<Option<u32>>,
}

impl FrameExport {
    fn from_results(results: &FrameResults, seed: u64) -> Self {
        let stats = LinkStats::from_links(&results.links, &results.positions);
        let n = results.len();

        let mut links = LinkData {
            first: Vec::with_capacity(n),
            second: Vec::with_capacity(n),
            third: Vec::with_capacity(n),
            farthest: Vec::with_capacity(n),
        };
        let as_u32 = |idx: Option<usize>| idx.map(|i| i as u32);
        for r in &results.links {
            links.first.push(as_u32(r.first()));
            links.second.push(as_u32(r.second()));
            links.third.push(as_u32(r.third()));
            links.farthest.push(as_u32(r.farthest()));
        }

        Self {
            metadata: Metadata {
                seed,
                frame: results.frame,
                num_points: n,
                latency_ms: results.latency.as_secs_f64() * 1000.0,
                mean_nearest_dist: stats.mean_nearest,
                mean_farthest_dist: stats.mean_farthest,
                max_farthest_dist: stats.max_farthest,
            },
            positions: results.positions.iter().map(|p| p.to_array()).collect(),
            links,
        }
    }
}
