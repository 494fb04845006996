//! relief: convert an elevation raster into a watertight, printable STL solid.

mod config;
mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use relief_field::ScaleFactors;
use relief_runtime::MeshAssembler;

use crate::config::{FileConfig, MeshJob};

#[derive(Parser)]
#[command(name = "relief")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert a heightmap image into a closed 3D-printable STL solid", long_about = None)]
struct Cli {
    /// Elevation raster (single-channel image; first channel of multichannel)
    input: PathBuf,

    /// Destination STL path (written atomically on success)
    output: PathBuf,

    /// X-axis spacing multiplier (negative mirrors the model)
    #[arg(long)]
    scale_x: Option<f32>,

    /// Y-axis spacing multiplier (negative mirrors the model)
    #[arg(long)]
    scale_y: Option<f32>,

    /// Elevation multiplier (0 flattens the model onto its base)
    #[arg(long)]
    scale_z: Option<f32>,

    /// Downsampling factor applied to both raster dimensions before meshing
    #[arg(long)]
    subsample: Option<u32>,

    /// Worker threads; defaults to available hardware parallelism
    #[arg(long)]
    threads: Option<usize>,

    /// Verify edge sharing (watertightness) before writing
    #[arg(long)]
    audit: bool,

    /// TOML file supplying defaults for scale/subsample/threads
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.as_str()),
    )
    .init();

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let file_scale = file.scale.unwrap_or([1.0, 1.0, 1.0]);

    let job = MeshJob {
        input: cli.input,
        output: cli.output,
        scale: ScaleFactors::new(
            cli.scale_x.unwrap_or(file_scale[0]),
            cli.scale_y.unwrap_or(file_scale[1]),
            cli.scale_z.unwrap_or(file_scale[2]),
        ),
        subsample: cli.subsample.or(file.subsample).unwrap_or(1),
        workers: cli
            .threads
            .or(file.threads)
            .unwrap_or_else(MeshAssembler::default_workers),
        audit: cli.audit,
    };

    let report = pipeline::run(&job)?;
    log::info!(
        "done: {} triangles from a {}x{} grid -> {:?}",
        report.triangles,
        report.rows,
        report.cols,
        job.output
    );
    Ok(())
}
