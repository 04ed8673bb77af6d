//! `graph_gen` binary: builds one accelerator memory image per invocation.
//!
//! ```bash
//! graph_gen sssp latlon maps/usa.bin
//! graph_gen sssp grid 256
//! graph_gen color color com-youtube.ungraph.txt --vertices 1157828
//! graph_gen flow color edges.txt --vertices 100 --sink 99
//! graph_gen flow grid 64 64 3 --seed 7
//! graph_gen flow gr networks/washington.gr --out-dir images
//! ```
//!
//! The image is written to `<out-dir>/<input basename>.<app>` (`grid_<r>x<c>.<app>` for
//! generated grids). Exit code `0` on success, `1` on any error.

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

use graph_gen::{
    algo::DEFAULT_LOG_RELABEL_INTERVAL,
    pipeline::{App, Mode, Pipeline, Source},
};

/// Arguments of the `graph_gen` binary.
#[derive(Parser, Debug)]
#[command(
    name = "graph_gen",
    version,
    about = "Builds memory images and ground truths for the graph accelerator",
    long_about = None,
)]
struct Args {
    /// Accelerator app
    #[arg(value_enum, ignore_case = true)]
    app: App,

    /// Input mode
    #[arg(value_enum, ignore_case = true)]
    mode: Mode,

    /// Mode arguments: a path, `<n>` for grids or `<rows> <cols> <connections>` for flow grids
    #[arg(required = true, num_args = 1..)]
    mode_args: Vec<String>,

    /// Directory the image (and exports) are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed of the grid generators
    #[arg(long)]
    seed: Option<u64>,

    /// Start vertex of sssp and source of flow (defaults to the graph's source)
    #[arg(long)]
    start: Option<u32>,

    /// Sink of flow (required unless the input declares one)
    #[arg(long)]
    sink: Option<u32>,

    /// Vertices preallocated by the edge-list reader
    #[arg(long)]
    vertices: Option<u32>,

    /// Binary logarithm of the global relabel interval of flow images
    #[arg(long, default_value_t = DEFAULT_LOG_RELABEL_INTERVAL)]
    log_relabel_interval: u32,

    /// Also write the loaded graph as `<name>.dimacs`
    #[arg(long, default_value_t = false)]
    export_dimacs: bool,

    /// Also write the loaded graph as `<name>.edges`
    #[arg(long, default_value_t = false)]
    export_edges: bool,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn run(args: Args) -> anyhow::Result<()> {
    let source = Source::from_args(args.app, args.mode, &args.mode_args)
        .with_context(|| format!("invalid arguments for mode {:?}", args.mode))?;

    let pipeline = Pipeline::new(args.app)
        .out_dir(args.out_dir)
        .seed(args.seed)
        .start(args.start)
        .sink(args.sink)
        .vertices(args.vertices)
        .log_relabel_interval(args.log_relabel_interval)
        .export_dimacs(args.export_dimacs)
        .export_edges(args.export_edges);

    let path = pipeline.output_path(&source);
    pipeline
        .run(&source)
        .with_context(|| format!("failed to build {}", path.display()))?;

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(
            args.log_level
                .parse::<LevelFilter>()
                .unwrap_or(LevelFilter::INFO),
        )
        .with_target(false)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
