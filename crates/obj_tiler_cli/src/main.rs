//! WaveFront OBJ grid splitter.
//!
//! Reads one OBJ file, partitions its groups into a `level³` grid by centroid
//! and writes one self-contained OBJ file per occupied cell:
//!
//! ```text
//! city.obj ─► city_tiles/city_0.obj
//!             city_tiles/city_1.obj
//!             ...
//! ```
//!
//! Tiles keep the source's `mtllib` reference; the material library itself is
//! not copied.
//!
//! Logging goes through `tracing`; set `RUST_LOG=obj_tiler=debug` for per-tile
//! detail.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use obj_tiler::{obj, split_timed, SplitConfig, SplitStats};
use std::path::{Path, PathBuf};
use tracing::info;

use config::{check_level, Config, UnassignedMode};

/// WaveFront OBJ grid splitter.
#[derive(Parser, Debug)]
#[command(name = "split_obj")]
#[command(about = "Splits an OBJ model into a grid of self-contained tile models")]
struct Args {
	/// OBJ file to split.
	input: PathBuf,

	/// Output directory (default: `<input stem>_tiles` next to the input).
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Grid cells per axis; 1 copies the model unsplit (default: 2).
	#[arg(short, long)]
	level: Option<u32>,

	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Handling of groups whose centroid falls outside every cell.
	#[arg(long, value_enum)]
	on_unassigned: Option<UnassignedMode>,

	/// Skip groups without faces instead of failing.
	#[arg(long)]
	skip_empty: bool,
}

/// Fully resolved run settings: flags, then config file, then defaults.
#[derive(Debug)]
struct Settings {
	output_dir: PathBuf,
	split: SplitConfig,
}

impl Settings {
	fn resolve(args: &Args, config: Config) -> Result<Self> {
		let defaults = SplitConfig::default();

		let level = args.level.or(config.level).unwrap_or(defaults.level);
		check_level(level)?;

		let unassigned = args
			.on_unassigned
			.or(config.on_unassigned)
			.map(Into::into)
			.unwrap_or(defaults.unassigned);
		let skip_empty = args.skip_empty || config.skip_empty.unwrap_or(false);

		let output_dir = args
			.output
			.clone()
			.or(config.output_dir)
			.unwrap_or_else(|| default_output_dir(&args.input));

		Ok(Self {
			output_dir,
			split: SplitConfig::new()
				.with_level(level)
				.with_unassigned(unassigned)
				.with_skip_empty_geometries(skip_empty),
		})
	}
}

/// `<dir>/<stem>_tiles` for `<dir>/<stem>.obj`.
fn default_output_dir(input: &Path) -> PathBuf {
	let stem = input
		.file_stem()
		.map(|s| s.to_string_lossy().into_owned())
		.unwrap_or_else(|| "model".to_string());
	input
		.parent()
		.unwrap_or(Path::new("."))
		.join(format!("{stem}_tiles"))
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive("obj_tiler=info".parse()?)
				.add_directive("split_obj=info".parse()?),
		)
		.init();

	let args = Args::parse();
	let written = run(&args)?;

	info!("Done! {} tiles written", written.len());
	Ok(())
}

/// Read, split and write. Returns the written tile paths in cell order.
fn run(args: &Args) -> Result<Vec<PathBuf>> {
	let config = match &args.config {
		Some(path) => {
			info!("Loading config from: {}", path.display());
			Config::load(path)?
		}
		None => Config::default(),
	};
	let settings = Settings::resolve(args, config)?;

	info!("Reading {}", args.input.display());
	let model = obj::read_obj_file(&args.input)
		.with_context(|| format!("Failed to read OBJ: {}", args.input.display()))?;
	info!(
		"{} positions, {} groups, {} triangles",
		model.positions.len(),
		model.geometries.len(),
		model.triangle_count()
	);

	let report = split_timed(&model, &settings.split)
		.with_context(|| format!("Failed to split {}", args.input.display()))?;
	log_stats(settings.split.level, &report.stats);

	std::fs::create_dir_all(&settings.output_dir).with_context(|| {
		format!(
			"Failed to create output dir: {}",
			settings.output_dir.display()
		)
	})?;

	let mut written = Vec::with_capacity(report.tiles.len());
	for tile in &report.tiles {
		let path = settings.output_dir.join(format!("{}.obj", tile.model.name));
		obj::write_obj_file(&tile.model, &path)
			.with_context(|| format!("Failed to write: {}", path.display()))?;
		info!(
			"  {} ({} groups, {} triangles)",
			path.display(),
			tile.model.geometries.len(),
			tile.model.triangle_count()
		);
		written.push(path);
	}

	Ok(written)
}

fn log_stats(level: u32, stats: &SplitStats) {
	info!(
		"level {level}: {}/{} cells occupied, {} groups placed ({} by nearest cell) in {}us",
		stats.occupied_cells,
		stats.cell_count,
		stats.assigned_geometries,
		stats.nearest_geometries,
		stats.total_us
	);
	if stats.dropped_geometries > 0 || stats.skipped_geometries > 0 {
		info!(
			"{} groups dropped, {} empty groups skipped",
			stats.dropped_geometries, stats.skipped_geometries
		);
	}
}
