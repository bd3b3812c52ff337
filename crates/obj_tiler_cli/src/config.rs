//! Optional TOML configuration for the splitter.
//!
//! Every key is optional; command-line flags win over the file.
//!
//! ```toml
//! level = 4
//! output_dir = "tiles"
//! on_unassigned = "drop"
//! skip_empty = true
//! ```

use anyhow::{Context, Result};
use clap::ValueEnum;
use obj_tiler::UnassignedPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Largest accepted grid level (level³ cells).
pub const MAX_LEVEL: u32 = 256;

/// Split settings loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Grid cells per axis.
	pub level: Option<u32>,
	/// Output directory, relative to the config file.
	pub output_dir: Option<PathBuf>,
	/// What to do with geometries no cell contains.
	pub on_unassigned: Option<UnassignedMode>,
	/// Skip geometries without triangles instead of failing.
	pub skip_empty: Option<bool>,
}

/// Command-line / TOML spelling of [`UnassignedPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnassignedMode {
	/// Move to the cell with the nearest center.
	Nearest,
	/// Abort the split.
	Error,
	/// Leave the geometry out of every tile.
	Drop,
}

impl From<UnassignedMode> for UnassignedPolicy {
	fn from(mode: UnassignedMode) -> Self {
		match mode {
			UnassignedMode::Nearest => UnassignedPolicy::Nearest,
			UnassignedMode::Error => UnassignedPolicy::Error,
			UnassignedMode::Drop => UnassignedPolicy::Drop,
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	///
	/// A relative `output_dir` is resolved against the file's directory.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		let mut config = Self::parse(&content)?;

		if let Some(dir) = config.output_dir.take() {
			let base = path.parent().unwrap_or(Path::new("."));
			config.output_dir = Some(base.join(dir));
		}

		Ok(config)
	}

	/// Parse and validate TOML text.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config =
			toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

		if let Some(level) = config.level {
			check_level(level)?;
		}

		Ok(config)
	}
}

/// Reject levels that would produce no cells or an unreasonable grid.
pub fn check_level(level: u32) -> Result<()> {
	if level == 0 {
		anyhow::bail!("level must be at least 1");
	}
	if level > MAX_LEVEL {
		anyhow::bail!("level must be at most {MAX_LEVEL}, got {level}");
	}
	Ok(())
}
