use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use tpfilter_core::FilterSettings;

pub const DEFAULT_OUTPUT: &str = "filtered.ics";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	/// iCalendar subscription URL
	pub url: Option<String>,
	/// Where the filtered calendar is written
	pub output: Option<PathBuf>,
	#[serde(flatten)]
	pub filter: FilterSettings,
}

/// `~/.config/tpfilter/config.toml`, or the platform equivalent.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("tpfilter").join("config.toml"))
}

impl Config {
	/// Loads `path`, or the default config file if it exists. An explicit path
	/// that cannot be read is an error; a missing default file is not.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		if let Some(path) = path {
			return Self::read(path);
		}

		match default_path() {
			Some(path) if path.exists() => Self::read(&path),
			path => {
				debug!("No config file at {path:?}, using defaults");
				Ok(Self::default())
			}
		}
	}

	fn read(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file {}", path.display()))?;

		debug!("Loaded config from {}", path.display());

		Self::parse(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
	}

	pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(content)
	}
}
