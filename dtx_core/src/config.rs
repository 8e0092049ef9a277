use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DtxError;
use crate::DtxResult;
use crate::format::PropertyFormat;
use crate::sort::SortOption;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["dtx.toml", ".dtx.toml", ".config/dtx.toml"];

/// Configuration loaded from a `dtx.toml` file.
///
/// ```toml
/// source = ["tokens/**/*.json"]
///
/// [platforms.web]
/// prefix = "dt"
/// build_path = "build/web"
///
/// [[platforms.web.files]]
/// destination = "variables.css"
/// format = "css"
/// options = { output_references = true }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DtxConfig {
	/// Glob patterns selecting token source files, relative to the project
	/// root.
	#[serde(default)]
	pub source: Vec<String>,
	/// Whether token files use the DTCG `$value`/`$type` naming convention.
	#[serde(default)]
	pub uses_dtcg: bool,
	/// Target platforms, each with its own output files.
	#[serde(default)]
	pub platforms: BTreeMap<String, PlatformConfig>,
}

impl DtxConfig {
	/// Load config from the first discovered candidate under `root`.
	/// Returns `Ok(None)` when no config file exists.
	pub fn load(root: &Path) -> DtxResult<Option<Self>> {
		let Some(path) = Self::config_path(root) else {
			return Ok(None);
		};
		let content = std::fs::read_to_string(&path)?;
		let config =
			toml::from_str(&content).map_err(|error| DtxError::ConfigParse(error.to_string()))?;
		Ok(Some(config))
	}

	/// The path of the first discovered config candidate, if any.
	pub fn config_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}
}

/// One target platform: a name prefix, an output directory, and the files
/// to build into it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformConfig {
	/// Prefix prepended to every flattened token name for this platform.
	#[serde(default)]
	pub prefix: Option<String>,
	/// Directory (relative to the project root) that output files are
	/// written into.
	#[serde(default)]
	pub build_path: Option<PathBuf>,
	/// Output files to build for this platform.
	#[serde(default)]
	pub files: Vec<FileConfig>,
}

/// One output file of a platform.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
	/// Output file path, relative to the platform's `build_path`.
	pub destination: String,
	/// Which declaration format to emit.
	pub format: PropertyFormat,
	/// Formatting options for this file.
	#[serde(default)]
	pub options: FileOptions,
}

impl FileConfig {
	/// The destination, validated to be non-empty.
	pub fn validated_destination(&self, platform: &str) -> DtxResult<&str> {
		if self.destination.trim().is_empty() {
			return Err(DtxError::InvalidDestination {
				platform: platform.to_string(),
			});
		}
		Ok(&self.destination)
	}
}

/// Per-file formatting options, mirroring the arguments of
/// [`formatted_variables`](crate::formatted_variables).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileOptions {
	/// Emit reference expressions instead of literal values.
	pub output_references: bool,
	/// Render references with a literal fallback value.
	pub output_reference_fallbacks: bool,
	/// Whether tokens default to being themeable.
	pub themeable: bool,
	/// Separator between declaration lines (default newline).
	pub line_separator: Option<String>,
	/// Sort criterion: `"name"`, or an array chaining criteria. Kept raw
	/// here and validated when the file is formatted.
	pub sort: Option<serde_json::Value>,
}

impl FileOptions {
	/// Convert the raw `sort` value into a validated [`SortOption`]. Fails
	/// loudly for values that are neither strings nor arrays.
	pub fn sort_option(&self) -> DtxResult<Option<SortOption>> {
		self.sort
			.as_ref()
			.map(SortOption::try_from)
			.transpose()
	}
}
