use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::WalkBuilder;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::DtxError;
use crate::DtxResult;

/// Scan the project for token source files matching the configured glob
/// patterns, parse each as JSON, and deep-merge them into a single token
/// tree.
///
/// The walk respects `.gitignore`. Files merge in path order, so the merge
/// result does not depend on directory traversal order; when two files
/// define the same token, the later one wins and a warning names the
/// collision.
pub fn load_tokens(root: &Path, source_patterns: &[String]) -> DtxResult<Value> {
	let glob_set = build_glob_set(source_patterns)?;
	let mut files: Vec<PathBuf> = Vec::new();

	for entry in WalkBuilder::new(root).build() {
		let Ok(entry) = entry else {
			continue;
		};
		if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
			continue;
		}
		let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
		if glob_set.is_match(relative) {
			files.push(entry.path().to_path_buf());
		}
	}

	files.sort();
	debug!(files = files.len(), "loading token source files");

	let mut tree = serde_json::Map::new();
	for file in &files {
		let content = std::fs::read_to_string(file)?;
		let parsed: Value =
			serde_json::from_str(&content).map_err(|error| DtxError::TokenParse {
				path: file.display().to_string(),
				reason: error.to_string(),
			})?;
		let Value::Object(parsed_map) = parsed else {
			return Err(DtxError::TokenShape {
				path: file.display().to_string(),
			});
		};
		let mut path = Vec::new();
		deep_merge(&mut tree, parsed_map, &mut path, file);
	}

	Ok(Value::Object(tree))
}

fn build_glob_set(patterns: &[String]) -> DtxResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|error| DtxError::InvalidGlob {
			pattern: pattern.clone(),
			reason: error.to_string(),
		})?;
		builder.add(glob);
	}
	builder.build().map_err(|error| DtxError::InvalidGlob {
		pattern: patterns.join(", "),
		reason: error.to_string(),
	})
}

/// Merge `incoming` into `target`. Groups merge key-by-key; a collision on
/// anything else overwrites (later sources win) and logs which token was
/// redefined.
fn deep_merge(
	target: &mut serde_json::Map<String, Value>,
	incoming: serde_json::Map<String, Value>,
	path: &mut Vec<String>,
	file: &Path,
) {
	for (key, incoming_child) in incoming {
		let Some(existing) = target.get_mut(&key) else {
			target.insert(key, incoming_child);
			continue;
		};

		match (existing, incoming_child) {
			(Value::Object(existing_map), Value::Object(incoming_map)) => {
				path.push(key);
				deep_merge(existing_map, incoming_map, path, file);
				path.pop();
			}
			(existing, incoming_child) => {
				path.push(key);
				warn!(
					token = path.join("."),
					file = %file.display(),
					"token collision, later source wins"
				);
				path.pop();
				*existing = incoming_child;
			}
		}
	}
}
