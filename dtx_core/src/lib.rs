//! `dtx_core` is the core library for the [dtx](https://github.com/dtx-rs/dtx) design-token build tool. It loads hierarchical token files, resolves `{a.b.c}`-style references between tokens, orders the flattened token list so definitions precede uses, and emits formatted variable declarations for CSS, SCSS, LESS, and Stylus.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Token JSON files
//!   → Loader (globs source files, deep-merges them into one token tree)
//!   → Resolver (snapshots originals, substitutes references, detects cycles)
//!   → Flattener (tree leaves become an ordered DesignToken list)
//!   → Sort engine (reference-safe order first, user criteria as tie-breakers)
//!   → Property formatter (one declaration line per token, joined into a file)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `dtx.toml`: token source
//!   patterns, platforms, output files, and formatting options.
//!
//! ## Key Types
//!
//! - [`DesignToken`] — A flattened token with its resolved `value` and the
//!   authored `original` value that reference-aware ordering inspects.
//! - [`Dictionary`] — The resolved token tree plus its flattened list view.
//! - [`SortOption`] — A named sort, a custom comparator, or a chain of
//!   either, validated once at comparator construction.
//! - [`PropertyFormat`] — The built-in declaration formats.
//! - [`DtxError`] — Every failure the pipeline can report, including
//!   missing and circular references with exact path detail.
//!
//! ## Quick Start
//!
//! ```rust
//! use dtx_core::{Dictionary, PropertyFormat, VariablesOptions};
//! use dtx_core::{formatted_variables, resolve_references};
//! use serde_json::json;
//!
//! let mut tree = json!({
//! 	"color": {
//! 		"base": { "value": "#EF5350" },
//! 		"primary": { "value": "{color.base}" },
//! 	}
//! });
//! resolve_references(&mut tree, false).unwrap();
//!
//! let dictionary = Dictionary::new(tree, false, None);
//! let mut options = VariablesOptions::new(PropertyFormat::Css, &dictionary);
//! options.output_references = true;
//! let css = formatted_variables(options).unwrap();
//! assert!(css.contains("var(--color-base)"));
//! ```

pub use config::*;
pub use error::*;
pub use format::*;
pub use loader::*;
pub use references::*;
pub use resolver::*;
pub use sort::*;
pub use tokens::*;

pub mod config;
mod error;
mod format;
mod loader;
mod references;
mod resolver;
mod sort;
mod tokens;

#[cfg(test)]
mod __fixtures;
