use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DtxError {
	#[error(transparent)]
	#[diagnostic(code(dtx::io_error))]
	Io(#[from] std::io::Error),

	#[error("reference doesn't exist: `{{{reference}}}` used by token `{referenced_by}`")]
	#[diagnostic(
		code(dtx::missing_reference),
		help("check the reference path for typos, or define a token at `{reference}`")
	)]
	MissingReference {
		reference: String,
		referenced_by: String,
	},

	#[error("circular reference detected: {}", cycle.join(" -> "))]
	#[diagnostic(
		code(dtx::circular_reference),
		help("give one of the tokens in this loop a literal value")
	)]
	CircularReference { cycle: Vec<String> },

	#[error("Invalid \"sort\" option: \"{0}\". Use \"name\", a comparator function, or an array of those.")]
	#[diagnostic(code(dtx::invalid_sort_option))]
	InvalidSortOption(String),

	#[error("Invalid \"sort\" option type: {0}. Use \"name\", a comparator function, or an array of those.")]
	#[diagnostic(code(dtx::invalid_sort_option_type))]
	InvalidSortOptionType(String),

	#[error("please enter a valid destination for a file in platform `{platform}`")]
	#[diagnostic(
		code(dtx::invalid_destination),
		help("every [[platforms.{platform}.files]] entry needs a non-empty `destination`")
	)]
	InvalidDestination { platform: String },

	#[error("failed to parse token file `{path}`: {reason}")]
	#[diagnostic(
		code(dtx::token_parse),
		help("token source files must be valid JSON objects")
	)]
	TokenParse { path: String, reason: String },

	#[error("token file `{path}` must hold a JSON object at the top level")]
	#[diagnostic(code(dtx::token_shape))]
	TokenShape { path: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(dtx::config_parse),
		help("check that dtx.toml is valid TOML with `source` and [platforms] sections")
	)]
	ConfigParse(String),

	#[error("no dtx.toml found")]
	#[diagnostic(
		code(dtx::config_not_found),
		help("run `dtx init` to create one, or pass `--path` to point at a project root")
	)]
	ConfigNotFound,

	#[error("unknown platform: `{0}`")]
	#[diagnostic(
		code(dtx::unknown_platform),
		help("define a [platforms.{0}] section in dtx.toml")
	)]
	UnknownPlatform(String),

	#[error("invalid source glob pattern `{pattern}`: {reason}")]
	#[diagnostic(code(dtx::invalid_glob))]
	InvalidGlob { pattern: String, reason: String },
}

pub type DtxResult<T> = Result<T, DtxError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
