use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Transform design tokens into platform variable files.",
	long_about = "dtx (design token transformer) builds platform stylesheets from a single \
	              hierarchical set of design tokens.\n\nTokens may reference each other with \
	              `{a.b.c}` expressions; dtx resolves every reference, orders output so \
	              definitions always precede uses, and emits CSS custom properties, SCSS, LESS, \
	              or Stylus variables per platform.\n\nQuick start:\n  dtx init    Create a \
	              sample config and token file\n  dtx build   Build all configured platforms\n  \
	              dtx clean   Delete built files\n  dtx list    Inspect resolved tokens"
)]
pub struct DtxCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize dtx in a project by creating a sample config and token
	/// file.
	///
	/// Creates `dtx.toml` and a `tokens/color.json` starter file in the
	/// project root. Existing files are left untouched.
	Init,
	/// Build all configured platforms.
	///
	/// Loads token source files, resolves every `{a.b.c}` reference, and
	/// writes each platform's output files. A missing or circular
	/// reference aborts the build with the offending token paths.
	Build {
		/// Build only the named platform.
		#[arg(long)]
		platform: Option<String>,

		/// Preview the files a build would write without writing them.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Delete the files a previous build produced.
	///
	/// Walks the configured platforms and removes each destination file.
	/// Files that were never built are reported, not treated as errors.
	Clean {
		/// Clean only the named platform.
		#[arg(long)]
		platform: Option<String>,
	},
	/// List resolved tokens and configured platforms.
	List {
		/// Output format. Use `text` for human-readable output or `json`
		/// for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
