use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dtx_cli::Commands;
use dtx_cli::DtxCli;
use dtx_cli::OutputFormat;
use dtx_core::AnyEmptyResult;
use dtx_core::Dictionary;
use dtx_core::DtxConfig;
use dtx_core::DtxError;
use dtx_core::DtxResult;
use dtx_core::FileConfig;
use dtx_core::PlatformConfig;
use dtx_core::VariablesOptions;
use dtx_core::flatten_tokens;
use dtx_core::formatted_variables;
use dtx_core::load_tokens;
use dtx_core::resolve_references;
use owo_colors::OwoColorize;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = DtxCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Build { ref platform, dry_run }) => {
			run_build(&args, platform.as_deref(), dry_run)
		}
		Some(Commands::Clean { ref platform }) => run_clean(&args, platform.as_deref()),
		Some(Commands::List { format }) => run_list(&args, format),
		None => {
			eprintln!("No subcommand specified. Run `dtx --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<DtxError>() {
			Ok(dtx_err) => {
				let report: miette::Report = (*dtx_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &DtxCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_init(args: &DtxCli) -> AnyEmptyResult {
	let root = resolve_root(args);
	let config_path = root.join("dtx.toml");
	let tokens_dir = root.join("tokens");
	let tokens_path = tokens_dir.join("color.json");

	let config_exists = config_path.exists();
	let tokens_exist = tokens_path.exists();

	if config_exists {
		println!("Config file already exists: {}", config_path.display());
	} else {
		let sample_config = "# dtx configuration\n\n# Glob patterns selecting token source \
		                     files.\nsource = [\"tokens/**/*.json\"]\n\n# Set to true when token \
		                     files use the DTCG $value/$type convention.\n# uses_dtcg = \
		                     false\n\n[platforms.css]\nbuild_path = \
		                     \"build/css\"\n\n[[platforms.css.files]]\ndestination = \
		                     \"variables.css\"\nformat = \"css\"\noptions = { output_references \
		                     = true }\n";

		std::fs::write(&config_path, sample_config)?;
		println!("Created dtx.toml");
	}

	if tokens_exist {
		println!("Token file already exists: {}", tokens_path.display());
	} else {
		let sample_tokens = "{\n  \"color\": {\n    \"base\": {\n      \"red\": { \"value\": \
		                     \"#EF5350\" },\n      \"blue\": { \"value\": \"#2196F3\" }\n    },\n    \
		                     \"semantic\": {\n      \"primary\": { \"value\": \
		                     \"{color.base.red}\" }\n    }\n  }\n}\n";

		std::fs::create_dir_all(&tokens_dir)?;
		std::fs::write(&tokens_path, sample_tokens)?;
		println!("Created tokens/color.json");
	}

	if !config_exists {
		println!();
		println!("Next steps:");
		println!("  1. Edit tokens/color.json to define your tokens");
		println!("  2. Run `dtx build` to emit platform variable files");
		println!("  3. Run `dtx list` to inspect resolved tokens");
	}

	Ok(())
}

/// Load config, token sources, and resolve every reference. The shared
/// front half of build and list.
fn load_project(root: &Path) -> dtx_core::AnyResult<(DtxConfig, serde_json::Value)> {
	let config = DtxConfig::load(root)?.ok_or(DtxError::ConfigNotFound)?;
	let mut tree = load_tokens(root, &config.source)?;
	resolve_references(&mut tree, config.uses_dtcg)?;
	Ok((config, tree))
}

/// The platforms a command operates on: all of them, or the one selected
/// with `--platform`.
fn select_platforms<'a>(
	config: &'a DtxConfig,
	platform: Option<&'a str>,
) -> DtxResult<Vec<(&'a str, &'a PlatformConfig)>> {
	match platform {
		Some(name) => {
			let platform_config = config
				.platforms
				.get(name)
				.ok_or_else(|| DtxError::UnknownPlatform(name.to_string()))?;
			Ok(vec![(name, platform_config)])
		}
		None => Ok(config
			.platforms
			.iter()
			.map(|(name, platform_config)| (name.as_str(), platform_config))
			.collect()),
	}
}

fn output_path(root: &Path, platform: &PlatformConfig, destination: &str) -> PathBuf {
	match &platform.build_path {
		Some(build_path) => root.join(build_path).join(destination),
		None => root.join(destination),
	}
}

fn render_file(
	dictionary: &Dictionary,
	file: &FileConfig,
	uses_dtcg: bool,
) -> DtxResult<String> {
	let mut options = VariablesOptions::new(file.format, dictionary);
	options.output_references = file.options.output_references;
	options.output_reference_fallbacks = file.options.output_reference_fallbacks;
	options.themeable = file.options.themeable;
	options.uses_dtcg = uses_dtcg;
	options.sort = file.options.sort_option()?;
	if let Some(separator) = &file.options.line_separator {
		options.formatting.line_separator = separator.clone();
	}

	let body = formatted_variables(options)?;
	Ok(format!("{body}\n"))
}

fn run_build(args: &DtxCli, platform: Option<&str>, dry_run: bool) -> AnyEmptyResult {
	let root = resolve_root(args);
	let (config, tree) = load_project(&root)?;
	let platforms = select_platforms(&config, platform)?;

	let mut written = 0usize;
	for (name, platform_config) in platforms {
		if args.verbose {
			println!("{}", colored!(format!("Platform {name}"), bold));
		}

		let dictionary = Dictionary::new(
			tree.clone(),
			config.uses_dtcg,
			platform_config.prefix.as_deref(),
		);

		for file in &platform_config.files {
			let destination = file.validated_destination(name)?;
			let output = render_file(&dictionary, file, config.uses_dtcg)?;
			let path = output_path(&root, platform_config, destination);
			let rel = make_relative(&path, &root);

			if dry_run {
				println!("would write {rel}");
				continue;
			}

			if let Some(parent) = path.parent() {
				std::fs::create_dir_all(parent)?;
			}
			std::fs::write(&path, output)?;
			written += 1;
			println!("wrote {rel}");
		}
	}

	if dry_run {
		println!("Dry run: no files written.");
	} else {
		println!("Built {written} file(s).");
	}

	Ok(())
}

fn run_clean(args: &DtxCli, platform: Option<&str>) -> AnyEmptyResult {
	let root = resolve_root(args);
	let config = DtxConfig::load(&root)?.ok_or(DtxError::ConfigNotFound)?;
	let platforms = select_platforms(&config, platform)?;

	let mut removed = 0usize;
	for (name, platform_config) in platforms {
		for file in &platform_config.files {
			let destination = file.validated_destination(name)?;
			let path = output_path(&root, platform_config, destination);
			let rel = make_relative(&path, &root);

			if path.is_file() {
				std::fs::remove_file(&path)?;
				removed += 1;
				println!("{} {rel}", colored!("-", red));
			} else {
				println!("{} {rel}, does not exist", colored!("!", red));
			}
		}
	}

	println!("Removed {removed} file(s).");
	Ok(())
}

fn run_list(args: &DtxCli, format: OutputFormat) -> AnyEmptyResult {
	let root = resolve_root(args);
	let (config, tree) = load_project(&root)?;
	let tokens = flatten_tokens(&tree, config.uses_dtcg, None);

	match format {
		OutputFormat::Json => {
			let entries: Vec<serde_json::Value> = tokens
				.iter()
				.map(|token| {
					serde_json::json!({
						"name": token.name,
						"path": token.path,
						"value": token.value,
					})
				})
				.collect();
			println!("{}", serde_json::Value::Array(entries));
		}
		OutputFormat::Text => {
			if tokens.is_empty() {
				println!("No tokens found.");
			} else {
				println!("{}", colored!("Tokens:", bold));
				for token in &tokens {
					let value = match &token.value {
						serde_json::Value::String(text) => text.clone(),
						other => other.to_string(),
					};
					println!("  {} = {value}", token.name);
				}
			}

			println!();
			println!("{}", colored!("Platforms:", bold));
			if config.platforms.is_empty() {
				println!("  none configured");
			}
			for (name, platform_config) in &config.platforms {
				println!("  {name} ({} file(s))", platform_config.files.len());
			}

			println!();
			println!(
				"{} token(s), {} platform(s)",
				tokens.len(),
				config.platforms.len()
			);
		}
	}

	Ok(())
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
