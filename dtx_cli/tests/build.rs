mod common;

use dtx_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn build_writes_platform_files_in_reference_safe_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Built 1 file(s)."));

	let output = std::fs::read_to_string(tmp.path().join("build/css/variables.css"))?;

	// the referenced token is defined before its use, and the use is a
	// reference expression
	let base = output
		.find("--color-base-red")
		.expect("base token should be emitted");
	let semantic = output
		.find("--color-semantic-primary")
		.expect("semantic token should be emitted");
	assert!(base < semantic);
	assert!(output.contains("var(--color-base-red)"));

	Ok(())
}

#[test]
fn build_without_output_references_emits_literals() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;
	std::fs::write(
		tmp.path().join("dtx.toml"),
		r#"
source = ["tokens/**/*.json"]

[platforms.css]
build_path = "build/css"

[[platforms.css.files]]
destination = "variables.css"
format = "css"
"#,
	)?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("build").arg("--path").arg(tmp.path()).assert().success();

	let output = std::fs::read_to_string(tmp.path().join("build/css/variables.css"))?;
	assert!(output.contains("--color-semantic-primary: #EF5350;"));
	assert!(!output.contains("var("));

	Ok(())
}

#[test]
fn build_dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("build")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			predicates::str::contains("would write")
				.and(predicates::str::contains("Dry run: no files written.")),
		);

	assert!(!tmp.path().join("build/css/variables.css").exists());
	Ok(())
}

#[test]
fn build_fails_on_circular_references() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;
	std::fs::write(
		tmp.path().join("tokens").join("color.json"),
		r#"{
  "color": {
    "teal": { "value": "{color.blue}" },
    "blue": { "value": "{color.teal}" }
  }
}"#,
	)?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stderr(predicates::str::contains("circular reference"));

	assert!(!tmp.path().join("build/css/variables.css").exists());
	Ok(())
}

#[test]
fn build_fails_on_missing_references() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;
	std::fs::write(
		tmp.path().join("tokens").join("color.json"),
		r#"{ "color": { "primary": { "value": "{color.missing}" } } }"#,
	)?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stderr(
			predicates::str::contains("color.missing")
				.and(predicates::str::contains("color.primary")),
		);

	Ok(())
}

#[test]
fn build_rejects_unknown_platforms() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("build")
		.arg("--platform")
		.arg("android")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stderr(predicates::str::contains("android"));

	Ok(())
}

#[test]
fn build_without_config_fails_with_a_hint() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stderr(predicates::str::contains("dtx.toml"));

	Ok(())
}

#[test]
fn list_reports_resolved_tokens_as_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;

	let mut cmd = common::dtx_cmd();
	let assert = cmd
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
	let tokens: serde_json::Value = serde_json::from_str(stdout.trim())?;
	let names: Vec<&str> = tokens
		.as_array()
		.expect("list output should be an array")
		.iter()
		.filter_map(|entry| entry["name"].as_str())
		.collect();

	assert!(names.contains(&"color-base-red"));
	assert!(names.contains(&"color-semantic-primary"));
	Ok(())
}
