mod common;

use dtx_core::AnyEmptyResult;

#[test]
fn init_creates_config_and_sample_tokens() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created dtx.toml"));

	assert!(tmp.path().join("dtx.toml").is_file());
	assert!(tmp.path().join("tokens/color.json").is_file());

	// the scaffolded project builds
	let mut cmd = common::dtx_cmd();
	cmd.arg("build").arg("--path").arg(tmp.path()).assert().success();
	assert!(tmp.path().join("build/css/variables.css").is_file());

	Ok(())
}

#[test]
fn init_leaves_existing_files_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("dtx.toml"), "source = []\n")?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("dtx.toml"))?,
		"source = []\n"
	);
	Ok(())
}
