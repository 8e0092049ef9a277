mod common;

use dtx_core::AnyEmptyResult;

#[test]
fn clean_removes_built_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("build").arg("--path").arg(tmp.path()).assert().success();
	assert!(tmp.path().join("build/css/variables.css").is_file());

	let mut cmd = common::dtx_cmd();
	cmd.arg("clean")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Removed 1 file(s)."));

	assert!(!tmp.path().join("build/css/variables.css").exists());
	Ok(())
}

#[test]
fn clean_reports_files_that_were_never_built() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::scaffold_project(tmp.path())?;

	let mut cmd = common::dtx_cmd();
	cmd.arg("clean")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("does not exist"));

	Ok(())
}
