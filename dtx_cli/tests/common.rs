use assert_cmd::Command;

pub fn dtx_cmd() -> Command {
	let mut cmd = Command::cargo_bin("dtx").expect("dtx binary should build");
	cmd.env("NO_COLOR", "1");
	cmd
}

/// Write a minimal project (config + one token file) into `root`.
pub fn scaffold_project(root: &std::path::Path) -> std::io::Result<()> {
	std::fs::write(
		root.join("dtx.toml"),
		r#"
source = ["tokens/**/*.json"]

[platforms.css]
build_path = "build/css"

[[platforms.css.files]]
destination = "variables.css"
format = "css"
options = { output_references = true }
"#,
	)?;

	std::fs::create_dir_all(root.join("tokens"))?;
	std::fs::write(
		root.join("tokens").join("color.json"),
		r##"{
  "color": {
    "semantic": {
      "primary": { "value": "{color.base.red}" }
    },
    "base": {
      "red": { "value": "#EF5350" }
    }
  }
}"##,
	)
}
