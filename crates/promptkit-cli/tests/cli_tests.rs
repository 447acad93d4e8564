//! Integration tests for the `promptkit` binary.
//!
//! Every invocation runs inside a temp dir with `--config` pointing into it,
//! so the developer's own config never leaks in.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary run from `temp` with no config flag.
fn bare(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("promptkit");
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env_remove("PROMPTKIT_CHAIN__OUTPUT_KEY")
        .env_remove("PROMPTKIT_TEMPLATES__DIR")
        .arg("--no-color");
    cmd
}

/// Binary reading `temp/config.toml`, which tests may or may not create.
fn promptkit(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = bare(temp);
    cmd.arg("--config").arg(temp.path().join("config.toml"));
    cmd
}

fn write_chain_templates(dir: &Path) {
    fs::write(
        dir.join("1_extract.yaml"),
        "name: extract_key_points\n\
         description: Extract key points from text\n\
         template: \"Extract 3 key points from: {{ text }}\"\n\
         input_variables: [text]\n",
    )
    .unwrap();
    fs::write(
        dir.join("2_summarize.json"),
        r#"{"name": "summarize_points",
            "description": "Summarize the key points",
            "template": "Summarize: {{ output }}",
            "input_variables": ["output"]}"#,
    )
    .unwrap();
}

// ── meta ──────────────────────────────────────────────────────────────────────

#[test]
fn help_flag() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("chain"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_exits_2() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp).arg("explode").assert().code(2);
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_builtin_with_var() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["render", "zero_shot_qa", "--var", "question=What is Rust?"])
        .assert()
        .success()
        .stdout("Answer the following question: What is Rust?\n");
}

#[test]
fn render_quiet_still_prints_result() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["--quiet", "render", "zero_shot_qa", "--var", "question=Why?"])
        .assert()
        .success()
        .stdout("Answer the following question: Why?\n");
}

#[test]
fn render_json_output() {
    let temp = TempDir::new().unwrap();
    let assert = promptkit(&temp)
        .args([
            "--output-format",
            "json",
            "render",
            "zero_shot_qa",
            "--var",
            "question=Q",
        ])
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(doc["template"], "zero_shot_qa");
    assert_eq!(doc["output"], "Answer the following question: Q");
}

#[test]
fn render_few_shot_builtin_fills_examples() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["render", "few_shot_sentiment", "--var", "text=hi"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Text: I loved this movie!\nSentiment: positive\nText: This was terrible.",
        ))
        .stdout(predicate::str::ends_with("Text: hi\nSentiment:\n"));
}

#[test]
fn render_few_shot_keeps_explicit_examples() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args([
            "render",
            "few_shot_sentiment",
            "--var",
            "text=hi",
            "--var",
            "examples_str=Text: meh\nSentiment: neutral",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("I loved this movie!").not());
}

#[test]
fn global_dir_before_subcommand() {
    let temp = TempDir::new().unwrap();
    write_chain_templates(temp.path());

    promptkit(&temp)
        .args(["--dir", ".", "list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("summarize_points"));
}

#[test]
fn render_from_file_with_vars_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("greet.yaml"),
        "name: greet\ndescription: Greeting\ntemplate: \"Hello {{ who }}, {{ n }} times\"\n\
         input_variables: [who, n]\n",
    )
    .unwrap();
    fs::write(temp.path().join("vars.json"), r#"{"who": "file", "n": 2}"#).unwrap();

    promptkit(&temp)
        .args([
            "render",
            "greet.yaml",
            "--vars-file",
            "vars.json",
            "--var",
            "who=flag",
        ])
        .assert()
        .success()
        .stdout("Hello flag, 2 times\n");
}

#[test]
fn render_missing_variable_exits_2() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["render", "role_student", "--var", "level=high school"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Missing required variables for template 'role_student': subject, topic",
        ))
        .stderr(predicate::str::contains("--var subject="));
}

#[test]
fn render_unknown_template_exits_3() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["render", "no_such_template"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template not found: no_such_template"));
}

#[test]
fn render_bad_var_syntax_exits_2() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["render", "zero_shot_qa", "--var", "question"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

// ── chain ─────────────────────────────────────────────────────────────────────

#[test]
fn chain_from_directory() {
    let temp = TempDir::new().unwrap();
    write_chain_templates(temp.path());

    promptkit(&temp)
        .args([
            "chain",
            "extract_key_points",
            "summarize_points",
            "--dir",
            ".",
            "--var",
            "text=ML learns from data.",
        ])
        .assert()
        .success()
        .stdout("Summarize: Extract 3 key points from: ML learns from data.\n");
}

#[test]
fn chain_json_with_history() {
    let temp = TempDir::new().unwrap();
    write_chain_templates(temp.path());

    let assert = promptkit(&temp)
        .args([
            "--output-format",
            "json",
            "chain",
            "1_extract.yaml",
            "2_summarize.json",
            "--var",
            "text=abc",
            "--history",
        ])
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(doc["output"], "Summarize: Extract 3 key points from: abc");
    assert_eq!(doc["history"].as_array().unwrap().len(), 2);
    assert_eq!(doc["history"][0]["template_name"], "extract_key_points");
}

#[test]
fn chain_with_custom_output_key() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("first.yaml"),
        "name: first\ndescription: d\ntemplate: \"A {{ a }}\"\ninput_variables: [a]\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("second.yaml"),
        "name: second\ndescription: d\ntemplate: \"B {{ prev }}\"\ninput_variables: [prev]\n",
    )
    .unwrap();

    promptkit(&temp)
        .args([
            "chain",
            "first.yaml",
            "second.yaml",
            "-k",
            "prev",
            "--var",
            "a=x",
        ])
        .assert()
        .success()
        .stdout("B A x\n");
}

#[test]
fn chain_output_key_from_config_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("first.yaml"),
        "name: first\ndescription: d\ntemplate: \"A {{ a }}\"\ninput_variables: [a]\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("second.yaml"),
        "name: second\ndescription: d\ntemplate: \"B {{ prev }}\"\ninput_variables: [prev]\n",
    )
    .unwrap();
    fs::write(temp.path().join("config.toml"), "[chain]\noutput_key = \"prev\"\n").unwrap();

    promptkit(&temp)
        .args(["chain", "first.yaml", "second.yaml", "--var", "a=x"])
        .assert()
        .success()
        .stdout("B A x\n");
}

#[test]
fn chain_failure_names_step() {
    let temp = TempDir::new().unwrap();
    write_chain_templates(temp.path());

    promptkit(&temp)
        .args(["chain", "2_summarize.json", "1_extract.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Error in prompt chain at template 'summarize_points' (step 0)",
        ));
}

// ── list ──────────────────────────────────────────────────────────────────────

#[test]
fn list_plain_names() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cot_math\n"))
        .stdout(predicate::str::contains("zero_shot_qa\n"));
}

#[test]
fn list_json_includes_directory_templates() {
    let temp = TempDir::new().unwrap();
    write_chain_templates(temp.path());

    let assert = promptkit(&temp)
        .args(["list", "--dir", ".", "--format", "json"])
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let names: Vec<&str> = doc
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();

    assert_eq!(names.len(), 12);
    assert!(names.contains(&"extract_key_points"));
    assert!(names.contains(&"role_expert"));
}

#[test]
fn list_csv_header() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "name,description,input_variables,pattern\n",
        ))
        .stdout(predicate::str::contains("cot_math,"));
}

// ── validate ──────────────────────────────────────────────────────────────────

#[test]
fn validate_good_directory() {
    let temp = TempDir::new().unwrap();
    write_chain_templates(temp.path());

    promptkit(&temp)
        .args(["validate", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("extract_key_points"))
        .stdout(predicate::str::contains("2 template file(s) valid"));
}

#[test]
fn validate_bad_directory_exits_2() {
    let temp = TempDir::new().unwrap();
    write_chain_templates(temp.path());
    fs::write(
        temp.path().join("3_bad.yaml"),
        "name: bad\ndescription: \"\"\ntemplate: x\n",
    )
    .unwrap();

    promptkit(&temp)
        .args(["validate", "."])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("3_bad.yaml"))
        .stderr(predicate::str::contains("1 of 3 template file(s) are invalid"));
}

#[test]
fn validate_missing_path_exits_3() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["validate", "missing.yaml"])
        .assert()
        .code(3);
}

// ── completions / init / config ───────────────────────────────────────────────

#[test]
fn completions_bash() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("promptkit"));
}

#[test]
fn init_writes_config_then_refuses_without_force() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("conf").join("promptkit.toml");

    bare(&temp)
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success();
    assert!(config.is_file());
    fs::write(&config, "[chain]\noutput_key = \"custom\"\n").unwrap();

    bare(&temp)
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert!(fs::read_to_string(&config).unwrap().contains("custom"));

    bare(&temp)
        .arg("--config")
        .arg(&config)
        .args(["init", "--force"])
        .assert()
        .success();
    assert!(!fs::read_to_string(&config).unwrap().contains("custom"));
}

#[test]
fn config_get_output_key() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["config", "get", "chain.output_key"])
        .assert()
        .success()
        .stdout("output\n");
}

#[test]
fn config_get_unknown_key_exits_4() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .args(["config", "get", "nope.nope"])
        .assert()
        .code(4);
}

#[test]
fn environment_overrides_config() {
    let temp = TempDir::new().unwrap();
    promptkit(&temp)
        .env("PROMPTKIT_CHAIN__OUTPUT_KEY", "from_env")
        .args(["config", "get", "chain.output_key"])
        .assert()
        .success()
        .stdout("from_env\n");
}

#[test]
fn malformed_config_exits_4() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.toml"), "[chain\n").unwrap();

    promptkit(&temp)
        .args(["config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("failed to load configuration"));
}
