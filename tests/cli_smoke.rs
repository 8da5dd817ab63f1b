use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn missing_config_exits_with_config_code() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("gitlab-commits").unwrap();
    cmd.current_dir(dir.path()).env_remove("GITLAB_TOKEN");
    let out = cmd.assert().code(2).get_output().stderr.clone();

    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("configuration file 'config.toml' not found"));
}

#[test]
fn malformed_config_exits_before_any_request() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[gitlab]\nurl = \"https://gitlab.invalid\"\n").unwrap();

    let mut cmd = Command::cargo_bin("gitlab-commits").unwrap();
    cmd.arg(&path).env_remove("GITLAB_TOKEN");
    let out = cmd.assert().code(2).get_output().stderr.clone();

    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("malformed"));
}

#[test]
fn bad_date_flag_is_rejected_by_cli() {
    let mut cmd = Command::cargo_bin("gitlab-commits").unwrap();
    cmd.args(&["--start", "yesterday"]).assert().failure();
}
