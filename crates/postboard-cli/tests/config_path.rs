use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_uses_postboard_home() {
    let temp = tempdir().unwrap();
    let expected = temp.path().join("config.toml");

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy()));
}

#[test]
fn test_config_init_writes_template_once() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.toml");

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url"));

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_invalid_base_url_is_reported() {
    let temp = tempdir().unwrap();

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .env("POSTBOARD_BASE_URL", "not a url")
        .args(["posts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid backend base URL"));
}
