use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("postboard")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("posts"));
}

#[test]
fn test_posts_help_shows_subcommands() {
    cargo_bin_cmd!("postboard")
        .args(["posts", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_delete_requires_numeric_id() {
    cargo_bin_cmd!("postboard")
        .args(["posts", "delete", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
