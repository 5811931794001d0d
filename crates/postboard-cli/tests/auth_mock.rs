//! Integration tests for login/logout/whoami against a mock backend.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "session-token-0123456789abcdef";

async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    server
}

fn seed_session(home: &Path, token: &str) {
    fs::write(home.join("session.json"), json!({ "token": token }).to_string()).unwrap();
}

#[tokio::test]
async fn test_login_stores_token() {
    let server = mock_backend().await;
    let temp = tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "jane@mail.com", "password": "secret pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": TOKEN,
            "user": { "id": 1, "name": "Jane" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .env("POSTBOARD_BASE_URL", server.uri())
        .args(["login", "--email", "jane@mail.com"])
        .write_stdin("secret pw\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Jane"))
        .stdout(predicate::str::contains(TOKEN).not());

    let contents = fs::read_to_string(temp.path().join("session.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(stored, json!({ "token": TOKEN }));
}

#[tokio::test]
async fn test_login_failure_reports_backend_message() {
    let server = mock_backend().await;
    let temp = tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "msg": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .env("POSTBOARD_BASE_URL", server.uri())
        .args(["login", "--email", "jane@mail.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!temp.path().join("session.json").exists());
}

#[tokio::test]
async fn test_register_does_not_log_in() {
    let server = mock_backend().await;
    let temp = tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({ "name": "Jane", "email": "jane@mail.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .env("POSTBOARD_BASE_URL", server.uri())
        .args(["register", "--name", "Jane", "--email", "jane@mail.com", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created"));

    assert!(!temp.path().join("session.json").exists());
}

#[tokio::test]
async fn test_whoami_with_valid_session() {
    let server = mock_backend().await;
    let temp = tempdir().unwrap();
    seed_session(temp.path(), TOKEN);
    Mock::given(method("GET"))
        .and(path("/session"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 7, "email": "jane@mail.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .env("POSTBOARD_BASE_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("jane@mail.com"))
        .stdout(predicate::str::contains("User id: 7"));
}

#[tokio::test]
async fn test_whoami_with_rejected_session_keeps_token() {
    let server = mock_backend().await;
    let temp = tempdir().unwrap();
    seed_session(temp.path(), TOKEN);
    Mock::given(method("GET"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .env("POSTBOARD_BASE_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("no longer valid"));

    assert!(temp.path().join("session.json").exists());
}

#[tokio::test]
async fn test_whoami_without_session_skips_backend_check() {
    let server = mock_backend().await;
    let temp = tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .env("POSTBOARD_BASE_URL", server.uri())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_logout_clears_session_and_is_idempotent() {
    let temp = tempdir().unwrap();
    seed_session(temp.path(), TOKEN);

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!temp.path().join("session.json").exists());

    cargo_bin_cmd!("postboard")
        .env("POSTBOARD_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}
