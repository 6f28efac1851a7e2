//! Integration tests for login, logout, whoami and route.
//!
//! Each test gets its own PHONEGATE_HOME and points `profile_url` at a
//! local mock of the profile service.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Creates a temp PHONEGATE_HOME whose config points at `profile_url`.
fn temp_home(profile_url: &str) -> TempDir {
    let home = TempDir::new().expect("create temp phonegate home");
    fs::write(
        home.path().join("config.toml"),
        format!("profile_url = \"{profile_url}\"\nrequest_timeout_secs = 10\n"),
    )
    .unwrap();
    home
}

fn phonegate(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("phonegate");
    cmd.env("PHONEGATE_HOME", home).env_remove("PHONEGATE_LOG");
    cmd
}

fn stored_session(home: &Path) -> Option<Value> {
    let raw = fs::read_to_string(home.join("storage.json")).ok()?;
    let entries: Value = serde_json::from_str(&raw).ok()?;
    let user_data = entries.get("userData")?.as_str()?;
    serde_json::from_str(user_data).ok()
}

fn profile_body() -> Value {
    json!({
        "results": [{
            "name": { "title": "Mr", "first": "Arash", "last": "Kamali" },
            "email": "arash.kamali@example.com",
            "picture": { "large": "https://randomuser.me/api/portraits/men/7.jpg" }
        }],
        "info": { "results": 1 }
    })
}

async fn mock_service(body: Value, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("results", "1"))
        .and(query_param("nat", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_login_whoami_route_logout() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = mock_service(profile_body(), 1).await;
    let home = temp_home(&format!("{}/api/", server.uri()));

    phonegate(home.path())
        .args(["login", "--phone", "09123456789"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Logged in as Arash Kamali arash.kamali@example.com",
        ));

    let session = stored_session(home.path()).expect("session stored");
    assert_eq!(session["name"]["first"], "Arash");
    assert_eq!(
        session["picture"]["large"],
        "https://randomuser.me/api/portraits/men/7.jpg"
    );

    phonegate(home.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Arash Kamali"))
        .stdout(predicate::str::contains("arash.kamali@example.com"));

    phonegate(home.path())
        .arg("route")
        .assert()
        .success()
        .stdout(predicate::str::contains("/dashboard"));

    phonegate(home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert!(stored_session(home.path()).is_none());

    phonegate(home.path())
        .arg("route")
        .assert()
        .success()
        .stdout(predicate::str::contains("/auth"));
}

#[tokio::test]
async fn test_invalid_phone_makes_no_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = mock_service(profile_body(), 0).await;
    let home = temp_home(&format!("{}/api/", server.uri()));

    phonegate(home.path())
        .args(["login", "--phone", "0912345678"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter a valid Iranian phone number (e.g., 09123456789)",
        ));

    phonegate(home.path())
        .args(["login", "--phone", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Phone number is required"));

    assert!(stored_session(home.path()).is_none());
}

#[tokio::test]
async fn test_empty_results_leave_session_unchanged() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = mock_service(json!({ "results": [] }), 1).await;
    let home = temp_home(&format!("{}/api/", server.uri()));

    phonegate(home.path())
        .args(["login", "--phone", "09123456789"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to fetch user data. Please try again.",
        ));

    assert!(stored_session(home.path()).is_none());
}

#[test]
fn test_unreachable_service_is_network_error() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let home = temp_home("http://127.0.0.1:9/api/");

    phonegate(home.path())
        .args(["login", "--phone", "09123456789"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Network error. Please check your connection and try again.",
        ));
}

#[test]
fn test_whoami_without_session_fails() {
    let home = temp_home("https://randomuser.me/api/");

    phonegate(home.path())
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_whoami_clears_corrupt_session() {
    let home = temp_home("https://randomuser.me/api/");
    fs::write(
        home.path().join("storage.json"),
        r#"{"userData": "{not json", "theme": "dark"}"#,
    )
    .unwrap();

    phonegate(home.path())
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    let raw = fs::read_to_string(home.path().join("storage.json")).unwrap();
    let entries: Value = serde_json::from_str(&raw).unwrap();
    assert!(entries.get("userData").is_none());
    assert_eq!(entries["theme"], "dark");
}

#[test]
fn test_logout_without_session_succeeds() {
    let home = temp_home("https://randomuser.me/api/");

    phonegate(home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
}

#[test]
fn test_session_commands_ignore_broken_config() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "profile_url = \"not a url\"\n").unwrap();
    fs::write(
        home.path().join("storage.json"),
        r#"{"userData": "{not json"}"#,
    )
    .unwrap();

    phonegate(home.path())
        .arg("route")
        .assert()
        .success()
        .stdout(predicate::str::contains("/auth"));

    phonegate(home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    phonegate(home.path())
        .arg("login")
        .args(["--phone", "09123456789"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile_url"));
}

#[test]
fn test_route_clears_corrupt_session() {
    let home = temp_home("https://randomuser.me/api/");
    fs::write(
        home.path().join("storage.json"),
        r#"{"userData": "{not json", "theme": "dark"}"#,
    )
    .unwrap();

    phonegate(home.path())
        .arg("route")
        .assert()
        .success()
        .stdout(predicate::str::contains("/auth"));

    let raw = fs::read_to_string(home.path().join("storage.json")).unwrap();
    let entries: Value = serde_json::from_str(&raw).unwrap();
    assert!(entries.get("userData").is_none());
    assert_eq!(entries["theme"], "dark");
}
