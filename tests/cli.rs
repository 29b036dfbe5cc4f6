use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

/// Isolated data root with an empty config file.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("test-config.toml"), "").unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sklog").unwrap();
        cmd.current_dir(self.root())
            .env("SKLOG_ROOT", self.root().join("data"))
            .env("SKLOG_CONFIG", self.root().join("test-config.toml"))
            .env_remove("SKLOG_ROBOT")
            .env_remove("SKLOG_ROBOT_FORMAT")
            .env_remove("SKLOG_DEFAULT_SORT")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run with `--robot` and return the `data` of the envelope.
    fn robot(&self, args: &[&str]) -> Value {
        let output = self.cmd().arg("--robot").args(args).output().unwrap();
        assert!(
            output.status.success(),
            "sklog {args:?} failed: {}",
            String::from_utf8_lossy(&output.stdout)
        );
        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["status"], "ok");
        json["data"].clone()
    }

    /// Run with `--robot`, expect failure, return the error object.
    fn robot_error(&self, args: &[&str]) -> Value {
        let output = self.cmd().arg("--robot").args(args).output().unwrap();
        assert!(!output.status.success(), "sklog {args:?} unexpectedly succeeded");
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("sklog").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("sklog").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_creates_store_and_config() {
    let sandbox = Sandbox::new();
    let data = sandbox.robot(&["init"]);
    assert_eq!(data["created"], Value::Bool(true));
    assert!(sandbox.root().join("data/store").is_dir());
    assert!(sandbox.root().join("data/config.toml").is_file());

    let again = sandbox.robot(&["init"]);
    assert_eq!(again["created"], Value::Bool(false));
}

#[test]
fn test_add_then_list() {
    let sandbox = Sandbox::new();
    let added = sandbox.robot(&["add", "Rust", "--level", "advanced", "--category", "Backend"]);
    assert_eq!(added["name"], "Rust");
    assert_eq!(added["level"], "Advanced");
    assert_eq!(added["confidence"], 3);
    assert_eq!(added["practiceTime"], 0);

    sandbox.robot(&["add", "Go"]);

    let listed = sandbox.robot(&["list", "--sort", "name-asc"]);
    assert_eq!(listed["count"], 2);
    let names: Vec<&str> = listed["skills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Go", "Rust"]);

    let filtered = sandbox.robot(&["list", "--level", "beginner"]);
    assert_eq!(filtered["count"], 1);
    assert_eq!(filtered["total"], 2);
}

#[test]
fn test_add_rejects_blank_name() {
    let sandbox = Sandbox::new();
    let error = sandbox.robot_error(&["add", "   "]);
    assert_eq!(error["error"], Value::Bool(true));
    assert_eq!(error["code"], "validation_failed");
}

#[test]
fn test_promote_stops_at_advanced() {
    let sandbox = Sandbox::new();
    sandbox.robot(&["add", "Docker", "--level", "intermediate"]);

    let first = sandbox.robot(&["promote", "docker"]);
    assert_eq!(first["promoted"], Value::Bool(true));
    assert_eq!(first["skill"]["level"], "Advanced");

    let second = sandbox.robot(&["promote", "Docker"]);
    assert_eq!(second["promoted"], Value::Bool(false));
    assert_eq!(second["skill"]["level"], "Advanced");
}

#[test]
fn test_unknown_skill_reference() {
    let sandbox = Sandbox::new();
    let error = sandbox.robot_error(&["promote", "Haskell"]);
    assert_eq!(error["code"], "skill_not_found");

    sandbox
        .cmd()
        .args(["promote", "Haskell"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_gap_analysis_and_add_missing() {
    let sandbox = Sandbox::new();
    sandbox.robot(&["add", "React"]);

    let report = sandbox.robot(&["gap", "--text", "We need React and Docker experience"]);
    assert_eq!(report["found"], serde_json::json!(["React"]));
    assert_eq!(report["missing"], serde_json::json!(["Docker"]));
    assert_eq!(report["match_percent"], 50);
    assert_eq!(report["added"], serde_json::json!([]));

    let with_add = sandbox.robot(&[
        "gap",
        "--text",
        "We need React and Docker experience",
        "--add-missing",
    ]);
    assert_eq!(with_add["added"][0]["name"], "Docker");
    assert_eq!(with_add["added"][0]["level"], "Beginner");

    let listed = sandbox.robot(&["list"]);
    assert_eq!(listed["count"], 2);
}

#[test]
fn test_gap_requires_text() {
    let sandbox = Sandbox::new();
    let error = sandbox.robot_error(&["gap", "--text", "   "]);
    assert_eq!(error["code"], "validation_failed");
}

#[test]
fn test_import_template() {
    let sandbox = Sandbox::new();
    let data = sandbox.robot(&["import", "--template", "mern"]);
    assert_eq!(data["source"], "template:mern");
    let imported = data["imported"].as_array().unwrap();
    assert!(!imported.is_empty());

    let created: Vec<&str> = imported
        .iter()
        .map(|s| s["createdAt"].as_str().unwrap())
        .collect();
    assert!(created.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_import_file() {
    let sandbox = Sandbox::new();
    let file = sandbox.root().join("skills.json");
    std::fs::write(
        &file,
        r#"[{"name": "Kubernetes", "level": "Intermediate"}, {"name": "Terraform"}]"#,
    )
    .unwrap();

    let data = sandbox.robot(&["import", file.to_str().unwrap()]);
    let imported = data["imported"].as_array().unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[1]["level"], "Beginner");
}

#[test]
fn test_import_unknown_template() {
    let sandbox = Sandbox::new();
    let error = sandbox.robot_error(&["import", "--template", "astronaut"]);
    assert_eq!(error["code"], "validation_failed");
}

#[test]
fn test_delete_requires_confirmation_in_robot_mode() {
    let sandbox = Sandbox::new();
    sandbox.robot(&["add", "Rust"]);

    let error = sandbox.robot_error(&["delete", "Rust"]);
    assert_eq!(error["code"], "cancelled");

    let deleted = sandbox.robot(&["delete", "Rust", "--yes"]);
    assert_eq!(deleted["name"], "Rust");
    assert_eq!(sandbox.robot(&["list"])["count"], 0);
}

#[test]
fn test_practice_minutes_accumulate() {
    let sandbox = Sandbox::new();
    sandbox.robot(&["add", "Rust"]);
    sandbox.robot(&["practice", "Rust", "--minutes", "25"]);
    let data = sandbox.robot(&["practice", "Rust", "--minutes", "10"]);
    assert_eq!(data["logged_minutes"], 10);
    assert_eq!(data["skill"]["practiceTime"], 35);
    assert!(data["skill"]["lastPracticed"].is_string());
}

#[test]
fn test_confidence_out_of_range() {
    let sandbox = Sandbox::new();
    sandbox.robot(&["add", "Rust"]);
    let error = sandbox.robot_error(&["confidence", "Rust", "9"]);
    assert_eq!(error["code"], "validation_failed");

    let data = sandbox.robot(&["confidence", "Rust", "5"]);
    assert_eq!(data["confidence"], 5);
}

#[test]
fn test_sub_records_round_trip() {
    let sandbox = Sandbox::new();
    sandbox.robot(&["add", "Rust"]);

    let with_resource = sandbox.robot(&[
        "resource",
        "add",
        "Rust",
        "The Book",
        "https://doc.rust-lang.org/book/",
        "--type",
        "book",
    ]);
    assert_eq!(with_resource["resources"][0]["type"], "book");

    sandbox.robot(&["journal", "add", "Rust", "Learned lifetimes"]);
    let with_cert = sandbox.robot(&[
        "cert", "add", "Rust", "Rustacean", "--issuer", "Ferris", "--expires", "2030-01-01",
    ]);
    assert_eq!(with_cert["certificates"][0]["expiryDate"], "2030-01-01");

    let shown = sandbox.robot(&["show", "Rust"]);
    assert_eq!(shown["skill"]["journal"][0]["text"], "Learned lifetimes");

    let removed = sandbox.robot(&["resource", "remove", "Rust", "1"]);
    assert_eq!(removed["resources"], serde_json::json!([]));
}

#[test]
fn test_stats_and_heatmap() {
    let sandbox = Sandbox::new();
    sandbox.robot(&["add", "Rust", "--level", "advanced"]);
    sandbox.robot(&["add", "Go"]);

    let stats = sandbox.robot(&["stats"]);
    assert_eq!(stats["levels"]["total"], 2);
    assert_eq!(stats["levels"]["advanced"], 1);
    assert_eq!(stats["streak"], 1);
    assert_eq!(stats["recent"].as_array().unwrap().len(), 2);

    let heatmap = sandbox.robot(&["heatmap"]);
    let days: usize = heatmap["weeks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|week| week.as_array().unwrap().len())
        .sum();
    assert_eq!(days, 365);
}

#[test]
fn test_categories_and_settings() {
    let sandbox = Sandbox::new();
    let added = sandbox.robot(&["category", "add", "Robotics"]);
    assert_eq!(added["added"], Value::Bool(true));
    let again = sandbox.robot(&["category", "add", "Robotics"]);
    assert_eq!(again["added"], Value::Bool(false));

    let settings = sandbox.robot(&["settings", "dark-mode", "on"]);
    assert_eq!(settings["dark_mode"], Value::Bool(true));
    assert_eq!(sandbox.robot(&["settings"])["dark_mode"], Value::Bool(true));
}

#[test]
fn test_challenges_complete_awards_once() {
    let sandbox = Sandbox::new();
    let board = sandbox.robot(&["challenges"]);
    assert_eq!(board["challenges"].as_array().unwrap().len(), 3);

    let first = sandbox.robot(&["challenges", "complete", "1"]);
    let awarded = first["awarded"].as_u64().unwrap();
    assert!(awarded > 0);
    assert_eq!(first["total_points"].as_u64().unwrap(), awarded);

    let second = sandbox.robot(&["challenges", "complete", "1"]);
    assert_eq!(second["awarded"], 0);
    assert_eq!(second["total_points"].as_u64().unwrap(), awarded);
}

#[test]
fn test_plain_list_output() {
    let sandbox = Sandbox::new();
    sandbox.robot(&["add", "Rust"]);
    sandbox
        .cmd()
        .args(["--format", "plain", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust\tBeginner"));
}
