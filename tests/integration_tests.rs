//! Integration tests for the hrdesk CLI
//!
//! Commands run against the in-process fake backend from `common`.

mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch directory holding hrdesk.toml and the session cache.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let sandbox = Self { dir };
        let config = format!(
            "[api]\ntimeout_secs = 5\n\n[session]\ncache_file = \"{}\"\n",
            sandbox.session_file().display()
        );
        fs::write(sandbox.config_file(), config).unwrap();
        sandbox
    }

    fn config_file(&self) -> PathBuf {
        self.dir.path().join("hrdesk.toml")
    }

    fn session_file(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    fn sign_in(&self) {
        let session = serde_json::json!({
            "user": { "id": 1, "name": "Ada Lovelace", "email": "ada@example.com", "role": "admin" },
            "cookie": common::SESSION_COOKIE,
            "saved_at": "2024-03-01T00:00:00Z"
        });
        fs::write(self.session_file(), session.to_string()).unwrap();
    }

    /// hrdesk with this sandbox's config, isolated from the caller's env.
    fn hrdesk(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("hrdesk");
        cmd.current_dir(self.dir.path())
            .env_remove("HRDESK_API_URL")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_file());
        cmd
    }

    fn against(&self, base_url: &str) -> Command {
        let mut cmd = self.hrdesk();
        cmd.arg("--api-url").arg(base_url);
        cmd
    }
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_hrdesk_help() {
        cargo_bin_cmd!("hrdesk")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("create-task"))
            .stdout(predicate::str::contains("calendar"));
    }

    #[test]
    fn test_hrdesk_version() {
        cargo_bin_cmd!("hrdesk")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_unknown_sort_field_is_rejected_by_clap() {
        cargo_bin_cmd!("hrdesk")
            .args(["tasks", "--sort", "priority"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid task sort field"));
    }

    #[test]
    fn test_out_of_range_month_is_rejected_by_clap() {
        cargo_bin_cmd!("hrdesk")
            .args(["calendar", "--month", "262142-12"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("year must be 1..=9999"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_show_layers_cli_over_file() {
        let sandbox = Sandbox::new();
        sandbox
            .hrdesk()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("base_url = \"http://localhost:5000/api\""))
            .stdout(predicate::str::contains("timeout_secs = 5"))
            .stdout(predicate::str::contains("debounce_ms = 350"));

        sandbox
            .hrdesk()
            .args(["--api-url", "https://hr.example.com/api/", "config"])
            .assert()
            .success()
            .stdout(predicate::str::contains("base_url = \"https://hr.example.com/api\""));
    }

    #[test]
    fn test_env_var_overrides_file() {
        let sandbox = Sandbox::new();
        sandbox
            .hrdesk()
            .env("HRDESK_API_URL", "http://env.example:8080/api")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("base_url = \"http://env.example:8080/api\""));
    }

    #[test]
    fn test_config_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("hrdesk.toml");

        cargo_bin_cmd!("hrdesk")
            .current_dir(dir.path())
            .arg("--config")
            .arg(&path)
            .args(["config", "init"])
            .assert()
            .success();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("debounce_ms = 350"));

        cargo_bin_cmd!("hrdesk")
            .current_dir(dir.path())
            .arg("--config")
            .arg(&path)
            .args(["config", "init"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn test_invalid_api_url() {
        let sandbox = Sandbox::new();
        sandbox
            .hrdesk()
            .args(["--api-url", "localhost:5000", "dashboard"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected http:// or https://"));
    }
}

// =============================================================================
// Forms
// =============================================================================

mod forms {
    use super::*;

    #[test]
    fn test_create_task_reports_every_missing_field() {
        let sandbox = Sandbox::new();
        sandbox
            .against("http://127.0.0.1:9/api")
            .args(["create-task", "--title", "  "])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Missing required fields: title, board, status group",
            ));
    }

    #[test]
    fn test_create_task_end_before_start() {
        let sandbox = Sandbox::new();
        sandbox
            .against("http://127.0.0.1:9/api")
            .args([
                "create-task", "--board", "1", "--group", "10", "--title", "x", "--start",
                "2024-03-05", "--end", "2024-03-01",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("is before start date"));
    }

    #[test]
    fn test_create_document() {
        let base = common::spawn_backend();
        let sandbox = Sandbox::new();
        sandbox
            .against(&base)
            .args(["create-document", "--title", "Handbook", "--file", "uploads/handbook.pdf"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created document #30 Handbook"));
    }
}

// =============================================================================
// Views against the fake backend
// =============================================================================

mod views {
    use super::*;

    #[test]
    fn test_tasks_grouped_by_status() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .args(["tasks", "--group", "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Stuck (1)"))
            .stdout(predicate::str::contains("Done (1)"))
            .stdout(predicate::str::contains("Working").not());
    }

    #[test]
    fn test_tasks_json_with_status_filter() {
        let base = common::spawn_backend();
        let output = Sandbox::new()
            .against(&base)
            .args(["--json", "tasks", "--status", "stuck"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let groups: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let items = groups[0]["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Screen candidates");
    }

    #[test]
    fn test_documents_list() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .args(["documents", "--group"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Leave policy"))
            .stdout(predicate::str::contains("Onboarding checklist"));
    }

    #[test]
    fn test_employees_list_shows_pagination() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .args(["employees", "--search", "ada"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Ada Lovelace"))
            .stdout(predicate::str::contains("Grace Hopper").not())
            .stdout(predicate::str::contains("page 1/1"));
    }

    #[test]
    fn test_attendance_merges_months() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .args(["attendance", "--months", "2024-01,2024-02"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 records: 1 on time, 1 late, 0 absent"));
    }

    #[test]
    fn test_calendar_month() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .args(["calendar", "--month", "2024-03"])
            .assert()
            .success()
            .stdout(predicate::str::contains("March 2024"))
            .stdout(predicate::str::contains("04·1"));
    }

    #[test]
    fn test_calendar_week() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .args(["calendar", "--week", "2024-03-06"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Week of 2024-03-04 to 2024-03-10"))
            .stdout(predicate::str::contains("Mon 04  1 (stuck 1)"))
            .stdout(predicate::str::contains("Sun 10  1 (completed 1)"));
    }

    #[test]
    fn test_board_columns_in_position_order() {
        let base = common::spawn_backend();
        let output = Sandbox::new()
            .against(&base)
            .args(["board", "1"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        let doing = stdout.find("Doing").unwrap();
        let done = stdout.find("Done").unwrap();
        let blocked = stdout.find("Blocked").unwrap();
        assert!(doing < done && done < blocked);
    }
}

// =============================================================================
// Session and moves
// =============================================================================

mod session {
    use super::*;

    #[test]
    fn test_whoami_without_session() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not signed in"));
    }

    #[test]
    fn test_whoami_with_cached_session() {
        let base = common::spawn_backend();
        let sandbox = Sandbox::new();
        sandbox.sign_in();
        sandbox
            .against(&base)
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("Ada Lovelace"));
    }

    #[test]
    fn test_protected_endpoint_hints_login() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .arg("dashboard")
            .assert()
            .failure()
            .stderr(predicate::str::contains("hrdesk login"))
            .stderr(predicate::str::contains("Not authenticated"));
    }

    #[test]
    fn test_dashboard_with_session() {
        let base = common::spawn_backend();
        let sandbox = Sandbox::new();
        sandbox.sign_in();
        sandbox
            .against(&base)
            .arg("dashboard")
            .assert()
            .success()
            .stdout(predicate::str::contains("Employees"));
    }

    #[test]
    fn test_logout_clears_cache() {
        let base = common::spawn_backend();
        let sandbox = Sandbox::new();
        sandbox.sign_in();
        sandbox.against(&base).arg("logout").assert().success();
        assert!(!sandbox.session_file().exists());
    }

    #[test]
    fn test_move_task_between_columns() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .args(["move", "1", "11"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Moved #1 Screen candidates"))
            .stdout(predicate::str::contains("Done"));
    }

    #[test]
    fn test_rejected_move_reports_backend_message() {
        let base = common::spawn_backend();
        Sandbox::new()
            .against(&base)
            .args(["move", "1", "12", "--board", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Database unavailable"));
    }
}
