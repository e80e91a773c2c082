use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary directory holding the cache and shared store for one test.
struct TestEnv {
    dir: TempDir,
    remote: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let remote = dir.path().join("remote.db");
        Self { dir, remote }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Command acting as device `device`, with its own cache file.
    fn device(&self, device: &str) -> Command {
        let mut cmd = Command::cargo_bin("vigil").expect("Failed to find vigil binary");
        cmd.env("XDG_DATA_HOME", self.dir.path())
            .arg("--no-color")
            .arg("--cache-file")
            .arg(self.dir.path().join(format!("{device}-cache.db")))
            .arg("--remote-file")
            .arg(&self.remote)
            .args(["--poll-interval-ms", "50"]);
        cmd
    }

    fn vigil(&self) -> Command {
        self.device("main")
    }

    /// Creates the standard test operation and returns its ID.
    fn create_blitz(&self) -> String {
        let output = self
            .vigil()
            .args([
                "plan", "create", "Blitz", "-l", "Praça Sete", "-d", "2024-09-01", "-t", "16:00",
                "-a", "10", "-v", "2",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        extract_id_from_output(&String::from_utf8(output).expect("Invalid UTF-8"))
    }
}

fn extract_id_from_output(output: &str) -> String {
    output
        .lines()
        .find_map(|line| line.strip_prefix("Created operation with ID: "))
        .map(|id| id.trim().to_string())
        .expect("Could not find operation ID in output")
}

#[test]
fn test_cli_create_plan_success() {
    let env = TestEnv::new();

    env.vigil()
        .args([
            "plan", "create", "Blitz", "-l", "Praça Sete", "-d", "2024-09-01", "-t", "7:30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created operation with ID:"))
        .stdout(predicate::str::contains("# Blitz"))
        .stdout(predicate::str::contains("- **Schedule**: 2024-09-01 07:30"))
        .stdout(predicate::str::contains("○ Planejado"))
        .stdout(predicate::str::contains("- [ ] VT-1"))
        .stdout(predicate::str::contains("- [ ] VT-2"));
}

#[test]
fn test_cli_list_empty_plans() {
    let env = TestEnv::new();

    env.vigil()
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No operations registered."));
}

#[test]
fn test_cli_default_command_lists_plans() {
    let env = TestEnv::new();
    env.create_blitz();

    env.vigil()
        .assert()
        .success()
        .stdout(predicate::str::contains("## Blitz (○ Planejado)"))
        .stdout(predicate::str::contains("10 agents, 2 vehicles (0 checked in)"));
}

#[test]
fn test_cli_rejects_invalid_count() {
    let env = TestEnv::new();

    env.vigil()
        .args(["plan", "create", "Blitz", "-l", "Praça Sete", "-d", "2024-09-01", "-t", "16:00"])
        .args(["-v", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vehiclesCount"));

    env.vigil()
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No operations registered."));
}

#[test]
fn test_cli_rejects_invalid_date() {
    let env = TestEnv::new();

    env.vigil()
        .args(["plan", "create", "Blitz", "-l", "Praça Sete", "-d", "amanhã", "-t", "16:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("date"));
}

#[test]
fn test_cli_blitz_lifecycle() {
    let env = TestEnv::new();
    let id = env.create_blitz();

    env.vigil()
        .args(["vehicle", "toggle", &id, "VT-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VT-1 is checked in for 'Blitz' (1/2 arrived)"));

    env.vigil()
        .args(["plan", "status", &id, "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation 'Blitz' is now Em Andamento"));

    env.vigil()
        .args(["plan", "status", &id, "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Concluído"));

    env.vigil()
        .args(["vehicle", "toggle", &id, "VT-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vehicle check-in is locked"));

    env.vigil()
        .args(["plan", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Concluído"))
        .stdout(predicate::str::contains("- [x] VT-1"))
        .stdout(predicate::str::contains("- [ ] VT-2"))
        .stdout(predicate::str::contains("Check-in is closed"));
}

#[test]
fn test_cli_rejects_backward_status() {
    let env = TestEnv::new();
    let id = env.create_blitz();

    env.vigil()
        .args(["plan", "status", &id, "completed"])
        .assert()
        .success();

    env.vigil()
        .args(["plan", "status", &id, "planned"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot change status from 'Concluído' to 'Planejado'",
        ));
}

#[test]
fn test_cli_edit_resizes_vehicles() {
    let env = TestEnv::new();
    let id = env.create_blitz();

    env.vigil()
        .args(["plan", "edit", &id, "-v", "3", "--radio", "Canal 4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes made:"))
        .stdout(predicate::str::contains("- radio"))
        .stdout(predicate::str::contains("- vehiclesCount"))
        .stdout(predicate::str::contains("- [ ] VT-3"))
        .stdout(predicate::str::contains("- **Radio**: Canal 4"));
}

#[test]
fn test_cli_edit_without_changes_fails() {
    let env = TestEnv::new();
    let id = env.create_blitz();

    env.vigil().args(["plan", "edit", &id]).assert().failure();
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let env = TestEnv::new();
    let id = env.create_blitz();

    env.vigil()
        .args(["plan", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmed"));

    env.vigil()
        .args(["plan", "delete", &id, "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted operation 'Blitz'"));

    env.vigil()
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No operations registered."));
}

#[test]
fn test_cli_show_unknown_plan() {
    let env = TestEnv::new();

    env.vigil()
        .args(["plan", "show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID missing not found"));
}

#[test]
fn test_cli_report_with_demo_seed() {
    let env = TestEnv::new();

    env.vigil()
        .args(["--demo-seed", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Relatório de Atividades Operacionais"))
        .stdout(predicate::str::contains("| 3 | 1 | 2 | 0 |"))
        .stdout(predicate::str::contains("350 Agentes"));
}

#[test]
fn test_cli_official_document() {
    let env = TestEnv::new();

    env.vigil()
        .args(["--demo-seed", "document", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PLANO DE EMPREGO OPERACIONAL Nº 2024/1"))
        .stdout(predicate::str::contains("## III - RECURSOS EMPREGADOS"))
        .stdout(predicate::str::contains("- **Efetivo Total**: 150 Agentes"));
}

#[test]
fn test_cli_export_backup() {
    let env = TestEnv::new();
    let output = env.path().join("backup.json");

    env.vigil()
        .args(["--demo-seed", "export", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup written to"));

    let json = std::fs::read_to_string(&output).expect("Backup file missing");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");
    let plans = value.as_array().expect("Backup should be an array");
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[2]["status"], "Em Andamento");
    assert_eq!(plans[0]["vehiclesCount"], 15);
}

#[test]
fn test_cli_devices_share_remote() {
    let env = TestEnv::new();

    let id = env.create_blitz();

    env.device("tablet")
        .args(["plan", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Blitz"));

    env.device("tablet")
        .args(["vehicle", "toggle", &id, "VT-2"])
        .assert()
        .success();

    env.vigil()
        .args(["plan", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [x] VT-2"));
}

#[test]
fn test_cli_works_offline_when_remote_unreachable() {
    let env = TestEnv::new();
    let not_a_dir = env.path().join("share");
    std::fs::write(&not_a_dir, "plain file").expect("Failed to write file");

    let offline = || {
        let mut cmd = Command::cargo_bin("vigil").expect("Failed to find vigil binary");
        cmd.env("XDG_DATA_HOME", env.path())
            .arg("--no-color")
            .arg("--cache-file")
            .arg(env.path().join("cache.db"))
            .arg("--remote-file")
            .arg(not_a_dir.join("remote.db"));
        cmd
    };

    offline()
        .args(["plan", "create", "Blitz", "-l", "Praça Sete", "-d", "2024-09-01", "-t", "16:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created operation with ID:"))
        .stderr(predicate::str::contains("Warning: [remote] Working offline"))
        .stderr(predicate::str::contains("not synchronized"));

    offline()
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blitz"));
}
