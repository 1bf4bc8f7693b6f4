use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;
use std::path::PathBuf;

const PROJECT: &str = "https://api.launchpad.net/1.0/juju-core";

fn setup_test_env() -> (TempDir, std::sync::MutexGuard<'static, ()>) {
    let guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let config_dir = temp_dir.path().join(".bugboard");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("rc"),
        format!("data.location={}\nboard.project={}\n", db_path.display(), PROJECT),
    )
    .unwrap();
    (temp_dir, guard)
}

fn board_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bugboard").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd.env("COLUMNS", "120");
    cmd
}

fn write_json(temp_dir: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

fn import(temp_dir: &TempDir, kind: &str, name: &str, json: &str) {
    let path = write_json(temp_dir, name, json);
    board_cmd(temp_dir)
        .args(["import", kind, path.to_str().unwrap()])
        .assert()
        .success();
}

fn seed_board(temp_dir: &TempDir) {
    import(
        temp_dir,
        "meta",
        "meta.json",
        &format!(
            r#"[{{"k": "list", "v": ["{p}"]}},
                {{"k": "details", "url": "{p}", "milestones": ["2.0", "3.0"]}}]"#,
            p = PROJECT
        ),
    );
    import(
        temp_dir,
        "bugs",
        "bugs.json",
        r#"[
            {"id": 1, "title": "Bootstrap times out", "web_link": "https://bugs/1",
             "tasks": [{"milestone": "2.0", "status": "Triaged", "importance": "High"}]},
            {"id": 2, "title": "Old upgrade crash", "web_link": "https://bugs/2",
             "tasks": [{"milestone": "2.0", "status": "Fix Released", "importance": "High"}]},
            {"id": 3, "title": "Untargeted polish", "web_link": "https://bugs/3",
             "tasks": [{"milestone": "", "status": "New", "importance": "Medium"}]}
        ]"#,
    );
}

#[test]
fn test_board_hides_released_fixes_by_default() {
    let (temp_dir, _guard) = setup_test_env();
    seed_board(&temp_dir);

    board_cmd(&temp_dir)
        .arg("board")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bootstrap times out"))
        .stdout(predicate::str::contains("Untargeted polish"))
        .stdout(predicate::str::contains("Old upgrade crash").not())
        .stdout(predicate::str::contains("2 of 3 bugs shown"));
}

#[test]
fn test_board_status_toggle_shows_released_fixes() {
    let (temp_dir, _guard) = setup_test_env();
    seed_board(&temp_dir);

    board_cmd(&temp_dir)
        .args(["board", "--status", "Fix Released"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old upgrade crash"))
        .stdout(predicate::str::contains("3 of 3 bugs shown"));
}

#[test]
fn test_board_milestone_toggle_hides_column() {
    let (temp_dir, _guard) = setup_test_env();
    seed_board(&temp_dir);

    board_cmd(&temp_dir)
        .args(["board", "--milestone", "2.0", "--milestone", "3.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bootstrap times out").not())
        .stdout(predicate::str::contains("Untargeted polish"))
        .stdout(predicate::str::contains("1 milestone column at 50.00% each"));
}

#[test]
fn test_board_json_reports_width() {
    let (temp_dir, _guard) = setup_test_env();
    seed_board(&temp_dir);

    let output = board_cmd(&temp_dir).args(["board", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["milestones"], serde_json::json!(["2.0", "3.0", "none"]));
    let width = value["milestone_width_percent"].as_f64().unwrap();
    assert!((width - 50.0 / 3.0).abs() < 1e-9);
    assert_eq!(value["bugs"].as_array().unwrap().len(), 2);
}

#[test]
fn test_unknown_milestone_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();
    seed_board(&temp_dir);

    board_cmd(&temp_dir)
        .args(["board", "--milestone", "9.9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown milestone '9.9'"));
}

#[test]
fn test_milestones_lists_catalog_with_flags() {
    let (temp_dir, _guard) = setup_test_env();
    seed_board(&temp_dir);

    board_cmd(&temp_dir)
        .args(["milestones", "--milestone", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]  0  2.0"))
        .stdout(predicate::str::contains("[ ]  2  none"))
        .stdout(predicate::str::contains("Column width: 25.00%"));
}

#[test]
fn test_board_without_metadata_has_only_none_column() {
    let (temp_dir, _guard) = setup_test_env();

    board_cmd(&temp_dir)
        .arg("milestones")
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]  0  none"))
        .stdout(predicate::str::contains("Column width: 50.00%"));
}

#[test]
fn test_mine_lists_assigned_cards() {
    let (temp_dir, _guard) = setup_test_env();
    import(
        &temp_dir,
        "cards",
        "cards.json",
        r#"[
            {"Board": true, "Title": "Core board", "AssignedUsers": [{"AssignedUserName": "Jane Doe"}]},
            {"Title": "Write release notes", "LaneTitle": "Doing", "BoardTitle": "Core",
             "AssignedUsers": [{"AssignedUserName": "Jane Doe"}]},
            {"Title": "Someone else's card", "LaneTitle": "Ready", "BoardTitle": "Core",
             "AssignedUsers": [{"AssignedUserName": "Jane Doe Jr"}]}
        ]"#,
    );

    board_cmd(&temp_dir)
        .args(["mine", "--name", "Jane Doe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write release notes"))
        .stdout(predicate::str::contains("Someone else's card").not())
        .stdout(predicate::str::contains("Core board").not());
}

#[test]
fn test_mine_without_name_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();

    board_cmd(&temp_dir)
        .arg("mine")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No name given"));
}

#[test]
fn test_ping_increments_revision() {
    let (temp_dir, _guard) = setup_test_env();

    board_cmd(&temp_dir).arg("ping").assert().success().stdout(predicate::str::contains("Revision 1"));
    board_cmd(&temp_dir).arg("ping").assert().success().stdout(predicate::str::contains("Revision 2"));
    board_cmd(&temp_dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current revision: 2"))
        .stdout(predicate::str::contains("Nothing imported yet"));
}

#[test]
fn test_import_rejects_malformed_json() {
    let (temp_dir, _guard) = setup_test_env();
    let path = write_json(&temp_dir, "bad.json", "{not json");

    board_cmd(&temp_dir)
        .args(["import", "bugs", path.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_status_reports_last_import() {
    let (temp_dir, _guard) = setup_test_env();
    seed_board(&temp_dir);

    board_cmd(&temp_dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Revision 2: 3 bugs imported"));
}
