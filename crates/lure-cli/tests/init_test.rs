use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn lure(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lure"));
    cmd.current_dir(dir)
        .env_remove("LURE_ORG_CONFIG")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn init_writes_loadable_default_config() {
    let dir = tempfile::tempdir().unwrap();

    lure(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(dir.path().join("lure.toml")).unwrap();
    assert!(content.contains("[heuristics]"));
    assert!(content.contains("entropy_threshold"));

    lure(dir.path()).args(["config", "check"]).assert().success();
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lure.toml");
    fs::write(&path, "# mine\n").unwrap();

    lure(dir.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

    lure(dir.path()).args(["init", "--force"]).assert().success();
    assert!(fs::read_to_string(&path).unwrap().contains("[heuristics]"));
}
