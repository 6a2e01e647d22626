mod common;

use assert_fs::prelude::*;
use common::{isolated, write_config};
use predicates::prelude::*;

#[test]
fn usage_prints_gigabyte_summary() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_config(&temp, "");
    temp.child("data/db.sqlite").write_binary(&[0u8; 2048]).unwrap();

    isolated(&temp)
        .arg("usage")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Storage usage for"))
        .stdout(predicate::str::is_match(r"\d+\.\d GB used").unwrap())
        .stdout(predicate::str::is_match(r"\d+\.\d GB free").unwrap())
        .stdout(predicate::str::contains("# App data: 2.0 KB"));
}

#[test]
fn usage_json_keeps_invariants() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_config(&temp, "");
    temp.child("data/a.bin").write_binary(&[0u8; 100]).unwrap();
    temp.child("cache/b.bin").write_binary(&[0u8; 50]).unwrap();

    let assert = isolated(&temp).arg("us").arg("--json").arg(temp.path()).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let total = value["total"].as_u64().unwrap();
    let used = value["used"].as_u64().unwrap();
    let free = value["free"].as_u64().unwrap();
    let app = value["app"].as_u64().unwrap();
    let other = value["other"].as_u64().unwrap();
    assert_eq!(used + free, total);
    assert_eq!(app + other, used);
    assert_eq!(app, 150);
}

#[test]
fn usage_missing_path_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    isolated(&temp)
        .arg("usage")
        .arg(temp.child("missing").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Path does not exist"));
}
