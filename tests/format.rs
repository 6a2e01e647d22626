mod common;

use common::command;

#[test]
fn format_picks_binary_tier() {
    for (bytes, expected) in [
        ("0", "0 B"),
        ("1023", "1023 B"),
        ("1024", "1.0 KB"),
        ("1536", "1.5 KB"),
        ("1048576", "1.0 MB"),
        ("1073741824", "1.0 GB"),
    ] {
        command()
            .arg("format")
            .arg(bytes)
            .assert()
            .success()
            .stdout(format!("{expected}\n"));
    }
}

#[test]
fn format_gb_flag_forces_gigabytes() {
    command()
        .arg("format")
        .arg("536870912")
        .arg("--gb")
        .assert()
        .success()
        .stdout("0.5 GB\n");
}

#[test]
fn format_rejects_negative_counts() {
    command().arg("format").arg("--").arg("-1").assert().failure();
}

#[test]
fn version_flag_works() {
    command().arg("--version").assert().success();
}
