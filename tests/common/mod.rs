#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;

pub fn command() -> Command {
    Command::cargo_bin("storekeep").expect("binary exists")
}

/// Command isolated from the real home and config directories.
pub fn isolated(temp: &TempDir) -> Command {
    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.child("config").path())
        .env("XDG_CACHE_HOME", temp.child("xdg-cache").path())
        .env("XDG_DATA_HOME", temp.child("xdg-data").path())
        .env_remove("RUST_LOG");
    cmd
}

/// Write a config that points the cache and app data at directories inside `temp`.
pub fn write_config(temp: &TempDir, extra: &str) {
    let cache = temp.child("cache");
    let data = temp.child("data");
    cache.create_dir_all().unwrap();
    data.create_dir_all().unwrap();
    let contents = format!(
        "cache_dirs = [\"{}\"]\napp_dirs = [\"{}\"]\n{}",
        cache.path().display(),
        data.path().display(),
        extra
    );
    temp.child("config/storekeep/config.toml").write_str(&contents).unwrap();
}
