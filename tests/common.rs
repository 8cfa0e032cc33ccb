#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn atl() -> Command {
    cargo_bin_cmd!("attendlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_attendlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Record one verification event through the CLI.
pub fn record(db_path: &str, student_id: &str, full_name: &str, eligible: bool) {
    let flag = if eligible { "--eligible" } else { "--not-eligible" };
    atl()
        .args([
            "--db",
            db_path,
            "record",
            student_id,
            full_name,
            flag,
            "--year",
            "2024/2025",
        ])
        .assert()
        .success();
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    atl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    record(db_path, "STU001", "Ada Lovelace", true);
    record(db_path, "STU002", "Grace Hopper", false);
    record(db_path, "STU003", "Alan Turing", true);
}
