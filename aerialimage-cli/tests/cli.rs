//! Command-line behavior that does not need network access.
//!
//! Each test runs the binary in a temporary working directory so the log
//! directory it creates does not leak into the source tree.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aerialimage"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    let output = run_cli(temp.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_area_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let output = run_cli(temp.path(), &[]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_meters_without_center_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let output = run_cli(
        temp.path(),
        &["41.89", "-87.61", "41.88", "-87.59", "--meters"],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--center"));
    assert!(!temp.path().join("logs").exists());
}

#[test]
fn test_invalid_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.ini");
    fs::write(&config, "[download]\nparallel_downloads = many\n").unwrap();

    let output = run_cli(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "41.893812",
            "-87.615195",
            "41.885108",
            "-87.597778",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}

#[test]
fn test_image_too_large_before_any_download() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("missing.ini");

    let output = run_cli(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "--max-pixels",
            "100",
            "85",
            "-180",
            "-85",
            "180",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("No zoom level keeps the image within 100 pixels"));
    assert!(err.contains("--max-pixels"));
    assert!(temp.path().join("logs").join("aerialimage.log").exists());
}

#[test]
fn test_degenerate_box_rejected() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("missing.ini");

    let output = run_cli(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "41.89",
            "-87.61",
            "41.89",
            "-87.59",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid input"));
}
