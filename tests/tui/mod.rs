//! Headless runs of the skirmish binary.

mod headless_test;

use std::process::Command;

/// Runs the binary in headless mode with a default config.
/// Returns (exit code, stdout, stderr).
pub fn run_headless(args: &[&str]) -> (i32, String, String) {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("config.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_skirmish"))
        .arg("--headless")
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute skirmish");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}
