//! End-to-end headless scripts.

use super::run_headless;

#[test]
fn test_headless_basic_execution() {
    let (code, stdout, _) = run_headless(&["--events", "key:esc"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Skirmish"));
    assert!(stdout.contains("Gold: 500"));
}

#[test]
fn test_headless_console_command() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "key:f1,type:add_gold 100,key:enter,assert:state:gold=600",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0, "stdout: {stdout}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(parsed["state"]["gold"], 600);
    assert_eq!(parsed["state"]["input_text"], "");
    assert_eq!(parsed["assertions"]["failed"], 0);
}

#[test]
fn test_headless_open_console_flag() {
    let (code, _, _) = run_headless(&[
        "--open-console",
        "--events",
        "type:?,key:enter,assert:state:display=show_help",
    ]);
    assert_eq!(code, 0);
}

#[test]
fn test_headless_failed_assertion_exit_code() {
    let (code, _, _) = run_headless(&["--events", "assert:state:gold=1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_headless_script_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let script = dir.path().join("script.txt");
    std::fs::write(
        &script,
        "# open the console and spawn\nkey:f1\ncmd:spawn_units soldier 2\nassert:state:unit_count=3\n",
    )
    .expect("write script");

    let (code, stdout, _) = run_headless(&["--script", script.to_str().expect("utf-8 path")]);
    assert_eq!(code, 0, "stdout: {stdout}");
}

#[test]
fn test_headless_requires_events() {
    let (code, _, stderr) = run_headless(&[]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--headless requires --events or --script"));
}
