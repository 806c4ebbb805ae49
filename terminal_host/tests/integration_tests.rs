//! Integration tests for the host runtime
//!
//! These drive the full stack (bootstrap, interpreter, presentation) with
//! input scripts and inspect the written output and saved snapshots.

use std::fs;
use terminal_host::{HostRuntime, HostRuntimeConfig, InputScript};

fn run_script(config: HostRuntimeConfig, script: &str) -> (HostRuntime<Vec<u8>>, String) {
    let mut runtime = HostRuntime::new(config, Vec::new()).unwrap();
    let mut script = InputScript::from_text(script).unwrap();
    runtime.run(&mut script).unwrap();
    let output = String::from_utf8(runtime.output().clone()).unwrap();
    (runtime, output)
}

fn plain_config() -> HostRuntimeConfig {
    HostRuntimeConfig {
        color_output: false,
        ..HostRuntimeConfig::default()
    }
}

#[test]
fn test_save_writes_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("save.json");
    let config = HostRuntimeConfig {
        save_path: save_path.clone(),
        color_output: false,
    };

    let (_, output) = run_script(config, "md projects\ncd projects\ncolor red\nsave\nexit");
    assert!(output.contains("Progress saved.\n"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&save_path).unwrap()).unwrap();
    assert_eq!(json["current_directory"], "/users/user/home/projects");
    assert_eq!(json["color"], "red");
    assert!(json["saved_at"].is_string());
    assert!(json["file_system"]["entities"].is_object());
}

#[test]
fn test_save_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = HostRuntimeConfig {
        save_path: dir.path().join("missing").join("save.json"),
        color_output: false,
    };

    let (runtime, output) = run_script(config, "save\nls");
    assert!(output.contains("Unable to save: I/O error"));
    assert_eq!(runtime.steps(), 2);
}

#[test]
fn test_session_scenario() {
    let (runtime, output) = run_script(
        plain_config(),
        "# walk the tree\ncd ..\ncd ..\ncd /system/config\nls\nvp color.conf\nmadeupcommand\nexit",
    );

    assert!(output.contains("/users> cd /system/config\n/system/config> ls\ncolor.conf\n"));
    assert!(output.contains(
        "/system/config> vp color.conf\n011011: \"admin write\", \"admin read\", \"user write\", and \"user read\"\n"
    ));
    assert!(output.contains(
        "\"madeupcommand\" is an unknown command. Use \"commands\" to get a list of available commands.\n"
    ));
    assert_eq!(runtime.directory().current_path(), "/system/config");
    assert!(!runtime.is_running());
}

#[test]
fn test_file_lifecycle() {
    let (runtime, output) = run_script(
        plain_config(),
        "mf todo.txt\nedit todo\nship it\n.\nvw todo.txt\nchp todo.txt 010000\nvw todo.txt\ndf todo.txt\nls",
    );

    assert!(output.contains("vw todo.txt\nship it\n"));
    assert!(output.contains("\"todo.txt\" permissions updated to 010000.\n"));
    assert!(output.contains("Insufficient permissions to view the \"todo.txt\" file.\n"));
    assert!(output.contains("\"todo.txt\" deleted.\n"));
    assert!(runtime
        .directory()
        .find_in_current("todo.txt")
        .is_err());
    assert!(runtime.directory().file_system().verify_integrity().is_ok());
}

#[test]
fn test_list_locked_directory() {
    let (_, output) = run_script(
        plain_config(),
        "md vault\nchp vault 110000\nls vault",
    );
    assert!(output.contains(
        "Insufficient permissions to list the \"/users/user/home/vault\" directory.\n"
    ));
}
