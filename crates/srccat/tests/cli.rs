#![allow(missing_docs, unused_results)]

use std::path::Path;
use std::process::{Command, Output};

fn setup_workdir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let proj = dir.path().join("proj");
    std::fs::create_dir_all(proj.join("sub")).unwrap();
    std::fs::write(proj.join("a.py"), "print(1)\n").unwrap();
    std::fs::write(proj.join("sub/b.py"), "print(2)\n").unwrap();
    std::fs::write(proj.join("readme.md"), "# readme\n").unwrap();
    std::fs::create_dir_all(dir.path().join("home")).unwrap();
    dir
}

fn srccat(workdir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_srccat"))
        .args(args)
        .current_dir(workdir)
        .env("HOME", workdir.join("home"))
        .env_remove("RUST_LOG")
        .env_remove("SRCCAT_OUTPUT")
        .env_remove("SRCCAT_SEPARATOR")
        .env_remove("SRCCAT_SUFFIXES")
        .output()
        .unwrap()
}

#[test]
fn writes_output_txt_in_working_directory() {
    let dir = setup_workdir();
    let out = srccat(dir.path(), &["proj"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());

    let text = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(
        text,
        "File: proj/a.py\nprint(1)\n\n\nFile: proj/sub/b.py\nprint(2)\n\n\n"
    );
}

#[test]
fn literal_separator_flag() {
    let dir = setup_workdir();
    let out = srccat(dir.path(), &["--separator", "literal", "proj/sub"]);
    assert!(out.status.success());

    let text = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(text, "File: proj/sub/b.py\nprint(2)\n\\n\n");
}

#[test]
fn list_prints_matches_without_writing() {
    let dir = setup_workdir();
    let out = srccat(dir.path(), &["--list", "proj"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "proj/a.py\nproj/sub/b.py\n"
    );
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn json_report_on_stdout() {
    let dir = setup_workdir();
    let out = srccat(dir.path(), &["--json", "-o", "dump.txt", "proj"]);
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["filesWritten"], 2);
    assert_eq!(report["output"], "dump.txt");
    assert!(dir.path().join("dump.txt").exists());
}

#[test]
fn missing_root_fails_with_message() {
    let dir = setup_workdir();
    let out = srccat(dir.path(), &["nowhere"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("root not found: nowhere"));
}

#[test]
fn settings_file_in_home_is_used() {
    let dir = setup_workdir();
    let cfg_dir = dir.path().join("home/.srccat");
    std::fs::create_dir_all(&cfg_dir).unwrap();
    std::fs::write(
        cfg_dir.join("settings.json"),
        r#"{"output": {"path": "from-settings.txt"}, "walk": {"suffixes": [".md"]}}"#,
    )
    .unwrap();

    let out = srccat(dir.path(), &["proj"]);
    assert!(out.status.success());
    let text = std::fs::read_to_string(dir.path().join("from-settings.txt")).unwrap();
    assert_eq!(text, "File: proj/readme.md\n# readme\n\n\n");
}

#[test]
fn env_override_beats_settings_file() {
    let dir = setup_workdir();
    let out = Command::new(env!("CARGO_BIN_EXE_srccat"))
        .arg("proj")
        .current_dir(dir.path())
        .env("HOME", dir.path().join("home"))
        .env("SRCCAT_OUTPUT", "env.txt")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(dir.path().join("env.txt").exists());
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn invalid_env_overrides_are_reported_on_stderr() {
    let dir = setup_workdir();
    let out = Command::new(env!("CARGO_BIN_EXE_srccat"))
        .arg("proj")
        .current_dir(dir.path())
        .env("HOME", dir.path().join("home"))
        .env_remove("RUST_LOG")
        .env("SRCCAT_FOLLOW_LINKS", "maybe")
        .env("SRCCAT_MAX_DEPTH", "0")
        .output()
        .unwrap();
    assert!(out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("SRCCAT_FOLLOW_LINKS"), "stderr: {stderr}");
    assert!(stderr.contains("SRCCAT_MAX_DEPTH"), "stderr: {stderr}");
    assert!(stderr.contains("invalid env var"));

    // Ignored overrides fall back to defaults.
    let text = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert!(text.contains("File: proj/sub/b.py"));
}
