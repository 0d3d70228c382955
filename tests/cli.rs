use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mongo-sample-export-cli-{}-{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mongo-sample-export"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn json_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect()
}

#[test]
fn test_missing_database_prints_usage_and_exits_1() {
    let dir = scratch_dir("no_args");
    let output = run_in(&dir, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Usage:"), "stdout was: {stdout}");
    assert!(stdout.contains("<DATABASE>"));
    assert!(json_files(&dir).is_empty());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_unreachable_server_creates_no_file() {
    let dir = scratch_dir("unreachable");
    let output = run_in(
        &dir,
        &[
            "sample_db",
            "--uri",
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=500",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error:"), "stderr was: {stderr}");
    assert!(!dir.join("sample_db.json").exists());
    assert!(json_files(&dir).is_empty());

    fs::remove_dir_all(&dir).ok();
}
