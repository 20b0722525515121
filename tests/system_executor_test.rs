//! System executor tests against real unix tools.
//!
//! `cat` stands in for a builder (its "index" is the DB file itself) and a
//! small `sh` script stands in for a searcher.

#![cfg(unix)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use oa_simcheck::process::{IndexRunner, ProcessExecutor, StdoutTarget};
use oa_simcheck::{SimcheckError, SystemExecutor, ValidateConfig, Validator};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("should write script");
    let mut perms = std::fs::metadata(&path)
        .expect("script should exist")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("should mark script executable");
    path
}

#[test]
fn test_capture_and_exit_code() {
    let out = SystemExecutor
        .run(
            Path::new("sh"),
            &[OsStr::new("-c"), OsStr::new("printf 101; echo oops >&2; exit 3")],
            StdoutTarget::Capture,
        )
        .expect("sh should launch");
    assert_eq!(out.stdout, b"101");
    assert_eq!(out.stderr, b"oops\n");
    assert_eq!(out.code, Some(3));
    assert!(!out.success());
}

#[test]
fn test_unknown_program_cannot_launch() {
    let err = SystemExecutor
        .run(
            Path::new("oa-simcheck-definitely-not-installed"),
            &[],
            StdoutTarget::Capture,
        )
        .expect_err("missing program should not launch");
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_runner_builds_with_cat() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let db = dir.path().join("db.txt");
    std::fs::write(&db, "apple\napply\n").expect("should write db");

    let runner = IndexRunner::new(
        &SystemExecutor,
        Some(PathBuf::from("cat")),
        PathBuf::from("true"),
    );
    let index = runner.build(&db).expect("cat should build the index");
    assert_eq!(
        std::fs::read_to_string(&index).expect("index should be readable"),
        "apple\napply\n"
    );

    let kept = index.to_path_buf();
    drop(index);
    assert!(!kept.exists());
}

#[test]
fn test_end_to_end_with_scripts() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let db = dir.path().join("db.txt");
    let query = dir.path().join("query.txt");
    std::fs::write(&db, "apple\napply\n").expect("should write db");
    std::fs::write(&query, "aple\nzzzz\n").expect("should write queries");

    let good = write_script(dir.path(), "search-good", "printf '1\\n0\\n'");
    let bad = write_script(dir.path(), "search-bad", "printf '1\\n1\\n'");
    let crash = write_script(dir.path(), "search-crash", "echo 'index corrupt' >&2; exit 2");

    let run = |searcher: PathBuf| {
        let mut config = ValidateConfig::new(searcher, db.clone(), query.clone());
        config.builder = Some(PathBuf::from("cat"));
        config.maxdist = 1;
        Validator::new(config, &SystemExecutor).run()
    };

    assert!(run(good).expect("good searcher should run").passed());

    let failed = run(bad).expect("bad searcher should still run");
    assert!(!failed.passed());
    assert_eq!(failed.examples[0].position, 1);

    match run(crash).expect_err("crashing searcher should fail") {
        SimcheckError::ProcessFailed { code, stderr, .. } => {
            assert_eq!(code, Some(2));
            assert_eq!(stderr, "index corrupt");
        }
        other => panic!("unexpected error: {other}"),
    }
}
