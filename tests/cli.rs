use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const SCATTER: &str = env!("CARGO_BIN_EXE_scatter-plot");
const VIOLIN: &str = env!("CARGO_BIN_EXE_violin-plot");
const GENERATE: &str = env!("CARGO_BIN_EXE_generate-sample");

fn run(bin: &str, dir: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn binary")
}

fn workspace(name: &str, content: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(name), content).unwrap();
    dir
}

#[test]
fn scatter_writes_pdf() {
    let dir = workspace("lat.csv", "start,latency\n0,0.01\n1,0.02\n2,0.05\n");
    let out = run(SCATTER, dir.path(), &["lat.csv"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let pdf = fs::read(dir.path().join("foo-scatter.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn scatter_rerun_overwrites_identically() {
    let dir = workspace("lat.csv", "start,latency\n0,0.01\n1,0.02\n2,0.05\n");
    assert!(run(SCATTER, dir.path(), &["lat.csv"]).status.success());
    let first = fs::read(dir.path().join("foo-scatter.pdf")).unwrap();
    assert!(run(SCATTER, dir.path(), &["lat.csv"]).status.success());
    let second = fs::read(dir.path().join("foo-scatter.pdf")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn scatter_missing_column_leaves_no_output() {
    for header in ["begin,latency", "start,duration"] {
        let dir = workspace("lat.csv", &format!("{header}\n0,0.01\n"));
        let out = run(SCATTER, dir.path(), &["lat.csv"]);
        assert!(!out.status.success());
        assert!(!dir.path().join("foo-scatter.pdf").exists());
        assert!(String::from_utf8_lossy(&out.stderr).contains("missing"));
    }
}

#[test]
fn violin_writes_pdf() {
    let dir = workspace("lat.txt", "0.01\n0.02\n0.05\n");
    let out = run(VIOLIN, dir.path(), &["lat.txt"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let pdf = fs::read(dir.path().join("foo.pdf")).unwrap();
    assert!(!pdf.is_empty());
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn violin_rejects_non_numeric_token() {
    let dir = workspace("lat.txt", "0.01\nabc\n0.05\n");
    let out = run(VIOLIN, dir.path(), &["lat.txt"]);
    assert!(!out.status.success());
    assert!(!dir.path().join("foo.pdf").exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("'abc'"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    for bin in [SCATTER, VIOLIN] {
        let out = run(bin, dir.path(), &["absent.txt"]);
        assert!(!out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
    }
}

#[test]
fn no_argument_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    for bin in [SCATTER, VIOLIN] {
        let out = run(bin, dir.path(), &[]);
        assert!(!out.status.success());
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("Usage"), "{stderr}");
        assert!(stderr.contains("<INPUT>"), "{stderr}");
    }
}

#[test]
fn generated_samples_feed_both_plots() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(GENERATE, dir.path(), &["--rows", "200", "--seed", "3"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    assert!(run(SCATTER, dir.path(), &["sample-scatter.csv"]).status.success());
    assert!(run(VIOLIN, dir.path(), &["sample-latencies.txt"]).status.success());
    assert!(dir.path().join("foo-scatter.pdf").exists());
    assert!(dir.path().join("foo.pdf").exists());
}
