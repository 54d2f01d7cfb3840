use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const ERROR_LINE: &str = "An Error Has Occurred\n";

fn data_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run(args: &[&str], file: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_symnmf"))
        .args(args)
        .arg(file)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

#[test]
fn test_sym_prints_only_the_matrix() {
    let file = data_file("0.0,0.0\n1.0,0.0\n");
    // debug logging must stay on stderr
    let out = run(&["-vv", "sym"], file.path());
    assert!(out.status.success());
    assert_eq!(stdout(&out), "0.0000,0.6065\n0.6065,0.0000\n");
    assert!(!out.stderr.is_empty());
}

#[test]
fn test_ddg_output() {
    let file = data_file("0.0,0.0\n1.0,0.0\n");
    let out = run(&["ddg"], file.path());
    assert!(out.status.success());
    assert_eq!(stdout(&out), "0.6065,0.0000\n0.0000,0.6065\n");
}

#[test]
fn test_symnmf_goal_output_shape() {
    let file = data_file("0.0,0.0\n0.1,0.2\n4.0,4.0\n4.1,3.9\n");
    let out = run(&["symnmf", "-k", "2"], file.path());
    assert!(out.status.success());
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    for line in lines {
        let values: Vec<f64> = line.split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|&v| v >= 0.0));
        assert!(line.split(',').all(|v| v.split('.').nth(1).map(str::len) == Some(4)));
    }
}

fn assert_failure(out: &Output) {
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(out), ERROR_LINE);
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(&["norm"], &dir.path().join("missing.txt"));
    assert_failure(&out);
}

#[test]
fn test_bad_delimiter_fails() {
    let file = data_file("0.0;0.0\n1.0;0.0\n");
    assert_failure(&run(&["sym"], file.path()));
}

#[test]
fn test_single_point_norm_fails() {
    let file = data_file("2.0,3.0\n");
    assert_failure(&run(&["norm"], file.path()));
}

#[test]
fn test_symnmf_without_k_fails() {
    let file = data_file("0.0,0.0\n1.0,0.0\n5.0,5.0\n");
    assert_failure(&run(&["symnmf"], file.path()));
}

#[test]
fn test_unknown_goal_fails() {
    let file = data_file("0.0,0.0\n1.0,0.0\n");
    assert_failure(&run(&["kmeans"], file.path()));
}
