use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

const EXE: &str = env!("CARGO_BIN_EXE_fermat-near-miss");

#[test]
fn flags_run_search_and_append_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("near_miss_log.txt");

    for _ in 0..2 {
        let output = Command::new(EXE)
            .args(["-n", "3", "-k", "11", "--log", log.to_str().unwrap()])
            .output()
            .expect("run failed");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with(
            "New smallest miss found: x=10, y=10, z=12, miss=197, relative miss=0.09850000"
        ));
        assert!(stdout.contains("Smallest miss found:"));
        assert!(!stdout.contains("Press Enter"));
    }

    let text = fs::read_to_string(&log).unwrap();
    assert_eq!(text.lines().count(), 8);
    assert!(text
        .lines()
        .next()
        .unwrap()
        .ends_with("x=10, y=10, z=12, miss1=272, miss2=197, relative_miss=0.0985"));
}

#[test]
fn json_summary_and_csv_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("log.csv");
    let output = Command::new(EXE)
        .args([
            "-n",
            "3",
            "-k",
            "20",
            "--log",
            log.to_str().unwrap(),
            "--log-format",
            "csv",
            "--json",
        ])
        .output()
        .expect("run failed");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["n"], 3);
    assert_eq!(json["k"], 20);
    assert_eq!(json["pairs_evaluated"], 121);
    assert!(json["best"]["relative_miss"].as_f64().unwrap() < 0.0985);

    let mut rdr = csv::Reader::from_path(&log).unwrap();
    assert_eq!(rdr.headers().unwrap().len(), 7);
    assert_eq!(rdr.records().count(), 121);
}

#[test]
fn out_of_range_flag_is_rejected_with_hint() {
    let output = Command::new(EXE)
        .args(["-n", "12", "-k", "20", "--no-log"])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Pass -n"));

    let output = Command::new(EXE)
        .args(["-n", "3", "-k", "10", "--no-log"])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("k=10"));
}

#[test]
fn interactive_prompt_reprompts_then_waits_for_enter() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(EXE)
        .args(["--no-log"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn failed");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"2\n3\n10\n11\n\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to the Near Miss Finder"));
    assert_eq!(stdout.matches("Invalid value. Please enter n").count(), 1);
    assert_eq!(stdout.matches("Invalid value. Please enter k > 10.").count(), 1);
    assert!(stdout.contains("New smallest miss found: x=10, y=10"));
    assert!(stdout.contains("Press Enter to exit."));
    assert!(!dir.path().join("near_miss_log.txt").exists());
}

#[test]
fn interactive_input_closed_fails() {
    let mut child = Command::new(EXE)
        .args(["--no-log"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn failed");
    child.stdin.take().unwrap().write_all(b"5\n").unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input closed while waiting for k"));
}
