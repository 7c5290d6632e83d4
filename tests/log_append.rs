use std::fs;

use fermat_near_miss::{search, CsvLog, SearchParameters, TextLog};

#[test]
fn text_log_appends_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("near_miss_log.txt");
    fs::write(&path, "previous run\n").unwrap();

    let params = SearchParameters::new(4, 12).unwrap();
    search(params, TextLog::append(&path).unwrap()).unwrap();
    search(params, TextLog::append(&path).unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "previous run");
    assert_eq!(lines.len(), 1 + 2 * 9);
    assert!(lines[1..].iter().all(|l| l.contains(" - INFO - x=")));
}

#[test]
fn csv_log_header_written_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");

    let params = SearchParameters::new(3, 11).unwrap();
    search(params, CsvLog::append(&path).unwrap()).unwrap();
    search(params, CsvLog::append(&path).unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("timestamp,x,y").count(), 1);
    assert_eq!(text.lines().count(), 1 + 2 * 4);
}
