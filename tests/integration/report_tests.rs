use crate::common::write_file;
use namedupe::report::{Occurrence, Report, ReportError};
use namedupe::scanner::ReportBuilder;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_scan_save_load_round_trip() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("A/x/f.txt"), "1", 1_234);
    write_file(&dir.path().join("B/f.txt"), "2", 5_678);

    let (report, _) =
        ReportBuilder::new(dir.path()).build(&[PathBuf::from("A"), PathBuf::from("B")]);
    let path = report
        .save_unique(dir.path(), "duplication-report", 1000)
        .unwrap();

    assert_eq!(Report::load(&path).unwrap(), report);
}

#[test]
fn test_report_names_increment() {
    let dir = tempdir().unwrap();
    let report = Report::new();

    let names: Vec<String> = (0..3)
        .map(|_| {
            report
                .save_unique(dir.path(), "duplication-report", 1000)
                .unwrap()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    assert_eq!(
        names,
        vec![
            "duplication-report.txt",
            "duplication-report_1.txt",
            "duplication-report_2.txt"
        ]
    );
}

#[test]
fn test_report_names_fill_gaps() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("r.txt"), "{}").unwrap();
    fs::write(dir.path().join("r_2.txt"), "{}").unwrap();

    let path = Report::new().save_unique(dir.path(), "r", 1000).unwrap();
    assert_eq!(path, dir.path().join("r_1.txt"));
}

#[test]
fn test_exhausted_names_write_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("r.txt"), "{}").unwrap();
    fs::write(dir.path().join("r_1.txt"), "{}").unwrap();

    let result = Report::new().save_unique(dir.path(), "r", 2);
    assert!(matches!(result, Err(ReportError::NamesExhausted { .. })));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_loads_report_written_by_hand() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("old.txt");
    fs::write(
        &path,
        r#"{
  "notes.txt": [
    {"directory": "Joe/docs", "last_modified": 1600000000.25},
    {"directory": "Mary", "last_modified": 0.0, "file not found": true}
  ]
}"#,
    )
    .unwrap();

    let report = Report::load(&path).unwrap();
    let entries = report.get("notes.txt").unwrap();
    assert_eq!(entries[0], Occurrence::new("Joe/docs", 1_600_000_000.25));
    assert_eq!(entries[1], Occurrence::not_found("Mary"));
}
