use crate::common::write_file;
use namedupe::output::CountsOutput;
use namedupe::scanner::{ReportBuilder, WalkerConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_same_name_in_two_accounts() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("A/report.pdf"), "old", 1_000);
    write_file(&dir.path().join("B/report.pdf"), "new", 2_000);

    let (report, summary) =
        ReportBuilder::new(dir.path()).build(&[PathBuf::from("A"), PathBuf::from("B")]);

    assert_eq!(summary.files_recorded, 2);
    let entries = report.get("report.pdf").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].directory, "A");
    assert_eq!(entries[0].last_modified, 1_000.0);
    assert_eq!(entries[1].directory, "B");
    assert_eq!(entries[1].last_modified, 2_000.0);

    let rows = CountsOutput::new(&report).rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].count, 2);
    assert_eq!(rows[0].latest_directory, "B");
}

#[test]
fn test_absolute_roots_are_relative_to_base() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("Joe/photos/2019/a.jpg"), "x", 1);

    let (report, _) = ReportBuilder::new(dir.path()).build(&[dir.path().join("Joe")]);
    assert_eq!(report.get("a.jpg").unwrap()[0].directory, "Joe/photos/2019");
}

#[test]
fn test_scan_is_deterministic() {
    let dir = tempdir().unwrap();
    for account in ["A", "B", "C"] {
        for sub in ["x", "y/z"] {
            write_file(&dir.path().join(account).join(sub).join("same.txt"), account, 10);
            write_file(
                &dir.path().join(account).join(sub).join(format!("{account}.txt")),
                account,
                20,
            );
        }
    }
    let roots = vec![PathBuf::from("A"), PathBuf::from("B"), PathBuf::from("C")];

    let builder = ReportBuilder::new(dir.path());
    let (first, _) = builder.build(&roots);
    let (second, _) = builder.build(&roots);

    assert_eq!(first, second);
    assert_eq!(first.get("same.txt").unwrap().len(), 6);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_hidden_files_never_recorded() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("A/.DS_Store"), "h", 1);
    write_file(&dir.path().join("A/sub/.hidden.txt"), "h", 1);
    write_file(&dir.path().join("A/sub/visible.txt"), "v", 1);

    let (report, summary) = ReportBuilder::new(dir.path()).build(&[PathBuf::from("A")]);

    assert_eq!(report.len(), 1);
    assert!(report.get("visible.txt").is_some());
    assert_eq!(summary.hidden_skipped, 2);
}

#[test]
fn test_files_inside_hidden_directories_are_recorded() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("A/.cache/data.bin"), "d", 1);

    let (report, _) = ReportBuilder::new(dir.path()).build(&[PathBuf::from("A")]);
    assert_eq!(report.get("data.bin").unwrap()[0].directory, "A/.cache");
}

#[cfg(unix)]
#[test]
fn test_symlinks_never_recorded() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("A/real.txt"), "r", 1);
    fs::create_dir_all(dir.path().join("B")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("A/real.txt"), dir.path().join("B/real.txt"))
        .unwrap();
    std::os::unix::fs::symlink(dir.path().join("A"), dir.path().join("B/linked-dir")).unwrap();

    let (report, summary) =
        ReportBuilder::new(dir.path()).build(&[PathBuf::from("A"), PathBuf::from("B")]);

    let entries = report.get("real.txt").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].directory, "A");
    assert_eq!(summary.symlinks_skipped, 2);
}

#[test]
fn test_skip_hidden_can_be_disabled() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("A/.env"), "h", 1);

    let (report, _) = ReportBuilder::new(dir.path())
        .with_config(WalkerConfig { skip_hidden: false })
        .build(&[PathBuf::from("A")]);
    assert!(report.get(".env").is_some());
}
