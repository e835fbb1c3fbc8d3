use crate::common::write_file;
use namedupe::consolidate::{ConsolidateOptions, Consolidator, DestinationSpec};
use namedupe::report::Report;
use namedupe::scanner::ReportBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn options(root: &Path) -> ConsolidateOptions {
    ConsolidateOptions {
        source_root: root.to_path_buf(),
        target_dir: root.join("DEDUPLICATED"),
        unreadable_log: root.join("unreadable-files-report.txt"),
    }
}

fn specs(specs: &[&str]) -> Vec<DestinationSpec> {
    specs.iter().map(|s| s.parse().unwrap()).collect()
}

/// Scan `accounts` under `root`, save the report and return its path.
fn scan(root: &Path, accounts: &[&str]) -> PathBuf {
    let roots: Vec<PathBuf> = accounts.iter().map(PathBuf::from).collect();
    let (report, _) = ReportBuilder::new(root).build(&roots);
    report.save_unique(root, "duplication-report", 1000).unwrap()
}

#[test]
fn test_newest_copy_per_destination() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("Joe/docs/taxes.pdf"), "joe", 100);
    write_file(&root.join("Mary/docs/taxes.pdf"), "mary", 200);
    write_file(&root.join("Bob/docs/taxes.pdf"), "bob", 50);
    write_file(&root.join("Bob/music/song.mp3"), "song", 10);
    let report = scan(root, &["Joe", "Mary", "Bob"]);

    let consolidator =
        Consolidator::new(&specs(&["Family:Joe,Mary", "Work:Bob"]), options(root)).unwrap();
    let summary = consolidator.run(&report).unwrap();

    let target = root.join("DEDUPLICATED");
    assert_eq!(
        fs::read_to_string(target.join("Family/docs/taxes.pdf")).unwrap(),
        "mary"
    );
    assert_eq!(
        fs::read_to_string(target.join("Work/docs/taxes.pdf")).unwrap(),
        "bob"
    );
    assert_eq!(
        fs::read_to_string(target.join("Work/music/song.mp3")).unwrap(),
        "song"
    );
    assert_eq!(summary.files_copied, 3);
    assert_eq!(summary.names_processed, 2);
}

#[test]
fn test_different_sub_directories_are_kept_apart() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("Joe/a/notes.txt"), "joe-a", 100);
    write_file(&root.join("Mary/b/notes.txt"), "mary-b", 200);
    let report = scan(root, &["Joe", "Mary"]);

    Consolidator::new(&specs(&["Family:Joe,Mary"]), options(root))
        .unwrap()
        .run(&report)
        .unwrap();

    let target = root.join("DEDUPLICATED/Family");
    assert_eq!(fs::read_to_string(target.join("a/notes.txt")).unwrap(), "joe-a");
    assert_eq!(fs::read_to_string(target.join("b/notes.txt")).unwrap(), "mary-b");
}

#[test]
fn test_consolidation_is_idempotent() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("Joe/deep/er/still/f.txt"), "old", 100);
    write_file(&root.join("Mary/deep/er/still/f.txt"), "new", 300);
    let report = scan(root, &["Joe", "Mary"]);
    let consolidator = Consolidator::new(&specs(&["Family:Joe,Mary"]), options(root)).unwrap();

    consolidator.run(&report).unwrap();
    let second = consolidator.run(&report).unwrap();

    let copied = root.join("DEDUPLICATED/Family/deep/er/still/f.txt");
    assert_eq!(fs::read_to_string(copied).unwrap(), "new");
    assert_eq!(second.files_copied, 1);
}

#[cfg(unix)]
#[test]
fn test_directory_metadata_copied_from_winner() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("Mary/album/pic.jpg"), "p", 100);
    fs::set_permissions(root.join("Mary/album"), fs::Permissions::from_mode(0o750)).unwrap();

    let mut report = Report::new();
    report.record("pic.jpg", namedupe::report::Occurrence::new("Mary/album", 100.0));
    let consolidator = Consolidator::new(&specs(&["Family:Mary"]), options(root)).unwrap();
    consolidator.prepare_destinations().unwrap();
    consolidator.consolidate(&report).unwrap();

    let album = root.join("DEDUPLICATED/Family/album");
    let mode = fs::metadata(&album).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o750);

    let file = album.join("pic.jpg");
    let mtime = filetime::FileTime::from_last_modification_time(&fs::metadata(&file).unwrap());
    assert_eq!(mtime.unix_seconds(), 100);
}

#[test]
fn test_unreadable_log_created_empty() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("Joe/f.txt"), "f", 1);
    let report = scan(root, &["Joe"]);

    Consolidator::new(&specs(&["Family:Joe"]), options(root))
        .unwrap()
        .run(&report)
        .unwrap();

    let log = fs::read_to_string(root.join("unreadable-files-report.txt")).unwrap();
    assert!(log.is_empty());
}

#[cfg(unix)]
#[test]
fn test_permission_failure_is_logged_and_run_continues() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("Joe/a/locked.txt"), "secret", 1);
    write_file(&root.join("Joe/a/open.txt"), "open", 1);
    let locked = root.join("Joe/a/locked.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(&locked).is_ok() {
        // Running with privileges that ignore file modes
        return;
    }
    let report = scan(root, &["Joe"]);

    let summary = Consolidator::new(&specs(&["Family:Joe"]), options(root))
        .unwrap()
        .run(&report)
        .unwrap();

    assert_eq!(summary.permission_failures, 1);
    assert_eq!(summary.files_copied, 1);
    assert!(root.join("DEDUPLICATED/Family/a/open.txt").exists());

    let log = fs::read_to_string(root.join("unreadable-files-report.txt")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("src='"));
    assert!(lines[0].contains("locked.txt', dst='"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[test]
fn test_unmapped_accounts_are_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("Joe/f.txt"), "joe", 1);
    write_file(&root.join("Eve/f.txt"), "eve", 2);
    let report = scan(root, &["Joe", "Eve"]);

    let summary = Consolidator::new(&specs(&["Family:Joe"]), options(root))
        .unwrap()
        .run(&report)
        .unwrap();

    assert_eq!(
        fs::read_to_string(root.join("DEDUPLICATED/Family/f.txt")).unwrap(),
        "joe"
    );
    assert_eq!(summary.unmapped_skipped, 1);
    assert!(summary.unmapped_accounts.contains("Eve"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_name_does_not_stop_consolidation() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("Joe/x/good.txt"), "good", 100);
    fs::write(
        root.join("Joe/x").join(OsStr::from_bytes(b"bad\xffname.txt")),
        "bad",
    )
    .unwrap();
    let report = scan(root, &["Joe"]);

    let summary = Consolidator::new(&specs(&["Family:Joe"]), options(root))
        .unwrap()
        .run(&report)
        .unwrap();

    assert_eq!(
        fs::read_to_string(root.join("DEDUPLICATED/Family/x/good.txt")).unwrap(),
        "good"
    );
    assert_eq!(summary.files_copied, 1);
}
