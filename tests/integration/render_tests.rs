use namedupe::output::{render, CountsOutput, RenderMode};
use namedupe::report::{format_timestamp, Occurrence, Report};

fn sample() -> Report {
    let mut report = Report::new();
    report.record("report.pdf", Occurrence::new("A", 100.0));
    report.record("report.pdf", Occurrence::new("B", 200.0));
    report.record("report.pdf", Occurrence::new("C", 50.0));
    report.record("unique.txt", Occurrence::new("A", 10.0));
    report.record("pair.txt", Occurrence::new("A", 10.0));
    report.record("pair.txt", Occurrence::new("B", 20.0));
    report
}

fn rendered(report: &Report, mode: RenderMode) -> String {
    let mut buffer = Vec::new();
    render(report, mode, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn test_csv_lines_newest_first() {
    let text = rendered(&sample(), RenderMode::Csv);
    let line = text
        .lines()
        .find(|l| l.starts_with("\"report.pdf\""))
        .unwrap();

    assert_eq!(
        line,
        format!(
            "\"report.pdf\",{},\"B\",{},\"A\",{},\"C\"",
            format_timestamp(200.0),
            format_timestamp(100.0),
            format_timestamp(50.0)
        )
    );
}

#[test]
fn test_csv_names_in_sorted_order() {
    let csv = rendered(&sample(), RenderMode::Csv);
    let names: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(names, vec!["\"pair.txt\"", "\"report.pdf\"", "\"unique.txt\""]);
}

#[test]
fn test_counts_ascending() {
    let report = sample();
    let rows = CountsOutput::new(&report).rows();
    let counts: Vec<usize> = rows.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![1, 2, 3]);
    assert_eq!(rows[1].latest_directory, "B");
    assert_eq!(rows[2].latest_directory, "B");

    let text = rendered(&report, RenderMode::Counts);
    assert!(text.find("unique.txt").unwrap() < text.find("pair.txt").unwrap());
    assert!(text.find("pair.txt").unwrap() < text.find("report.pdf").unwrap());
}

#[test]
fn test_json_leaves_report_numeric() {
    let report = sample();
    let text = rendered(&report, RenderMode::Json);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert!(value["report.pdf"][0]["last_modified"].is_string());
    assert_eq!(report.get("report.pdf").unwrap()[0].last_modified, 100.0);
}
