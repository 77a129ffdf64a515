// Tests for chart row building and the JSON renderer.
use chrono::NaiveDate;
use confline::chart::{
    ChartOptions, ChartRenderer, JsonChart, NO_DATA_ID, build_rows, dependency_map,
    entry_for_row, percent_complete,
};
use confline::config::ChartConfig;
use confline::model::TimelineEntry;
use confline::resubmission::{DependencyEdge, dependency_edges};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn entry(id: &str, reg: NaiveDate, notif: NaiveDate, tags: &[&str]) -> TimelineEntry {
    TimelineEntry {
        conf_id: id.to_string(),
        conf_name: format!("{} Conf", id),
        registration_date: reg,
        notification_date: notif,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        link: None,
        is_rollover: false,
    }
}

#[test]
fn test_placeholder_row_when_nothing_to_show() {
    let today = d(2024, 6, 1);
    let rows = build_rows(&[], &[], today);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, NO_DATA_ID);
    assert_eq!(rows[0].name, "No conferences found");
    assert_eq!(rows[0].start_date, today);
    assert_eq!(rows[0].end_date, d(2024, 7, 1));
    assert_eq!(rows[0].duration_days, 30);
    assert_eq!(rows[0].percent_complete, 0);
    assert_eq!(entry_for_row(&[], 0), None);
}

#[test]
fn test_rows_mirror_entries() {
    let mut projected = entry("A_projected", d(2024, 1, 1), d(2024, 1, 10), &["X"]);
    projected.is_rollover = true;
    let entries = vec![entry("B", d(2024, 2, 1), d(2024, 3, 2), &["X"]), projected];
    let rows = build_rows(&entries, &[], d(2024, 6, 1));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "B");
    assert_eq!(rows[0].name, "B");
    assert_eq!(rows[0].duration_days, 30);
    assert_eq!(rows[1].name, "A_projected (Anticipated)");
    assert_eq!(entry_for_row(&entries, 1).map(|e| e.is_rollover), Some(true));
}

#[test]
fn test_end_not_after_start_is_bumped_one_day() {
    let entries = vec![
        entry("SAME", d(2024, 5, 1), d(2024, 5, 1), &[]),
        entry("INV", d(2024, 5, 10), d(2024, 5, 1), &[]),
    ];
    let rows = build_rows(&entries, &[], d(2024, 1, 1));
    assert_eq!(rows[0].end_date, d(2024, 5, 2));
    assert_eq!(rows[0].duration_days, 1);
    assert_eq!(rows[1].end_date, d(2024, 5, 11));
    // The entries themselves are untouched
    assert_eq!(entries[1].notification_date, d(2024, 5, 1));
}

#[test]
fn test_percent_complete() {
    let start = d(2024, 1, 1);
    let end = d(2024, 1, 11);
    assert_eq!(percent_complete(start, end, d(2023, 12, 31)), 0);
    assert_eq!(percent_complete(start, end, start), 0);
    assert_eq!(percent_complete(start, end, d(2024, 1, 6)), 50);
    assert_eq!(percent_complete(start, end, end), 100);
    assert_eq!(percent_complete(start, end, d(2024, 2, 1)), 100);
}

#[test]
fn test_dependency_map_joins_sources() {
    let edges = vec![
        DependencyEdge {
            from: "A".into(),
            to: "C".into(),
        },
        DependencyEdge {
            from: "B".into(),
            to: "C".into(),
        },
        DependencyEdge {
            from: "A".into(),
            to: "B".into(),
        },
    ];
    let map = dependency_map(&edges);
    assert_eq!(map.get("C").map(String::as_str), Some("A,B"));
    assert_eq!(map.get("B").map(String::as_str), Some("A"));
    assert_eq!(map.get("A"), None);
}

#[test]
fn test_rows_carry_dependencies() {
    let entries = vec![
        entry("A", d(2024, 1, 1), d(2024, 1, 10), &["X"]),
        entry("B", d(2024, 2, 1), d(2024, 3, 1), &["X"]),
        entry("C", d(2024, 4, 1), d(2024, 5, 1), &["X"]),
    ];
    let edges = dependency_edges(&entries);
    let rows = build_rows(&entries, &edges, d(2024, 1, 1));
    assert_eq!(rows[0].dependencies, None);
    assert_eq!(rows[1].dependencies.as_deref(), Some("A"));
    assert_eq!(rows[2].dependencies.as_deref(), Some("A,B"));
}

#[test]
fn test_options_height_grows_with_rows() {
    let cfg = ChartConfig::default();
    assert_eq!(ChartOptions::for_rows(1, &cfg).height, 400);
    assert_eq!(ChartOptions::for_rows(20, &cfg).height, 900);
    let opts = ChartOptions::for_rows(3, &cfg);
    assert_eq!(opts.track_height, 40);
    assert!(!opts.critical_path_enabled);
    assert_eq!(opts.label_color, "#7E69AB");
}

#[test]
fn test_json_chart_writes_document() {
    let entries = vec![
        entry("A", d(2024, 1, 1), d(2024, 1, 10), &["X"]),
        entry("B", d(2024, 2, 1), d(2024, 3, 1), &["X"]),
    ];
    let edges = dependency_edges(&entries);
    let rows = build_rows(&entries, &edges, d(2024, 1, 1));

    let mut chart = JsonChart::new(Vec::new());
    chart.set_edges(edges);
    let first = chart
        .draw(&rows, &ChartOptions::for_rows(rows.len(), &ChartConfig::default()))
        .unwrap();
    let second = chart
        .draw(&rows, &ChartOptions::for_rows(rows.len(), &ChartConfig::default()))
        .unwrap();
    assert_ne!(first, second);

    let out = String::from_utf8(chart.into_inner()).unwrap();
    let doc_text = out.split("\n}\n").next().unwrap().to_string() + "\n}";
    let doc: serde_json::Value = serde_json::from_str(&doc_text).unwrap();
    assert_eq!(doc["rows"][1]["id"], "B");
    assert_eq!(doc["rows"][1]["start_date"], "2024-02-01");
    assert_eq!(doc["rows"][1]["dependencies"], "A");
    assert_eq!(doc["rows"][0]["dependencies"], serde_json::Value::Null);
    assert_eq!(doc["edges"][0]["from"], "A");
    assert_eq!(doc["options"]["height"], 400);
}
