// Tests for argument parsing and the headless JSON export.
use chrono::NaiveDate;
use confline::cli::{Command, ExportArgs, parse_args, run_export};
use confline::config::Config;
use confline::filter::DateRange;
use mockito::Server;
use std::path::PathBuf;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_no_arguments_starts_tui() {
    let parsed = parse_args(&[]).unwrap();
    assert_eq!(parsed.command, Command::Tui);
    assert_eq!(parsed.root, None);
}

#[test]
fn test_root_and_help() {
    let parsed = parse_args(&args(&["--root", "/tmp/cfg"])).unwrap();
    assert_eq!(parsed.root, Some(PathBuf::from("/tmp/cfg")));
    assert_eq!(parse_args(&args(&["-h"])).unwrap().command, Command::Help);
    assert!(parse_args(&args(&["--root"])).is_err());
}

#[test]
fn test_export_filters() {
    let parsed = parse_args(&args(&[
        "export",
        "--from",
        "01/01/2024",
        "--to",
        "31/12/2024",
        "--tag",
        "NLP",
        "-t",
        "ML",
    ]))
    .unwrap();
    assert_eq!(
        parsed.command,
        Command::Export(ExportArgs {
            range: Some(DateRange::new(Some(d(2024, 1, 1)), Some(d(2024, 12, 31)))),
            tags: vec!["NLP".to_string(), "ML".to_string()],
            url: None,
        })
    );
}

#[test]
fn test_export_default_and_all_ranges() {
    match parse_args(&args(&["export"])).unwrap().command {
        Command::Export(e) => assert_eq!(e.range, None),
        other => panic!("unexpected {:?}", other),
    }
    match parse_args(&args(&["export", "--all"])).unwrap().command {
        Command::Export(e) => assert_eq!(e.range, Some(DateRange::unbounded())),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_bad_arguments_are_rejected() {
    assert!(parse_args(&args(&["export", "--from", "2024-01-01"])).is_err());
    assert!(parse_args(&args(&["export", "--from", "02/02/2024", "--to", "01/01/2024"])).is_err());
    assert!(parse_args(&args(&["--tag", "NLP"])).is_err());
    assert!(parse_args(&args(&["--bogus"])).is_err());
}

const CSV: &str = "\
id,name,registration,notification,tags,link
OLD,Old Conf,01/01/2023,10/01/2023,NLP,
NEW,New Conf,01/08/2024,01/10/2024,NLP,https://new.example
CV,Vision Conf,15/08/2024,15/10/2024,Vision,
";

#[tokio::test]
async fn test_export_writes_filtered_rows() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/sheet.csv")
        .with_status(200)
        .with_body(CSV)
        .create_async()
        .await;

    let cfg = Config {
        allow_insecure_certs: true,
        ..Config::default()
    };
    let export = ExportArgs {
        range: Some(DateRange::unbounded()),
        tags: vec!["NLP".to_string()],
        url: Some(format!("{}/sheet.csv", server.url())),
    };

    let mut out = Vec::new();
    run_export(&cfg, &export, d(2024, 6, 1), &mut out)
        .await
        .unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let ids: Vec<&str> = doc["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["OLD", "OLD_projected", "NEW"]);
    assert_eq!(doc["rows"][1]["name"], "OLD_projected (Anticipated)");
    assert_eq!(doc["rows"][2]["dependencies"], "OLD,OLD_projected");
}

#[tokio::test]
async fn test_export_default_window_shows_placeholder_when_empty() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/sheet.csv")
        .with_status(200)
        .with_body(CSV)
        .create_async()
        .await;

    let cfg = Config {
        allow_insecure_certs: true,
        feed_url: format!("{}/sheet.csv", server.url()),
        default_range_months: 1,
        ..Config::default()
    };

    // Window 01/06/2030 - 01/07/2030: every rollover lands in January or August
    let mut out = Vec::new();
    run_export(&cfg, &ExportArgs::default(), d(2030, 6, 15), &mut out)
        .await
        .unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["rows"].as_array().unwrap().len(), 1);
    assert_eq!(doc["rows"][0]["id"], "no_data");
    assert_eq!(doc["edges"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_export_propagates_fetch_errors() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/sheet.csv")
        .with_status(503)
        .create_async()
        .await;

    let cfg = Config {
        allow_insecure_certs: true,
        feed_url: format!("{}/sheet.csv", server.url()),
        ..Config::default()
    };
    let mut out = Vec::new();
    let err = run_export(&cfg, &ExportArgs::default(), d(2024, 6, 1), &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 503");
    assert!(out.is_empty());
}
