// Tests for normalization of raw rows into timeline entries.
use chrono::{Duration, NaiveDate};
use confline::model::entry::ROLLOVER_SUFFIX;
use confline::model::normalize::duration_in_days;
use confline::model::{RawRecord, normalize};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn record(id: &str, reg: &str, notif: &str, tags: &str) -> RawRecord {
    RawRecord {
        conf_id: id.to_string(),
        conf_name: format!("{} Conference", id),
        registration: reg.to_string(),
        notification: notif.to_string(),
        tags: tags.to_string(),
        link: Some(format!("https://{}.example", id.to_lowercase())),
    }
}

#[test]
fn test_past_conference_gets_rollover() {
    let records = vec![record("A", "01/01/2023", "10/01/2023", "X")];
    let entries = normalize(&records, d(2024, 6, 1));

    assert_eq!(entries.len(), 2);

    let original = &entries[0];
    assert!(!original.is_rollover);
    assert_eq!(original.conf_id, "A");
    assert_eq!(original.registration_date, d(2023, 1, 1));
    assert_eq!(original.notification_date, d(2023, 1, 10));

    let rollover = &entries[1];
    assert!(rollover.is_rollover);
    assert_eq!(rollover.conf_id, format!("A{}", ROLLOVER_SUFFIX));
    assert_eq!(rollover.registration_date, d(2024, 1, 1));
    assert_eq!(
        rollover.notification_date,
        rollover.registration_date + Duration::days(9)
    );
    assert_eq!(rollover.tags, vec!["X"]);
    assert_eq!(rollover.link, original.link);
    assert_eq!(rollover.display_label(), "A_projected (Anticipated)");
}

#[test]
fn test_future_conference_has_no_rollover() {
    let records = vec![record("B", "01/09/2024", "01/11/2024", "X")];
    let entries = normalize(&records, d(2024, 6, 1));
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].is_rollover);
}

#[test]
fn test_notification_today_gets_rollover() {
    let records = vec![record("C", "01/05/2024", "01/06/2024", "X")];
    let entries = normalize(&records, d(2024, 6, 1));
    assert_eq!(entries.len(), 2);
    assert!(entries[1].is_rollover);
    assert_eq!(entries[1].registration_date, d(2024, 5, 1));
    assert_eq!(entries[1].notification_date, d(2024, 6, 1));
}

#[test]
fn test_notification_tomorrow_has_no_rollover() {
    let records = vec![record("C", "01/05/2024", "02/06/2024", "X")];
    let entries = normalize(&records, d(2024, 6, 1));
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_rollover_from_leap_day_clamps_to_feb_28() {
    let records = vec![record("L", "29/02/2024", "10/03/2024", "X")];
    let entries = normalize(&records, d(2025, 6, 1));
    assert_eq!(entries.len(), 2);
    let rollover = &entries[1];
    assert_eq!(rollover.registration_date, d(2025, 2, 28));
    // 29/02 -> 10/03 in 2024 is 10 days
    assert_eq!(rollover.notification_date, d(2025, 3, 10));
}

#[test]
fn test_inverted_dates_keep_minimum_duration_for_rollover() {
    assert_eq!(duration_in_days(d(2023, 5, 10), d(2023, 5, 1)), 1);
    assert_eq!(duration_in_days(d(2023, 5, 10), d(2023, 5, 10)), 1);

    let records = vec![record("I", "10/05/2023", "01/05/2023", "X")];
    let entries = normalize(&records, d(2024, 6, 1));
    let rollover = entries.iter().find(|e| e.is_rollover).unwrap();
    assert_eq!(rollover.registration_date, d(2024, 5, 10));
    assert_eq!(rollover.notification_date, d(2024, 5, 11));
}

#[test]
fn test_invalid_records_are_skipped() {
    let mut no_name = record("N", "01/01/2024", "10/01/2024", "X");
    no_name.conf_name.clear();
    let records = vec![
        record("BAD", "31/02/2024", "10/03/2024", "X"),
        no_name,
        record("OK", "01/09/2024", "01/10/2024", ""),
    ];
    let entries = normalize(&records, d(2024, 6, 1));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].conf_id, "OK");
    assert!(entries[0].tags.is_empty());
}

#[test]
fn test_empty_input_yields_empty_output() {
    assert!(normalize(&[], d(2024, 6, 1)).is_empty());
}

#[test]
fn test_output_keeps_input_order() {
    let records = vec![
        record("Z", "01/09/2024", "01/10/2024", "X"),
        record("A", "01/01/2023", "10/01/2023", "X"),
    ];
    let ids: Vec<String> = normalize(&records, d(2024, 6, 1))
        .into_iter()
        .map(|e| e.conf_id)
        .collect();
    assert_eq!(ids, vec!["Z", "A", "A_projected"]);
}

#[test]
fn test_normalize_now_uses_local_date() {
    let records = vec![
        record("PAST", "01/03/1990", "01/04/1990", "X"),
        record("FUTURE", "01/03/2990", "01/04/2990", "X"),
    ];
    let entries = confline::model::normalize_now(&records);
    let ids: Vec<&str> = entries.iter().map(|e| e.conf_id.as_str()).collect();
    assert_eq!(ids, vec!["PAST", "PAST_projected", "FUTURE"]);
    assert_eq!(
        entries[1].notification_date - entries[1].registration_date,
        Duration::days(31)
    );
}

#[test]
fn test_normalizer_and_validity_check_agree() {
    let records = vec![
        record("", "01/01/2024", "10/01/2024", "X"),
        record("BADREG", "32/01/2024", "10/02/2024", "X"),
        record("BADNOTIF", "01/01/2024", "1/2/2024", "X"),
        record("OK", "01/09/2024", "01/10/2024", "X"),
    ];
    let entries = normalize(&records, d(2024, 6, 1));
    let kept: Vec<&str> = entries
        .iter()
        .map(|e| e.conf_id.as_str())
        .collect();
    let valid: Vec<&str> = records
        .iter()
        .filter(|r| r.is_valid())
        .map(|r| r.conf_id.as_str())
        .collect();
    assert_eq!(kept, valid);
    assert_eq!(kept, vec!["OK"]);
}
