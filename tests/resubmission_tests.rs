// Tests for resubmission candidates and dependency edges.
use chrono::NaiveDate;
use confline::model::TimelineEntry;
use confline::resubmission::{
    DependencyEdge, dependency_edges, possible_resubmissions, shared_tags,
};

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

fn edge(from: &str, to: &str) -> DependencyEdge {
    DependencyEdge {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[test]
fn test_candidates_need_later_registration_and_shared_tag() {
    let a = entry("A", d(2024, 1, 1), d(2024, 1, 10), &["X"]);
    let b = entry("B", d(2024, 1, 20), d(2024, 3, 1), &["X"]);
    let c = entry("C", d(2024, 1, 15), d(2024, 3, 1), &["Y"]);
    let entries = vec![a.clone(), b, c];

    let found: Vec<&str> = possible_resubmissions(&a, &entries)
        .iter()
        .map(|e| e.conf_id.as_str())
        .collect();
    assert_eq!(found, vec!["B"]);
}

#[test]
fn test_candidate_registering_before_notification_is_excluded() {
    let a = entry("A", d(2024, 1, 1), d(2024, 1, 10), &["X"]);
    let early = entry("B", d(2024, 1, 5), d(2024, 3, 1), &["X"]);
    let same_day = entry("S", d(2024, 1, 10), d(2024, 3, 1), &["X"]);
    let entries = vec![a.clone(), early, same_day];
    assert!(possible_resubmissions(&a, &entries).is_empty());
}

#[test]
fn test_entry_is_never_its_own_candidate() {
    let a = entry("A", d(2024, 5, 1), d(2024, 1, 10), &["X"]);
    let entries = vec![a.clone()];
    assert!(possible_resubmissions(&a, &entries).is_empty());
}

#[test]
fn test_rollover_counts_as_distinct_candidate() {
    let past = entry("A", d(2023, 1, 1), d(2023, 1, 10), &["X"]);
    let mut projected = entry("A_projected", d(2024, 1, 1), d(2024, 1, 10), &["X"]);
    projected.is_rollover = true;
    let entries = vec![past.clone(), projected];
    let found = possible_resubmissions(&past, &entries);
    assert_eq!(found.len(), 1);
    assert!(found[0].is_rollover);
}

#[test]
fn test_shared_tags_in_candidate_order() {
    let t = entry("T", d(2024, 1, 1), d(2024, 1, 10), &["ML", "NLP", "IR"]);
    let e = entry("E", d(2024, 2, 1), d(2024, 3, 1), &["IR", "Vision", "ML"]);
    assert_eq!(shared_tags(&t, &e), vec!["IR", "ML"]);
}

#[test]
fn test_edges_follow_entry_order() {
    let entries = vec![
        entry("A", d(2024, 1, 1), d(2024, 1, 10), &["X"]),
        entry("B", d(2024, 2, 1), d(2024, 3, 1), &["X"]),
        entry("C", d(2024, 4, 1), d(2024, 5, 1), &["X"]),
    ];
    assert_eq!(
        dependency_edges(&entries),
        vec![edge("A", "B"), edge("A", "C"), edge("B", "C")]
    );
}

#[test]
fn test_edges_keep_one_direction_when_both_qualify() {
    // Both windows end before the other opens, so A->B and B->A both qualify.
    let entries = vec![
        entry("A", d(2024, 3, 1), d(2024, 1, 1), &["X"]),
        entry("B", d(2024, 2, 1), d(2024, 1, 15), &["X"]),
    ];
    assert_eq!(dependency_edges(&entries), vec![edge("A", "B")]);

    let reversed: Vec<TimelineEntry> = entries.into_iter().rev().collect();
    assert_eq!(dependency_edges(&reversed), vec![edge("B", "A")]);
}

#[test]
fn test_no_edges_without_tags_or_entries() {
    assert!(dependency_edges(&[]).is_empty());
    let entries = vec![
        entry("A", d(2024, 1, 1), d(2024, 1, 10), &[]),
        entry("B", d(2024, 2, 1), d(2024, 3, 1), &[]),
    ];
    assert!(dependency_edges(&entries).is_empty());
}
