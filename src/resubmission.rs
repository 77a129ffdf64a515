// File: ./src/resubmission.rs
//! Resubmission inference between timeline entries.
//!
//! A conference `E` is a possible resubmission target for `T` when its
//! registration opens after `T`'s notification and the two share a tag:
//! a paper rejected at `T` could be sent on to `E`.
use crate::model::TimelineEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
}

/// Candidates for `target`, in the order they appear in `entries`.
pub fn possible_resubmissions<'a>(
    target: &TimelineEntry,
    entries: &'a [TimelineEntry],
) -> Vec<&'a TimelineEntry> {
    entries
        .iter()
        .filter(|e| {
            e.conf_id != target.conf_id
                && e.registration_date > target.notification_date
                && e.shares_tag_with(target)
        })
        .collect()
}

/// Tags of `candidate` that `target` also carries, in `candidate` order.
pub fn shared_tags<'a>(target: &TimelineEntry, candidate: &'a TimelineEntry) -> Vec<&'a str> {
    candidate
        .tags
        .iter()
        .filter(|t| target.has_tag(t))
        .map(String::as_str)
        .collect()
}

/// One edge per unordered pair. Iteration follows `entries`; when both
/// directions qualify, the first one met is kept.
pub fn dependency_edges(entries: &[TimelineEntry]) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for source in entries {
        for target in possible_resubmissions(source, entries) {
            let reverse = (target.conf_id.as_str(), source.conf_id.as_str());
            if seen.contains(&reverse) {
                continue;
            }
            seen.insert((source.conf_id.as_str(), target.conf_id.as_str()));
            edges.push(DependencyEdge {
                from: source.conf_id.clone(),
                to: target.conf_id.clone(),
            });
        }
    }

    log::debug!("Inferred {} dependency edge(s)", edges.len());
    edges
}
