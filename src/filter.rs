// File: ./src/filter.rs
// Date-range and tag filtering of timeline entries.
use crate::model::TimelineEntry;
use crate::model::date::{add_months, format_date};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Inclusive date window. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// No bounds at all.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// First day of the current month up to `months` months later.
    pub fn default_window(today: NaiveDate, months: u32) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        Self {
            from: Some(start),
            to: Some(add_months(start, months)),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |d: Option<NaiveDate>| d.map(format_date).unwrap_or_else(|| "…".to_string());
        write!(f, "{} - {}", side(self.from), side(self.to))
    }
}

pub struct FilterOptions<'a> {
    pub range: DateRange,
    /// Empty means "all tags".
    pub selected_tags: &'a HashSet<String>,
}

impl TimelineEntry {
    pub fn matches(&self, options: &FilterOptions) -> bool {
        if let Some(from) = options.range.from
            && self.registration_date < from
        {
            return false;
        }
        if let Some(to) = options.range.to
            && self.notification_date > to
        {
            return false;
        }
        options.selected_tags.is_empty()
            || self.tags.iter().any(|t| options.selected_tags.contains(t))
    }
}

/// Keeps matching entries and sorts them by registration date.
///
/// The sort is stable, so entries opening on the same day keep feed order.
pub fn filter_entries(entries: &[TimelineEntry], options: &FilterOptions) -> Vec<TimelineEntry> {
    let mut out: Vec<TimelineEntry> = entries
        .iter()
        .filter(|e| e.matches(options))
        .cloned()
        .collect();
    out.sort_by_key(|e| e.registration_date);
    out
}

/// Distinct tags with the number of entries carrying each, sorted by name.
pub fn collect_tags(entries: &[TimelineEntry]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        for tag in &entry.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect()
}

/// Parses `DD/MM/YYYY - DD/MM/YYYY`. Either side may be left blank.
pub fn parse_range(input: &str) -> Result<DateRange, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DateRange::unbounded());
    }
    let (left, right) = match input.split_once(" - ") {
        Some(parts) => parts,
        None => input.split_once('-').unwrap_or((input, "")),
    };
    let side = |s: &str| -> Result<Option<NaiveDate>, String> {
        let s = s.trim();
        if s.is_empty() || s == "…" {
            return Ok(None);
        }
        crate::model::parse_date(s)
            .map(Some)
            .ok_or_else(|| format!("Invalid date '{}', expected DD/MM/YYYY", s))
    };
    let range = DateRange::new(side(left)?, side(right)?);
    if let (Some(from), Some(to)) = (range.from, range.to)
        && from > to
    {
        return Err("Range start is after its end".to_string());
    }
    Ok(range)
}
