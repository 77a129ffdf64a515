// File: ./src/timeline.rs
// Full recomputation from raw records to chart rows.
use crate::chart::{ChartRow, build_rows};
use crate::filter::{FilterOptions, filter_entries};
use crate::model::{RawRecord, TimelineEntry, normalize};
use crate::resubmission::{DependencyEdge, dependency_edges};
use chrono::NaiveDate;

/// Everything a renderer needs for one drawing.
#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    /// All normalized entries, before filtering. Feeds the tag selector.
    pub all_entries: Vec<TimelineEntry>,
    /// Filtered entries sorted by registration; row `i` is `entries[i]`.
    pub entries: Vec<TimelineEntry>,
    pub edges: Vec<DependencyEdge>,
    pub rows: Vec<ChartRow>,
}

impl TimelineView {
    /// No entry survived filtering. This is a normal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn build_view(records: &[RawRecord], options: &FilterOptions, today: NaiveDate) -> TimelineView {
    let all_entries = normalize(records, today);
    let entries = filter_entries(&all_entries, options);
    let edges = dependency_edges(&entries);
    let rows = build_rows(&entries, &edges, today);
    log::debug!(
        "Timeline rebuilt: {} record(s), {} entr(ies) after filtering, {} edge(s)",
        records.len(),
        entries.len(),
        edges.len()
    );
    TimelineView {
        all_entries,
        entries,
        edges,
        rows,
    }
}
