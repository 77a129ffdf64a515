// File: ./src/chart.rs
//! Gantt chart rows and the renderer seam.
//!
//! The chart itself is drawn by an external widget (a terminal Gantt in the
//! TUI, a web chart fed by `confline export`). This module turns filtered
//! entries and dependency edges into the widget's row format and defines the
//! small interface every renderer implements.
use crate::config::ChartConfig;
use crate::model::TimelineEntry;
use crate::resubmission::DependencyEdge;
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

pub const NO_DATA_ID: &str = "no_data";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub percent_complete: u8,
    /// Comma-joined ids of the rows pointing at this one.
    pub dependencies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub height: u32,
    pub track_height: u32,
    pub critical_path_enabled: bool,
    pub label_color: String,
    pub arrow_color: String,
    pub background_color: String,
}

impl ChartOptions {
    pub fn for_rows(row_count: usize, cfg: &ChartConfig) -> Self {
        let height = (row_count as u32)
            .saturating_mul(cfg.row_height)
            .max(cfg.min_height);
        Self {
            height,
            track_height: cfg.track_height,
            critical_path_enabled: false,
            label_color: cfg.label_color.clone(),
            arrow_color: cfg.arrow_color.clone(),
            background_color: cfg.background_color.clone(),
        }
    }
}

/// Merges edges into `to -> "from1,from2"`, keeping edge order.
pub fn dependency_map(edges: &[DependencyEdge]) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    for edge in edges {
        map.entry(edge.to.clone())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&edge.from);
            })
            .or_insert_with(|| edge.from.clone());
    }
    map
}

/// Share of the `[start, end]` window already elapsed at `today`, in percent.
pub fn percent_complete(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> u8 {
    if today > end {
        return 100;
    }
    if start <= today && today <= end {
        let total = (end - start).num_days();
        if total <= 0 {
            return 100;
        }
        let remaining = (end - today).num_days();
        let ratio = 1.0 - remaining as f64 / total as f64;
        return (ratio * 100.0).round().clamp(0.0, 100.0) as u8;
    }
    0
}

/// Render-time window: the end is pushed one day past the start when the
/// sheet has it on or before the start.
pub fn render_window(entry: &TimelineEntry) -> (NaiveDate, NaiveDate) {
    let start = entry.registration_date;
    let mut end = entry.notification_date;
    if start >= end {
        log::warn!(
            "'{}' notification is not after registration, bumping by one day",
            entry.conf_id
        );
        end = start + Duration::days(1);
    }
    (start, end)
}

/// Builds one row per entry, or the placeholder row when there is nothing to show.
pub fn build_rows(
    entries: &[TimelineEntry],
    edges: &[DependencyEdge],
    today: NaiveDate,
) -> Vec<ChartRow> {
    if entries.is_empty() {
        return vec![placeholder_row(today)];
    }

    let deps = dependency_map(edges);
    entries
        .iter()
        .map(|entry| {
            let (start, end) = render_window(entry);
            ChartRow {
                id: entry.conf_id.clone(),
                name: entry.display_label(),
                start_date: start,
                end_date: end,
                duration_days: (end - start).num_days().max(1),
                percent_complete: percent_complete(start, end, today),
                dependencies: deps.get(&entry.conf_id).cloned(),
            }
        })
        .collect()
}

pub fn placeholder_row(today: NaiveDate) -> ChartRow {
    ChartRow {
        id: NO_DATA_ID.to_string(),
        name: "No conferences found".to_string(),
        start_date: today,
        end_date: today + Duration::days(30),
        duration_days: 30,
        percent_complete: 0,
        dependencies: None,
    }
}

/// Maps a row index reported by a renderer back to its entry.
///
/// The placeholder row has no entry behind it.
pub fn entry_for_row(entries: &[TimelineEntry], row: usize) -> Option<&TimelineEntry> {
    entries.get(row)
}

pub type SelectCallback = Box<dyn Fn(usize) + Send + Sync>;

/// A chart widget the core can draw into.
///
/// `draw` replaces whatever the renderer showed before and hands back a
/// handle; `on_select` registers a callback receiving the selected row index
/// for that drawing.
pub trait ChartRenderer {
    type Handle: Copy + Eq + std::fmt::Debug;

    fn draw(&mut self, rows: &[ChartRow], options: &ChartOptions) -> Result<Self::Handle>;

    fn on_select(&mut self, handle: Self::Handle, callback: SelectCallback);
}

#[derive(Serialize)]
struct ChartDocument<'a> {
    rows: &'a [ChartRow],
    options: &'a ChartOptions,
    edges: &'a [DependencyEdge],
}

/// Writes drawings as JSON documents for an external chart widget.
pub struct JsonChart<W: Write> {
    out: W,
    edges: Vec<DependencyEdge>,
    drawn: u32,
}

impl<W: Write> JsonChart<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            edges: Vec::new(),
            drawn: 0,
        }
    }

    /// Edges to include next to the rows on the next `draw`.
    pub fn set_edges(&mut self, edges: Vec<DependencyEdge>) {
        self.edges = edges;
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for JsonChart<W> {
    type Handle = u32;

    fn draw(&mut self, rows: &[ChartRow], options: &ChartOptions) -> Result<u32> {
        let doc = ChartDocument {
            rows,
            options,
            edges: &self.edges,
        };
        serde_json::to_writer_pretty(&mut self.out, &doc)?;
        writeln!(self.out)?;
        self.drawn += 1;
        Ok(self.drawn)
    }

    // A static document has nobody to click on it.
    fn on_select(&mut self, _handle: u32, _callback: SelectCallback) {}
}
