// File: ./src/model/record.rs
// Raw rows of the deadline sheet, straight from the CSV export.
use crate::model::date::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One spreadsheet row before any date parsing.
///
/// Column order in the feed: `id, name, registration, notification, tags, link`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub conf_id: String,
    pub conf_name: String,
    pub registration: String,
    pub notification: String,
    /// Semicolon-joined tag list, e.g. `NLP;ML`.
    pub tags: String,
    pub link: Option<String>,
}

impl RawRecord {
    /// Builds a record from already split cells. Missing cells read as empty.
    pub fn from_cells(cells: &[&str]) -> Self {
        let cell = |i: usize| cells.get(i).map(|c| c.to_string()).unwrap_or_default();
        let link = cell(5);
        Self {
            conf_id: cell(0),
            conf_name: cell(1),
            registration: cell(2),
            notification: cell(3),
            tags: cell(4),
            link: if link.is_empty() { None } else { Some(link) },
        }
    }

    /// Parsed `(registration, notification)` dates, or why the row is unusable.
    ///
    /// Id, name and both dates are required and the dates must be well-formed
    /// `DD/MM/YYYY`. The tag column may be empty.
    pub fn checked_dates(&self) -> Result<(NaiveDate, NaiveDate), &'static str> {
        if self.conf_id.is_empty() {
            return Err("missing id");
        }
        if self.conf_name.is_empty() {
            return Err("missing name");
        }
        match (parse_date(&self.registration), parse_date(&self.notification)) {
            (Some(registration), Some(notification)) => Ok((registration, notification)),
            (None, _) => Err("unparsable registration date"),
            (_, None) => Err("unparsable notification date"),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.checked_dates().is_ok()
    }

    /// Splits the tag column on `;`, trimming each tag and skipping blanks.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Trims a cell and strips one leading and one trailing double quote.
fn clean_cell(cell: &str) -> &str {
    let cell = cell.trim();
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    cell.strip_suffix('"').unwrap_or(cell)
}

/// Splits a CSV export into records.
///
/// Blank lines are skipped and the first remaining line is treated as the
/// header. Cells are split on every comma: quoted commas are not supported.
/// Rows are returned as-is; use [`RawRecord::is_valid`] or
/// [`parse_valid_records`] to drop malformed ones.
pub fn parse_feed(csv_text: &str) -> Vec<RawRecord> {
    csv_text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .map(|line| {
            let cells: Vec<&str> = line.split(',').map(clean_cell).collect();
            RawRecord::from_cells(&cells)
        })
        .collect()
}

/// [`parse_feed`] followed by the validity filter.
pub fn parse_valid_records(csv_text: &str) -> Vec<RawRecord> {
    let all = parse_feed(csv_text);
    let total = all.len();
    let valid: Vec<RawRecord> = all
        .into_iter()
        .filter(|record| match record.checked_dates() {
            Ok(_) => true,
            Err(reason) => {
                log_skipped(record, reason);
                false
            }
        })
        .collect();
    if valid.len() != total {
        log::debug!(
            "Dropped {} malformed row(s) out of {}",
            total - valid.len(),
            total
        );
    }
    valid
}

pub(crate) fn log_skipped(record: &RawRecord, reason: &str) {
    log::debug!("Skipping row '{}': {}", record.conf_id, reason);
}
