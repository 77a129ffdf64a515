// File: ./src/model/entry.rs
use crate::model::date::format_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const ROLLOVER_SUFFIX: &str = "_projected";

/// A conference placed on the timeline: registration opens, notification closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub conf_id: String,
    pub conf_name: String,
    pub registration_date: NaiveDate,
    pub notification_date: NaiveDate,
    pub tags: Vec<String>,
    pub link: Option<String>,
    /// Synthetic next-cycle projection of a conference whose notification is past.
    pub is_rollover: bool,
}

impl TimelineEntry {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn shares_tag_with(&self, other: &TimelineEntry) -> bool {
        self.tags.iter().any(|t| other.has_tag(t))
    }

    /// Label used on chart rows and in lists.
    pub fn display_label(&self) -> String {
        if self.is_rollover {
            format!("{} (Anticipated)", self.conf_id)
        } else {
            self.conf_id.clone()
        }
    }

    /// `DD/MM/YYYY - DD/MM/YYYY`
    pub fn format_span(&self) -> String {
        format!(
            "{} - {}",
            format_date(self.registration_date),
            format_date(self.notification_date)
        )
    }
}
