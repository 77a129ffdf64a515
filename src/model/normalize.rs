// File: ./src/model/normalize.rs
//! Turns raw sheet rows into timeline entries.
//!
//! Every valid row yields its own entry. Rows whose notification date is
//! today or earlier additionally yield an "anticipated" rollover: the same
//! window moved into the current year, modelling the conference's next
//! likely cycle.
use crate::model::date::with_year_clamped;
use crate::model::entry::{ROLLOVER_SUFFIX, TimelineEntry};
use crate::model::record::{RawRecord, log_skipped};
use chrono::{Datelike, Duration, Local, NaiveDate};

/// Number of whole days between registration and notification, at least 1.
pub fn duration_in_days(registration: NaiveDate, notification: NaiveDate) -> i64 {
    (notification - registration).num_days().max(1)
}

/// Normalizes records against an explicit "today".
pub fn normalize(records: &[RawRecord], today: NaiveDate) -> Vec<TimelineEntry> {
    let mut out = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for record in records {
        let (registration, notification) = match record.checked_dates() {
            Ok(dates) => dates,
            Err(reason) => {
                log_skipped(record, reason);
                skipped += 1;
                continue;
            }
        };

        let duration = duration_in_days(registration, notification);
        let tags = record.tag_list();

        out.push(TimelineEntry {
            conf_id: record.conf_id.clone(),
            conf_name: record.conf_name.clone(),
            registration_date: registration,
            notification_date: notification,
            tags: tags.clone(),
            link: record.link.clone(),
            is_rollover: false,
        });

        // A notification due today counts as already announced.
        if notification <= today {
            let projected_registration = with_year_clamped(registration, today.year());
            let projected_notification = projected_registration + Duration::days(duration);
            out.push(TimelineEntry {
                conf_id: format!("{}{}", record.conf_id, ROLLOVER_SUFFIX),
                conf_name: record.conf_name.clone(),
                registration_date: projected_registration,
                notification_date: projected_notification,
                tags,
                link: record.link.clone(),
                is_rollover: true,
            });
        }
    }

    if skipped > 0 {
        log::debug!("Normalizer dropped {} invalid record(s)", skipped);
    }
    out
}

/// Normalizes records against the local current date.
pub fn normalize_now(records: &[RawRecord]) -> Vec<TimelineEntry> {
    normalize(records, Local::now().date_naive())
}
