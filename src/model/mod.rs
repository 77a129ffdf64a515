// File: ./src/model/mod.rs
pub mod date;
pub mod entry;
pub mod normalize;
pub mod record;

pub use date::{format_date, parse_date};
pub use entry::TimelineEntry;
pub use normalize::{normalize, normalize_now};
pub use record::{RawRecord, parse_feed, parse_valid_records};
