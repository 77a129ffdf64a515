// File: ./src/tui/action.rs
// Actions sent to the network actor and events sent back to the UI loop.
use crate::model::RawRecord;
use crate::tui::chart::TerminalChart;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Quit,
}

pub enum AppEvent {
    /// First load finished: the chart is ready and the feed is parsed.
    Initialized {
        chart: TerminalChart,
        records: Vec<RawRecord>,
    },
    RecordsLoaded(Vec<RawRecord>),
    Error(String),
    Status(String),
}
