// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::chart::{ChartOptions, ChartRenderer, entry_for_row};
use crate::config::Config;
use crate::context::AppContext;
use crate::filter::{DateRange, FilterOptions, collect_tags};
use crate::model::{RawRecord, TimelineEntry};
use crate::resubmission::{possible_resubmissions, shared_tags};
use crate::timeline::{TimelineView, build_view};
use crate::tui::chart::{TerminalChart, timeline_start};

use chrono::{Local, NaiveDate};
use ratatui::widgets::ListState;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Focus {
    Sidebar,
    Main,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    EditingRange,
}

pub struct AppState {
    // Data
    pub ctx: Arc<dyn AppContext>,
    pub config: Config,
    pub records: Vec<RawRecord>,
    pub view: TimelineView,
    pub today: NaiveDate,

    // Chart
    pub chart: Option<TerminalChart>,
    pub chart_error: Option<String>,
    pub load_error: Option<String>,
    /// Width of the bar area at the last frame, for centering on today.
    pub chart_area_width: u16,
    select_tx: UnboundedSender<usize>,

    // Filter State
    pub range: DateRange,
    pub selected_tags: HashSet<String>,
    pub cached_tags: Vec<(String, usize)>,

    // UI State
    pub tag_state: ListState,
    pub active_focus: Focus,
    pub mode: InputMode,
    pub message: String,
    pub loading: bool,
    pub selected_entry: Option<TimelineEntry>,
    pub show_resubmissions: bool,
    pub show_full_help: bool,

    // Input Buffers
    pub input_buffer: String,
    pub cursor_position: usize,
}

impl AppState {
    /// `select_tx` receives row indices clicked on the chart.
    pub fn new_with_ctx(
        ctx: Arc<dyn AppContext>,
        config: Config,
        select_tx: UnboundedSender<usize>,
    ) -> Self {
        let today = Local::now().date_naive();
        let range = DateRange::default_window(today, config.default_range_months);
        let mut tag_state = ListState::default();
        tag_state.select(Some(0));

        Self {
            ctx,
            config,
            records: vec![],
            view: TimelineView::default(),
            today,
            chart: None,
            chart_error: None,
            load_error: None,
            chart_area_width: 0,
            select_tx,
            range,
            selected_tags: HashSet::new(),
            cached_tags: vec![],
            tag_state,
            active_focus: Focus::Main,
            mode: InputMode::Normal,
            message: "Loading...".to_string(),
            loading: true,
            selected_entry: None,
            show_resubmissions: false,
            show_full_help: false,
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn set_records(&mut self, records: Vec<RawRecord>) {
        self.records = records;
        self.loading = false;
        self.load_error = None;
        self.refresh_view();
    }

    pub fn attach_chart(&mut self, mut chart: TerminalChart) {
        if let Some(old) = self.chart.take() {
            chart.viewport = old.viewport;
        }
        self.chart = Some(chart);
        self.redraw_chart();
    }

    /// Recomputes everything derived from records and filters, then redraws.
    pub fn refresh_view(&mut self) {
        let options = FilterOptions {
            range: self.range,
            selected_tags: &self.selected_tags,
        };
        self.view = build_view(&self.records, &options, self.today);
        self.cached_tags = collect_tags(&self.view.all_entries);

        let len = self.cached_tags.len();
        match self.tag_state.selected() {
            Some(i) if i >= len => self.tag_state.select(Some(len.saturating_sub(1))),
            None => self.tag_state.select(Some(0)),
            _ => {}
        }

        if let Some(selected) = &self.selected_entry
            && !self.view.entries.iter().any(|e| e.conf_id == selected.conf_id)
        {
            self.selected_entry = None;
        }

        self.redraw_chart();
    }

    fn redraw_chart(&mut self) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        let options = ChartOptions::for_rows(self.view.rows.len(), &self.config.chart);
        match chart.draw(&self.view.rows, &options) {
            Ok(handle) => {
                let tx = self.select_tx.clone();
                chart.on_select(
                    handle,
                    Box::new(move |row| {
                        let _ = tx.send(row);
                    }),
                );
                self.chart_error = None;
            }
            Err(e) => {
                log::error!("Chart draw failed: {:#}", e);
                self.chart_error = Some(format!("{:#}", e));
            }
        }
    }

    /// Called with a row index coming back from the chart.
    pub fn select_row(&mut self, row: usize) {
        self.selected_entry = entry_for_row(&self.view.entries, row).cloned();
        self.show_resubmissions = false;
        if let Some(entry) = &self.selected_entry {
            self.message = format!("Selected {}", entry.display_label());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_entry = None;
        self.show_resubmissions = false;
    }

    /// Candidates for the selected entry with the tags each one shares.
    pub fn resubmissions(&self) -> Vec<(&TimelineEntry, Vec<&str>)> {
        let Some(target) = &self.selected_entry else {
            return vec![];
        };
        possible_resubmissions(target, &self.view.entries)
            .into_iter()
            .map(|c| (c, shared_tags(target, c)))
            .collect()
    }

    pub fn get_selected_tag(&self) -> Option<&str> {
        let idx = self.tag_state.selected()?;
        self.cached_tags.get(idx).map(|(t, _)| t.as_str())
    }

    pub fn toggle_selected_tag(&mut self) {
        let Some(tag) = self.get_selected_tag().map(str::to_string) else {
            return;
        };
        if !self.selected_tags.remove(&tag) {
            self.selected_tags.insert(tag);
        }
        self.refresh_view();
    }

    pub fn clear_tags(&mut self) {
        if self.selected_tags.is_empty() {
            return;
        }
        self.selected_tags.clear();
        self.refresh_view();
    }

    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.refresh_view();
        self.message = format!("Range: {}", self.range);
    }

    pub fn reset_range(&mut self) {
        self.set_range(DateRange::default_window(
            self.today,
            self.config.default_range_months,
        ));
    }

    pub fn show_all_dates(&mut self) {
        self.set_range(DateRange::unbounded());
    }

    pub fn center_on_today(&mut self) {
        let today = self.today;
        let width = self.chart_area_width;
        if let Some(chart) = self.chart.as_mut() {
            let start = timeline_start(chart.rows(), today);
            chart.viewport.center_on(today, start, width);
        }
    }

    // --- Range input ---
    pub fn start_range_edit(&mut self) {
        let side = |d: Option<NaiveDate>| d.map(crate::model::format_date).unwrap_or_default();
        self.input_buffer = format!("{} - {}", side(self.range.from), side(self.range.to));
        self.cursor_position = self.input_buffer.chars().count();
        self.mode = InputMode::EditingRange;
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    // --- Navigation ---
    pub fn next(&mut self) {
        match self.active_focus {
            Focus::Main => {
                let total = self.view.rows.len();
                if let Some(chart) = self.chart.as_mut() {
                    chart.viewport.select_next(total);
                }
            }
            Focus::Sidebar => {
                let len = self.cached_tags.len();
                if len == 0 {
                    return;
                }
                let i = match self.tag_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                };
                self.tag_state.select(Some(i));
            }
        }
    }

    pub fn previous(&mut self) {
        match self.active_focus {
            Focus::Main => {
                let total = self.view.rows.len();
                if let Some(chart) = self.chart.as_mut() {
                    chart.viewport.select_previous(total);
                }
            }
            Focus::Sidebar => {
                let len = self.cached_tags.len();
                if len == 0 {
                    return;
                }
                let i = match self.tag_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.tag_state.select(Some(i));
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.active_focus = match self.active_focus {
            Focus::Main => Focus::Sidebar,
            Focus::Sidebar => Focus::Main,
        }
    }
}
