// File: src/tui/handlers.rs
// Handles keyboard input and background events for the TUI.
use crate::filter::parse_range;
use crate::tui::action::{Action, AppEvent};
use crate::tui::chart::TerminalChart;
use crate::tui::state::{AppState, Focus, InputMode};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};

/// Columns moved per horizontal scroll step.
const SCROLL_STEP: i64 = 8;

pub fn handle_app_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Status(s) => state.message = s,
        AppEvent::Error(s) => {
            state.message = format!("Error: {}", s);
            state.loading = false;
            // Without data the error replaces the chart; with data it is only a status.
            if state.records.is_empty() {
                state.load_error = Some(s);
            }
        }
        AppEvent::Initialized { chart, records } => {
            state.today = Local::now().date_naive();
            state.attach_chart(chart);
            state.set_records(records);
            state.center_on_today();
        }
        AppEvent::RecordsLoaded(records) => {
            state.today = Local::now().date_naive();
            if state.chart.is_none() {
                state.attach_chart(TerminalChart::new());
            }
            state.set_records(records);
        }
    }
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match state.mode {
        InputMode::EditingRange => {
            handle_range_input(key, state);
            None
        }
        InputMode::Normal => handle_normal_key(key, state),
    }
}

fn handle_range_input(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter => match parse_range(&state.input_buffer) {
            Ok(range) => {
                state.mode = InputMode::Normal;
                state.reset_input();
                state.set_range(range);
            }
            Err(e) => state.message = e,
        },
        KeyCode::Esc => {
            state.mode = InputMode::Normal;
            state.reset_input();
            state.message = "Range unchanged.".to_string();
        }
        KeyCode::Char(c) => state.enter_char(c),
        KeyCode::Backspace => state.delete_char(),
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        _ => {}
    }
}

fn handle_normal_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('r') => return Some(Action::Refresh),
        KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
        KeyCode::Tab => state.toggle_focus(),
        KeyCode::Down | KeyCode::Char('j') => state.next(),
        KeyCode::Up | KeyCode::Char('k') => state.previous(),
        KeyCode::Left | KeyCode::Char('h') => {
            if let Some(chart) = state.chart.as_mut() {
                chart.viewport.scroll_left(SCROLL_STEP);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if let Some(chart) = state.chart.as_mut() {
                chart.viewport.scroll_right(SCROLL_STEP);
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(chart) = state.chart.as_mut() {
                chart.viewport.zoom_in();
            }
        }
        KeyCode::Char('-') => {
            if let Some(chart) = state.chart.as_mut() {
                chart.viewport.zoom_out();
            }
        }
        KeyCode::Char('t') => state.center_on_today(),
        KeyCode::Enter | KeyCode::Char(' ') => match state.active_focus {
            Focus::Sidebar => state.toggle_selected_tag(),
            Focus::Main => {
                // The chart reports the row back through its select callback.
                let fired = state.chart.as_ref().is_some_and(|c| c.select_cursor());
                if !fired {
                    state.clear_selection();
                }
            }
        },
        KeyCode::Char('*') => state.clear_tags(),
        KeyCode::Char('/') => state.start_range_edit(),
        KeyCode::Char('D') => state.reset_range(),
        KeyCode::Char('A') => state.show_all_dates(),
        KeyCode::Char('p') => {
            if state.selected_entry.is_some() {
                state.show_resubmissions = !state.show_resubmissions;
            }
        }
        KeyCode::Esc => state.clear_selection(),
        _ => {}
    }
    None
}
