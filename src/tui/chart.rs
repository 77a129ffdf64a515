// File: ./src/tui/chart.rs
//! Terminal Gantt chart.
//!
//! `TerminalChart` is the TUI's implementation of [`ChartRenderer`]: `draw`
//! swaps in a new set of rows, and the widget below paints them every frame.
//! Scroll is kept in days, zoom in days per column.
use crate::chart::{ChartOptions, ChartRenderer, ChartRow, NO_DATA_ID, SelectCallback};
use crate::color_utils::Rgb;
use crate::model::entry::ROLLOVER_SUFFIX;

use anyhow::{Result, anyhow};
use chrono::{Datelike, Duration, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthChar;

const BAR_DONE: char = '█';
const BAR_TODO: char = '▒';
const TODAY_AXIS: char = '▼';
const TODAY_LINE: char = '│';
const DEP_MARKER: char = '◆';
const NAME_WIDTH: u16 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHandle(pub u64);

#[derive(Debug, Clone)]
pub struct GanttViewport {
    /// Days between the earliest row start and the left edge.
    pub scroll_offset: i64,
    pub days_per_column: f64,
    /// Highlighted row.
    pub cursor: usize,
}

impl Default for GanttViewport {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            days_per_column: 4.0,
            cursor: 0,
        }
    }
}

impl GanttViewport {
    pub fn scroll_left(&mut self, columns: i64) {
        let days = (columns as f64 * self.days_per_column) as i64;
        self.scroll_offset = self.scroll_offset.saturating_sub(days.max(1));
    }

    pub fn scroll_right(&mut self, columns: i64) {
        let days = (columns as f64 * self.days_per_column) as i64;
        self.scroll_offset = self.scroll_offset.saturating_add(days.max(1));
    }

    pub fn zoom_in(&mut self) {
        if self.days_per_column > 0.5 {
            self.days_per_column /= 2.0;
        }
    }

    pub fn zoom_out(&mut self) {
        if self.days_per_column < 32.0 {
            self.days_per_column *= 2.0;
        }
    }

    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if self.cursor + 1 >= total { 0 } else { self.cursor + 1 };
    }

    pub fn select_previous(&mut self, total: usize) {
        if total == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if self.cursor == 0 { total - 1 } else { self.cursor - 1 };
    }

    pub fn clamp_cursor(&mut self, total: usize) {
        if self.cursor >= total {
            self.cursor = total.saturating_sub(1);
        }
    }

    /// Puts `date` in the middle of a bar area `width` columns wide.
    pub fn center_on(&mut self, date: NaiveDate, timeline_start: NaiveDate, width: u16) {
        let days_from_start = (date - timeline_start).num_days();
        let half = (width as f64 / 2.0 * self.days_per_column) as i64;
        self.scroll_offset = days_from_start - half;
    }
}

/// Earliest row start, or a month before `today` when there are no rows.
pub fn timeline_start(rows: &[ChartRow], today: NaiveDate) -> NaiveDate {
    rows.iter()
        .map(|r| r.start_date)
        .min()
        .unwrap_or(today - Duration::days(30))
}

pub struct TerminalChart {
    rows: Vec<ChartRow>,
    options: Option<ChartOptions>,
    generation: u64,
    on_select: Option<(ChartHandle, SelectCallback)>,
    pub viewport: GanttViewport,
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalChart {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            options: None,
            generation: 0,
            on_select: None,
            viewport: GanttViewport::default(),
        }
    }

    /// Terminal charts need no asset download; ready at once.
    pub async fn bootstrap() -> Result<Self> {
        Ok(Self::new())
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    pub fn options(&self) -> Option<&ChartOptions> {
        self.options.as_ref()
    }

    pub fn current_handle(&self) -> Option<ChartHandle> {
        (self.generation > 0).then_some(ChartHandle(self.generation))
    }

    /// Fires the selection callback for `row`. Returns false when nothing
    /// is listening or the row is the "no data" placeholder.
    pub fn select(&self, row: usize) -> bool {
        let Some(target) = self.rows.get(row) else {
            return false;
        };
        if target.id == NO_DATA_ID {
            return false;
        }
        match &self.on_select {
            Some((handle, callback)) if Some(*handle) == self.current_handle() => {
                callback(row);
                true
            }
            _ => false,
        }
    }

    pub fn select_cursor(&self) -> bool {
        self.select(self.viewport.cursor)
    }
}

impl ChartRenderer for TerminalChart {
    type Handle = ChartHandle;

    fn draw(&mut self, rows: &[ChartRow], options: &ChartOptions) -> Result<ChartHandle> {
        if let Some(bad) = rows.iter().find(|r| r.end_date < r.start_date) {
            return Err(anyhow!(
                "row '{}' ends ({}) before it starts ({})",
                bad.id,
                bad.end_date,
                bad.start_date
            ));
        }
        if options.track_height == 0 {
            return Err(anyhow!("track height must be positive"));
        }
        self.rows = rows.to_vec();
        self.options = Some(options.clone());
        self.generation += 1;
        // Callbacks belong to the drawing they were registered on.
        self.on_select = None;
        self.viewport.clamp_cursor(self.rows.len());
        Ok(ChartHandle(self.generation))
    }

    fn on_select(&mut self, handle: ChartHandle, callback: SelectCallback) {
        if Some(handle) == self.current_handle() {
            self.on_select = Some((handle, callback));
        } else {
            log::debug!("Ignoring select callback for stale chart handle {:?}", handle);
        }
    }
}

fn hex_color(hex: &str, fallback: Color) -> Color {
    Rgb::from_hex(hex)
        .map(|Rgb(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(fallback)
}

/// Cuts or pads `s` to exactly `width` terminal columns.
fn fit_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            if used < width {
                out.push('…');
                used += 1;
            }
            break;
        }
        out.push(ch);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}

pub struct GanttWidget<'a> {
    chart: &'a TerminalChart,
    today: NaiveDate,
}

impl<'a> GanttWidget<'a> {
    pub fn new(chart: &'a TerminalChart, today: NaiveDate) -> Self {
        Self { chart, today }
    }

    fn date_to_column_raw(&self, date: NaiveDate, start: NaiveDate) -> i64 {
        let days = (date - start).num_days() - self.chart.viewport.scroll_offset;
        (days as f64 / self.chart.viewport.days_per_column).floor() as i64
    }

    fn column_date(&self, col: u16, start: NaiveDate) -> NaiveDate {
        let days = self.chart.viewport.scroll_offset
            + (col as f64 * self.chart.viewport.days_per_column) as i64;
        start + Duration::days(days)
    }

    fn render_time_axis(&self, area: Rect, buf: &mut Buffer, start: NaiveDate, label: Style) {
        let mut prev_month = None;
        let mut col = 0u16;
        while col < area.width {
            let date = self.column_date(col, start);
            let month = (date.year(), date.month());
            if prev_month != Some(month) {
                let text = date.format("%b %y").to_string();
                if col + text.len() as u16 <= area.width {
                    buf.set_string(area.x + col, area.y, &text, label);
                }
                prev_month = Some(month);
            }
            col += 1;
        }

        let today_col = self.date_to_column_raw(self.today, start);
        for col in 0..area.width {
            let (ch, style) = if col as i64 == today_col {
                (
                    TODAY_AXIS,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ('─', Style::default().fg(Color::DarkGray))
            };
            buf[(area.x + col, area.y + 1)]
                .set_char(ch)
                .set_style(style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_row(
        &self,
        buf: &mut Buffer,
        row: &ChartRow,
        y: u16,
        area: Rect,
        start: NaiveDate,
        is_cursor: bool,
        bar_color: Color,
        arrow_color: Color,
    ) {
        let is_rollover = row.id.ends_with(ROLLOVER_SUFFIX);
        let name_width = NAME_WIDTH.min(area.width / 3);

        if row.dependencies.is_some() {
            buf.set_string(
                area.x,
                y,
                DEP_MARKER.to_string(),
                Style::default().fg(arrow_color),
            );
        }

        let mut name_style = Style::default();
        if is_rollover {
            name_style = name_style.add_modifier(Modifier::ITALIC | Modifier::DIM);
        }
        if is_cursor {
            name_style = name_style
                .add_modifier(Modifier::REVERSED)
                .add_modifier(Modifier::BOLD);
        }
        let name = fit_width(&row.name, name_width.saturating_sub(2) as usize);
        buf.set_string(area.x + 2, y, &name, name_style);

        let bar_x = area.x + name_width + 1;
        let bar_width = area.width.saturating_sub(name_width + 1);
        if bar_width == 0 {
            return;
        }

        let start_col = self.date_to_column_raw(row.start_date, start);
        let end_col = self.date_to_column_raw(row.end_date, start);
        if end_col < 0 || start_col >= bar_width as i64 {
            return;
        }

        let span = (end_col - start_col + 1).max(1);
        let done_cols = (span * row.percent_complete as i64) / 100;

        let mut style = Style::default().fg(bar_color);
        if is_rollover {
            style = style.add_modifier(Modifier::DIM);
        }
        if is_cursor {
            style = style.add_modifier(Modifier::BOLD);
        }

        let first = start_col.max(0);
        let last = end_col.min(bar_width as i64 - 1);
        for col in first..=last {
            let ch = if col - start_col < done_cols {
                BAR_DONE
            } else {
                BAR_TODO
            };
            buf[(bar_x + col as u16, y)].set_char(ch).set_style(style);
        }
    }
}

impl Widget for GanttWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 3 {
            return;
        }

        let options = self.chart.options();
        let label_color = options
            .map(|o| hex_color(&o.label_color, Color::Magenta))
            .unwrap_or(Color::Magenta);
        let arrow_color = options
            .map(|o| hex_color(&o.arrow_color, Color::Red))
            .unwrap_or(Color::Red);

        let rows = self.chart.rows();
        let start = timeline_start(rows, self.today);
        let name_width = NAME_WIDTH.min(area.width / 3);
        let bar_x = area.x + name_width + 1;
        let bar_width = area.width.saturating_sub(name_width + 1);

        self.render_time_axis(
            Rect::new(bar_x, area.y, bar_width, 2),
            buf,
            start,
            Style::default()
                .fg(label_color)
                .add_modifier(Modifier::BOLD),
        );

        let body_height = area.height.saturating_sub(2) as usize;
        let cursor = self.chart.viewport.cursor;
        let first_visible = if body_height == 0 {
            0
        } else {
            cursor.saturating_sub(body_height - 1)
        };

        for (offset, row) in rows.iter().skip(first_visible).take(body_height).enumerate() {
            let index = first_visible + offset;
            self.render_row(
                buf,
                row,
                area.y + 2 + offset as u16,
                area,
                start,
                index == cursor,
                label_color,
                arrow_color,
            );
        }

        let today_col = self.date_to_column_raw(self.today, start);
        if today_col >= 0 && today_col < bar_width as i64 {
            let x = bar_x + today_col as u16;
            for y in (area.y + 2)..(area.y + area.height) {
                let cell = &mut buf[(x, y)];
                if cell.symbol() == " " {
                    cell.set_char(TODAY_LINE)
                        .set_style(Style::default().fg(Color::DarkGray));
                }
            }
        }
    }
}
