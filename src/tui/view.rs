// File: src/tui/view.rs
use crate::color_utils::Rgb;
use crate::model::{TimelineEntry, format_date};
use crate::tui::chart::GanttWidget;
use crate::tui::state::{AppState, Focus, InputMode};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

fn tag_span(tag: &str) -> Span<'static> {
    let color = Rgb::for_tag(tag);
    let fg = if color.is_dark() {
        Color::White
    } else {
        Color::Black
    };
    let Rgb(r, g, b) = color;
    Span::styled(
        format!(" {} ", tag),
        Style::default().bg(Color::Rgb(r, g, b)).fg(fg),
    )
}

fn anticipated_badge() -> Span<'static> {
    Span::styled(
        " Anticipated ",
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
}

fn detail_lines(state: &AppState, entry: &TimelineEntry) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut title = vec![Span::styled(
        entry.conf_name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if entry.is_rollover {
        title.push(Span::raw(" "));
        title.push(anticipated_badge());
    }
    lines.push(Line::from(title));

    let mut tags = vec![Span::raw("Tags: ")];
    for tag in &entry.tags {
        tags.push(tag_span(tag));
        tags.push(Span::raw(" "));
    }
    lines.push(Line::from(tags));

    if let Some(link) = &entry.link {
        lines.push(Line::from(vec![
            Span::raw("Link: "),
            Span::styled(link.clone(), Style::default().fg(Color::LightBlue)),
        ]));
    }
    lines.push(Line::from(format!(
        "Registration: {}   Notification: {}",
        format_date(entry.registration_date),
        format_date(entry.notification_date)
    )));

    let candidates = state.resubmissions();
    let marker = if state.show_resubmissions { "▾" } else { "▸" };
    lines.push(Line::from(Span::styled(
        format!("{} Possible resubmissions ({})  [p]", marker, candidates.len()),
        Style::default().fg(Color::Cyan),
    )));

    if state.show_resubmissions {
        if candidates.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No later conference shares a tag.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (candidate, shared) in candidates {
            let mut spans = vec![Span::raw("  "), Span::raw(candidate.conf_name.clone())];
            if candidate.is_rollover {
                spans.push(Span::raw(" "));
                spans.push(anticipated_badge());
            }
            spans.push(Span::styled(
                format!("  {}  ", candidate.format_span()),
                Style::default().fg(Color::DarkGray),
            ));
            for tag in shared {
                spans.push(tag_span(tag));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}

fn help_lines() -> Vec<Line<'static>> {
    let section = |name: &'static str, color: Color, keys: &'static str| {
        Line::from(vec![
            Span::styled(
                name,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(keys),
        ])
    };
    vec![
        section(" GLOBAL ", Color::Cyan, " Tab:Switch Focus  ?:Toggle Help  r:Reload  q:Quit"),
        section(" NAVIGATION ", Color::Yellow, " j/k:Up/Down  h/l:Scroll  +/-:Zoom  t:Today"),
        section(" CHART ", Color::Green, " Enter:Details  p:Resubmissions  Esc:Close Details"),
        section(
            " FILTER ",
            Color::Blue,
            " /:Edit Range  D:Default Range  A:All Dates  Space:Toggle Tag  *:All Tags",
        ),
    ]
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let full_help = help_lines();
    let footer_height = if state.show_full_help {
        Constraint::Length(full_help.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), footer_height])
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20), Constraint::Percentage(80)])
        .split(v_chunks[0]);

    // --- Details height ---
    let details = state
        .selected_entry
        .as_ref()
        .map(|entry| detail_lines(state, entry));
    let details_height = details
        .as_ref()
        .map(|l| (l.len() as u16 + 2).clamp(3, v_chunks[0].height / 2))
        .unwrap_or(0);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(details_height)])
        .split(h_chunks[1]);

    // --- Sidebar ---
    draw_sidebar(f, state, h_chunks[0]);

    // --- Chart ---
    draw_chart(f, state, main_chunks[0]);

    // --- Details ---
    if let Some(lines) = details {
        let p = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Details "))
            .wrap(Wrap { trim: false });
        f.render_widget(p, main_chunks[1]);
    }

    // --- Footer ---
    draw_footer(f, state, v_chunks[1], full_help);
}

fn draw_sidebar(f: &mut Frame, state: &mut AppState, area: Rect) {
    let sidebar_style = if state.active_focus == Focus::Sidebar {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = state
        .cached_tags
        .iter()
        .map(|(tag, count)| {
            let selected = if state.selected_tags.contains(tag) {
                "[x]"
            } else {
                "[ ]"
            };
            let Rgb(r, g, b) = Rgb::for_tag(tag);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", selected)),
                Span::styled("#", Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(format!("{} ({})", tag, count)),
            ]))
        })
        .collect();

    let title = if state.selected_tags.is_empty() {
        " Tags (all) ".to_string()
    } else {
        format!(" Tags ({}) ", state.selected_tags.len())
    };

    let sidebar = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(sidebar_style),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(sidebar, area, &mut state.tag_state);
}

fn draw_chart(f: &mut Frame, state: &mut AppState, area: Rect) {
    let border_style = if state.active_focus == Focus::Main {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let range_label = if state.range.is_unbounded() {
        "(all dates)".to_string()
    } else {
        state.range.to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Deadlines {} ", range_label))
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let notice = |text: String, color: Color| {
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
    };

    if let Some(err) = &state.load_error {
        f.render_widget(
            notice(format!("Failed to load conferences: {}", err), Color::Red),
            inner,
        );
        return;
    }
    if let Some(err) = &state.chart_error {
        f.render_widget(
            notice(format!("Error displaying chart: {}", err), Color::Red),
            inner,
        );
        return;
    }
    let Some(chart) = state.chart.as_ref() else {
        f.render_widget(
            notice("Loading conferences...".to_string(), Color::DarkGray),
            inner,
        );
        return;
    };

    // Name column takes a third at most; the rest is bars.
    state.chart_area_width = inner.width.saturating_sub((inner.width / 3).min(26) + 1);
    f.render_widget(GanttWidget::new(chart, state.today), inner);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect, full_help: Vec<Line<'static>>) {
    if state.mode == InputMode::EditingRange {
        let input = Paragraph::new(state.input_buffer.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Date range (DD/MM/YYYY - DD/MM/YYYY, Enter to apply, Esc to cancel) ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(input, area);
        f.set_cursor_position((area.x + 1 + state.cursor_position as u16, area.y + 1));
        return;
    }

    if state.show_full_help {
        let help = Paragraph::new(full_help).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", state.message)),
        );
        f.render_widget(help, area);
        return;
    }

    let status_style = if state.message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if state.loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(state.message.clone(), status_style),
        Span::styled(
            "  |  ?:Help  /:Range  Enter:Details  r:Reload  q:Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
