// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod chart;
pub mod handlers;
pub mod network;
pub mod state;
pub mod view;

use crate::client::FeedClient;
use crate::config::Config;
use crate::context::SharedContext;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use tokio::sync::mpsc;

pub async fn run(ctx: SharedContext, cfg: Config) -> Result<()> {
    // Panic Hook: put the terminal back before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        log::error!("PANIC: {}", info);
        default_hook(info);
    }));

    let client = FeedClient::new(cfg.allow_insecure_certs)?;
    let url = cfg.feed_url.clone();

    // --- 1. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 2. STATE INIT ---
    let (select_tx, mut select_rx) = mpsc::unbounded_channel();
    let mut app_state = AppState::new_with_ctx(ctx, cfg, select_tx);

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- 3. NETWORK TASK ---
    tokio::spawn(network::run_network_actor(client, url, action_rx, event_tx));

    // --- 4. UI LOOP ---
    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        // A. Network Events
        if let Ok(event) = event_rx.try_recv() {
            handlers::handle_app_event(&mut app_state, event);
        }

        // B. Chart selections
        while let Ok(row) = select_rx.try_recv() {
            app_state.select_row(row);
        }

        // C. Input Events
        if crossterm::event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Resize(_, _) => app_state.refresh_view(),
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }
                    if let Some(action) = handlers::handle_key_event(key, &mut app_state) {
                        if action == Action::Quit {
                            let _ = action_tx.send(Action::Quit).await;
                            break;
                        }
                        let _ = action_tx.send(action).await;
                    }
                }
                _ => {}
            }
        }
    }

    // --- 5. CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
