// File: ./src/tui/network.rs
// Background feed loading for the TUI.
use crate::client::FeedClient;
use crate::loader;
use crate::tui::action::{Action, AppEvent};
use crate::tui::chart::TerminalChart;
use tokio::sync::mpsc::{Receiver, Sender};

pub async fn run_network_actor(
    client: FeedClient,
    url: String,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    // 1. Initial load: renderer and feed together
    let _ = event_tx
        .send(AppEvent::Status("Loading conferences...".to_string()))
        .await;

    match loader::initialize(TerminalChart::bootstrap(), &client, &url).await {
        Ok(loaded) => {
            let count = loaded.records.len();
            let _ = event_tx
                .send(AppEvent::Initialized {
                    chart: loaded.renderer,
                    records: loaded.records,
                })
                .await;
            let _ = event_tx
                .send(AppEvent::Status(format!("Ready. {} conferences.", count)))
                .await;
        }
        Err(e) => {
            log::error!("Initial load failed: {:#}", e);
            let _ = event_tx.send(AppEvent::Error(format!("{:#}", e))).await;
        }
    }

    // 2. Action loop
    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,
            Action::Refresh => {
                let _ = event_tx
                    .send(AppEvent::Status("Reloading...".to_string()))
                    .await;
                match client.load_records(&url).await {
                    Ok(records) => {
                        let count = records.len();
                        let _ = event_tx.send(AppEvent::RecordsLoaded(records)).await;
                        let _ = event_tx
                            .send(AppEvent::Status(format!("Ready. {} conferences.", count)))
                            .await;
                    }
                    Err(e) => {
                        log::error!("Reload failed: {:#}", e);
                        let _ = event_tx.send(AppEvent::Error(format!("{:#}", e))).await;
                    }
                }
            }
        }
    }
}
