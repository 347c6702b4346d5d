mod app;
mod event;
mod ui;

use std::io::{stdout, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::controller::{AgentListController, RefreshToken};
use crate::fetch::CatalogFetcher;
use crate::options;
use crate::prefs::Preferences;
use crate::rank::RankedRow;
use app::App;

pub async fn run() -> Result<()> {
    let options = options::load_options()?;
    let prefs = Preferences::load().unwrap_or_default();

    let mut controller = AgentListController::new(Arc::new(CatalogFetcher::new()));
    let mut app = App::new(options, prefs);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    controller: &mut AgentListController,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<(RefreshToken, Vec<RankedRow>)>();

    loop {
        if app.take_needs_refresh() {
            spawn_refresh(app, controller, &tx);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        // Apply finished fetches; stale tokens are dropped by the controller.
        while let Ok((token, rows)) = rx.try_recv() {
            controller.complete(token, rows, app);
        }

        if let Some(msg) = event::handle_events()? {
            if !app.update(msg) {
                return Ok(());
            }
        }
    }
}

/// Kick off a refresh for the current selection without blocking the event
/// loop; the completion comes back over the channel.
fn spawn_refresh(
    app: &mut App,
    controller: &mut AgentListController,
    tx: &mpsc::UnboundedSender<(RefreshToken, Vec<RankedRow>)>,
) {
    let selection = app.selection();
    let (token, rows) = controller.begin_detached(&selection, app);
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send((token, rows.await));
    });
}
