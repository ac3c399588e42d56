// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod network;
pub mod state;
pub mod view;

use crate::client::ApiClient;
use crate::config::Config;
use crate::store::ViewState;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use tokio::sync::mpsc;

pub async fn run(config: Config) -> Result<()> {
    let client = ApiClient::from_config(&config)?;
    log::info!("starting dashboard against {}", client.base_url());

    // Panic hook: give the terminal back before the default handler prints,
    // otherwise the panic message lands in a raw-mode alternate screen.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        log::error!("panic: {}", info);
        default_hook(info);
    }));

    // --- TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- STATE INIT ---
    let mut view = ViewState::new(chrono::Local::now().date_naive());
    view.selected_scope = config.default_scope.clone();
    let mut app_state = AppState::new(view);

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- NETWORK ACTOR ---
    tokio::spawn(network::run_network_actor(client, action_rx, event_tx));

    let result = event_loop(&mut terminal, &mut app_state, &action_tx, &mut event_rx).await;

    // --- CLEANUP (runs on the error path too) ---
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState,
    action_tx: &mpsc::Sender<Action>,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app_state))?;

        // Drain pending network events before the next frame.
        while let Ok(ev) = event_rx.try_recv() {
            if let Some(act) = handlers::handle_app_event(app_state, ev) {
                let _ = action_tx.send(act).await;
            }
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Filter out KeyRelease events to prevent double input on Windows
            if key.kind == event::KeyEventKind::Release {
                continue;
            }
            if let Some(act) = handlers::handle_key_event(key, app_state) {
                let quit = matches!(act, Action::Quit);
                let _ = action_tx.send(act).await;
                if quit {
                    return Ok(());
                }
            }
        }
    }
}
