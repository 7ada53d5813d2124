//! Splitwatch - a terminal speedrun stopwatch
//! 
//! This is the main entry point for the splitwatch application.

use std::{io, sync::Arc};
use tracing::{info, warn};

use splitwatch::{
    config::Config,
    services::{KeybindStore, RunDataStore, TitleRegistry},
    state::{AppState, Session, SessionView},
    tasks::{display_tick_task, session_controller_task, spawn_key_listener, SessionController, Stores, TerminalKeySource},
    ui::{open_by_name, select_title, CapturePrompter, Selection, TerminalGuard, TerminalRenderer},
    utils::{forward_shutdown_signal, init_tracing, shutdown_signals},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    init_tracing(&config.log_file(), config.log_level());

    info!("Starting splitwatch v1.0.0");
    info!("Configuration: data_dir={}, export_dir={}, tick={}ms",
          config.data_dir.display(), config.export_dir().display(), config.tick_ms);

    // Pick the activity before taking over the terminal
    let mut registry = TitleRegistry::open(config.titles_path());
    let title = match &config.title {
        Some(name) => open_by_name(&mut registry, name)?,
        None => match select_title(&mut registry, io::stdin().lock(), io::stdout())? {
            Selection::Open(title) => title,
            Selection::Quit => {
                info!("No title selected, exiting");
                return Ok(());
            }
        },
    };

    let run_data = RunDataStore::new(config.run_data_path());
    let keybind_store = KeybindStore::new(config.keybinds_path());
    let keybinds = keybind_store.load();
    let session = Session::open(title.clone(), run_data.load(&title));

    // Create application state
    let (state, commands) = AppState::new(SessionView::from_session(&session, &keybinds), &keybinds);
    let state = Arc::new(state);

    // Setup graceful shutdown
    let signals = shutdown_signals()?;
    let signals_handle = signals.handle();
    tokio::spawn(forward_shutdown_signal(signals, Arc::clone(&state)));

    let terminal = TerminalGuard::enter()?;

    // Start the display ticker and the key listener
    let ticker = tokio::spawn(display_tick_task(
        Arc::clone(&state),
        config.tick_interval(),
        TerminalRenderer::new(),
    ));
    let listener = spawn_key_listener(TerminalKeySource, Arc::clone(&state))?;

    let controller = SessionController::new(
        Arc::clone(&state),
        session,
        keybinds,
        Stores {
            run_data,
            keybinds: keybind_store,
            export_dir: config.export_dir(),
        },
        CapturePrompter::new(Arc::clone(&state)),
    );
    session_controller_task(controller, commands).await;

    ticker.abort();
    signals_handle.close();
    drop(terminal);

    // The listener notices the closed command queue within one poll interval
    match tokio::task::spawn_blocking(move || listener.join()).await {
        Ok(Ok(())) => {}
        _ => warn!("Key listener did not stop cleanly"),
    }

    info!("Splitwatch shutdown complete after {}", state.get_uptime());
    Ok(())
}
