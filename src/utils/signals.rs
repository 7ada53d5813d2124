//! Signal handling for graceful shutdown

use std::{io, sync::Arc};
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{debug, info};

use crate::state::{AppState, Command};

/// Register for SIGTERM, SIGINT and SIGHUP
pub fn shutdown_signals() -> io::Result<Signals> {
    Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGHUP,
    ])
}

/// Turn shutdown signals into a quit command, so the controller still
/// performs its closing save. Open prompts are cancelled on every signal.
pub async fn forward_shutdown_signal(mut signals: Signals, state: Arc<AppState>) {
    while let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
        state.begin_shutdown();
        if let Err(e) = state.send(Command::Quit) {
            debug!("{}", e);
        }
    }
}
