//! Keybind configuration dialog
//!
//! Runs as its own task so waiting for a key only blocks the dialog; the
//! chosen binding is handed back to the controller as a rebind command.

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    state::{Action, AppState, Command, InputEvent},
    ui::Prompter,
};

/// Ask which action to rebind, read its new key and post the rebind
pub async fn keybind_dialog<P: Prompter>(state: Arc<AppState>, prompter: P) {
    info!("Opening keybind configuration");
    let keybinds = state.view().keybinds;

    let menu = format!(
        "Rebind: 1) Start/Pause [{}]  2) Split [{}]  3) Reset [{}]  (any other key closes)",
        keybinds.start_pause, keybinds.split, keybinds.reset
    );
    let action = match prompter.read_key(&menu).await {
        Some(InputEvent::Key(key)) => match key.as_str() {
            "1" => Action::StartPause,
            "2" => Action::Split,
            "3" => Action::Reset,
            _ => {
                info!("Keybind configuration closed");
                return;
            }
        },
        _ => {
            info!("Keybind configuration closed");
            return;
        }
    };

    let key = match prompter.read_key(&format!("Press any key for {}...", action)).await {
        Some(InputEvent::Key(key)) => key,
        _ => {
            info!("Rebinding {} cancelled", action);
            return;
        }
    };

    if let Err(e) = state.send(Command::Rebind { action, key }) {
        warn!("Failed to submit rebind: {}", e);
    }
}
