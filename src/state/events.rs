//! Messages flowing from input sources to the session controller

use super::{Action, KeyId};

/// Translated key press from a key source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Unmodified key, looked up in the hotkey table
    Key(KeyId),
    /// Open the keybind configuration dialog
    Configure,
    /// Ask to clear the segment list
    ClearSegments,
    /// Leave the application
    Quit,
}

/// Work item for the session controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Trigger(Action),
    ClearSegments,
    /// Open the keybind dialog without blocking the controller
    Configure,
    Rebind { action: Action, key: KeyId },
    Quit,
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        Command::Trigger(action)
    }
}
