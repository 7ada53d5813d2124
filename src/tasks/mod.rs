//! Background tasks module
//! 
//! This module contains the session controller, the display ticker, the key
//! listener thread and the keybind dialog.

pub mod controller;
pub mod hotkey_listener;
pub mod keybind_config;
pub mod ticker;

// Re-export main functions
pub use controller::{session_controller_task, SessionController, Stores};
pub use hotkey_listener::{spawn_key_listener, KeySource, TerminalKeySource};
pub use keybind_config::keybind_dialog;
pub use ticker::display_tick_task;
