//! Splitwatch - a terminal speedrun stopwatch
//! 
//! This library provides the stopwatch session state machine, segment and
//! personal-best bookkeeping, JSON persistence for titles, run records and
//! keybinds, and the plain-text run export.

pub mod config;
pub mod error;
pub mod state;
pub mod services;
pub mod tasks;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ExportError, PersistenceError, TitleError, ValidationError};
pub use state::{AppState, Session};
pub use services::TitleRegistry;
