//! Persistence and export services
//! 
//! This module contains the JSON-backed stores (titles, run data, keybinds)
//! and the plain-text run export.

pub mod export;
pub mod json_store;
pub mod keybinds;
pub mod run_data;
pub mod titles;

// Re-export main types
pub use export::{default_destination, export_run};
pub use keybinds::KeybindStore;
pub use run_data::RunDataStore;
pub use titles::TitleRegistry;
