//! Terminal user interface module
//! 
//! This module contains the title selector, the session screen renderer and
//! the key-driven prompts used by the controller and dialogs.

pub mod prompt;
pub mod screen;
pub mod selector;
pub mod terminal;

// Re-export main types
pub use prompt::{CapturePrompter, Prompter};
pub use screen::render_lines;
pub use selector::{open_by_name, select_title, Selection};
pub use terminal::{Render, TerminalGuard, TerminalRenderer};
