//! State management module
//! 
//! This module contains the session state machine, its persisted records and
//! the channels that connect input, controller and renderer.

pub mod app_state;
pub mod events;
pub mod keybinds;
pub mod session;
pub mod stopwatch;
pub mod title;
pub mod view;

// Re-export main types
pub use app_state::AppState;
pub use events::{Command, InputEvent};
pub use keybinds::{Action, HotkeyTable, KeyId, KeybindMap};
pub use session::{RunRecord, RunSnapshot, Session};
pub use stopwatch::{ClockReading, ClockStatus, Segment, Stopwatch};
pub use title::Title;
pub use view::SessionView;
