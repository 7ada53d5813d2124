//! Published session view consumed by the renderer

use std::time::Instant;

use super::{ClockReading, KeybindMap, Segment, Session};

/// Number of segments shown on screen
pub const RECENT_SEGMENTS: usize = 3;

/// Immutable picture of the session, republished after every command
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    pub title: String,
    pub clock: ClockReading,
    pub personal_best: Option<f64>,
    pub recent_segments: Vec<Segment>,
    pub keybinds: KeybindMap,
    /// Question waiting for a key press
    pub prompt: Option<String>,
    /// Dismissible message from the last operation
    pub notice: Option<String>,
}

impl SessionView {
    pub fn from_session(session: &Session, keybinds: &KeybindMap) -> Self {
        Self {
            title: session.title().to_string(),
            clock: session.stopwatch().reading(),
            personal_best: session.personal_best(),
            recent_segments: session.recent_segments(RECENT_SEGMENTS).to_vec(),
            keybinds: keybinds.clone(),
            prompt: None,
            notice: None,
        }
    }

    /// Elapsed seconds at `now`
    pub fn elapsed_at(&self, now: Instant) -> f64 {
        self.clock.elapsed_at(now).as_secs_f64()
    }
}
