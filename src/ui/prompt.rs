//! Key-driven prompts
//!
//! Prompts are shown through the published view and answered by arming the
//! key capture slot, so they work for both the controller and dialog tasks.

use std::sync::Arc;
use async_trait::async_trait;
use tracing::debug;

use crate::state::{AppState, InputEvent};

/// User interaction needed by the controller and the keybind dialog
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question; anything but `y` is a no
    async fn confirm(&self, question: &str) -> bool;

    /// Show `message` and wait for the next key. `None` if the wait was cancelled.
    async fn read_key(&self, message: &str) -> Option<InputEvent>;

    /// Show a dismissible message
    fn notify(&self, message: &str);
}

/// Prompter answering through the key listener's capture slot
#[derive(Debug, Clone)]
pub struct CapturePrompter {
    state: Arc<AppState>,
}

impl CapturePrompter {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Prompter for CapturePrompter {
    async fn confirm(&self, question: &str) -> bool {
        let answer = self.read_key(&format!("{} [y/n]", question)).await;
        let accepted = matches!(&answer, Some(InputEvent::Key(key)) if key.as_str() == "y");
        debug!("Prompt \"{}\" answered: {}", question, accepted);
        accepted
    }

    async fn read_key(&self, message: &str) -> Option<InputEvent> {
        let _turn = self.state.take_prompt_turn().await;
        let capture = self.state.arm_capture();
        self.state.show_prompt(Some(message.to_string()));
        let event = capture.await.ok();
        self.state.show_prompt(None);
        event
    }

    fn notify(&self, message: &str) {
        self.state.set_notice(Some(message.to_string()));
    }
}
