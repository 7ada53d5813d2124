//! Scripted stand-ins for the prompter and the key source

#![cfg(test)]

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
    time::Duration,
};
use async_trait::async_trait;

use crate::{
    state::InputEvent,
    tasks::hotkey_listener::KeySource,
    ui::Prompter,
};

#[derive(Debug, Default)]
struct Script {
    confirms: VecDeque<bool>,
    keys: VecDeque<InputEvent>,
    questions: Vec<String>,
    notices: Vec<String>,
}

/// Prompter that answers from a fixed script and records what it was asked
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    script: Arc<Mutex<Script>>,
}

impl ScriptedPrompter {
    /// Answer successive confirmations with `answers`, then decline
    pub fn confirming(answers: &[bool]) -> Self {
        let prompter = Self::default();
        prompter.script.lock().unwrap().confirms = answers.iter().copied().collect();
        prompter
    }

    /// Answer successive key reads with `keys`, then cancel
    pub fn with_keys(keys: Vec<InputEvent>) -> Self {
        let prompter = Self::default();
        prompter.script.lock().unwrap().keys = keys.into();
        prompter
    }

    pub fn questions(&self) -> Vec<String> {
        self.script.lock().unwrap().questions.clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.script.lock().unwrap().notices.clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn confirm(&self, question: &str) -> bool {
        let mut script = self.script.lock().unwrap();
        script.questions.push(question.to_string());
        script.confirms.pop_front().unwrap_or(false)
    }

    async fn read_key(&self, message: &str) -> Option<InputEvent> {
        let mut script = self.script.lock().unwrap();
        script.questions.push(message.to_string());
        script.keys.pop_front()
    }

    fn notify(&self, message: &str) {
        self.script.lock().unwrap().notices.push(message.to_string());
    }
}

/// Key source replaying a fixed list of events, then reporting end of input
#[derive(Debug)]
pub struct ScriptedKeySource {
    events: VecDeque<InputEvent>,
}

impl ScriptedKeySource {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl KeySource for ScriptedKeySource {
    fn next_event(&mut self, _timeout: Duration) -> io::Result<Option<InputEvent>> {
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")),
        }
    }
}
