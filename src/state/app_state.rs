//! Shared application state: channels, hotkey table and the key capture slot

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Instant,
};
use tokio::sync::{mpsc, oneshot, watch, Mutex as TurnLock, MutexGuard};
use tracing::{debug, warn};

use super::{Command, HotkeyTable, InputEvent, KeybindMap, SessionView};

/// State shared between the controller, the ticker, the key listener and dialogs.
///
/// The session itself is owned by the controller; everyone else sees it only
/// through the published [`SessionView`].
#[derive(Debug)]
pub struct AppState {
    /// Queue drained by the session controller
    pub command_tx: mpsc::UnboundedSender<Command>,
    /// Channel for view updates
    pub view_tx: watch::Sender<SessionView>,
    /// Keep the receiver alive to prevent channel closure
    pub _view_rx: watch::Receiver<SessionView>,
    /// Live hotkey registrations
    pub hotkeys: HotkeyTable,
    /// Pending one-shot key capture for prompts and rebinding
    capture: Mutex<Option<oneshot::Sender<InputEvent>>>,
    /// Held by whoever is showing a prompt
    prompt_turn: TurnLock<()>,
    shutting_down: AtomicBool,
    pub start_time: Instant,
}

impl AppState {
    /// Create the shared state and the command queue receiver for the controller
    pub fn new(view: SessionView, keybinds: &KeybindMap) -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(view);

        let state = Self {
            command_tx,
            view_tx,
            _view_rx: view_rx,
            hotkeys: HotkeyTable::new(keybinds),
            capture: Mutex::new(None),
            prompt_turn: TurnLock::new(()),
            shutting_down: AtomicBool::new(false),
            start_time: Instant::now(),
        };
        (state, command_rx)
    }

    /// Post a command for the controller
    pub fn send(&self, command: Command) -> Result<(), String> {
        self.command_tx
            .send(command)
            .map_err(|e| format!("Session controller is gone: {}", e))
    }

    pub fn subscribe_view(&self) -> watch::Receiver<SessionView> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> SessionView {
        self.view_tx.borrow().clone()
    }

    /// Replace the published view, keeping any prompt or notice on screen
    pub fn publish(&self, mut view: SessionView) {
        self.view_tx.send_modify(|current| {
            view.prompt = current.prompt.take();
            view.notice = current.notice.take();
            *current = view;
        });
    }

    pub fn show_prompt(&self, prompt: Option<String>) {
        self.view_tx.send_modify(|view| view.prompt = prompt);
    }

    pub fn set_notice(&self, notice: Option<String>) {
        self.view_tx.send_modify(|view| view.notice = notice);
    }

    /// Wait until no other prompt is on screen. Prompts from the controller
    /// and from dialogs take turns instead of stealing each other's capture.
    pub async fn take_prompt_turn(&self) -> MutexGuard<'_, ()> {
        self.prompt_turn.lock().await
    }

    /// Route the next key press to the returned receiver instead of the hotkey table.
    ///
    /// Arming again drops the previous capture, whose receiver then sees a closed
    /// channel. Once shutdown has begun every capture is born cancelled.
    pub fn arm_capture(&self) -> oneshot::Receiver<InputEvent> {
        let (tx, rx) = oneshot::channel();
        let mut slot = match self.capture.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if self.is_shutting_down() {
            debug!("Shutting down, key capture cancelled");
            return rx;
        }
        if slot.replace(tx).is_some() {
            warn!("Replacing a pending key capture");
        }
        rx
    }

    /// Hand `event` to an armed capture. Returns the event back if nothing was armed.
    pub fn offer_capture(&self, event: InputEvent) -> Option<InputEvent> {
        let pending = match self.capture.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match pending {
            Some(tx) => match tx.send(event) {
                Ok(()) => None,
                Err(event) => {
                    debug!("Key capture was abandoned, dispatching normally");
                    Some(event)
                }
            },
            None => Some(event),
        }
    }

    /// Drop any armed capture so its waiter resolves as cancelled
    pub fn cancel_capture(&self) {
        let mut slot = match self.capture.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.take();
    }

    /// Cancel the open prompt and any later one so a queued quit is reached
    pub fn begin_shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
        self.cancel_capture();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// How long the application has been open, as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
