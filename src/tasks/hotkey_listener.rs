//! Key listener thread
//!
//! Reads key presses from a [`KeySource`] on a dedicated thread and turns
//! them into controller commands. Nothing here touches session state: an
//! armed prompt capture gets the key, otherwise the hotkey table decides.

use std::{
    io,
    sync::Arc,
    thread,
    time::Duration,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, Command, InputEvent, KeyId};

/// How long a source may block before the listener checks for shutdown
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Source of translated key presses
pub trait KeySource: Send + 'static {
    /// Next event, or `Ok(None)` if nothing arrived within `timeout`
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

/// Key presses from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalKeySource;

impl KeySource for TerminalKeySource {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(translate(key)),
            _ => Ok(None),
        }
    }
}

/// Map a terminal key event to an input event.
///
/// Ctrl combinations are reserved for application commands; plain keys
/// become key identifiers for the hotkey table.
pub fn translate(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'c' | 'q' => Some(InputEvent::Quit),
                'k' => Some(InputEvent::Configure),
                'l' => Some(InputEvent::ClearSegments),
                _ => None,
            },
            _ => None,
        };
    }
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SUPER) {
        return None;
    }

    key_name(key.code).map(|name| InputEvent::Key(KeyId::new(name)))
}

fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::F(n) => return Some(format!("f{}", n)),
        KeyCode::Char(' ') => "space",
        KeyCode::Char(c) => return Some(c.to_lowercase().to_string()),
        KeyCode::Enter => "enter",
        KeyCode::Esc => "esc",
        KeyCode::Tab => "tab",
        KeyCode::Backspace => "backspace",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "page up",
        KeyCode::PageDown => "page down",
        KeyCode::Insert => "insert",
        KeyCode::Delete => "delete",
        _ => return None,
    };
    Some(name.to_string())
}

/// Route one event: quit always reaches the controller, everything else
/// goes to an armed capture first and the hotkey table second.
pub fn dispatch(state: &AppState, event: InputEvent) -> Result<(), String> {
    if event == InputEvent::Quit {
        state.begin_shutdown();
        return state.send(Command::Quit);
    }

    let event = match state.offer_capture(event) {
        Some(event) => event,
        None => return Ok(()),
    };

    match event {
        InputEvent::Key(key) => {
            let actions = state.hotkeys.lookup(&key);
            if actions.is_empty() {
                debug!("Unbound key: {}", key.as_str());
            }
            for action in actions {
                state.send(Command::Trigger(action))?;
            }
            Ok(())
        }
        InputEvent::Configure => state.send(Command::Configure),
        InputEvent::ClearSegments => state.send(Command::ClearSegments),
        InputEvent::Quit => state.send(Command::Quit),
    }
}

/// Blocking listener loop; returns when the controller is gone or the source fails
pub fn run_key_listener<S: KeySource>(mut source: S, state: Arc<AppState>) {
    info!("Starting key listener");

    while !state.command_tx.is_closed() {
        match source.next_event(POLL_INTERVAL) {
            Ok(Some(event)) => {
                if let Err(e) = dispatch(&state, event) {
                    warn!("{}", e);
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!("Key source failed: {}", e);
                state.begin_shutdown();
                if let Err(e) = state.send(Command::Quit) {
                    debug!("{}", e);
                }
                break;
            }
        }
    }

    info!("Key listener stopped");
}

/// Run the listener on its own thread
pub fn spawn_key_listener<S: KeySource>(
    source: S,
    state: Arc<AppState>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("key-listener".to_string())
        .spawn(move || run_key_listener(source, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        state::{Action, KeybindMap, SessionView},
        test_utils::ScriptedKeySource,
    };
    use tokio::sync::mpsc;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn key(name: &str) -> InputEvent {
        InputEvent::Key(KeyId::new(name))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Command>) -> Vec<Command> {
        let mut commands = Vec::new();
        while let Ok(command) = rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    #[test]
    fn translates_plain_keys() {
        assert_eq!(translate(press(KeyCode::F(4), KeyModifiers::NONE)), Some(key("f4")));
        assert_eq!(translate(press(KeyCode::Char(' '), KeyModifiers::NONE)), Some(key("space")));
        assert_eq!(translate(press(KeyCode::Char('A'), KeyModifiers::SHIFT)), Some(key("a")));
        assert_eq!(translate(press(KeyCode::PageUp, KeyModifiers::NONE)), Some(key("page up")));
        assert_eq!(translate(press(KeyCode::CapsLock, KeyModifiers::NONE)), None);
    }

    #[test]
    fn ctrl_keys_are_reserved() {
        assert_eq!(translate(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(InputEvent::Quit));
        assert_eq!(translate(press(KeyCode::Char('q'), KeyModifiers::CONTROL)), Some(InputEvent::Quit));
        assert_eq!(translate(press(KeyCode::Char('k'), KeyModifiers::CONTROL)), Some(InputEvent::Configure));
        assert_eq!(
            translate(press(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Some(InputEvent::ClearSegments)
        );
        assert_eq!(translate(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(translate(press(KeyCode::F(4), KeyModifiers::ALT)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut event = press(KeyCode::F(4), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(translate(event), None);
    }

    #[test]
    fn listener_posts_bound_actions_then_quits_at_end_of_input() {
        let (state, mut rx) = AppState::new(SessionView::default(), &KeybindMap::default());
        let source = ScriptedKeySource::new(vec![
            key("f4"),
            key("f3"),
            key("x"),
            InputEvent::ClearSegments,
            key("f5"),
            InputEvent::Configure,
        ]);

        run_key_listener(source, Arc::new(state));

        assert_eq!(
            drain(&mut rx),
            vec![
                Command::Trigger(Action::StartPause),
                Command::Trigger(Action::Split),
                Command::ClearSegments,
                Command::Trigger(Action::Reset),
                Command::Configure,
                Command::Quit,
            ]
        );
    }

    #[tokio::test]
    async fn armed_capture_swallows_the_hotkey() {
        let (state, mut rx) = AppState::new(SessionView::default(), &KeybindMap::default());
        let capture = state.arm_capture();

        dispatch(&state, key("f4")).unwrap();
        assert_eq!(capture.await.unwrap(), key("f4"));
        assert!(drain(&mut rx).is_empty());

        dispatch(&state, key("f4")).unwrap();
        assert_eq!(drain(&mut rx), vec![Command::Trigger(Action::StartPause)]);
    }

    #[tokio::test]
    async fn quit_cancels_capture() {
        let (state, mut rx) = AppState::new(SessionView::default(), &KeybindMap::default());
        let capture = state.arm_capture();

        dispatch(&state, InputEvent::Quit).unwrap();
        assert!(capture.await.is_err());
        assert_eq!(drain(&mut rx), vec![Command::Quit]);
    }

    #[test]
    fn listener_stops_when_controller_is_gone() {
        let (state, rx) = AppState::new(SessionView::default(), &KeybindMap::default());
        drop(rx);
        // would report end of input if it were read
        let source = ScriptedKeySource::new(Vec::new());
        let handle = spawn_key_listener(source, Arc::new(state)).unwrap();
        handle.join().unwrap();
    }
}
