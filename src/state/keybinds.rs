//! Keybind map and the live hotkey table

use std::{
    fmt,
    sync::RwLock,
};
use serde::{Deserialize, Serialize};

/// Stopwatch action a hotkey can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    StartPause,
    Split,
    Reset,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::StartPause, Action::Split, Action::Reset];

    pub fn label(&self) -> &'static str {
        match self {
            Action::StartPause => "Start/Pause",
            Action::Split => "Split",
            Action::Reset => "Reset",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalised key name such as `f4`, `space` or `a`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct KeyId(String);

impl KeyId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for KeyId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<KeyId> for String {
    fn from(key: KeyId) -> Self {
        key.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_uppercase())
    }
}

/// Persisted action → key assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindMap {
    #[serde(default = "default_start_pause")]
    pub start_pause: KeyId,
    #[serde(default = "default_split")]
    pub split: KeyId,
    #[serde(default = "default_reset")]
    pub reset: KeyId,
}

fn default_start_pause() -> KeyId {
    KeyId::new("f4")
}

fn default_split() -> KeyId {
    KeyId::new("f3")
}

fn default_reset() -> KeyId {
    KeyId::new("f5")
}

impl KeybindMap {
    pub fn key_for(&self, action: Action) -> &KeyId {
        match action {
            Action::StartPause => &self.start_pause,
            Action::Split => &self.split,
            Action::Reset => &self.reset,
        }
    }

    pub fn set(&mut self, action: Action, key: KeyId) {
        match action {
            Action::StartPause => self.start_pause = key,
            Action::Split => self.split = key,
            Action::Reset => self.reset = key,
        }
    }

    /// Help line such as `F4:Start/Pause  F3:Split  F5:Reset`
    pub fn help_line(&self) -> String {
        Action::ALL
            .iter()
            .map(|action| format!("{}:{}", self.key_for(*action), action))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl Default for KeybindMap {
    fn default() -> Self {
        Self {
            start_pause: default_start_pause(),
            split: default_split(),
            reset: default_reset(),
        }
    }
}

/// Registered hotkeys consulted by the key listener.
///
/// Rearming swaps every registration inside one write lock, so a lookup sees
/// either the complete old set or the complete new set.
#[derive(Debug, Default)]
pub struct HotkeyTable {
    registrations: RwLock<Vec<(KeyId, Action)>>,
}

impl HotkeyTable {
    pub fn new(map: &KeybindMap) -> Self {
        let table = Self::default();
        table.rearm(map);
        table
    }

    /// Deregister everything, then register all three actions from `map`
    pub fn rearm(&self, map: &KeybindMap) {
        let mut registrations = match self.registrations.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        registrations.clear();
        for action in Action::ALL {
            registrations.push((map.key_for(action).clone(), action));
        }
    }

    /// Actions bound to `key`, in action order
    pub fn lookup(&self, key: &KeyId) -> Vec<Action> {
        let registrations = match self.registrations.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        registrations
            .iter()
            .filter(|(bound, _)| bound == key)
            .map(|(_, action)| *action)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_function_keys() {
        let map = KeybindMap::default();
        assert_eq!(map.start_pause.as_str(), "f4");
        assert_eq!(map.split.as_str(), "f3");
        assert_eq!(map.reset.as_str(), "f5");
        assert_eq!(map.help_line(), "F4:Start/Pause  F3:Split  F5:Reset");
    }

    #[test]
    fn key_ids_are_normalised() {
        assert_eq!(KeyId::new("  F7 "), KeyId::new("f7"));
        let parsed: KeybindMap =
            serde_json::from_str(r#"{"start_pause": "SPACE", "split": "s"}"#).unwrap();
        assert_eq!(parsed.start_pause.as_str(), "space");
        assert_eq!(parsed.split.as_str(), "s");
        assert_eq!(parsed.reset.as_str(), "f5");
    }

    #[test]
    fn serializes_as_flat_object() {
        let json = serde_json::to_value(KeybindMap::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"start_pause": "f4", "split": "f3", "reset": "f5"})
        );
    }

    #[test]
    fn rearm_replaces_old_bindings() {
        let mut map = KeybindMap::default();
        let table = HotkeyTable::new(&map);
        assert_eq!(table.lookup(&KeyId::new("f3")), vec![Action::Split]);

        map.set(Action::Split, KeyId::new("space"));
        table.rearm(&map);

        assert!(table.lookup(&KeyId::new("f3")).is_empty());
        assert_eq!(table.lookup(&KeyId::new("space")), vec![Action::Split]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn shared_key_fires_every_bound_action() {
        let mut map = KeybindMap::default();
        map.set(Action::Reset, KeyId::new("f4"));
        let table = HotkeyTable::new(&map);
        assert_eq!(
            table.lookup(&KeyId::new("f4")),
            vec![Action::StartPause, Action::Reset]
        );
    }
}
