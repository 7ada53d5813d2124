//! Keybind store

use std::path::PathBuf;
use tracing::info;

use super::json_store::{load_or_default, save_best_effort};
use crate::state::KeybindMap;

/// Process-wide keybind persistence, independent of any title
#[derive(Debug, Clone)]
pub struct KeybindStore {
    path: PathBuf,
}

impl KeybindStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stored map, falling back to F4/F3/F5 for anything missing
    pub fn load(&self) -> KeybindMap {
        let map: KeybindMap = load_or_default(&self.path);
        info!("Keybinds: {}", map.help_line());
        map
    }

    pub fn save(&self, map: &KeybindMap) -> bool {
        save_best_effort(&self.path, map)
    }
}
