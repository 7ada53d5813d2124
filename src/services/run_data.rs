//! Per-title run records in the run data store

use std::{collections::BTreeMap, path::PathBuf};
use tracing::{debug, info, warn};

use super::json_store::{error_chain, load_or_default, read_json, save_best_effort};
use crate::state::{RunRecord, Title};

/// Store mapping activity name to its [`RunRecord`]
#[derive(Debug, Clone)]
pub struct RunDataStore {
    path: PathBuf,
}

impl RunDataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Record for `title`, or an empty one if the store has none
    pub fn load(&self, title: &Title) -> RunRecord {
        let mut all: BTreeMap<String, RunRecord> = load_or_default(&self.path);
        match all.remove(title.as_str()) {
            Some(record) => {
                debug!(
                    "Loaded run record for {}: {} segments, best {:?}",
                    title,
                    record.segments.len(),
                    record.personal_best
                );
                record
            }
            None => RunRecord::default(),
        }
    }

    /// Replace the record for `title`, keeping every other title's record.
    ///
    /// Best-effort: returns false when the write was skipped. An unreadable
    /// store is left untouched so other titles' records survive.
    pub fn save(&self, title: &Title, record: &RunRecord) -> bool {
        let mut all: BTreeMap<String, RunRecord> = match read_json(&self.path) {
            Ok(Some(all)) => all,
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Not saving run record for {}: {}", title, error_chain(&e));
                return false;
            }
        };
        all.insert(title.to_string(), record.clone());
        let saved = save_best_effort(&self.path, &all);
        if saved {
            info!("Saved run record for {}", title);
        }
        saved
    }
}
