//! Title registry backed by the title store

use std::path::PathBuf;
use tracing::info;

use super::json_store::{load_or_default, write_json};
use crate::{
    error::{TitleError, ValidationError},
    state::Title,
};

/// Ordered, duplicate-free list of known titles.
///
/// A registry only exists once its store has been read, so an empty list
/// always means "no titles", never "not loaded yet".
#[derive(Debug)]
pub struct TitleRegistry {
    path: PathBuf,
    titles: Vec<Title>,
}

impl TitleRegistry {
    /// Load the registry from `path`; a missing or unreadable store gives an empty list
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let raw: Vec<String> = load_or_default(&path);

        let mut titles: Vec<Title> = Vec::with_capacity(raw.len());
        for name in raw {
            // hand-edited stores may contain blanks or repeats
            if let Ok(title) = Title::parse(&name) {
                if !titles.contains(&title) {
                    titles.push(title);
                }
            }
        }
        info!("Loaded {} titles from {}", titles.len(), path.display());
        Self { path, titles }
    }

    pub fn list(&self) -> &[Title] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Title> {
        self.titles.get(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.titles.iter().any(|title| title.as_str() == name.trim())
    }

    /// Validate, append and persist a new title.
    ///
    /// The full list is written before returning; on a write failure the
    /// append is rolled back.
    pub fn add(&mut self, name: &str) -> Result<Title, TitleError> {
        let title = Title::parse(name)?;
        if self.titles.contains(&title) {
            return Err(ValidationError::DuplicateTitle(title.to_string()).into());
        }

        self.titles.push(title.clone());
        if let Err(e) = write_json(&self.path, &self.titles) {
            self.titles.pop();
            return Err(e.into());
        }

        info!("Added title: {}", title);
        Ok(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_store_gives_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TitleRegistry::open(dir.path().join("speedrun_titles.json"));
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }

    #[test]
    fn duplicate_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = TitleRegistry::open(dir.path().join("speedrun_titles.json"));

        registry.add("Run A").unwrap();
        let err = registry.add("Run A").unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(registry.len(), 1);

        // exact match only
        registry.add("run a").unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn whitespace_only_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = TitleRegistry::open(dir.path().join("speedrun_titles.json"));
        assert!(matches!(
            registry.add("  "),
            Err(TitleError::Invalid(ValidationError::EmptyTitle))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn add_trims_and_persists_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speedrun_titles.json");
        let mut registry = TitleRegistry::open(&path);
        registry.add("  Any% ").unwrap();
        registry.add("100%").unwrap();

        let on_disk: Vec<String> = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, vec!["Any%", "100%"]);

        let reopened = TitleRegistry::open(&path);
        let names: Vec<&str> = reopened.list().iter().map(Title::as_str).collect();
        assert_eq!(names, vec!["Any%", "100%"]);
        assert!(reopened.contains(" Any%"));
    }

    #[test]
    fn failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speedrun_titles.json");
        fs::create_dir(&path).unwrap();

        let mut registry = TitleRegistry::open(&path);
        assert!(matches!(registry.add("Any%"), Err(TitleError::Persistence(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn hand_edited_store_is_cleaned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speedrun_titles.json");
        fs::write(&path, r#"["Any%", "  ", "Any%", " 100% "]"#).unwrap();

        let registry = TitleRegistry::open(&path);
        let names: Vec<&str> = registry.list().iter().map(Title::as_str).collect();
        assert_eq!(names, vec!["Any%", "100%"]);
    }
}
