use crate::paths::AppPaths;
use crate::storage::LocalStorage;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PantryError {
    #[error("Please enter an ingredient")]
    Blank,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// The user's ingredient list. Persisted as a set, so reload order is sorted,
/// not insertion order.
#[derive(Debug, Clone)]
pub struct Pantry {
    path: PathBuf,
    items: Vec<String>,
}

impl Pantry {
    pub fn open() -> Result<Self> {
        Self::at(AppPaths::get_pantry_path()?)
    }

    pub fn at(path: PathBuf) -> Result<Self> {
        let set: BTreeSet<String> = LocalStorage::load_json(&path)?;
        Ok(Self {
            path,
            items: set.into_iter().collect(),
        })
    }

    pub fn list(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let needle = name.trim().to_lowercase();
        self.items.iter().position(|i| i.to_lowercase() == needle)
    }

    // Persist `items`, then adopt them. A failed write leaves the pantry as it was.
    fn commit(&mut self, items: Vec<String>) -> Result<()> {
        let set: BTreeSet<&String> = items.iter().collect();
        LocalStorage::save_json(&self.path, &set)?;
        self.items = items;
        Ok(())
    }

    /// `Ok(false)` when the ingredient is already present (ignoring case).
    pub fn add(&mut self, name: &str) -> Result<bool, PantryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PantryError::Blank);
        }
        if self.contains(trimmed) {
            log::debug!("Pantry already has '{}'", trimmed);
            return Ok(false);
        }
        let mut items = self.items.clone();
        items.push(trimmed.to_string());
        self.commit(items)?;
        log::info!("Added '{}' to pantry", trimmed);
        Ok(true)
    }

    pub fn remove(&mut self, name: &str) -> Result<bool> {
        match self.position(name) {
            Some(idx) => {
                let mut items = self.items.clone();
                let removed = items.remove(idx);
                self.commit(items)?;
                log::info!("Removed '{}' from pantry", removed);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rejects_blank_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut pantry = Pantry::at(dir.path().join("pantry.json")).unwrap();

        assert!(matches!(pantry.add("   "), Err(PantryError::Blank)));
        assert!(pantry.add(" Tomato ").unwrap());
        assert!(!pantry.add("tomato").unwrap());
        assert_eq!(pantry.list(), &["Tomato".to_string()]);
    }

    #[test]
    fn test_persists_as_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pantry.json");
        {
            let mut pantry = Pantry::at(path.clone()).unwrap();
            pantry.add("rice").unwrap();
            pantry.add("egg").unwrap();
            pantry.add("milk").unwrap();
        }
        let reloaded = Pantry::at(path).unwrap();
        assert_eq!(reloaded.list(), &["egg", "milk", "rice"]);
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let mut pantry = Pantry::at(blocker.join("pantry.json")).unwrap();

        assert!(matches!(pantry.add("rice"), Err(PantryError::Storage(_))));
        assert!(pantry.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pantry.json");
        let mut pantry = Pantry::at(path.clone()).unwrap();
        pantry.add("Garlic").unwrap();
        pantry.add("onion").unwrap();

        assert!(pantry.remove("garlic").unwrap());
        assert!(!pantry.remove("garlic").unwrap());
        assert_eq!(Pantry::at(path.clone()).unwrap().list(), &["onion"]);

        pantry.clear().unwrap();
        assert!(Pantry::at(path).unwrap().is_empty());
    }
}
