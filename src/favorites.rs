use crate::paths::AppPaths;
use crate::storage::LocalStorage;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Recipe ids the user starred. Adding an existing id is a no-op.
#[derive(Debug, Clone)]
pub struct Favorites {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl Favorites {
    pub fn open() -> Result<Self> {
        Self::at(AppPaths::get_favorites_path()?)
    }

    pub fn at(path: PathBuf) -> Result<Self> {
        let ids = LocalStorage::load_json(&path)?;
        Ok(Self { path, ids })
    }

    // Persist `ids`, then adopt them. A failed write changes nothing.
    fn commit(&mut self, ids: BTreeSet<String>) -> Result<()> {
        LocalStorage::save_json(&self.path, &ids)?;
        self.ids = ids;
        Ok(())
    }

    pub fn add(&mut self, recipe_id: &str) -> Result<()> {
        if self.ids.contains(recipe_id) {
            return Ok(());
        }
        let mut ids = self.ids.clone();
        ids.insert(recipe_id.to_string());
        self.commit(ids)?;
        log::debug!("Recipe {} added to favorites", recipe_id);
        Ok(())
    }

    pub fn remove(&mut self, recipe_id: &str) -> Result<()> {
        if !self.ids.contains(recipe_id) {
            return Ok(());
        }
        let mut ids = self.ids.clone();
        ids.remove(recipe_id);
        self.commit(ids)
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.ids.contains(recipe_id)
    }

    pub fn all(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Flip membership; returns whether the recipe is a favorite afterwards.
    pub fn toggle(&mut self, recipe_id: &str) -> Result<bool> {
        if self.is_favorite(recipe_id) {
            self.remove(recipe_id)?;
            Ok(false)
        } else {
            self.add(recipe_id)?;
            Ok(true)
        }
    }
}
