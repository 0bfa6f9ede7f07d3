use crate::paths::AppPaths;
use crate::storage::LocalStorage;
use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Last successful fetch per recipe source, used when the network is down.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn open() -> Result<Self> {
        Ok(Self::at(AppPaths::get_cache_dir()?))
    }

    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    // Digest of the source key: filesystem-safe and identical across builds.
    fn get_path(&self, key: &str) -> PathBuf {
        let digest = format!("{:x}", Sha256::digest(key.as_bytes()));
        self.dir.join(format!("recipes_{}.json", &digest[..16]))
    }

    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        LocalStorage::save_json(&self.get_path(key), items)
    }

    /// `None` when nothing has been cached for this key yet.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        let path = self.get_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let items: Vec<T> = LocalStorage::load_json(&path)?;
        Ok(Some(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_stable() {
        let cache = Cache::at(PathBuf::from("/cache"));
        assert_eq!(
            cache.get_path("themealdb"),
            PathBuf::from("/cache/recipes_08b2f7e547560137.json")
        );
    }

    #[test]
    fn test_keys_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::at(dir.path().to_path_buf());
        cache.save("themealdb", &["a".to_string()]).unwrap();
        cache.save("dummyjson", &["b".to_string(), "c".to_string()]).unwrap();

        let a: Vec<String> = cache.load("themealdb").unwrap().unwrap();
        let b: Vec<String> = cache.load("dummyjson").unwrap().unwrap();
        assert_eq!(a, vec!["a"]);
        assert_eq!(b.len(), 2);
        assert!(cache.load::<String>("spoonacular").unwrap().is_none());
    }
}
