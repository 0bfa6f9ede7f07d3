use crate::paths::AppPaths;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const THEMEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1/";
pub const SPOONACULAR_URL: &str = "https://api.spoonacular.com/";
pub const DUMMYJSON_URL: &str = "https://dummyjson.com/";
pub const IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1/";

fn default_themealdb_url() -> String {
    THEMEALDB_URL.to_string()
}

fn default_spoonacular_url() -> String {
    SPOONACULAR_URL.to_string()
}

fn default_dummyjson_url() -> String {
    DUMMYJSON_URL.to_string()
}

fn default_identity_url() -> String {
    IDENTITY_URL.to_string()
}

fn default_timeout() -> u64 {
    15
}

/// Tuning for the random-meal scraping loop. TheMealDB only hands out one
/// random meal per request, so a list is built from many calls.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RandomMealConfig {
    pub initial_batch: usize,
    pub target: usize,
    pub max_batches: usize,
    pub batch_cap: usize,
    pub concurrency: usize,
}

impl Default for RandomMealConfig {
    fn default() -> Self {
        Self {
            initial_batch: 20,
            target: 80,
            max_batches: 8,
            batch_cap: 15,
            concurrency: 8,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_themealdb_url")]
    pub themealdb_url: String,
    #[serde(default = "default_spoonacular_url")]
    pub spoonacular_url: String,
    #[serde(default = "default_dummyjson_url")]
    pub dummyjson_url: String,
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    #[serde(default)]
    pub spoonacular_api_key: String,
    #[serde(default)]
    pub identity_api_key: String,

    #[serde(default)]
    pub allow_insecure_certs: bool,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub random_meals: RandomMealConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            themealdb_url: default_themealdb_url(),
            spoonacular_url: default_spoonacular_url(),
            dummyjson_url: default_dummyjson_url(),
            identity_url: default_identity_url(),
            spoonacular_api_key: String::new(),
            identity_api_key: String::new(),
            allow_insecure_certs: false,
            timeout_secs: default_timeout(),
            random_meals: RandomMealConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = AppPaths::get_config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            return Ok(config);
        }
        Err(anyhow::anyhow!("Config file not found"))
    }

    /// A missing config is not an error: every field has a usable default.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(c) => c,
            Err(e) => {
                log::debug!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = AppPaths::get_config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: Config = toml::from_str("spoonacular_api_key = \"abc\"").unwrap();
        assert_eq!(cfg.spoonacular_api_key, "abc");
        assert_eq!(cfg.themealdb_url, THEMEALDB_URL);
        assert_eq!(cfg.timeout_secs, 15);
        assert_eq!(cfg.random_meals, RandomMealConfig::default());
    }

    #[test]
    fn test_partial_random_meals_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "spoonacular_api_key = \"abc\"\n\n[random_meals]\ntarget = 40\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.spoonacular_api_key, "abc");
        assert_eq!(cfg.random_meals.target, 40);
        assert_eq!(cfg.random_meals.initial_batch, 20);
        assert_eq!(cfg.random_meals.batch_cap, 15);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.allow_insecure_certs = true;
        cfg.random_meals.target = 10;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.toml")).is_err());
    }
}
