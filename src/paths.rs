// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

// Base path handed over by the Android app (Context.filesDir).
static ANDROID_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Copy)]
enum Dir {
    Data,
    Config,
    Cache,
}

impl Dir {
    fn name(self) -> &'static str {
        match self {
            Dir::Data => "data",
            Dir::Config => "config",
            Dir::Cache => "cache",
        }
    }
}

pub struct AppPaths;

impl AppPaths {
    /// Must be called once at startup on Android, before any other lookup.
    pub fn init_android_path(path: String) {
        let _ = ANDROID_DATA_DIR.set(PathBuf::from(path));
    }

    // Android root, then KUSINA_TEST_DIR, then the platform location.
    fn resolve(dir: Dir) -> Result<PathBuf> {
        if let Some(root) = ANDROID_DATA_DIR.get() {
            return Ok(root.join(dir.name()));
        }
        if let Ok(test_dir) = env::var("KUSINA_TEST_DIR") {
            return Ok(PathBuf::from(test_dir).join(dir.name()));
        }
        let proj = ProjectDirs::from("com", "kusina", "kusina")
            .with_context(|| format!("Could not determine {} directory", dir.name()))?;
        Ok(match dir {
            Dir::Data => proj.data_dir(),
            Dir::Config => proj.config_dir(),
            Dir::Cache => proj.cache_dir(),
        }
        .to_path_buf())
    }

    fn existing(dir: Dir) -> Result<PathBuf> {
        let path = Self::resolve(dir)?;
        if !path.exists() {
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    pub fn get_data_dir() -> Result<PathBuf> {
        Self::existing(Dir::Data)
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        Self::existing(Dir::Config)
    }

    pub fn get_cache_dir() -> Result<PathBuf> {
        Self::existing(Dir::Cache)
    }

    pub fn get_config_file_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn get_pantry_path() -> Result<PathBuf> {
        Ok(Self::get_data_dir()?.join("pantry.json"))
    }

    pub fn get_favorites_path() -> Result<PathBuf> {
        Ok(Self::get_data_dir()?.join("favorites.json"))
    }

    pub fn get_accounts_path() -> Result<PathBuf> {
        Ok(Self::get_data_dir()?.join("accounts.json"))
    }

    pub fn get_session_path() -> Result<PathBuf> {
        Ok(Self::get_data_dir()?.join("session.json"))
    }
}
