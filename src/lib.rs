// File: src/lib.rs
pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod favorites;
pub mod model;
pub mod pantry;
pub mod paths;
pub mod repository;
pub mod storage;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

// --- ANDROID SUPPORT ---
#[cfg(target_os = "android")]
pub mod mobile;

#[cfg(target_os = "android")]
uniffi::setup_scaffolding!();
