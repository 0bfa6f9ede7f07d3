// File: src/client.rs
pub mod cert;
pub mod core;
pub mod dummyjson;
pub mod identity;
pub mod meal;
pub mod spoon;

pub use self::core::HttpClient;
pub use dummyjson::DummyJsonClient;
pub use identity::IdentityClient;
pub use meal::MealDbClient;
pub use spoon::SpoonacularClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid URL '{0}'")]
    InvalidUri(String),
    #[error("No valid system certificates found.")]
    NoCertificates,
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Request to {0} timed out")]
    Timeout(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Empty(String),
    #[error("Missing API key for {0}")]
    MissingApiKey(&'static str),
}

impl ClientError {
    /// Network-level trouble, as opposed to the server answering with bad data.
    pub fn is_offline(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout(_))
    }
}

/// Join a configured base URL with an endpoint path.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, path.trim_start_matches('/'))
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
