// File: src/auth.rs
//! On-device accounts plus the remote identity-provider session.
use crate::client::identity::{IdentityAccount, provider_message};
use crate::client::{ClientError, IdentityClient};
use crate::model::User;
use crate::paths::AppPaths;
use crate::storage::LocalStorage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} must not be empty")]
    Blank(&'static str),
    #[error("Username '{0}' is already taken")]
    NameTaken(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Sign-in rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::Blank(field))
    } else {
        Ok(())
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

// --- LOCAL ACCOUNTS ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub user_id: u32,
    pub name: String,
    password_hash: String,
    salt: String,
    pub is_logged_in: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSession {
    pub user_id: u32,
    pub is_active: bool,
    pub login_timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct AccountsState {
    users: Vec<UserAccount>,
    session: Option<UserSession>,
}

/// Username/password accounts kept on this device. At most one is logged in.
#[derive(Debug)]
pub struct Accounts {
    path: PathBuf,
    state: AccountsState,
}

impl Accounts {
    pub fn open() -> anyhow::Result<Self> {
        Self::at(AppPaths::get_accounts_path()?)
    }

    pub fn at(path: PathBuf) -> anyhow::Result<Self> {
        let state = LocalStorage::load_json(&path)?;
        Ok(Self { path, state })
    }

    fn save(&self) -> Result<(), AuthError> {
        LocalStorage::save_json(&self.path, &self.state)?;
        Ok(())
    }

    pub fn register(&mut self, name: &str, password: &str) -> Result<u32, AuthError> {
        let name = name.trim();
        require(name, "Username")?;
        require(password, "Password")?;
        if self.state.users.iter().any(|u| u.name == name) {
            return Err(AuthError::NameTaken(name.to_string()));
        }

        let user_id = self.state.users.iter().map(|u| u.user_id).max().unwrap_or(0) + 1;
        let salt = uuid::Uuid::new_v4().to_string();
        self.state.users.push(UserAccount {
            user_id,
            name: name.to_string(),
            password_hash: hash_password(&salt, password),
            salt,
            is_logged_in: false,
        });
        self.save()?;
        log::info!("Registered local user '{}' ({})", name, user_id);
        Ok(user_id)
    }

    pub fn login(&mut self, name: &str, password: &str) -> Result<UserAccount, AuthError> {
        let name = name.trim();
        let idx = self
            .state
            .users
            .iter()
            .position(|u| u.name == name && u.password_hash == hash_password(&u.salt, password))
            .ok_or(AuthError::InvalidCredentials)?;

        for (i, user) in self.state.users.iter_mut().enumerate() {
            user.is_logged_in = i == idx;
        }
        let account = self.state.users[idx].clone();
        self.state.session = Some(UserSession {
            user_id: account.user_id,
            is_active: true,
            login_timestamp: Utc::now(),
        });
        self.save()?;
        log::info!("Local user '{}' logged in", account.name);
        Ok(account)
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.state.users.iter().find(|u| u.is_logged_in)
    }

    pub fn session(&self) -> Option<&UserSession> {
        self.state.session.as_ref().filter(|s| s.is_active)
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        for user in &mut self.state.users {
            user.is_logged_in = false;
        }
        self.state.session = None;
        self.save()
    }
}

// --- REMOTE IDENTITY PROVIDER ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn user(&self) -> User {
        User {
            uid: self.uid.clone(),
            name: self.display_name.clone().unwrap_or_default(),
            email: self.email.clone(),
            photo_url: self.photo_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn rejected(err: ClientError) -> AuthError {
    match provider_message(&err) {
        Some(msg) => AuthError::Rejected(msg),
        None => AuthError::Client(err),
    }
}

/// Signed-in state against the identity provider, persisted between runs.
pub struct RemoteAuth {
    client: IdentityClient,
    path: PathBuf,
    session: Option<AuthSession>,
}

impl RemoteAuth {
    pub fn open(client: IdentityClient) -> anyhow::Result<Self> {
        Self::at(client, AppPaths::get_session_path()?)
    }

    pub fn at(client: IdentityClient, path: PathBuf) -> anyhow::Result<Self> {
        let session = LocalStorage::load_json(&path)?;
        Ok(Self {
            client,
            path,
            session,
        })
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.as_ref().map(AuthSession::user)
    }

    fn store(&mut self, account: IdentityAccount, fallback_email: &str) -> Result<User, AuthError> {
        let now = Utc::now();
        let created_at = match &self.session {
            Some(s) if s.uid == account.local_id => s.created_at,
            _ => now,
        };
        let session = AuthSession {
            uid: account.local_id,
            email: account.email.unwrap_or_else(|| fallback_email.to_string()),
            display_name: account.display_name.filter(|n| !n.is_empty()),
            photo_url: account.photo_url.filter(|p| !p.is_empty()),
            id_token: account.id_token.unwrap_or_default(),
            refresh_token: account.refresh_token.unwrap_or_default(),
            created_at,
            updated_at: now,
        };
        LocalStorage::save_json(&self.path, &Some(&session))?;
        let user = session.user();
        self.session = Some(session);
        log::info!("Signed in as {}", user.email);
        Ok(user)
    }

    pub async fn sign_in_with_email(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        require(email, "Email")?;
        require(password, "Password")?;
        let account = self
            .client
            .sign_in_with_password(email, password)
            .await
            .map_err(rejected)?;
        self.store(account, email)
    }

    /// Create the account, then set its display name.
    pub async fn sign_up_with_email(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AuthError> {
        let email = email.trim();
        let name = name.trim();
        require(email, "Email")?;
        require(password, "Password")?;
        require(name, "Name")?;

        let created = self.client.sign_up(email, password).await.map_err(rejected)?;
        let token = created.id_token.clone().unwrap_or_default();
        let updated = self
            .client
            .update_display_name(&token, name)
            .await
            .map_err(rejected)?;

        let account = IdentityAccount {
            local_id: created.local_id,
            email: updated.email.or(created.email),
            display_name: Some(name.to_string()),
            photo_url: updated.photo_url.or(created.photo_url),
            id_token: updated.id_token.or(created.id_token),
            refresh_token: updated.refresh_token.or(created.refresh_token),
        };
        self.store(account, email)
    }

    pub async fn sign_in_with_google(&mut self, google_id_token: &str) -> Result<User, AuthError> {
        require(google_id_token, "Google ID token")?;
        let account = self
            .client
            .sign_in_with_google(google_id_token)
            .await
            .map_err(rejected)?;
        self.store(account, "")
    }

    pub async fn delete_account(&mut self) -> Result<(), AuthError> {
        let token = match &self.session {
            Some(s) => s.id_token.clone(),
            None => return Err(AuthError::NotSignedIn),
        };
        self.client.delete_account(&token).await.map_err(rejected)?;
        log::info!("Deleted remote account");
        self.sign_out()
    }

    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.session = None;
        LocalStorage::save_json(&self.path, &None::<AuthSession>)?;
        Ok(())
    }
}
