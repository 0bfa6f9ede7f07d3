// File: src/client/identity.rs
//! Email/password and Google sign-in against the Firebase Identity Toolkit REST API.
use crate::client::core::HttpClient;
use crate::client::{ClientError, join_url};
use serde::{Deserialize, Serialize};

const GOOGLE_PROVIDER: &str = "google.com";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdateRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest {
    post_body: String,
    request_uri: &'static str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    id_token: &'a str,
}

/// Account as reported by the identity provider after sign-in or update.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAccount {
    pub local_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// The provider's error code (e.g. `EMAIL_NOT_FOUND`) if the failure came from it.
pub fn provider_message(err: &ClientError) -> Option<String> {
    match err {
        ClientError::Status { body, .. } => serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|e| e.error.message),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct IdentityClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(http: HttpClient, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, action: &str) -> Result<String, ClientError> {
        if self.api_key.is_empty() {
            return Err(ClientError::MissingApiKey("identity provider"));
        }
        Ok(join_url(
            &self.base_url,
            &format!("accounts:{}?key={}", action, self.api_key),
        ))
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityAccount, ClientError> {
        let req = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.http
            .post_json(&self.endpoint("signInWithPassword")?, &req)
            .await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityAccount, ClientError> {
        let req = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.http.post_json(&self.endpoint("signUp")?, &req).await
    }

    pub async fn update_display_name(
        &self,
        id_token: &str,
        display_name: &str,
    ) -> Result<IdentityAccount, ClientError> {
        let req = ProfileUpdateRequest {
            id_token,
            display_name,
            return_secure_token: true,
        };
        self.http.post_json(&self.endpoint("update")?, &req).await
    }

    /// Exchange a Google ID token for a provider session.
    pub async fn sign_in_with_google(&self, google_id_token: &str) -> Result<IdentityAccount, ClientError> {
        let req = IdpRequest {
            post_body: format!("id_token={}&providerId={}", google_id_token, GOOGLE_PROVIDER),
            request_uri: "http://localhost",
            return_idp_credential: true,
            return_secure_token: true,
        };
        self.http
            .post_json(&self.endpoint("signInWithIdp")?, &req)
            .await
    }

    pub async fn delete_account(&self, id_token: &str) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .http
            .post_json(&self.endpoint("delete")?, &TokenRequest { id_token })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message() {
        let err = ClientError::Status {
            status: 400,
            body: r#"{"error":{"code":400,"message":"INVALID_PASSWORD","errors":[]}}"#.to_string(),
        };
        assert_eq!(provider_message(&err).as_deref(), Some("INVALID_PASSWORD"));
        assert_eq!(provider_message(&ClientError::Timeout("x".into())), None);
    }
}
