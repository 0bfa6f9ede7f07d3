// File: src/client/core.rs

use crate::client::ClientError;
use crate::client::cert::NoVerifier;
use crate::config::Config;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Scheme, authority and path of `uri`, without the query.
pub(crate) fn redacted(uri: &Uri) -> String {
    match (uri.scheme_str(), uri.authority()) {
        (Some(scheme), Some(authority)) => format!("{}://{}{}", scheme, authority, uri.path()),
        _ => uri.path().to_string(),
    }
}

type HttpsClient =
    Client<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>, String>;

/// Shared JSON-over-HTTPS client. Cheap to clone: the connection pool is shared.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: HttpsClient,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(insecure: bool, timeout: Duration) -> Result<Self, ClientError> {
        let https_connector = if insecure {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();
            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            for err in &result.errors {
                log::warn!("Skipping unreadable system certificate: {}", err);
            }
            root_store.add_parsable_certificates(result.certs);
            if root_store.is_empty() {
                return Err(ClientError::NoCertificates);
            }
            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();
            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        let client = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self { client, timeout })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(
            config.allow_insecure_certs,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn parse_uri(url: &str) -> Result<Uri, ClientError> {
        url.parse::<Uri>()
            .map_err(|_| ClientError::InvalidUri(url.split('?').next().unwrap_or(url).to_string()))
    }

    async fn execute(&self, req: Request<String>) -> Result<(StatusCode, Vec<u8>), ClientError> {
        // Query strings carry API keys; never log or report them.
        let target = redacted(req.uri());
        log::debug!("{} {}", req.method(), target);

        let exchange = async {
            let resp = self
                .client
                .request(req)
                .await
                .map_err(|e| ClientError::Transport(format!("{:?}", e)))?;
            let status = resp.status();
            let body = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?
                .to_bytes();
            Ok::<_, ClientError>((status, body.to_vec()))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(res) => res,
            Err(_) => Err(ClientError::Timeout(target)),
        }
    }

    fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(body).into_owned(),
            });
        }
        Ok(serde_json::from_slice(body)?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(Self::parse_uri(url)?)
            .header(ACCEPT, "application/json")
            .body(String::new())
            .map_err(|e| ClientError::InvalidUri(e.to_string()))?;
        let (status, body) = self.execute(req).await?;
        Self::decode(status, &body)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &B,
    ) -> Result<T, ClientError> {
        let req = Request::builder()
            .method(Method::POST)
            .uri(Self::parse_uri(url)?)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(payload)?)
            .map_err(|e| ClientError::InvalidUri(e.to_string()))?;
        let (status, body) = self.execute(req).await?;
        Self::decode(status, &body)
    }
}
