//! HTTP client for the Foundry backend.

use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use std::cell::OnceCell;
use std::time::Duration;
use tracing::debug;

use crate::config::{Settings, SettingsSource};
use crate::credentials::{redact_token, CredentialStore};
use crate::error::{FoundryError, Result};

use super::{ApiRequest, ApiResponse, Backend};

/// Longest slice of a non-JSON error body echoed back to the user.
const MAX_ERROR_BODY: usize = 200;

/// [`Backend`] implementation over `reqwest`.
///
/// Settings are resolved on the first request, and the bearer token is
/// read from the credential store on every request so that `auth login`
/// followed by another command in the same process sees the new token.
pub struct ApiClient {
    source: SettingsSource,
    credentials: CredentialStore,
    connection: OnceCell<Connection>,
}

struct Connection {
    http: Client,
    base_url: String,
}

impl Connection {
    fn open(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("foundry/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, request.path);
        let parsed = if request.query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, &request.query)
        };

        parsed.map_err(|e| FoundryError::InvalidValue {
            name: "<PATH>".to_string(),
            message: format!("'{}' does not form a valid URL: {}", request.path, e),
        })
    }
}

impl ApiClient {
    /// Client with settings resolved on first use.
    pub fn lazy(source: SettingsSource, credentials: CredentialStore) -> Self {
        Self {
            source,
            credentials,
            connection: OnceCell::new(),
        }
    }

    /// Client for already-resolved settings.
    pub fn new(settings: &Settings, credentials: CredentialStore) -> Result<Self> {
        let client = Self::lazy(SettingsSource::default(), credentials);
        let _ = client.connection.set(Connection::open(settings)?);
        Ok(client)
    }

    fn connection(&self) -> Result<&Connection> {
        if self.connection.get().is_none() {
            let settings = self.source.resolve()?;
            let _ = self.connection.set(Connection::open(&settings)?);
        }
        self.connection
            .get()
            .ok_or_else(|| anyhow::anyhow!("HTTP client was not initialized").into())
    }
}

impl Backend for ApiClient {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let conn = self.connection()?;
        let url = conn.url_for(&request)?;

        let mut builder = conn.http.request(request.method.to_reqwest(), url.clone());

        // An explicit Authorization header from `foundry api` wins.
        if !request.has_header("authorization") {
            if let Some(token) = self.credentials.token()? {
                debug!(token = %redact_token(&token), "attaching bearer token");
                builder = builder.bearer_auth(token);
            }
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, %url, "sending request");
        let response = builder.send()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "received response");

        let response = ApiResponse {
            status,
            headers,
            body,
        };

        if !response.is_success() {
            return Err(FoundryError::Http {
                status,
                method: request.method.to_string(),
                path: request.path,
                message: error_message(&response),
            });
        }

        Ok(response)
    }

    fn base_url(&self) -> Option<String> {
        self.connection().ok().map(|c| c.base_url.clone())
    }
}

/// Best human-readable message for a failed response.
///
/// Prefers the backend's `detail`, `message`, or `error` field, then the
/// raw body, then the status reason.
pub fn error_message(response: &ApiResponse) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&response.body) {
        for key in ["detail", "message", "error"] {
            match map.get(key) {
                Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }

    let body = response.body.trim();
    if !body.is_empty() {
        let clipped: String = body.chars().take(MAX_ERROR_BODY).collect();
        return clipped;
    }

    reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("request failed")
        .to_string()
}
