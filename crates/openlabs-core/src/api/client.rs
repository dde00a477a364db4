use std::time::Duration;

use reqwest::header::{HeaderValue, COOKIE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::{ENC_KEY_COOKIE, TOKEN_COOKIE_ALIASES};
use crate::config::Config;
use crate::error::Error;

/// HTTP request timeout in seconds. A hard per-request ceiling; expiry
/// surfaces as a transport error.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Values supplied per invocation via flags or environment variables.
///
/// These seed a client when the stored configuration has no credentials
/// yet; stored credentials always win once present. The URL is the one
/// exception: an explicitly passed address points this invocation at a
/// different server.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub enc_key: Option<String>,
}

/// Client for one command invocation.
pub struct ApiClient {
    base_url: String,
    token: String,
    enc_key: String,
    http: Client,
}

impl ApiClient {
    /// Build a client from the persisted configuration and process-wide
    /// overrides. Pure over its inputs: no ambient global state.
    pub fn new(config: &Config, overrides: &Overrides) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()?;

        let token = if config.auth_token.is_empty() {
            overrides.token.clone().unwrap_or_default()
        } else {
            config.auth_token.clone()
        };
        let enc_key = if config.enc_key.is_empty() {
            overrides.enc_key.clone().unwrap_or_default()
        } else {
            config.enc_key.clone()
        };
        let base_url = overrides
            .api_url
            .clone()
            .unwrap_or_else(|| config.api_url.clone());

        Ok(Self {
            base_url,
            token,
            enc_key,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Drop held credentials. Login uses this so a stale token never
    /// rides along on the authentication request itself.
    pub fn clear_credentials(&mut self) {
        self.token.clear();
        self.enc_key.clear();
    }

    /// Send one request and return the raw response; [`ApiClient::parse`]
    /// consumes it. The token is attached under every cookie alias the
    /// server is known to accept plus an `Authorization: Bearer` header,
    /// and the encryption key gets its own cookie. Network and
    /// request-construction failures surface immediately; no retries.
    pub async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, Error> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(cookies) = self.credential_cookies() {
            request = request.header(COOKIE, cookies);
        }
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        debug!(%method, %url, "sending request");
        let response = request.send().await?;
        debug!(status = %response.status(), %url, "received response");

        Ok(response)
    }

    pub async fn get(&self, path: &str) -> Result<Response, Error> {
        self.send::<()>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, Error> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn post_empty(&self, path: &str) -> Result<Response, Error> {
        self.send::<()>(Method::POST, path, None).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, Error> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, Error> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    /// Drain a response. Non-success statuses become [`Error::Api`] with
    /// the server's `detail` message when one is present; an empty success
    /// body is `Ok(None)`; anything else must decode into `T`.
    pub async fn parse<T: DeserializeOwned>(response: Response) -> Result<Option<T>, Error> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::from_status(status, &body));
        }
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// Render a value as indented JSON for display.
    pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Manually built `Cookie` header. Responses set httpOnly cookies the
    /// jar cannot always replay, so held credentials are attached
    /// explicitly on every request, under every known alias.
    fn credential_cookies(&self) -> Option<HeaderValue> {
        let mut pairs: Vec<String> = Vec::new();
        if !self.token.is_empty() {
            pairs.extend(
                TOKEN_COOKIE_ALIASES
                    .iter()
                    .map(|name| format!("{name}={}", self.token)),
            );
        }
        if !self.enc_key.is_empty() {
            pairs.push(format!("{ENC_KEY_COOKIE}={}", self.enc_key));
        }
        if pairs.is_empty() {
            return None;
        }

        match HeaderValue::from_str(&pairs.join("; ")) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("stored credentials contain characters not representable in a header");
                None
            }
        }
    }
}
