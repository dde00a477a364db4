use reqwest::header::{HeaderMap, AUTHORIZATION, SET_COOKIE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;

/// Cookie names under which session-auth frameworks are known to return
/// the access token. The same set is replayed on outgoing requests.
pub const TOKEN_COOKIE_ALIASES: &[&str] = &[
    "access_token_cookie",
    "jwt",
    "token",
    "auth_token",
    "access_token",
];

/// JSON body fields probed for a token, in order.
const TOKEN_BODY_FIELDS: &[&str] = &["access_token", "token", "jwt"];

/// Header name fragments that mark a header as token-bearing for the
/// last-resort fuzzy search.
const FUZZY_HEADER_MARKERS: &[&str] = &["token", "auth", "jwt"];

/// Cookie (and body field) carrying the secondary encryption key.
pub const ENC_KEY_COOKIE: &str = "enc_key";

/// Sentinel stored when no token can be located anywhere in the login
/// response. Requests made with it will be rejected by any real
/// deployment; the login flow warns the user when it falls back to this.
pub const PLACEHOLDER_TOKEN: &str = "manual-token-for-testing";

/// Snapshot of a raw login response.
///
/// Captures status, headers, parsed cookies, and the body text before the
/// response is consumed, so the success check and the credential search
/// can both work from the same data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `(name, value)` pairs as parsed by the HTTP stack, in response
    /// order. httpOnly cookies may appear here or only in `headers`.
    pub cookies: Vec<(String, String)>,
    pub body: String,
}

impl LoginResponse {
    /// Consume a response into a snapshot.
    pub async fn capture(response: reqwest::Response) -> Result<Self, Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let cookies = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        let body = response.text().await?;

        Ok(Self {
            status,
            headers,
            cookies,
            body,
        })
    }

    /// Decode the captured body under the same contract as
    /// [`crate::ApiClient::parse`]: non-success statuses become
    /// [`Error::Api`] (with any `detail` message), an empty success body
    /// is `Ok(None)`, anything else must decode into `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<Option<T>, Error> {
        if !self.status.is_success() {
            return Err(Error::from_status(self.status, &self.body));
        }
        if self.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&self.body)?))
    }
}

/// Credentials located in a login response. `None` means that source was
/// absent everywhere, which is a degraded-but-valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCredentials {
    pub token: Option<String>,
    pub enc_key: Option<String>,
}

type Extractor = fn(&LoginResponse) -> Option<String>;

/// Token sources in priority order. Each is pure over the snapshot; the
/// runner takes the first hit.
const TOKEN_EXTRACTORS: &[(&str, Extractor)] = &[
    ("cookie", token_from_cookies),
    ("set-cookie header", token_from_set_cookie),
    ("response body", token_from_body),
    ("cookie name match", token_from_fuzzy_cookie),
    ("authorization header", token_from_authorization),
    ("header name match", token_from_fuzzy_header),
];

/// Search the whole response for session credentials.
///
/// Never fails: malformed bodies, absent headers, and empty cookie lists
/// all degrade to "not found".
pub fn extract_credentials(response: &LoginResponse) -> ExtractedCredentials {
    ExtractedCredentials {
        token: extract_token(response),
        enc_key: extract_enc_key(response),
    }
}

fn extract_token(response: &LoginResponse) -> Option<String> {
    for (source, extract) in TOKEN_EXTRACTORS {
        if let Some(token) = extract(response) {
            debug!(source, "located auth token");
            return Some(token);
        }
    }
    debug!("no auth token found in login response");
    None
}

/// The encryption key only ever arrives under one name, but can show up
/// in the cookie list, a `Set-Cookie` header, or the body.
fn extract_enc_key(response: &LoginResponse) -> Option<String> {
    cookie_value(response, ENC_KEY_COOKIE)
        .or_else(|| set_cookie_value(response, ENC_KEY_COOKIE))
        .or_else(|| body_field(response, ENC_KEY_COOKIE))
}

fn token_from_cookies(response: &LoginResponse) -> Option<String> {
    response
        .cookies
        .iter()
        .find(|(name, _)| TOKEN_COOKIE_ALIASES.contains(&name.as_str()))
        .map(|(_, value)| value.clone())
}

/// Re-parse raw `Set-Cookie` headers; httpOnly cookies are not always
/// visible through the parsed cookie list.
fn token_from_set_cookie(response: &LoginResponse) -> Option<String> {
    set_cookie_pairs(&response.headers)
        .find(|(name, _)| TOKEN_COOKIE_ALIASES.contains(&name.as_str()))
        .map(|(_, value)| value)
}

fn token_from_body(response: &LoginResponse) -> Option<String> {
    let body: serde_json::Value = serde_json::from_str(&response.body).ok()?;
    TOKEN_BODY_FIELDS.iter().find_map(|field| {
        body.get(field)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Last-resort fuzzy match: any cookie whose name merely contains "token".
fn token_from_fuzzy_cookie(response: &LoginResponse) -> Option<String> {
    response
        .cookies
        .iter()
        .find(|(name, _)| name.to_ascii_lowercase().contains("token"))
        .map(|(_, value)| value.clone())
}

fn token_from_authorization(response: &LoginResponse) -> Option<String> {
    let value = response.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Any header whose name contains "token", "auth", or "jwt"; takes the
/// first value and strips a `Bearer ` prefix if present.
fn token_from_fuzzy_header(response: &LoginResponse) -> Option<String> {
    for (name, value) in response.headers.iter() {
        let lower = name.as_str().to_ascii_lowercase();
        if !FUZZY_HEADER_MARKERS.iter().any(|m| lower.contains(m)) {
            continue;
        }
        if let Ok(value) = value.to_str() {
            let token = value.strip_prefix("Bearer ").unwrap_or(value);
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

fn cookie_value(response: &LoginResponse, name: &str) -> Option<String> {
    response
        .cookies
        .iter()
        .find(|(cookie, _)| cookie == name)
        .map(|(_, value)| value.clone())
}

fn set_cookie_value(response: &LoginResponse, name: &str) -> Option<String> {
    set_cookie_pairs(&response.headers)
        .find(|(cookie, _)| cookie == name)
        .map(|(_, value)| value)
}

fn body_field(response: &LoginResponse, field: &str) -> Option<String> {
    let body: serde_json::Value = serde_json::from_str(&response.body).ok()?;
    body.get(field)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn set_cookie_pairs(headers: &HeaderMap) -> impl Iterator<Item = (String, String)> + '_ {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(parse_set_cookie)
}

/// First `name=value` pair of a `Set-Cookie` header, ignoring attributes
/// like `Path` and `HttpOnly`.
fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let first = header.split(';').next()?;
    let (name, value) = first.split_once('=')?;
    Some((name.trim().to_string(), value.trim().to_string()))
}
