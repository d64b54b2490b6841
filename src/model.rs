use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

mod config;
pub use self::config::*;

/// Port the space service listens on when the stored host does not name one.
pub const DEFAULT_SERVICE_PORT: u16 = 3000;

/// The active working connection: a server host plus an optional bearer token.
///
/// A token is either absent or a non-empty string; the store never hands out an
/// empty one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub server_host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl Session {
    pub fn has_token(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Credentials for an authenticated call, or `AuthMissing`.
    pub fn auth(&self) -> ClientResult<Auth> {
        match self.auth_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(Auth {
                host: self.server_host.clone(),
                token: token.to_string(),
            }),
            _ => Err(ClientError::AuthMissing),
        }
    }
}

/// Host and token captured at submit time and moved onto the worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Auth {
    pub host: String,
    pub token: String,
}

/// A named remote data partition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceRef {
    pub name: String,
}

impl SpaceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for SpaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpaceFilter {
    #[default]
    All,
    Uninitialized,
}

/// Lifecycle of one mutation (create, delete of one item, batch update).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperationState {
    #[default]
    Idle,
    InFlight,
    Success,
    Failure,
}

impl OperationState {
    pub fn is_busy(self) -> bool {
        self == OperationState::InFlight
    }
}

/// Turns a stored server host into a base URL.
///
/// Accepts a bare host (`192.168.1.5`), `host:port`, or a full `http(s)://` URL. A bare
/// host gets `http` and `default_port`.
pub fn resolve_base_url(host: &str, default_port: u16) -> ClientResult<String> {
    let raw = host.trim().trim_end_matches('/');
    if raw.is_empty() {
        return Err(ClientError::validation("server host is empty"));
    }

    let has_scheme = raw.contains("://");
    let with_scheme = if has_scheme {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };
    let mut url = reqwest::Url::parse(&with_scheme)
        .map_err(|e| ClientError::validation(format!("invalid server host {:?}: {}", raw, e)))?;

    if !has_scheme && !has_explicit_port(raw) {
        url.set_port(Some(default_port))
            .map_err(|_| ClientError::validation(format!("invalid server host {:?}", raw)))?;
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn has_explicit_port(raw: &str) -> bool {
    // `[::1]:8080` has a port, bare `::1` does not.
    raw.rsplit_once(':').is_some_and(|(head, port)| {
        !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) && !head.ends_with(':')
    })
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
