use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use super::*;
use crate::error::ClientError;
use crate::model::resolve_base_url;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Bounds the whole request, not the gap between reads: the blocking client has no
/// per-read timeout, so a response still streaming after this long also fails.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

impl RemoteClient {
    pub(super) fn url(&self, host: &str, path: &str) -> ClientResult<String> {
        let base = resolve_base_url(host, self.default_port)?;
        Ok(format!("{}{}", base, path))
    }

    /// Sends one JSON request and returns the body of a 2xx response.
    pub(super) fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
        token: Option<&str>,
    ) -> ClientResult<String> {
        let label = format!("{} {}", method, url);
        let mut req = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, auth_header(token));
        }
        if let Some(body) = body
            && (method == Method::POST || method == Method::PUT || method == Method::DELETE)
        {
            req = req.body(serde_json::to_vec(body)?);
        }

        tracing::debug!(request = %label, "sending");
        let resp = req
            .send()
            .map_err(|e| ClientError::Network(format!("{}: {}", label, e)))?;
        self.ensure_ok(resp, &label)
    }

    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> ClientResult<String> {
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ClientError::Network(format!("{} body: {}", label, e)))?;
        if status.is_success() {
            return Ok(body);
        }
        tracing::debug!(request = label, status = status.as_u16(), "non-success status");
        Err(ClientError::Server {
            status: status.as_u16(),
            body: body.trim().to_string(),
        })
    }
}

pub(super) fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

pub(super) fn parse_body<T: DeserializeOwned>(body: &str, label: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|e| ClientError::Parse(format!("{}: {}", label, e)))
}
