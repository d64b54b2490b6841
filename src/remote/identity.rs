//! Login, registration and logout.

use reqwest::Method;

use super::http_client::parse_body;
use super::*;
use crate::error::ClientError;

impl RemoteClient {
    pub fn login(&self, host: &str, username: &str, password: &str) -> ClientResult<String> {
        let url = self.url(host, "/api/login")?;
        let body = serde_json::to_value(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let resp = self.request(Method::POST, &url, Some(&body), None)?;
        let parsed: LoginResponse = parse_body(&resp, "parse login response")?;
        match parsed.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ClientError::Parse("token not found in login response".to_string())),
        }
    }

    pub fn register(&self, host: &str, username: &str, password: &str) -> ClientResult<()> {
        let url = self.url(host, "/api/register")?;
        let body = serde_json::to_value(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        self.request(Method::POST, &url, Some(&body), None)?;
        Ok(())
    }

    pub fn logout(&self, auth: &Auth) -> ClientResult<()> {
        let url = self.url(&auth.host, "/api/logout")?;
        self.request(Method::POST, &url, None, Some(&auth.token))?;
        Ok(())
    }
}
