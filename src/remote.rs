use anyhow::{Context, Result};

use crate::error::ClientResult;
use crate::model::{Auth, DEFAULT_SERVICE_PORT, SpaceFilter, SpaceRef};

mod http_client;
pub use self::http_client::{CONNECT_TIMEOUT, READ_TIMEOUT};

mod types;
pub use self::types::*;
mod identity;
mod spaces;

/// Calls the space service understands.
///
/// Implemented by [`RemoteClient`] over HTTP; tests substitute recording fakes.
pub trait SpaceApi: Send + Sync {
    /// Returns the bearer token issued for the credentials.
    fn login(&self, host: &str, username: &str, password: &str) -> ClientResult<String>;

    fn register(&self, host: &str, username: &str, password: &str) -> ClientResult<()>;

    fn logout(&self, auth: &Auth) -> ClientResult<()>;

    fn create_space(&self, auth: &Auth, name: &str) -> ClientResult<()>;

    fn list_spaces(&self, auth: &Auth, filter: SpaceFilter) -> ClientResult<Vec<SpaceRef>>;

    fn delete_space(&self, auth: &Auth, name: &str) -> ClientResult<()>;
}

pub struct RemoteClient {
    client: reqwest::blocking::Client,
    default_port: u16,
}

impl RemoteClient {
    pub fn new() -> Result<Self> {
        Self::with_default_port(DEFAULT_SERVICE_PORT)
    }

    pub fn with_default_port(default_port: u16) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("spacectl")
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            client,
            default_port,
        })
    }
}

impl SpaceApi for RemoteClient {
    fn login(&self, host: &str, username: &str, password: &str) -> ClientResult<String> {
        RemoteClient::login(self, host, username, password)
    }

    fn register(&self, host: &str, username: &str, password: &str) -> ClientResult<()> {
        RemoteClient::register(self, host, username, password)
    }

    fn logout(&self, auth: &Auth) -> ClientResult<()> {
        RemoteClient::logout(self, auth)
    }

    fn create_space(&self, auth: &Auth, name: &str) -> ClientResult<()> {
        RemoteClient::create_space(self, auth, name)
    }

    fn list_spaces(&self, auth: &Auth, filter: SpaceFilter) -> ClientResult<Vec<SpaceRef>> {
        RemoteClient::list_spaces(self, auth, filter)
    }

    fn delete_space(&self, auth: &Auth, name: &str) -> ClientResult<()> {
        RemoteClient::delete_space(self, auth, name)
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
