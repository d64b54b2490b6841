//! Error taxonomy shared by the controllers, the dispatcher and the remote client.

/// Every failure a screen can observe.
///
/// Validation and auth errors are produced locally before any I/O happens; the rest
/// come back from the background worker.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("not logged in (run `spacectl login`)")]
    AuthMissing,

    #[error("network error: {0}")]
    Network(String),

    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("i/o error: {0}")]
    Io(String),

    #[error("indexer failed: {0}")]
    Indexer(String),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }

    /// True for errors that mean the user has to authenticate again.
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            ClientError::AuthMissing | ClientError::Server { status: 401, .. }
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ClientError::Parse(err.to_string());
        }
        ClientError::Network(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
