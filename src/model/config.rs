use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_port() -> u16 {
    super::DEFAULT_SERVICE_PORT
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    /// Port used when the stored server host does not carry one.
    #[serde(default = "default_port")]
    pub default_port: u16,

    /// Where batch files are materialized before indexing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<PathBuf>,

    /// Program implementing the indexer boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer_program: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            default_port: default_port(),
            staging_dir: None,
            indexer_program: None,
        }
    }
}

/// On-disk form of the session: survives restarts, token removed on logout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    pub version: u32,

    #[serde(default)]
    pub last_server_host: Option<String>,

    #[serde(default)]
    pub auth_token: Option<String>,
}
