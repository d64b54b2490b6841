use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use anyhow::{Context, Result, anyhow};

use crate::error::{ClientError, ClientResult};
use crate::model::{ClientConfig, Session, SessionRecord};

const SESSION_FILE: &str = "session.json";
const CONFIG_FILE: &str = "config.json";

/// Holder of the single active session.
///
/// `get` is served from memory and never waits on disk. Writes are last-writer-wins.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Session;

    /// Stores a non-empty token together with the host it was issued by.
    fn set_token(&self, token: &str, host: &str) -> ClientResult<()>;

    /// Drops the token. The last server host is kept for prefill.
    fn clear(&self) -> ClientResult<()>;
}

fn ensure_token(token: &str) -> ClientResult<()> {
    if token.is_empty() {
        return Err(ClientError::validation("refusing to store an empty token"));
    }
    Ok(())
}

fn read_lock<T: Clone>(lock: &RwLock<T>) -> T {
    match lock.read() {
        Ok(v) => v.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn replace<T>(lock: &RwLock<T>, value: T) {
    match lock.write() {
        Ok(mut v) => *v = value,
        Err(poisoned) => *poisoned.into_inner() = value,
    }
}

/// Session persisted as `session.json` under a state directory.
pub struct FileSessionStore {
    root: PathBuf,
    cached: RwLock<Session>,
    write_guard: Mutex<()>,
}

impl FileSessionStore {
    pub fn open(state_dir: &Path) -> Result<Self> {
        fs::create_dir_all(state_dir)
            .with_context(|| format!("create state dir {}", state_dir.display()))?;
        let record = read_record(&state_dir.join(SESSION_FILE))?;
        if record.version > 1 {
            anyhow::bail!("unsupported session record version {}", record.version);
        }
        let session = Session {
            server_host: record.last_server_host.unwrap_or_default(),
            auth_token: record.auth_token.filter(|t| !t.is_empty()),
        };
        Ok(Self {
            root: state_dir.to_path_buf(),
            cached: RwLock::new(session),
            write_guard: Mutex::new(()),
        })
    }

    fn persist(&self, session: Session) -> ClientResult<()> {
        let _serialized = self.write_guard.lock().unwrap_or_else(|p| p.into_inner());
        let record = SessionRecord {
            version: 1,
            last_server_host: Some(session.server_host.clone()).filter(|h| !h.is_empty()),
            auth_token: session.auth_token.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&record)?;
        write_atomic(&self.root.join(SESSION_FILE), &bytes)
            .map_err(|e| ClientError::Io(format!("{:#}", e)))?;
        replace(&self.cached, session);
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Session {
        read_lock(&self.cached)
    }

    fn set_token(&self, token: &str, host: &str) -> ClientResult<()> {
        ensure_token(token)?;
        tracing::debug!(host, "storing session token");
        self.persist(Session {
            server_host: host.to_string(),
            auth_token: Some(token.to_string()),
        })
    }

    fn clear(&self) -> ClientResult<()> {
        let current = self.get();
        tracing::debug!(host = %current.server_host, "clearing session token");
        self.persist(Session {
            server_host: current.server_host,
            auth_token: None,
        })
    }
}

/// Process-local store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Session {
        read_lock(&self.session)
    }

    fn set_token(&self, token: &str, host: &str) -> ClientResult<()> {
        ensure_token(token)?;
        replace(
            &self.session,
            Session {
                server_host: host.to_string(),
                auth_token: Some(token.to_string()),
            },
        );
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        let host = self.get().server_host;
        replace(
            &self.session,
            Session {
                server_host: host,
                auth_token: None,
            },
        );
        Ok(())
    }
}

fn read_record(path: &Path) -> Result<SessionRecord> {
    if !path.exists() {
        return Ok(SessionRecord {
            version: 1,
            ..SessionRecord::default()
        });
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let record: SessionRecord =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    Ok(record)
}

pub fn read_config(state_dir: &Path) -> Result<ClientConfig> {
    let path = state_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let bytes = fs::read(&path).context("read config.json")?;
    let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
    if cfg.version != 1 {
        return Err(anyhow!("unsupported config version {}", cfg.version));
    }
    Ok(cfg)
}

pub fn write_config(state_dir: &Path, cfg: &ClientConfig) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
    write_atomic(&state_dir.join(CONFIG_FILE), &bytes).context("write config.json")?;
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
