//! Recording doubles for the service and indexer boundaries.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::controllers::ScreenContext;
use crate::dispatch::{Delivery, UiLoop};
use crate::error::{ClientError, ClientResult};
use crate::indexer::Indexer;
use crate::model::{Auth, Session, SpaceFilter, SpaceRef};
use crate::remote::SpaceApi;
use crate::store::MemorySessionStore;

pub(crate) const WAIT: Duration = Duration::from_secs(5);

/// In-memory service that counts every call.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub spaces: Mutex<Vec<String>>,
    pub token: Mutex<Option<String>>,
    pub create_error: Mutex<Option<ClientError>>,
    pub delete_error: Mutex<Option<ClientError>>,
    pub list_error: Mutex<Option<ClientError>>,
    pub logins: AtomicUsize,
    pub creates: AtomicUsize,
    pub lists: AtomicUsize,
    pub deletes: AtomicUsize,
    pub logouts: AtomicUsize,
}

impl FakeApi {
    pub fn with_spaces(names: &[&str]) -> Self {
        let api = Self::default();
        *api.spaces.lock().unwrap() = names.iter().map(|n| n.to_string()).collect();
        *api.token.lock().unwrap() = Some("tok-1".to_string());
        api
    }

    pub fn calls(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
            + self.creates.load(Ordering::SeqCst)
            + self.lists.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
            + self.logouts.load(Ordering::SeqCst)
    }
}

impl SpaceApi for FakeApi {
    fn login(&self, _host: &str, _username: &str, password: &str) -> ClientResult<String> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        if password != "secret" {
            return Err(ClientError::Server {
                status: 401,
                body: r#"{"message":"Invalid credentials"}"#.to_string(),
            });
        }
        self.token
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::Parse("token not found in login response".to_string()))
    }

    fn register(&self, _host: &str, _username: &str, _password: &str) -> ClientResult<()> {
        Ok(())
    }

    fn logout(&self, _auth: &Auth) -> ClientResult<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Err(ClientError::Network("connection refused".to_string()))
    }

    fn create_space(&self, _auth: &Auth, name: &str) -> ClientResult<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.create_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.spaces.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn list_spaces(&self, _auth: &Auth, _filter: SpaceFilter) -> ClientResult<Vec<SpaceRef>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .spaces
            .lock()
            .unwrap()
            .iter()
            .map(SpaceRef::new)
            .collect())
    }

    fn delete_space(&self, _auth: &Auth, name: &str) -> ClientResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.delete_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.spaces.lock().unwrap().retain(|s| s != name);
        Ok(())
    }
}

/// What one indexer call saw: staged paths, tags, and the staged contents.
#[derive(Clone, Debug)]
pub(crate) struct IndexCall {
    pub paths: Vec<PathBuf>,
    pub tags: Vec<i32>,
    pub contents: Vec<String>,
}

#[derive(Default)]
pub(crate) struct FakeIndexer {
    pub calls: Mutex<Vec<IndexCall>>,
    pub fail_with: Mutex<Option<String>>,
}

impl FakeIndexer {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Indexer for FakeIndexer {
    fn process_files(&self, paths: &[PathBuf], tags: &[i32]) -> ClientResult<String> {
        // Staged copies are removed after the call, so read them now.
        let contents = paths
            .iter()
            .map(|p| fs::read_to_string(p).unwrap_or_default())
            .collect();
        self.calls.lock().unwrap().push(IndexCall {
            paths: paths.to_vec(),
            tags: tags.to_vec(),
            contents,
        });
        if let Some(msg) = self.fail_with.lock().unwrap().clone() {
            return Err(ClientError::Indexer(msg));
        }
        Ok(format!("Processed {} files. Internal index size: {}", paths.len(), paths.len()))
    }
}

pub(crate) fn logged_in_store() -> MemorySessionStore {
    MemorySessionStore::with_session(Session {
        server_host: "10.0.0.7".to_string(),
        auth_token: Some("tok-1".to_string()),
    })
}

pub(crate) fn next(ui: &UiLoop) -> Delivery {
    ui.next_timeout(WAIT).expect("delivery within timeout")
}

pub(crate) fn context(
    ui: &UiLoop,
    store: std::sync::Arc<MemorySessionStore>,
    api: std::sync::Arc<FakeApi>,
) -> ScreenContext {
    ScreenContext::open(ui, "test", store, api).expect("open screen")
}
