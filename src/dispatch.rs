//! Per-screen background workers and the UI loop they report back to.
//!
//! Every screen owns one [`RequestDispatcher`]: a single worker thread draining a job
//! queue, so a screen's own operations run in submission order while different
//! screens proceed independently. Finished jobs post a [`UiEvent`] to the shared
//! [`UiLoop`]; nothing is consumed on the worker.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::error::{ClientError, ClientResult};
use crate::model::{SpaceFilter, SpaceRef};

/// Results posted from workers to the UI loop.
#[derive(Debug)]
pub enum UiEvent {
    LoggedIn {
        host: String,
        result: ClientResult<String>,
    },
    Registered {
        result: ClientResult<()>,
    },
    RemoteLogout {
        result: ClientResult<()>,
    },
    SpacesLoaded {
        filter: SpaceFilter,
        result: ClientResult<Vec<SpaceRef>>,
    },
    SpaceCreated {
        name: String,
        result: ClientResult<()>,
    },
    SpaceDeleted {
        name: String,
        result: ClientResult<()>,
    },
    BatchFinished {
        result: ClientResult<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenId(u64);

/// Liveness handle of one screen instance. Invalidated at teardown.
#[derive(Clone, Debug)]
pub struct ScreenScope {
    id: ScreenId,
    live: Arc<AtomicBool>,
}

impl ScreenScope {
    fn new(id: ScreenId) -> Self {
        Self {
            id,
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn invalidate(&self) {
        self.live.store(false, Ordering::Release);
    }
}

struct Envelope {
    scope: ScreenScope,
    event: UiEvent,
}

/// An event that reached the UI loop for a screen that is still alive.
#[derive(Debug)]
pub struct Delivery {
    pub screen: ScreenId,
    pub event: UiEvent,
}

/// The process-wide UI loop. Lives on (and must only be pumped from) one thread.
///
/// Deliveries read while waiting for one screen are parked in a backlog until their
/// own screen asks for them.
pub struct UiLoop {
    tx: mpsc::Sender<Envelope>,
    rx: mpsc::Receiver<Envelope>,
    backlog: RefCell<VecDeque<Envelope>>,
    next_screen: Cell<u64>,
}

impl Default for UiLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl UiLoop {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            backlog: RefCell::new(VecDeque::new()),
            next_screen: Cell::new(1),
        }
    }

    /// Creates the dispatcher for a new screen instance.
    pub fn open_screen(&self, name: &str) -> ClientResult<RequestDispatcher> {
        let id = ScreenId(self.next_screen.get());
        self.next_screen.set(id.0 + 1);
        RequestDispatcher::spawn(name, ScreenScope::new(id), self.tx.clone())
    }

    /// Next pending delivery without waiting.
    pub fn try_next(&self) -> Option<Delivery> {
        if let Some(delivery) = self.take_parked(None) {
            return Some(delivery);
        }
        loop {
            let envelope = self.rx.try_recv().ok()?;
            if let Some(delivery) = accept(envelope) {
                return Some(delivery);
            }
        }
    }

    /// Waits up to `timeout` for the next delivery.
    pub fn next_timeout(&self, timeout: Duration) -> Option<Delivery> {
        if let Some(delivery) = self.take_parked(None) {
            return Some(delivery);
        }
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let envelope = self.rx.recv_timeout(remaining).ok()?;
            if let Some(delivery) = accept(envelope) {
                return Some(delivery);
            }
        }
    }

    /// Waits up to `timeout` for the next delivery owned by `screen`.
    ///
    /// Deliveries for other live screens are parked, not dropped.
    pub fn next_for(&self, screen: ScreenId, timeout: Duration) -> Option<Delivery> {
        if let Some(delivery) = self.take_parked(Some(screen)) {
            return Some(delivery);
        }
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let envelope = self.rx.recv_timeout(remaining).ok()?;
            if !envelope.scope.is_live() {
                tracing::debug!(screen = envelope.scope.id().0, "dropping delivery for closed screen");
                continue;
            }
            if envelope.scope.id() == screen {
                return accept(envelope);
            }
            tracing::debug!(screen = envelope.scope.id().0, "parking delivery for another screen");
            self.backlog.borrow_mut().push_back(envelope);
        }
    }

    // Oldest parked delivery, for `screen` or for anyone. Closed screens are pruned.
    fn take_parked(&self, screen: Option<ScreenId>) -> Option<Delivery> {
        let mut backlog = self.backlog.borrow_mut();
        backlog.retain(|envelope| envelope.scope.is_live());
        let index = backlog
            .iter()
            .position(|envelope| screen.is_none_or(|id| envelope.scope.id() == id))?;
        backlog.remove(index).and_then(accept)
    }

    /// Everything currently queued, in arrival order.
    pub fn drain(&self) -> Vec<Delivery> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

// A result can arrive before teardown and be read after it.
fn accept(envelope: Envelope) -> Option<Delivery> {
    if !envelope.scope.is_live() {
        tracing::debug!(screen = envelope.scope.id().0, "dropping delivery for closed screen");
        return None;
    }
    Some(Delivery {
        screen: envelope.scope.id(),
        event: envelope.event,
    })
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Single-worker queue owned by one screen.
pub struct RequestDispatcher {
    name: String,
    scope: ScreenScope,
    jobs: Option<mpsc::Sender<Job>>,
    ui: mpsc::Sender<Envelope>,
}

impl RequestDispatcher {
    fn spawn(name: &str, scope: ScreenScope, ui: mpsc::Sender<Envelope>) -> ClientResult<Self> {
        let (tx, rx) = mpsc::channel::<Job>();
        let worker_name = format!("{}-worker", name);
        std::thread::Builder::new()
            .name(worker_name)
            .spawn(move || {
                // Queued jobs still run after teardown; their results are discarded.
                while let Ok(job) = rx.recv() {
                    job();
                }
            })
            .map_err(|e| ClientError::Io(format!("spawn worker for {}: {}", name, e)))?;
        tracing::debug!(screen = scope.id().0, screen_name = name, "screen opened");
        Ok(Self {
            name: name.to_string(),
            scope,
            jobs: Some(tx),
            ui,
        })
    }

    pub fn screen(&self) -> ScreenId {
        self.scope.id()
    }

    pub fn scope(&self) -> ScreenScope {
        self.scope.clone()
    }

    /// Queues `op` on the worker and posts `into_event(result)` to the UI loop.
    pub fn submit<T, F, M>(&self, label: &'static str, op: F, into_event: M) -> ClientResult<()>
    where
        F: FnOnce() -> T + Send + 'static,
        M: FnOnce(T) -> UiEvent + Send + 'static,
    {
        let Some(jobs) = self.jobs.as_ref() else {
            return Err(ClientError::Io(format!("screen {} is closed", self.name)));
        };
        let scope = self.scope.clone();
        let ui = self.ui.clone();
        let job: Job = Box::new(move || {
            tracing::debug!(screen = scope.id().0, op = label, "running");
            let out = op();
            if !scope.is_live() {
                tracing::debug!(screen = scope.id().0, op = label, "screen closed; result dropped");
                return;
            }
            let event = into_event(out);
            if ui.send(Envelope { scope, event }).is_err() {
                tracing::warn!(op = label, "ui loop gone; result dropped");
            }
        });
        jobs.send(job)
            .map_err(|_| ClientError::Io(format!("worker for {} stopped", self.name)))
    }

    /// Invalidates the screen. In-flight work finishes but is never delivered.
    pub fn teardown(&mut self) {
        if self.jobs.take().is_some() {
            self.scope.invalidate();
            tracing::debug!(screen = self.scope.id().0, screen_name = %self.name, "screen closed");
        }
    }
}

impl Drop for RequestDispatcher {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
