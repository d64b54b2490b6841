//! Process-level wiring: shared services, the UI loop, and screen construction.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use crate::controllers::{Route, ScreenContext, fresh_start};
use crate::dispatch::UiLoop;
use crate::error::ClientResult;
use crate::indexer::Indexer;
use crate::model::SpaceFilter;
use crate::remote::SpaceApi;
use crate::screens::{
    CreateSpaceScreen, DeleteSpaceScreen, LoginScreen, Screen, SpacePickerScreen, UpdateScreen,
    deliver,
};
use crate::store::SessionStore;

/// Collaborators shared by every screen.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn SessionStore>,
    pub api: Arc<dyn SpaceApi>,
    pub indexer: Arc<dyn Indexer>,
    pub staging_dir: PathBuf,
}

pub struct App {
    ui: UiLoop,
    services: Services,
}

impl App {
    pub fn new(services: Services) -> Self {
        Self {
            ui: UiLoop::new(),
            services,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn ui(&self) -> &UiLoop {
        &self.ui
    }

    pub fn start_route(&self) -> Route {
        fresh_start(self.services.store.as_ref())
    }

    fn context(&self, name: &str) -> ClientResult<ScreenContext> {
        ScreenContext::open(
            &self.ui,
            name,
            Arc::clone(&self.services.store),
            Arc::clone(&self.services.api),
        )
    }

    pub fn open_login(&self) -> ClientResult<LoginScreen> {
        Ok(LoginScreen::new(self.context("login")?))
    }

    pub fn open_create_space(&self) -> ClientResult<CreateSpaceScreen> {
        Ok(CreateSpaceScreen::new(self.context("create-space")?))
    }

    pub fn open_delete_space(&self) -> ClientResult<DeleteSpaceScreen> {
        Ok(DeleteSpaceScreen::new(self.context("delete-space")?))
    }

    pub fn open_space_picker(&self, filter: SpaceFilter) -> ClientResult<SpacePickerScreen> {
        Ok(SpacePickerScreen::new(self.context("space-picker")?, filter))
    }

    pub fn open_update(&self) -> ClientResult<UpdateScreen> {
        Ok(UpdateScreen::new(
            self.context("update")?,
            self.services.staging_dir.clone(),
            Arc::clone(&self.services.indexer),
        ))
    }

    /// Pumps the UI loop into `screen` until nothing it submitted is outstanding.
    ///
    /// Results for other open screens stay queued for their own `drive`.
    pub fn drive(&self, screen: &mut dyn Screen, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let id = screen.context().id();
        while !screen.is_settled() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                bail!("timed out waiting for {} pending operation(s)", screen.pending());
            }
            let Some(delivery) = self.ui.next_for(id, remaining) else {
                continue;
            };
            deliver(screen, delivery)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
