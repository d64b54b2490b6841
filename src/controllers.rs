//! Screen-side controllers. All methods run on the UI loop thread.

use std::sync::Arc;

use crate::dispatch::{Delivery, RequestDispatcher, ScreenId, UiLoop};
use crate::error::ClientResult;
use crate::remote::SpaceApi;
use crate::store::SessionStore;

mod login;
mod space_list;
mod space_mutation;

pub use self::login::{LoginController, Route, fresh_start};
pub use self::space_list::{ListView, SpaceListController};
pub use self::space_mutation::SpaceMutationController;

/// What one screen instance works with: the shared session and service, plus its
/// own dispatcher.
pub struct ScreenContext {
    pub store: Arc<dyn SessionStore>,
    pub api: Arc<dyn SpaceApi>,
    pub dispatcher: RequestDispatcher,
}

impl ScreenContext {
    pub fn open(
        ui: &UiLoop,
        name: &str,
        store: Arc<dyn SessionStore>,
        api: Arc<dyn SpaceApi>,
    ) -> ClientResult<Self> {
        Ok(Self {
            store,
            api,
            dispatcher: ui.open_screen(name)?,
        })
    }

    pub fn id(&self) -> ScreenId {
        self.dispatcher.screen()
    }

    pub fn owns(&self, delivery: &Delivery) -> bool {
        delivery.screen == self.id()
    }
}

#[cfg(test)]
#[path = "tests/controllers_tests.rs"]
mod tests;
