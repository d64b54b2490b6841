use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ScreenContext, SpaceListController};
use crate::dispatch::UiEvent;
use crate::error::{ClientError, ClientResult};
use crate::model::OperationState;

/// Create and per-item delete cycles.
///
/// Both follow `Idle -> InFlight -> Success`, with errors falling back to `Idle` so the
/// user can retry. Deletes are tracked per space name and never block each other.
#[derive(Default)]
pub struct SpaceMutationController {
    create: OperationState,
    create_error: Option<ClientError>,
    deletes: BTreeMap<String, OperationState>,
    delete_errors: BTreeMap<String, ClientError>,
}

impl SpaceMutationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_state(&self) -> OperationState {
        self.create
    }

    pub fn create_error(&self) -> Option<&ClientError> {
        self.create_error.as_ref()
    }

    pub fn input_enabled(&self) -> bool {
        self.create == OperationState::Idle
    }

    pub fn show_busy(&self) -> bool {
        self.create.is_busy()
    }

    pub fn is_done(&self) -> bool {
        self.create == OperationState::Success
    }

    /// Returns `Ok(false)` if input is currently disabled.
    pub fn create(&mut self, ctx: &ScreenContext, name: &str) -> ClientResult<bool> {
        if !self.input_enabled() {
            return Ok(false);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::validation("please enter a name"));
        }
        let auth = ctx.store.get().auth()?;

        let api = Arc::clone(&ctx.api);
        let owned = name.to_string();
        ctx.dispatcher.submit(
            "create space",
            move || api.create_space(&auth, &owned),
            {
                let name = name.to_string();
                move |result| UiEvent::SpaceCreated { name, result }
            },
        )?;
        tracing::info!(space = name, "create submitted");
        self.create = OperationState::InFlight;
        self.create_error = None;
        Ok(true)
    }

    pub fn on_created(&mut self, name: &str, result: ClientResult<()>) {
        match result {
            Ok(()) => {
                tracing::info!(space = name, "space created");
                self.create = OperationState::Success;
            }
            Err(err) => {
                tracing::warn!(space = name, error = %err, "create failed");
                self.create = OperationState::Idle;
                self.create_error = Some(err);
            }
        }
    }

    pub fn item_state(&self, name: &str) -> OperationState {
        self.deletes.get(name).copied().unwrap_or_default()
    }

    pub fn item_enabled(&self, name: &str) -> bool {
        self.item_state(name) == OperationState::Idle
    }

    pub fn delete_error(&self, name: &str) -> Option<&ClientError> {
        self.delete_errors.get(name)
    }

    /// Disables the item before anything is queued, so a second activation while the
    /// first is pending is a no-op returning `Ok(false)`.
    pub fn delete(
        &mut self,
        ctx: &ScreenContext,
        list: &SpaceListController,
        name: &str,
    ) -> ClientResult<bool> {
        if !self.item_enabled(name) {
            return Ok(false);
        }
        if !list.contains(name) {
            return Err(ClientError::validation(format!("no space named {:?}", name)));
        }
        let auth = ctx.store.get().auth()?;

        self.deletes
            .insert(name.to_string(), OperationState::InFlight);
        self.delete_errors.remove(name);

        let api = Arc::clone(&ctx.api);
        let owned = name.to_string();
        let submitted = ctx.dispatcher.submit(
            "delete space",
            move || api.delete_space(&auth, &owned),
            {
                let name = name.to_string();
                move |result| UiEvent::SpaceDeleted { name, result }
            },
        );
        if let Err(err) = submitted {
            self.deletes.remove(name);
            return Err(err);
        }
        tracing::info!(space = name, "delete submitted");
        Ok(true)
    }

    /// Success reloads the whole list; failure re-enables just this item.
    pub fn on_deleted(
        &mut self,
        ctx: &ScreenContext,
        list: &mut SpaceListController,
        name: &str,
        result: ClientResult<()>,
    ) -> ClientResult<()> {
        match result {
            Ok(()) => {
                tracing::info!(space = name, "space deleted");
                self.deletes
                    .insert(name.to_string(), OperationState::Success);
                list.refresh(ctx)
            }
            Err(err) => {
                tracing::warn!(space = name, error = %err, "delete failed");
                self.deletes.remove(name);
                self.delete_errors.insert(name.to_string(), err);
                Ok(())
            }
        }
    }

    /// Applies a list load to per-item state. Finished deletes are forgotten whether or
    /// not the load succeeded; errors stay while their row is still shown.
    pub fn sync_with(&mut self, list: &SpaceListController) {
        self.deletes.retain(|_, state| state.is_busy());
        self.delete_errors.retain(|name, _| list.contains(name));
    }
}
