use std::sync::Arc;

use super::ScreenContext;
use crate::dispatch::UiEvent;
use crate::error::{ClientError, ClientResult};
use crate::model::OperationState;
use crate::store::SessionStore;

/// Where a fresh start lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
}

/// Fresh-start check: a stored token goes straight home.
pub fn fresh_start(store: &dyn SessionStore) -> Route {
    if store.get().has_token() {
        Route::Home
    } else {
        Route::Login
    }
}

/// Login and logout, the only writers of the session store.
#[derive(Default)]
pub struct LoginController {
    state: OperationState,
    last_error: Option<ClientError>,
    registered: Option<ClientResult<()>>,
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn input_enabled(&self) -> bool {
        self.state == OperationState::Idle
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == OperationState::Success
    }

    pub fn registration(&self) -> Option<&ClientResult<()>> {
        self.registered.as_ref()
    }

    /// Last host used, for prefilling the form.
    pub fn prefill_host(store: &dyn SessionStore) -> String {
        store.get().server_host
    }

    pub fn submit(
        &mut self,
        ctx: &ScreenContext,
        host: &str,
        username: &str,
        password: &str,
    ) -> ClientResult<bool> {
        if !self.input_enabled() {
            return Ok(false);
        }
        let host = host.trim();
        if host.is_empty() || username.is_empty() || password.is_empty() {
            return Err(ClientError::validation("please fill all fields"));
        }

        let api = Arc::clone(&ctx.api);
        let (h, u, p) = (host.to_string(), username.to_string(), password.to_string());
        let reply_host = host.to_string();
        ctx.dispatcher.submit(
            "login",
            move || api.login(&h, &u, &p),
            move |result| UiEvent::LoggedIn {
                host: reply_host,
                result,
            },
        )?;
        tracing::info!(host, username, "login submitted");
        self.state = OperationState::InFlight;
        self.last_error = None;
        Ok(true)
    }

    /// Stores the token on success. The store is untouched on failure.
    pub fn on_logged_in(&mut self, ctx: &ScreenContext, host: &str, result: ClientResult<String>) {
        let stored = result.and_then(|token| ctx.store.set_token(&token, host));
        match stored {
            Ok(()) => {
                tracing::info!(host, "logged in");
                self.state = OperationState::Success;
            }
            Err(err) => {
                tracing::warn!(host, error = %err, "login failed");
                self.state = OperationState::Idle;
                self.last_error = Some(err);
            }
        }
    }

    pub fn register(
        &mut self,
        ctx: &ScreenContext,
        host: &str,
        username: &str,
        password: &str,
    ) -> ClientResult<()> {
        let host = host.trim();
        if host.is_empty() || username.is_empty() || password.is_empty() {
            return Err(ClientError::validation("please fill all fields"));
        }
        let api = Arc::clone(&ctx.api);
        let (h, u, p) = (host.to_string(), username.to_string(), password.to_string());
        self.registered = None;
        ctx.dispatcher.submit(
            "register",
            move || api.register(&h, &u, &p),
            |result| UiEvent::Registered { result },
        )
    }

    pub fn on_registered(&mut self, result: ClientResult<()>) {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "registration failed");
        }
        self.registered = Some(result);
    }

    /// Clears the local token first, then tells the service on the worker if
    /// `notify_remote` is set. A remote failure never undoes the local logout.
    pub fn logout(&mut self, ctx: &ScreenContext, notify_remote: bool) -> ClientResult<()> {
        let auth = ctx.store.get().auth();
        ctx.store.clear()?;
        self.state = OperationState::Idle;
        tracing::info!("logged out");

        if notify_remote && let Ok(auth) = auth {
            let api = Arc::clone(&ctx.api);
            ctx.dispatcher.submit(
                "remote logout",
                move || api.logout(&auth),
                |result| UiEvent::RemoteLogout { result },
            )?;
        }
        Ok(())
    }

    pub fn on_remote_logout(&mut self, result: ClientResult<()>) {
        if let Err(err) = result {
            tracing::debug!(error = %err, "remote logout failed; local session already cleared");
        }
    }
}
