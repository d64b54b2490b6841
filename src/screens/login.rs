use super::{Screen, settle, track};
use crate::controllers::{LoginController, ScreenContext};
use crate::dispatch::UiEvent;
use crate::error::ClientResult;

pub struct LoginScreen {
    ctx: ScreenContext,
    login: LoginController,
    pending: usize,
}

impl LoginScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            login: LoginController::new(),
            pending: 0,
        }
    }

    pub fn login(&self) -> &LoginController {
        &self.login
    }

    pub fn prefill_host(&self) -> String {
        LoginController::prefill_host(self.ctx.store.as_ref())
    }

    pub fn submit(&mut self, host: &str, username: &str, password: &str) -> ClientResult<bool> {
        let submitted = self.login.submit(&self.ctx, host, username, password);
        track(&mut self.pending, submitted)
    }

    pub fn register(&mut self, host: &str, username: &str, password: &str) -> ClientResult<()> {
        self.login.register(&self.ctx, host, username, password)?;
        self.pending += 1;
        Ok(())
    }

    pub fn logout(&mut self, notify_remote: bool) -> ClientResult<()> {
        let had_token = self.ctx.store.get().has_token();
        self.login.logout(&self.ctx, notify_remote)?;
        if notify_remote && had_token {
            self.pending += 1;
        }
        Ok(())
    }
}

impl Screen for LoginScreen {
    fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    fn handle(&mut self, event: UiEvent) -> ClientResult<()> {
        match event {
            UiEvent::LoggedIn { host, result } => {
                settle(&mut self.pending);
                self.login.on_logged_in(&self.ctx, &host, result);
            }
            UiEvent::Registered { result } => {
                settle(&mut self.pending);
                self.login.on_registered(result);
            }
            UiEvent::RemoteLogout { result } => {
                settle(&mut self.pending);
                self.login.on_remote_logout(result);
            }
            _ => {}
        }
        Ok(())
    }

    fn pending(&self) -> usize {
        self.pending
    }
}
