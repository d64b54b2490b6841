//! Screens wire controllers to one dispatcher and route deliveries to them.
//!
//! Rendering is someone else's job; a screen exposes the state a view would project.

use crate::controllers::ScreenContext;
use crate::dispatch::{Delivery, UiEvent};
use crate::error::ClientResult;

mod create_space;
mod delete_space;
mod login;
mod space_picker;
mod update;

pub use self::create_space::CreateSpaceScreen;
pub use self::delete_space::DeleteSpaceScreen;
pub use self::login::LoginScreen;
pub use self::space_picker::SpacePickerScreen;
pub use self::update::UpdateScreen;

pub trait Screen {
    fn context(&self) -> &ScreenContext;

    /// Applies one event that belongs to this screen.
    fn handle(&mut self, event: UiEvent) -> ClientResult<()>;

    /// Operations submitted but not yet delivered.
    fn pending(&self) -> usize;

    fn is_settled(&self) -> bool {
        self.pending() == 0
    }
}

/// Hands `delivery` to `screen` if it owns it. Returns whether it was applied.
pub fn deliver(screen: &mut dyn Screen, delivery: Delivery) -> ClientResult<bool> {
    if !screen.context().owns(&delivery) {
        return Ok(false);
    }
    screen.handle(delivery.event)?;
    Ok(true)
}

fn track(pending: &mut usize, submitted: ClientResult<bool>) -> ClientResult<bool> {
    if let Ok(true) = submitted {
        *pending += 1;
    }
    submitted
}

fn settle(pending: &mut usize) {
    *pending = pending.saturating_sub(1);
}
