use super::{Screen, settle, track};
use crate::controllers::{ScreenContext, SpaceMutationController};
use crate::dispatch::UiEvent;
use crate::error::ClientResult;

pub struct CreateSpaceScreen {
    ctx: ScreenContext,
    mutation: SpaceMutationController,
    pending: usize,
}

impl CreateSpaceScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            mutation: SpaceMutationController::new(),
            pending: 0,
        }
    }

    pub fn mutation(&self) -> &SpaceMutationController {
        &self.mutation
    }

    pub fn create(&mut self, name: &str) -> ClientResult<bool> {
        let submitted = self.mutation.create(&self.ctx, name);
        track(&mut self.pending, submitted)
    }
}

impl Screen for CreateSpaceScreen {
    fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    fn handle(&mut self, event: UiEvent) -> ClientResult<()> {
        if let UiEvent::SpaceCreated { name, result } = event {
            settle(&mut self.pending);
            self.mutation.on_created(&name, result);
        }
        Ok(())
    }

    fn pending(&self) -> usize {
        self.pending
    }
}
