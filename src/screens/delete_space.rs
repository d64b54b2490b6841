use super::{Screen, settle, track};
use crate::controllers::{ScreenContext, SpaceListController, SpaceMutationController};
use crate::dispatch::UiEvent;
use crate::error::ClientResult;
use crate::model::SpaceFilter;

pub struct DeleteSpaceScreen {
    ctx: ScreenContext,
    list: SpaceListController,
    mutation: SpaceMutationController,
    pending: usize,
}

impl DeleteSpaceScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            list: SpaceListController::new(SpaceFilter::All),
            mutation: SpaceMutationController::new(),
            pending: 0,
        }
    }

    pub fn list(&self) -> &SpaceListController {
        &self.list
    }

    pub fn mutation(&self) -> &SpaceMutationController {
        &self.mutation
    }

    pub fn refresh(&mut self) -> ClientResult<()> {
        self.list.refresh(&self.ctx)?;
        self.pending += 1;
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> ClientResult<bool> {
        let submitted = self.mutation.delete(&self.ctx, &self.list, name);
        track(&mut self.pending, submitted)
    }
}

impl Screen for DeleteSpaceScreen {
    fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    fn handle(&mut self, event: UiEvent) -> ClientResult<()> {
        match event {
            UiEvent::SpacesLoaded { result, .. } => {
                settle(&mut self.pending);
                self.list.on_loaded(result);
                self.mutation.sync_with(&self.list);
            }
            UiEvent::SpaceDeleted { name, result } => {
                settle(&mut self.pending);
                let reload = result.is_ok();
                self.mutation
                    .on_deleted(&self.ctx, &mut self.list, &name, result)?;
                if reload {
                    self.pending += 1;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn pending(&self) -> usize {
        self.pending
    }
}
