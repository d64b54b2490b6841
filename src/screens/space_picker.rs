use super::{Screen, settle};
use crate::controllers::{ScreenContext, SpaceListController};
use crate::dispatch::UiEvent;
use crate::error::{ClientError, ClientResult};
use crate::model::{SpaceFilter, SpaceRef};

/// Pick one of the user's spaces to work with.
pub struct SpacePickerScreen {
    ctx: ScreenContext,
    list: SpaceListController,
    selected: Option<SpaceRef>,
    pending: usize,
}

impl SpacePickerScreen {
    pub fn new(ctx: ScreenContext, filter: SpaceFilter) -> Self {
        Self {
            ctx,
            list: SpaceListController::new(filter),
            selected: None,
            pending: 0,
        }
    }

    pub fn list(&self) -> &SpaceListController {
        &self.list
    }

    pub fn selected(&self) -> Option<&SpaceRef> {
        self.selected.as_ref()
    }

    pub fn refresh(&mut self) -> ClientResult<()> {
        self.list.refresh(&self.ctx)?;
        self.pending += 1;
        Ok(())
    }

    pub fn select(&mut self, name: &str) -> ClientResult<SpaceRef> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::validation("please select a space"));
        }
        let Some(space) = self.list.spaces().iter().find(|s| s.name == name) else {
            return Err(ClientError::validation(format!("no space named {:?}", name)));
        };
        self.selected = Some(space.clone());
        Ok(space.clone())
    }
}

impl Screen for SpacePickerScreen {
    fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    fn handle(&mut self, event: UiEvent) -> ClientResult<()> {
        if let UiEvent::SpacesLoaded { result, .. } = event {
            settle(&mut self.pending);
            self.list.on_loaded(result);
            if let Some(sel) = &self.selected
                && !self.list.contains(&sel.name)
            {
                self.selected = None;
            }
        }
        Ok(())
    }

    fn pending(&self) -> usize {
        self.pending
    }
}
