use std::path::PathBuf;
use std::sync::Arc;

use super::{Screen, settle, track};
use crate::controllers::{ScreenContext, SpaceListController};
use crate::dispatch::UiEvent;
use crate::error::{ClientError, ClientResult};
use crate::indexer::Indexer;
use crate::model::SpaceFilter;
use crate::stager::{FileBatchStager, SelectionId};

/// Stage files for one not-yet-initialized space and index them.
pub struct UpdateScreen {
    ctx: ScreenContext,
    spaces: SpaceListController,
    stager: FileBatchStager,
    pending: usize,
}

impl UpdateScreen {
    pub fn new(ctx: ScreenContext, staging_dir: PathBuf, indexer: Arc<dyn Indexer>) -> Self {
        Self {
            ctx,
            spaces: SpaceListController::new(SpaceFilter::Uninitialized),
            stager: FileBatchStager::new(staging_dir, indexer),
            pending: 0,
        }
    }

    pub fn spaces(&self) -> &SpaceListController {
        &self.spaces
    }

    pub fn stager(&self) -> &FileBatchStager {
        &self.stager
    }

    pub fn refresh(&mut self) -> ClientResult<()> {
        self.spaces.refresh(&self.ctx)?;
        self.pending += 1;
        Ok(())
    }

    /// Files can be added once there is a space to update.
    pub fn can_add_files(&self) -> bool {
        !self.spaces.spaces().is_empty() && !self.stager.is_busy()
    }

    pub fn add_file(&mut self, source: impl Into<PathBuf>) -> ClientResult<SelectionId> {
        if !self.can_add_files() {
            return Err(ClientError::validation("no space available to update"));
        }
        Ok(self.stager.add(source))
    }

    pub fn set_tag(&mut self, id: SelectionId, text: &str) -> bool {
        !self.stager.is_busy() && self.stager.set_tag(id, text)
    }

    pub fn remove_file(&mut self, id: SelectionId) -> bool {
        !self.stager.is_busy() && self.stager.remove(id)
    }

    pub fn select_space(&mut self, name: &str) -> ClientResult<()> {
        let Some(space) = self.spaces.spaces().iter().find(|s| s.name == name) else {
            return Err(ClientError::validation(format!(
                "no uninitialized space named {:?}",
                name
            )));
        };
        self.stager.select_target(space.clone());
        Ok(())
    }

    pub fn submit(&mut self) -> ClientResult<bool> {
        let submitted = self.stager.submit(&self.ctx.dispatcher);
        track(&mut self.pending, submitted)
    }
}

impl Screen for UpdateScreen {
    fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    fn handle(&mut self, event: UiEvent) -> ClientResult<()> {
        match event {
            UiEvent::SpacesLoaded { result, .. } => {
                settle(&mut self.pending);
                self.spaces.on_loaded(result);
                // Like a dropdown, default to the first entry.
                if self.stager.target().is_none()
                    && let Some(first) = self.spaces.spaces().first()
                {
                    self.stager.select_target(first.clone());
                }
            }
            UiEvent::BatchFinished { result } => {
                settle(&mut self.pending);
                self.stager.on_finished(result);
            }
            _ => {}
        }
        Ok(())
    }

    fn pending(&self) -> usize {
        self.pending
    }
}
