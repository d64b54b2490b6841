//! Batch of user-selected files, tagged and handed to the indexer in one call.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dispatch::{RequestDispatcher, UiEvent};
use crate::error::{ClientError, ClientResult};
use crate::indexer::Indexer;
use crate::model::{OperationState, SpaceRef};

mod materialize;
pub use self::materialize::run_batch;

pub const MAX_TAG: i32 = 99;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSelection {
    id: SelectionId,
    source: PathBuf,
    display_name: String,
    tag: i32,
}

impl FileSelection {
    pub fn id(&self) -> SelectionId {
        self.id
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn tag(&self) -> i32 {
        self.tag
    }
}

/// A validated snapshot ready for the worker.
#[derive(Clone, Debug)]
pub struct UpdateBatch {
    pub target: SpaceRef,
    pub files: Vec<FileSelection>,
}

/// What a file row shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionRow {
    pub id: SelectionId,
    pub name: String,
    pub source: String,
    pub tag: String,
    pub enabled: bool,
}

pub struct FileBatchStager {
    selections: Vec<FileSelection>,
    next_id: u64,
    target: Option<SpaceRef>,
    state: OperationState,
    last_summary: Option<String>,
    last_error: Option<ClientError>,
    staging_dir: PathBuf,
    indexer: Arc<dyn Indexer>,
}

impl FileBatchStager {
    pub fn new(staging_dir: impl Into<PathBuf>, indexer: Arc<dyn Indexer>) -> Self {
        Self {
            selections: Vec::new(),
            next_id: 1,
            target: None,
            state: OperationState::Idle,
            last_summary: None,
            last_error: None,
            staging_dir: staging_dir.into(),
            indexer,
        }
    }

    pub fn add(&mut self, source: impl Into<PathBuf>) -> SelectionId {
        let source = source.into();
        let id = SelectionId(self.next_id);
        self.next_id += 1;
        let display_name = display_name_for(&source);
        tracing::debug!(name = %display_name, "file selected");
        self.selections.push(FileSelection {
            id,
            source,
            display_name,
            tag: 0,
        });
        id
    }

    /// Applies typed text as the tag. Text that is not an integer is ignored.
    ///
    /// Range is not checked here; out-of-range tags block submission instead.
    pub fn set_tag(&mut self, id: SelectionId, text: &str) -> bool {
        let Ok(value) = text.trim().parse::<i32>() else {
            return false;
        };
        match self.selections.iter_mut().find(|s| s.id == id) {
            Some(sel) => {
                sel.tag = value;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: SelectionId) -> bool {
        let before = self.selections.len();
        self.selections.retain(|s| s.id != id);
        self.selections.len() != before
    }

    pub fn select_target(&mut self, space: SpaceRef) {
        self.target = Some(space);
    }

    pub fn target(&self) -> Option<&SpaceRef> {
        self.target.as_ref()
    }

    pub fn selections(&self) -> &[FileSelection] {
        &self.selections
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn can_submit(&self) -> bool {
        !self.selections.is_empty() && !self.is_busy()
    }

    pub fn last_summary(&self) -> Option<&str> {
        self.last_summary.as_deref()
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn rows(&self) -> Vec<SelectionRow> {
        let enabled = !self.is_busy();
        self.selections
            .iter()
            .map(|s| SelectionRow {
                id: s.id,
                name: s.display_name.clone(),
                source: s.source.display().to_string(),
                tag: s.tag.to_string(),
                enabled,
            })
            .collect()
    }

    /// Checks the whole batch; the first violated constraint is reported.
    pub fn validate(&self) -> ClientResult<UpdateBatch> {
        if self.selections.is_empty() {
            return Err(ClientError::validation("select at least one file"));
        }
        let Some(target) = self.target.clone() else {
            return Err(ClientError::validation("select a space to update"));
        };
        if let Some(bad) = self
            .selections
            .iter()
            .find(|s| !(0..=MAX_TAG).contains(&s.tag))
        {
            return Err(ClientError::validation(format!(
                "invalid tag {} for {}: must be 0-{}",
                bad.tag, bad.display_name, MAX_TAG
            )));
        }
        Ok(UpdateBatch {
            target,
            files: self.selections.clone(),
        })
    }

    /// Validates, then materializes and indexes the batch on the screen's worker.
    ///
    /// Returns `Ok(false)` when an update is already running.
    pub fn submit(&mut self, dispatcher: &RequestDispatcher) -> ClientResult<bool> {
        if self.is_busy() {
            return Ok(false);
        }
        let batch = self.validate()?;
        let staging_dir = self.staging_dir.clone();
        let indexer = Arc::clone(&self.indexer);
        tracing::info!(space = %batch.target, files = batch.files.len(), "submitting batch");
        dispatcher.submit(
            "index batch",
            move || run_batch(&batch, &staging_dir, indexer.as_ref()),
            |result| UiEvent::BatchFinished { result },
        )?;
        self.state = OperationState::InFlight;
        self.last_error = None;
        Ok(true)
    }

    pub fn on_finished(&mut self, result: ClientResult<String>) {
        match result {
            Ok(summary) => {
                tracing::info!(summary = %summary, "batch indexed");
                self.state = OperationState::Success;
                self.last_summary = Some(summary);
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "batch failed");
                self.state = OperationState::Failure;
                self.last_error = Some(err);
            }
        }
    }
}

/// Final path segment of the source, or the whole handle if it has none.
fn display_name_for(source: &Path) -> String {
    source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string())
}

#[cfg(test)]
#[path = "tests/stager_tests.rs"]
mod tests;
