use std::sync::Arc;

use super::ScreenContext;
use crate::dispatch::UiEvent;
use crate::error::{ClientError, ClientResult};
use crate::model::{SpaceFilter, SpaceRef};

/// What the list area currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListView {
    #[default]
    NotLoaded,
    Empty,
    Spaces(Vec<SpaceRef>),
}

pub struct SpaceListController {
    filter: SpaceFilter,
    view: ListView,
    loading: bool,
    last_error: Option<ClientError>,
}

impl SpaceListController {
    pub fn new(filter: SpaceFilter) -> Self {
        Self {
            filter,
            view: ListView::NotLoaded,
            loading: false,
            last_error: None,
        }
    }

    pub fn filter(&self) -> SpaceFilter {
        self.filter
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn spaces(&self) -> &[SpaceRef] {
        match &self.view {
            ListView::Spaces(spaces) => spaces,
            _ => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.spaces().iter().any(|s| s.name == name)
    }

    /// Fetches the list. Without a token nothing is sent and `AuthMissing` is
    /// returned so the caller can send the user to login.
    pub fn refresh(&mut self, ctx: &ScreenContext) -> ClientResult<()> {
        let auth = match ctx.store.get().auth() {
            Ok(auth) => auth,
            Err(err) => {
                self.last_error = Some(err.clone());
                return Err(err);
            }
        };
        let api = Arc::clone(&ctx.api);
        let filter = self.filter;
        ctx.dispatcher.submit(
            "list spaces",
            move || api.list_spaces(&auth, filter),
            move |result| UiEvent::SpacesLoaded { filter, result },
        )?;
        self.loading = true;
        Ok(())
    }

    /// Applies a fetch result. Failures leave the rendered list as it was.
    pub fn on_loaded(&mut self, result: ClientResult<Vec<SpaceRef>>) {
        self.loading = false;
        match result {
            Ok(spaces) if spaces.is_empty() => {
                self.view = ListView::Empty;
                self.last_error = None;
            }
            Ok(spaces) => {
                tracing::debug!(count = spaces.len(), "spaces loaded");
                self.view = ListView::Spaces(spaces);
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "space list fetch failed");
                self.last_error = Some(err);
            }
        }
    }
}
