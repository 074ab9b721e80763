//! Resource stores - the in-memory view of one remote collection.
//!
//! A [`ResourceStore`] holds the last successfully fetched items, the load
//! state and (for posts) the pagination cursor. The only way to change it is
//! [`ResourceStore::reload`], which replaces the collection wholesale.
//!
//! ## Example
//!
//! ```ignore
//! use comforters_admin::{DailyDevotion, InMemoryApi, ListParams, ResourceStore};
//!
//! let api = InMemoryApi::new();
//! let store = ResourceStore::<DailyDevotion>::new();
//! store.reload(&api, ListParams::default()).await?;
//! let rows = store.items();
//! ```

mod resource;

use crate::model::Cursor;

pub use resource::ResourceStore;

/// Load state of a store. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready,
    /// Last reload failed; items from before the failure are kept.
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Snapshot of a store.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<R> {
    pub items: Vec<R>,
    pub load: LoadState,
    /// `None` until the first successful paginated fetch.
    pub cursor: Option<Cursor>,
    /// Bumped every time `items` is replaced.
    pub revision: u64,
}

impl<R> Default for ResourceState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            load: LoadState::Idle,
            cursor: None,
            revision: 0,
        }
    }
}

/// Parameters of a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListParams {
    /// Page to fetch. `None` keeps the current cursor page (1 before the
    /// first fetch).
    pub page: Option<u32>,
}

impl ListParams {
    pub fn page(page: u32) -> Self {
        Self { page: Some(page) }
    }
}
