use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{ListParams, LoadState, ResourceState};
use crate::model::{Cursor, Resource};
use crate::transport::{ApiRequest, Transport, TransportError};

/// Observable, reload-only store for one resource type.
///
/// Overlapping reloads are fenced: each reload takes a ticket, and only the
/// most recently issued ticket may write its response into the store.
/// Earlier responses still resolve for their caller but are discarded.
pub struct ResourceStore<R> {
    state: watch::Sender<ResourceState<R>>,
    issued: AtomicU64,
}

impl<R: Resource> Default for ResourceStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            state,
            issued: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ResourceState<R> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<R>> {
        self.state.subscribe()
    }

    pub fn items(&self) -> Vec<R> {
        self.state.borrow().items.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.borrow().load.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().load.is_loading()
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.state.borrow().cursor
    }

    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    pub(crate) fn with_state<O>(&self, f: impl FnOnce(&ResourceState<R>) -> O) -> O {
        f(&self.state.borrow())
    }

    /// Re-fetch the collection.
    ///
    /// Success replaces the items (and the cursor, when the response has
    /// one). Failure records the error message and leaves items and cursor
    /// as they were.
    pub async fn reload<T: Transport>(
        &self,
        transport: &T,
        params: ListParams,
    ) -> Result<Vec<R>, TransportError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let page = params
            .page
            .or_else(|| self.cursor().map(|c| c.page))
            .unwrap_or(1);
        self.state.send_modify(|s| s.load = LoadState::Loading);
        debug!(collection = R::COLLECTION, ticket, page, "reload issued");

        let result = match transport.send(ApiRequest::get(R::list_path(page))).await {
            Ok(body) => R::decode_list(body),
            Err(err) => Err(err),
        };

        if ticket != self.issued.load(Ordering::SeqCst) {
            debug!(collection = R::COLLECTION, ticket, "discarding stale reload response");
            return result.map(|listing| listing.items);
        }

        match result {
            Ok(listing) => {
                let items = listing.items.clone();
                self.state.send_modify(|s| {
                    s.items = listing.items;
                    if let Some(cursor) = listing.cursor {
                        s.cursor = Some(cursor);
                    }
                    s.load = LoadState::Ready;
                    s.revision += 1;
                });
                debug!(collection = R::COLLECTION, ticket, count = items.len(), "reload applied");
                Ok(items)
            }
            Err(err) => {
                warn!(collection = R::COLLECTION, error = %err, "reload failed");
                let mut message = err.to_string();
                if message.trim().is_empty() {
                    message = format!("Failed to load {}", R::COLLECTION);
                }
                self.state.send_modify(|s| s.load = LoadState::Failed(message));
                Err(err)
            }
        }
    }
}
