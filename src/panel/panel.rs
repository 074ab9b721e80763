use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{PanelBody, ResourceController};
use crate::detail::DetailView;
use crate::error::ActionError;
use crate::filter::SearchView;
use crate::model::Resource;
use crate::mutation::{CreateDialog, DeleteConfirmation, Outcome};
use crate::notify::Notifier;
use crate::store::{ListParams, LoadState, ResourceStore};
use crate::transport::{ApiRequest, RequestBody, Transport, TransportError};

/// List-manage screen for one resource type.
///
/// Owns the store, the create dialog and the search query, and reports
/// through the screen's shared notifier.
pub struct Panel<R: Resource, T> {
    transport: T,
    store: ResourceStore<R>,
    create: CreateDialog<R::Draft>,
    search: Mutex<SearchView<R>>,
    notifier: Notifier,
}

impl<R: Resource, T: Transport> Panel<R, T> {
    pub fn new(transport: T, notifier: Notifier) -> Self {
        Self {
            transport,
            store: ResourceStore::new(),
            create: CreateDialog::new(),
            search: Mutex::new(SearchView::new()),
            notifier,
        }
    }

    pub fn store(&self) -> &ResourceStore<R> {
        &self.store
    }

    pub fn create_dialog(&self) -> &CreateDialog<R::Draft> {
        &self.create
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Reload a specific page. Unpaginated resources ignore `page`.
    pub async fn reload_page(&self, page: u32) -> Result<Vec<R>, TransportError> {
        self.store.reload(&self.transport, ListParams::page(page)).await
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.search_view().set_query(query);
    }

    pub fn query(&self) -> String {
        self.search_view().query().to_string()
    }

    /// Loaded items filtered by the current query.
    pub fn rows(&self) -> Vec<R> {
        let mut search = self.search_view();
        self.store
            .with_state(|state| search.rows(state.revision, &state.items).to_vec())
    }

    /// What the panel should display right now.
    pub fn body(&self) -> PanelBody<R> {
        match self.store.load_state() {
            LoadState::Loading => PanelBody::Loading,
            LoadState::Failed(message) => PanelBody::Failed {
                title: format!("Could not load {}", R::COLLECTION),
                message,
            },
            LoadState::Idle | LoadState::Ready => {
                let rows = self.rows();
                if !rows.is_empty() {
                    return PanelBody::Rows(rows);
                }
                let hint = if self.query().is_empty() {
                    format!("Create your first Daily {}.", R::NOUN)
                } else {
                    "Try a different search.".to_string()
                };
                PanelBody::Empty {
                    title: format!("No {} found", R::COLLECTION),
                    hint,
                }
            }
        }
    }

    /// Open the create dialog with a prepared form.
    pub fn start_create(&self, draft: R::Draft) {
        self.create.set_draft(draft);
        self.create.open();
    }

    /// Submit the create dialog's form.
    pub async fn submit_create(&self) -> Result<Outcome, ActionError> {
        self.create.submit(self, &self.notifier).await
    }

    /// Confirmation surface for deleting `item`.
    pub fn delete_confirmation(&self, item: &R) -> DeleteConfirmation {
        DeleteConfirmation::for_item(item)
    }

    pub async fn confirm_delete(&self, confirmation: &DeleteConfirmation) -> Result<Outcome, ActionError> {
        confirmation.confirm(self, &self.notifier).await
    }

    pub fn detail(&self, id: u64) -> DetailView<R> {
        DetailView::new(id)
    }

    pub async fn open_detail(&self, view: &DetailView<R>) -> Result<R, TransportError> {
        view.open(self).await
    }

    fn search_view(&self) -> MutexGuard<'_, SearchView<R>> {
        self.search.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Resource, T: Transport> ResourceController for Panel<R, T> {
    type Item = R;

    async fn reload(&self) -> Result<Vec<R>, TransportError> {
        self.store.reload(&self.transport, ListParams::default()).await
    }

    async fn create(&self, body: RequestBody) -> Result<Vec<R>, TransportError> {
        let response = self
            .transport
            .send(ApiRequest::post(R::collection_path(), body))
            .await?;
        R::decode_created(response)
    }

    async fn delete(&self, id: u64) -> Result<(), TransportError> {
        self.transport.send(ApiRequest::delete(R::item_path(id))).await?;
        Ok(())
    }

    async fn fetch_one(&self, id: u64) -> Result<R, TransportError> {
        let response = self.transport.send(ApiRequest::get(R::item_path(id))).await?;
        R::decode_one(response)
    }
}
