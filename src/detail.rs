use tokio::sync::watch;
use tracing::{debug, warn};

use crate::model::Resource;
use crate::panel::ResourceController;
use crate::transport::TransportError;

/// Fetch state of a detail view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState<R> {
    #[default]
    NotRequested,
    Loading,
    Loaded(R),
    Failed(String),
}

impl<R> DetailState<R> {
    pub fn record(&self) -> Option<&R> {
        match self {
            DetailState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DetailState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Read-only view of one record, fetched by id.
///
/// Every [`open`](Self::open) re-fetches; nothing is cached between opens.
pub struct DetailView<R> {
    id: u64,
    state: watch::Sender<DetailState<R>>,
}

impl<R: Resource> DetailView<R> {
    pub fn new(id: u64) -> Self {
        let (state, _) = watch::channel(DetailState::NotRequested);
        Self { id, state }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Heading, e.g. `"Daily Post #12"`.
    pub fn title(&self) -> String {
        format!("Daily {} #{}", R::NOUN, self.id)
    }

    pub fn state(&self) -> DetailState<R> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState<R>> {
        self.state.subscribe()
    }

    pub async fn open<C>(&self, controller: &C) -> Result<R, TransportError>
    where
        C: ResourceController<Item = R>,
    {
        self.state.send_replace(DetailState::Loading);
        debug!(collection = R::COLLECTION, id = self.id, "fetching record");

        match controller.fetch_one(self.id).await {
            Ok(record) => {
                self.state.send_replace(DetailState::Loaded(record.clone()));
                Ok(record)
            }
            Err(err) => {
                warn!(collection = R::COLLECTION, id = self.id, error = %err, "fetch failed");
                let message = if err.detail().trim().is_empty() {
                    "Failed to load".to_string()
                } else {
                    err.to_string()
                };
                self.state.send_replace(DetailState::Failed(message));
                Err(err)
            }
        }
    }
}
