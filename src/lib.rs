mod config;
mod dashboard;
mod detail;
mod error;
mod filter;
mod model;
mod mutation;
mod notify;
mod panel;
mod store;
mod transport;

pub use config::{ApiConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use dashboard::{Dashboard, RefreshReport, Tab};
pub use detail::{DetailState, DetailView};
pub use error::{ActionError, ValidationError};
pub use filter::{project, SearchView, Searchable};
pub use model::{
    format_date, Cursor, DailyDevotion, DailyPost, DevotionDraft, Draft, Listing, PostDraft,
    PostFields, PostMode, Resource,
};
pub use mutation::{
    BusyFlag, BusyGuard, CreateDialog, DeleteConfirmation, DialogState, Outcome, TsvFile,
    TSV_CONTENT_TYPE, TSV_FIELD, TSV_HEADER,
};
pub use notify::{Notification, Notifier, DEFAULT_TOAST_TTL};
pub use panel::{Panel, PanelBody, ResourceController};
pub use store::{ListParams, LoadState, ResourceState, ResourceStore};
pub use transport::{ApiRequest, FilePart, InMemoryApi, Method, RequestBody, Transport, TransportError};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
