//! Panels - one list-manage screen per resource type.
//!
//! A [`Panel`] ties a [`ResourceStore`](crate::ResourceStore) to the
//! transport, the create dialog, delete confirmations, detail views and the
//! search query. It implements [`ResourceController`], which is all the
//! mutation flows need to know about it.
//!
//! ## Example
//!
//! ```ignore
//! use comforters_admin::{DailyDevotion, InMemoryApi, Notifier, Panel, PanelBody};
//!
//! let panel: Panel<DailyDevotion, _> = Panel::new(InMemoryApi::new(), Notifier::new());
//! panel.reload().await?;
//! panel.set_query("psalm");
//! if let PanelBody::Rows(rows) = panel.body() {
//!     // render rows
//! }
//! ```

mod controller;
#[allow(clippy::module_inception)]
mod panel;

pub use controller::ResourceController;
pub use panel::Panel;

/// What a panel's body shows. Exactly one variant applies at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody<R> {
    /// A reload is in flight.
    Loading,
    /// The last reload failed.
    Failed { title: String, message: String },
    /// Nothing to show, either because the collection is empty or because
    /// the search matched nothing.
    Empty { title: String, hint: String },
    Rows(Vec<R>),
}
