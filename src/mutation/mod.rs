//! Mutation orchestration - create and delete flows shared by every panel.
//!
//! Each flow owns a [`BusyFlag`] so a second click while a request is in
//! flight does nothing, reports through the screen's
//! [`Notifier`](crate::Notifier), and on success asks its
//! [`ResourceController`](crate::ResourceController) to reload the
//! authoritative list before announcing the result.

mod bulk;
mod busy;
mod create;
mod delete;

pub use bulk::{TsvFile, TSV_CONTENT_TYPE, TSV_FIELD, TSV_HEADER};
pub use busy::{BusyFlag, BusyGuard};
pub use create::{CreateDialog, DialogState};
pub use delete::DeleteConfirmation;

/// What a submit/confirm call ended up doing when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded and the collection was reloaded.
    Completed,
    /// Another request from the same dialog was still in flight; nothing sent.
    AlreadyBusy,
    /// The confirmation was not open; nothing sent.
    NotOpen,
}
