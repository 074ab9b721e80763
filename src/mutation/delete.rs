use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::busy::BusyFlag;
use super::Outcome;
use crate::error::ActionError;
use crate::model::Resource;
use crate::notify::Notifier;
use crate::panel::ResourceController;

/// Two-step delete for one record: `request` opens the confirmation,
/// `confirm` performs the delete, `cancel` backs out.
pub struct DeleteConfirmation {
    id: u64,
    label: String,
    open: watch::Sender<bool>,
    busy: BusyFlag,
}

impl DeleteConfirmation {
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        let (open, _) = watch::channel(false);
        Self {
            id,
            label: label.into(),
            open,
            busy: BusyFlag::new(),
        }
    }

    /// Confirmation for `item`, labelled `"Delete <label>"`.
    pub fn for_item<R: Resource>(item: &R) -> Self {
        Self::new(item.id(), format!("Delete {}", item.label()))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn request(&self) {
        self.open.send_replace(true);
    }

    /// Close without deleting. Refused once the delete is in flight.
    pub fn cancel(&self) -> bool {
        if self.busy.is_busy() {
            return false;
        }
        self.open.send_replace(false);
        true
    }

    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.open.subscribe()
    }

    /// Delete the record if the confirmation is open.
    ///
    /// Success reloads the collection, then toasts and closes. Failure toasts
    /// the server's message and leaves the confirmation open for a retry.
    /// The record is never removed locally; only the reload drops it.
    pub async fn confirm<C: ResourceController>(
        &self,
        controller: &C,
        notifier: &Notifier,
    ) -> Result<Outcome, ActionError> {
        if !self.is_open() {
            return Ok(Outcome::NotOpen);
        }
        let Some(_guard) = self.busy.try_acquire() else {
            debug!(id = self.id, "delete already in flight");
            return Ok(Outcome::AlreadyBusy);
        };

        let collection = <C::Item as Resource>::COLLECTION;
        match controller.delete(self.id).await {
            Ok(()) => {
                info!(collection, id = self.id, "record deleted");
                if let Err(err) = controller.reload().await {
                    warn!(collection, error = %err, "reload after delete failed");
                }
                notifier.show(format!("{} deleted.", <C::Item as Resource>::NOUN));
                self.open.send_replace(false);
                Ok(Outcome::Completed)
            }
            Err(err) => {
                warn!(collection, id = self.id, error = %err, "delete failed");
                notifier.show(err.to_string());
                Err(err.into())
            }
        }
    }
}
