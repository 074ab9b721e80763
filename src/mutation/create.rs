use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::busy::BusyFlag;
use super::Outcome;
use crate::error::ActionError;
use crate::model::{Draft, Resource};
use crate::notify::Notifier;
use crate::panel::ResourceController;

/// Observable state of a create dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogState<D> {
    pub open: bool,
    pub draft: D,
}

/// Create dialog for one resource type.
///
/// Holds the form between attempts: a failed submit keeps the dialog open
/// with the fields intact so the user can retry; a successful submit closes
/// the dialog and resets the form.
pub struct CreateDialog<D> {
    state: watch::Sender<DialogState<D>>,
    busy: BusyFlag,
}

impl<D: Draft> Default for CreateDialog<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Draft> CreateDialog<D> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(DialogState::default());
        Self {
            state,
            busy: BusyFlag::new(),
        }
    }

    pub fn open(&self) {
        self.state.send_modify(|s| s.open = true);
    }

    /// Close and reset the form. Refused while a submit is in flight.
    pub fn close(&self) -> bool {
        if self.busy.is_busy() {
            return false;
        }
        self.state.send_modify(|s| {
            s.open = false;
            s.draft = D::default();
        });
        true
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn draft(&self) -> D {
        self.state.borrow().draft.clone()
    }

    /// Edit the form in place.
    pub fn edit(&self, f: impl FnOnce(&mut D)) {
        self.state.send_modify(|s| f(&mut s.draft));
    }

    pub fn set_draft(&self, draft: D) {
        self.state.send_modify(|s| s.draft = draft);
    }

    pub fn subscribe(&self) -> watch::Receiver<DialogState<D>> {
        self.state.subscribe()
    }

    /// Validate and send the form.
    ///
    /// On success the controller reloads its collection before the success
    /// toast is shown. Every failure is shown on `notifier` before it is
    /// returned.
    pub async fn submit<C>(&self, controller: &C, notifier: &Notifier) -> Result<Outcome, ActionError>
    where
        C: ResourceController<Item = D::Resource>,
    {
        let collection = <D::Resource as Resource>::COLLECTION;
        let Some(_guard) = self.busy.try_acquire() else {
            debug!(collection, "create already in flight");
            return Ok(Outcome::AlreadyBusy);
        };

        let draft = self.draft();
        if let Err(err) = draft.validate() {
            notifier.show(err.to_string());
            return Err(err.into());
        }

        match controller.create(draft.to_body()).await {
            Ok(created) => {
                info!(collection, count = created.len(), "records created");
                if let Err(err) = controller.reload().await {
                    warn!(collection, error = %err, "reload after create failed");
                }
                notifier.show(draft.success_message());
                self.state.send_modify(|s| {
                    s.open = false;
                    s.draft = D::default();
                });
                Ok(Outcome::Completed)
            }
            Err(err) => {
                warn!(collection, error = %err, "create failed");
                notifier.show(err.to_string());
                Err(err.into())
            }
        }
    }
}
