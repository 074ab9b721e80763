//! Notifier - the transient toast shared by everything on one screen.
//!
//! At most one toast is visible. Showing a new one replaces the current toast
//! and restarts the expiry timer. A screen creates one `Notifier` and hands
//! clones to every panel and dialog that reports outcomes.
//!
//! ## Example
//!
//! ```ignore
//! let notifier = Notifier::new();
//! notifier.show("Devotion created.");
//! assert_eq!(notifier.text().as_deref(), Some("Devotion created."));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

/// How long a toast stays visible.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(3200);

/// A visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Increases with every `show`; identifies which timer owns the toast.
    pub id: u64,
    pub text: String,
    pub expires_at: Instant,
}

struct NotifierInner {
    current: watch::Sender<Option<Notification>>,
    shown: AtomicU64,
    ttl: Duration,
}

/// Shared handle to a screen's toast. Clone-friendly via Arc.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(NotifierInner {
                current,
                shown: AtomicU64::new(0),
                ttl,
            }),
        }
    }

    /// Show `text`, replacing any visible toast.
    ///
    /// Inside a tokio runtime a timer task clears the toast when it expires;
    /// outside one, [`current`](Self::current) still hides it once expired.
    pub fn show(&self, text: impl Into<String>) {
        let id = self.inner.shown.fetch_add(1, Ordering::SeqCst) + 1;
        let text = text.into();
        debug!(id, text = %text, "toast shown");
        self.inner.current.send_replace(Some(Notification {
            id,
            text,
            expires_at: Instant::now() + self.inner.ttl,
        }));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let inner = Arc::downgrade(&self.inner);
            let ttl = self.inner.ttl;
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                if let Some(inner) = inner.upgrade() {
                    expire(&inner.current, id);
                }
            });
        }
    }

    /// Hide the visible toast now.
    pub fn clear(&self) {
        self.inner.current.send_replace(None);
    }

    /// The visible toast, if any and not yet expired.
    pub fn current(&self) -> Option<Notification> {
        let current = self.inner.current.borrow().clone()?;
        if current.expires_at <= Instant::now() {
            expire(&self.inner.current, current.id);
            return None;
        }
        Some(current)
    }

    pub fn text(&self) -> Option<String> {
        self.current().map(|n| n.text)
    }

    /// Observe toast changes (including expiry).
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.current.subscribe()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }
}

/// Clear the toast only if it is still the one identified by `id`.
fn expire(current: &watch::Sender<Option<Notification>>, id: u64) {
    current.send_if_modified(|slot| match slot {
        Some(n) if n.id == id => {
            debug!(id, "toast expired");
            *slot = None;
            true
        }
        _ => false,
    });
}
