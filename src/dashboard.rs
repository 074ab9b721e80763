//! Dashboard - the admin screen: a posts panel and a devotions panel behind
//! tabs, sharing one notifier.
//!
//! ## Example
//!
//! ```ignore
//! use comforters_admin::{Dashboard, InMemoryApi, Tab};
//!
//! let dashboard = Dashboard::new(InMemoryApi::new());
//! dashboard.refresh_all().await;
//! dashboard.select_tab(Tab::Devotions);
//! ```

use tokio::sync::watch;
use tracing::info;

use crate::model::{DailyDevotion, DailyPost};
use crate::notify::Notifier;
use crate::panel::{Panel, ResourceController};
use crate::transport::{Transport, TransportError};

/// Which panel is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Posts,
    Devotions,
}

/// Per-panel result of [`Dashboard::refresh_all`].
#[derive(Debug)]
pub struct RefreshReport {
    pub posts: Result<Vec<DailyPost>, TransportError>,
    pub devotions: Result<Vec<DailyDevotion>, TransportError>,
}

impl RefreshReport {
    pub fn is_ok(&self) -> bool {
        self.posts.is_ok() && self.devotions.is_ok()
    }
}

pub struct Dashboard<T> {
    notifier: Notifier,
    posts: Panel<DailyPost, T>,
    devotions: Panel<DailyDevotion, T>,
    tab: watch::Sender<Tab>,
}

impl<T: Transport + Clone> Dashboard<T> {
    pub fn new(transport: T) -> Self {
        Self::with_notifier(transport, Notifier::new())
    }

    /// Build with a caller-supplied notifier, e.g. one with a custom TTL.
    pub fn with_notifier(transport: T, notifier: Notifier) -> Self {
        let (tab, _) = watch::channel(Tab::default());
        Self {
            posts: Panel::new(transport.clone(), notifier.clone()),
            devotions: Panel::new(transport, notifier.clone()),
            notifier,
            tab,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn posts(&self) -> &Panel<DailyPost, T> {
        &self.posts
    }

    pub fn devotions(&self) -> &Panel<DailyDevotion, T> {
        &self.devotions
    }

    pub fn select_tab(&self, tab: Tab) {
        self.tab.send_replace(tab);
    }

    pub fn tab(&self) -> Tab {
        *self.tab.borrow()
    }

    pub fn subscribe_tab(&self) -> watch::Receiver<Tab> {
        self.tab.subscribe()
    }

    /// Reload both panels concurrently, then toast `"Refreshed."`.
    ///
    /// The toast is shown even when a panel fails; the failure is visible in
    /// that panel's body.
    pub async fn refresh_all(&self) -> RefreshReport {
        let (posts, devotions) = tokio::join!(self.posts.reload(), self.devotions.reload());
        let report = RefreshReport { posts, devotions };
        info!(ok = report.is_ok(), "dashboard refreshed");
        self.notifier.show("Refreshed.");
        report
    }

    /// True while either panel is reloading.
    pub fn is_refreshing(&self) -> bool {
        self.posts.store().is_loading() || self.devotions.store().is_loading()
    }

    /// Move the posts panel to `page`.
    pub async fn change_page(&self, page: u32) -> Result<Vec<DailyPost>, TransportError> {
        self.posts.reload_page(page).await
    }
}

#[cfg(feature = "http")]
impl Dashboard<crate::transport::HttpTransport> {
    /// Dashboard talking to the API described by `config`.
    pub fn connect(config: &crate::config::ApiConfig) -> Result<Self, TransportError> {
        Ok(Self::new(crate::transport::HttpTransport::new(config)?))
    }
}
