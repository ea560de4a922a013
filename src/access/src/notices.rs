//! Unread-notices badge poller
//!
//! Runs beside the session store, never inside it: it reads session snapshots
//! to learn who is signed in and publishes a single `has_unread` flag on its
//! own watch channel. Navigation menus subscribe to that flag.

use crate::client::transport_error;
use crate::config::{AccessConfig, ApiBase};
use crate::error::Result;
use crate::session::SessionSubscription;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};
use volunteerverse_core::{paths, CoreError};

pub const NOTICES_PATH: &str = "/api/notices";

/// Notice as returned by the notices endpoint; only the read flag matters here
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeItem {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    #[serde(default)]
    pub is_read: bool,
}

/// Source of a user's notices
#[async_trait]
pub trait NoticeSource: Send + Sync {
    async fn fetch(&self, user_id: &str) -> volunteerverse_core::Result<Vec<NoticeItem>>;
}

/// [`NoticeSource`] backed by `GET {api_base}/api/notices?userId=...`
#[derive(Clone)]
pub struct HttpNoticeSource {
    http: reqwest::Client,
    api: ApiBase,
}

impl HttpNoticeSource {
    pub fn new(config: &AccessConfig) -> Result<Self> {
        Ok(Self::with_client(crate::client::http_client(config)?, config.api()?))
    }

    pub fn with_client(http: reqwest::Client, api: ApiBase) -> Self {
        Self { http, api }
    }
}

#[async_trait]
impl NoticeSource for HttpNoticeSource {
    async fn fetch(&self, user_id: &str) -> volunteerverse_core::Result<Vec<NoticeItem>> {
        let url = self.api.url(NOTICES_PATH);

        let response = self
            .http
            .get(&url)
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response.json().await.map_err(transport_error)
    }
}

struct PollerInner {
    source: Arc<dyn NoticeSource>,
    session: SessionSubscription,
    flag: watch::Sender<bool>,
    interval: Duration,
}

/// Background poller publishing whether the signed-in user has unread notices
#[derive(Clone)]
pub struct NoticePoller {
    inner: Arc<PollerInner>,
}

impl NoticePoller {
    pub fn new(source: Arc<dyn NoticeSource>, session: SessionSubscription, interval: Duration) -> Self {
        let (flag, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(PollerInner {
                source,
                session,
                flag,
                interval,
            }),
        }
    }

    /// Observe the badge flag
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.flag.subscribe()
    }

    pub fn has_unread(&self) -> bool {
        *self.inner.flag.borrow()
    }

    /// The user opened the notices page
    pub fn mark_viewed(&self) {
        self.inner.flag.send_replace(false);
    }

    /// The user navigated; re-check unless they landed on a notices page.
    ///
    /// The notices page clears the badge itself through [`mark_viewed`].
    ///
    /// [`mark_viewed`]: NoticePoller::mark_viewed
    pub async fn navigated(&self, path: &str) {
        let path = paths::normalize(path);
        if paths::NOTICE_PAGES.iter().any(|page| *page == path) {
            debug!("On notices page {}; skipping re-check", path);
            return;
        }
        self.check().await;
    }

    /// Poll once and publish the result.
    ///
    /// Signed out clears the flag; a failed fetch keeps the previous value, and
    /// so does a fetch that returns after the principal changed.
    pub async fn check(&self) -> bool {
        let uid = self.inner.session.peek().uid().map(str::to_string);
        let Some(uid) = uid else {
            self.inner.flag.send_replace(false);
            return false;
        };

        let result = self.inner.source.fetch(&uid).await;

        if self.inner.session.peek().uid() != Some(uid.as_str()) {
            debug!("Discarding notices for uid={}; principal changed during fetch", uid);
            return self.has_unread();
        }

        match result {
            Ok(items) => {
                let unread = items.iter().any(|item| !item.is_read);
                debug!("Notices for uid={}: {} total, unread={}", uid, items.len(), unread);
                self.inner.flag.send_replace(unread);
                unread
            }
            Err(err) => {
                warn!("Error checking notices for uid={}: {}", uid, err);
                self.has_unread()
            }
        }
    }

    /// Spawn the polling loop.
    ///
    /// Checks immediately, then every interval, and again whenever the
    /// signed-in principal changes. Ends when the session store is dropped.
    pub fn spawn(&self) -> JoinHandle<()> {
        let poller = self.clone();
        let mut session = self.inner.session.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poller.inner.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_uid = session.current().uid().map(str::to_string);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        poller.check().await;
                    }
                    changed = session.changed() => {
                        let Some(snapshot) = changed else {
                            debug!("Session store dropped; notice poller stopping");
                            break;
                        };
                        let uid = snapshot.uid().map(str::to_string);
                        if uid != last_uid {
                            last_uid = uid;
                            poller.check().await;
                        }
                    }
                }
            }
        })
    }
}
