//! Session store
//!
//! Owns the process-wide [`Session`] and is its only writer. Two entry points
//! mutate it: identity events (fed by [`SessionStore::attach`] or called
//! directly) and [`SessionStore::refresh`].
//!
//! Directory lookups run as spawned tasks and can finish in any order. Every
//! identity event and every refresh bumps an epoch; a lookup applies its
//! result only if the epoch it started under is still current, checked and
//! published under one lock. Superseded lookups are never cancelled, their
//! results are dropped.

use super::subscription::SessionSubscription;
use crate::engine::MetricsCollector;
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use volunteerverse_core::{
    DirectoryRecord, DirectoryService, Identity, IdentityEvent, IdentityProvider, Profile, Session,
};

/// How a directory lookup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Response applied to the session
    Applied,
    /// Lookup failed; previous profile kept
    Failed,
    /// Superseded by a newer identity event or lookup; result discarded
    Stale,
    /// Nothing to look up (no identity)
    NoIdentity,
}

struct StoreInner {
    tx: watch::Sender<Session>,

    /// Incremented by every identity event and refresh
    epoch: Mutex<u64>,

    provider: Arc<dyn IdentityProvider>,
    directory: Arc<dyn DirectoryService>,
    metrics: Option<Arc<MetricsCollector>>,
}

/// Single owner of the session; cheap to clone and share
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn IdentityProvider>, directory: Arc<dyn DirectoryService>) -> Self {
        Self::build(provider, directory, None)
    }

    /// Store that reports lookup outcomes to `metrics`
    pub fn with_metrics(
        provider: Arc<dyn IdentityProvider>,
        directory: Arc<dyn DirectoryService>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self::build(provider, directory, Some(metrics))
    }

    fn build(
        provider: Arc<dyn IdentityProvider>,
        directory: Arc<dyn DirectoryService>,
        metrics: Option<Arc<MetricsCollector>>,
    ) -> Self {
        let (tx, _rx) = watch::channel(Session::initial());
        Self {
            inner: Arc::new(StoreInner {
                tx,
                epoch: Mutex::new(0),
                provider,
                directory,
                metrics,
            }),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Session {
        self.inner.tx.borrow().clone()
    }

    /// Register for updates; the current snapshot is readable immediately
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.inner.tx.subscribe())
    }

    /// Call `on_change` with the current snapshot now, then after every update.
    ///
    /// Must be called from within a tokio runtime. The returned task ends when
    /// the store is dropped; abort it to unsubscribe earlier.
    pub fn on_change<F>(&self, mut on_change: F) -> JoinHandle<()>
    where
        F: FnMut(&Session) + Send + 'static,
    {
        let mut subscription = self.subscribe();
        on_change(&subscription.current());

        tokio::spawn(async move {
            while let Some(session) = subscription.changed().await {
                on_change(&session);
            }
        })
    }

    /// Spawn the event pump draining the provider's change stream.
    ///
    /// Call once per application lifetime.
    pub fn attach(&self) -> SessionPump {
        let store = self.clone();
        let mut events = self.inner.provider.events();

        let handle = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                store.handle_event(event);
            }
            debug!("Identity event stream closed");
        });

        SessionPump { handle }
    }

    /// Apply one identity event.
    ///
    /// Returns the spawned lookup for `Present`, `None` for `Absent`.
    pub fn handle_event(&self, event: IdentityEvent) -> Option<JoinHandle<LookupOutcome>> {
        match event {
            IdentityEvent::Present(identity) => Some(self.present(identity)),
            IdentityEvent::Absent => {
                self.absent();
                None
            }
        }
    }

    /// A principal signed in: install the identity and start a lookup.
    ///
    /// A different principal than the current one starts from an empty
    /// profile; the same principal keeps its profile until the lookup lands.
    pub fn present(&self, identity: Identity) -> JoinHandle<LookupOutcome> {
        let epoch = {
            let mut epoch = self.inner.epoch.lock();
            *epoch += 1;

            self.inner.tx.send_modify(|session| {
                let same_principal = session
                    .identity
                    .as_ref()
                    .map(|current| current.same_principal(&identity))
                    .unwrap_or(false);
                if !same_principal {
                    session.profile = Profile::default();
                }
                session.identity = Some(identity.clone());
                session.version += 1;
            });

            *epoch
        };

        info!("Identity present: uid={}", identity.uid);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { run_lookup(inner, identity, epoch, false).await })
    }

    /// Nobody is signed in: reset everything in one update
    pub fn absent(&self) {
        let mut epoch = self.inner.epoch.lock();
        *epoch += 1;

        self.inner.tx.send_modify(|session| {
            session.identity = None;
            session.profile = Profile::default();
            session.loading = false;
            session.version += 1;
        });

        info!("Identity absent; session reset");
    }

    /// Re-resolve the current principal with a freshly issued token.
    ///
    /// Used after actions that change the caller's own role or profile.
    /// Any lookup still in flight is superseded. The lookup runs as its own
    /// task, so dropping the returned future does not abandon it.
    pub async fn refresh(&self) -> LookupOutcome {
        let started = {
            let mut epoch = self.inner.epoch.lock();
            let identity = self.inner.tx.borrow().identity.clone();
            identity.map(|identity| {
                *epoch += 1;
                (identity, *epoch)
            })
        };

        match started {
            Some((identity, epoch)) => {
                debug!("Refreshing session for uid={}", identity.uid);
                let inner = Arc::clone(&self.inner);
                let lookup = tokio::spawn(async move { run_lookup(inner, identity, epoch, true).await });
                match lookup.await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        warn!("Refresh lookup task ended abnormally: {}", err);
                        LookupOutcome::Failed
                    }
                }
            }
            None => {
                debug!("Refresh requested with no identity");
                LookupOutcome::NoIdentity
            }
        }
    }
}

/// Handle to the spawned identity event pump
pub struct SessionPump {
    handle: JoinHandle<()>,
}

impl SessionPump {
    /// Stop consuming identity events
    pub fn shutdown(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the provider stream to end
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            if !err.is_cancelled() {
                warn!("Session pump ended abnormally: {}", err);
            }
        }
    }
}

async fn run_lookup(
    inner: Arc<StoreInner>,
    identity: Identity,
    epoch: u64,
    force_refresh: bool,
) -> LookupOutcome {
    let start = Instant::now();

    let result: volunteerverse_core::Result<DirectoryRecord> = async {
        let token = inner.provider.id_token(&identity, force_refresh).await?;
        inner.directory.lookup(&token).await
    }
    .await;

    let outcome = {
        let current = inner.epoch.lock();
        if *current != epoch {
            debug!(
                "Discarding stale lookup for uid={} (epoch {} < {})",
                identity.uid, epoch, *current
            );
            LookupOutcome::Stale
        } else {
            match result {
                Ok(record) => {
                    let profile = Profile::from(record);
                    debug!(
                        "Directory resolved uid={} role={:?} banned={}",
                        identity.uid, profile.role, profile.is_banned
                    );
                    inner.tx.send_modify(|session| {
                        session.profile = profile;
                        session.loading = false;
                        session.version += 1;
                    });
                    LookupOutcome::Applied
                }
                Err(err) => {
                    warn!(
                        "Directory lookup failed for uid={}: {}; keeping previous role",
                        identity.uid, err
                    );
                    inner.tx.send_if_modified(|session| {
                        if session.loading {
                            session.loading = false;
                            session.version += 1;
                            true
                        } else {
                            false
                        }
                    });
                    LookupOutcome::Failed
                }
            }
        }
    };

    if let Some(metrics) = &inner.metrics {
        metrics.record_lookup(outcome, start.elapsed()).await;
    }

    outcome
}
