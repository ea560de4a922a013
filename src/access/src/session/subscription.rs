//! Read-only session subscriptions

use tokio::sync::watch;
use volunteerverse_core::Session;

/// Read side of the session store.
///
/// Consumers can read the current snapshot at any time and await updates;
/// they can never write.
#[derive(Clone)]
pub struct SessionSubscription {
    rx: watch::Receiver<Session>,
}

impl SessionSubscription {
    pub(crate) fn new(rx: watch::Receiver<Session>) -> Self {
        Self { rx }
    }

    /// Latest snapshot (also marks it as seen)
    pub fn current(&mut self) -> Session {
        self.rx.borrow_and_update().clone()
    }

    /// Latest snapshot without marking it as seen
    pub fn peek(&self) -> Session {
        self.rx.borrow().clone()
    }

    /// Wait for the next update.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Session> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until the first identity round-trip has completed
    pub async fn resolved(&mut self) -> Option<Session> {
        self.wait_for(|session| !session.loading).await
    }

    /// Wait until `predicate` holds for the current snapshot
    pub async fn wait_for<F>(&mut self, predicate: F) -> Option<Session>
    where
        F: FnMut(&Session) -> bool,
    {
        let session = self.rx.wait_for(predicate).await.ok()?;
        Some(session.clone())
    }
}
