//! Remote identity provider

use crate::error::Result;
use crate::types::Identity;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Sign-in state change emitted by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    /// A principal is signed in (including one restored from a stored credential)
    Present(Identity),

    /// Nobody is signed in
    Absent,
}

/// Change stream handed to the session store
pub type IdentityEventStream = BoxStream<'static, IdentityEvent>;

/// External authentication service.
///
/// Sign-in, sign-out and registration are driven by the UI against the
/// provider directly; the session store only consumes the resulting events.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Subscribe to sign-in state changes.
    ///
    /// The first event reflects the provider's current state, so a fresh
    /// process with no stored credential yields `Absent` promptly.
    fn events(&self) -> IdentityEventStream;

    /// Short-lived bearer token for `identity`.
    ///
    /// `force_refresh` bypasses any token cache the provider keeps.
    async fn id_token(&self, identity: &Identity, force_refresh: bool) -> Result<String>;
}
