//! Identity provider with a fixed principal and token
//!
//! Stands in for the browser identity SDK in command-line tools: the token is
//! obtained out of band and handed over as-is.

use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;
use volunteerverse_core::{
    CoreError, Identity, IdentityEvent, IdentityEventStream, IdentityProvider,
};

pub struct StaticIdentityProvider {
    identity: Option<Identity>,
    token: String,
}

impl StaticIdentityProvider {
    /// Signed in as `identity`, always answering with `token`
    pub fn signed_in(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            identity: Some(identity),
            token: token.into(),
        }
    }

    /// Nobody signed in
    pub fn signed_out() -> Self {
        Self {
            identity: None,
            token: String::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    fn events(&self) -> IdentityEventStream {
        let event = match &self.identity {
            Some(identity) => IdentityEvent::Present(identity.clone()),
            None => IdentityEvent::Absent,
        };
        stream::iter(vec![event]).boxed()
    }

    async fn id_token(
        &self,
        identity: &Identity,
        _force_refresh: bool,
    ) -> volunteerverse_core::Result<String> {
        match &self.identity {
            Some(current) if current.same_principal(identity) => Ok(self.token.clone()),
            _ => Err(CoreError::auth(format!("no credential for uid={}", identity.uid))),
        }
    }
}
