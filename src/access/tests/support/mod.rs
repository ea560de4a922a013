//! Scripted collaborators for session store tests

#![allow(dead_code)]

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{mpsc, oneshot};
use volunteerverse_core::{
    CoreError, DirectoryRecord, DirectoryService, Identity, IdentityEvent, IdentityEventStream,
    IdentityProvider, Role,
};

/// Identity provider whose events are pushed by the test.
///
/// Tokens are `token-{uid}`, or `token-{uid}-fresh` when a refresh is forced.
pub struct ScriptedProvider {
    tx: mpsc::UnboundedSender<IdentityEvent>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<IdentityEvent>>>,
    forced: AtomicUsize,
    failing: AtomicBool,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
            forced: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn push(&self, event: IdentityEvent) {
        self.tx.send(event).unwrap();
    }

    /// Make every token request fail
    pub fn fail_tokens(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn forced_refreshes(&self) -> usize {
        self.forced.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    fn events(&self) -> IdentityEventStream {
        let rx = self.rx.lock().take();
        match rx {
            Some(rx) => stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|event| (event, rx))
            })
            .boxed(),
            None => stream::empty().boxed(),
        }
    }

    async fn id_token(
        &self,
        identity: &Identity,
        force_refresh: bool,
    ) -> volunteerverse_core::Result<String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::auth("token service unavailable"));
        }
        if force_refresh {
            self.forced.fetch_add(1, Ordering::SeqCst);
            Ok(format!("token-{}-fresh", identity.uid))
        } else {
            Ok(format!("token-{}", identity.uid))
        }
    }
}

/// Directory answering per token, with optional gates holding a response
/// until the test releases it
#[derive(Default)]
pub struct ScriptedDirectory {
    responses: Mutex<HashMap<String, Option<DirectoryRecord>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: AtomicUsize,
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `token` with `record`
    pub fn respond(&self, token: &str, record: DirectoryRecord) {
        self.responses.lock().insert(token.to_string(), Some(record));
    }

    /// Answer `token` with a transport error
    pub fn fail(&self, token: &str) {
        self.responses.lock().insert(token.to_string(), None);
    }

    /// Hold the next lookup for `token` until the returned sender fires
    pub fn hold(&self, token: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(token.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryService for ScriptedDirectory {
    async fn lookup(&self, token: &str) -> volunteerverse_core::Result<DirectoryRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().remove(token);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let response = self.responses.lock().get(token).cloned();
        match response {
            Some(Some(record)) => Ok(record),
            Some(None) => Err(CoreError::transport("connection reset by peer")),
            None => Err(CoreError::Status {
                status: 404,
                url: "/api/users/me".to_string(),
            }),
        }
    }
}

pub fn record(role: Role) -> DirectoryRecord {
    DirectoryRecord::with_role(role)
}
