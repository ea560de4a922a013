//! Route admission wrapper
//!
//! Applies a [`Decision`] to protected content. The content is produced by a
//! mount closure that only runs on [`Decision::Admit`], so protected screens
//! (and the fetches they start when mounted) never exist for a session that
//! is pending, signed out, banned, or missing the role.

use super::decision::{decide, Decision};
use super::metrics::MetricsCollector;
use crate::session::{SessionStore, SessionSubscription};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use volunteerverse_core::{Role, Session};

/// In-place suspension view shown to banned principals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspensionView {
    /// "Volunteer", "Organizer", or "User"
    pub role_label: &'static str,

    /// Email the principal signed in with
    pub email: Option<String>,
}

impl SuspensionView {
    pub fn for_session(session: &Session) -> Self {
        Self {
            role_label: session
                .role()
                .map(|role| role.suspension_label())
                .unwrap_or("User"),
            email: session.identity.as_ref().and_then(|identity| identity.email.clone()),
        }
    }

    pub fn heading(&self) -> String {
        format!("{} is Banned", self.role_label)
    }
}

/// Exactly one of the four things a protected route can render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission<T> {
    Loading,
    Redirect(String),
    Banned(SuspensionView),
    Admitted(T),
}

impl<T> Admission<T> {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }

    pub fn admitted(self) -> Option<T> {
        match self {
            Admission::Admitted(content) => Some(content),
            _ => None,
        }
    }
}

/// `Ok` when the content may mount, otherwise what to render instead
fn check<T>(decision: Decision, session: &Session) -> Result<(), Admission<T>> {
    match decision {
        Decision::Admit => Ok(()),
        Decision::Wait => Err(Admission::Loading),
        Decision::Redirect(target) => Err(Admission::Redirect(target)),
        Decision::Banned => Err(Admission::Banned(SuspensionView::for_session(session))),
    }
}

/// Evaluate `session` and mount the content only when admitted
pub fn protect<T, F>(session: &Session, allowed_roles: Option<&[Role]>, mount: F) -> Admission<T>
where
    F: FnOnce(&Session) -> T,
{
    match check(decide(session, allowed_roles), session) {
        Ok(()) => Admission::Admitted(mount(session)),
        Err(blocked) => blocked,
    }
}

/// Async variant of [`protect`]; the mount future is only created and
/// awaited when admitted
pub async fn protect_async<T, F, Fut>(
    session: &Session,
    allowed_roles: Option<&[Role]>,
    mount: F,
) -> Admission<T>
where
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = T>,
{
    match check(decide(session, allowed_roles), session) {
        Ok(()) => Admission::Admitted(mount(session.clone()).await),
        Err(blocked) => blocked,
    }
}

/// Admission bound to a live session store.
///
/// Protected screens receive a `Gate` instead of the store itself, so they can
/// read the session but never write it.
#[derive(Clone)]
pub struct Gate {
    session: SessionSubscription,
    metrics: Option<Arc<MetricsCollector>>,
}

impl Gate {
    pub fn new(store: &SessionStore) -> Self {
        Self {
            session: store.subscribe(),
            metrics: None,
        }
    }

    pub fn with_metrics(store: &SessionStore, metrics: Arc<MetricsCollector>) -> Self {
        Self {
            session: store.subscribe(),
            metrics: Some(metrics),
        }
    }

    /// Decision for the current snapshot
    pub async fn decide(&self, allowed_roles: Option<&[Role]>) -> Decision {
        let decision = decide(&self.session.peek(), allowed_roles);
        if let Some(metrics) = &self.metrics {
            metrics.record_decision(&decision).await;
        }
        decision
    }

    /// [`protect`] against the current snapshot
    pub async fn protect<T, F>(&self, allowed_roles: Option<&[Role]>, mount: F) -> Admission<T>
    where
        F: FnOnce(&Session) -> T,
    {
        let session = self.session.peek();
        let decision = decide(&session, allowed_roles);
        if let Some(metrics) = &self.metrics {
            metrics.record_decision(&decision).await;
        }

        match check(decision, &session) {
            Ok(()) => Admission::Admitted(mount(&session)),
            Err(blocked) => blocked,
        }
    }

    /// [`protect_async`] against the current snapshot
    pub async fn protect_async<T, F, Fut>(
        &self,
        allowed_roles: Option<&[Role]>,
        mount: F,
    ) -> Admission<T>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = T>,
    {
        let session = self.session.peek();
        let decision = decide(&session, allowed_roles);
        if let Some(metrics) = &self.metrics {
            metrics.record_decision(&decision).await;
        }

        match check(decision, &session) {
            Ok(()) => Admission::Admitted(mount(session).await),
            Err(blocked) => blocked,
        }
    }
}
