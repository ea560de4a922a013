//! Access resolver: session + allowed roles → admission decision

use serde::{Deserialize, Serialize};
use volunteerverse_core::{paths, Role, Session};

/// Outcome of evaluating a protected route against the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum Decision {
    /// First identity round-trip still pending
    Wait,

    /// Navigate elsewhere (login when signed out, home on role mismatch)
    Redirect(String),

    /// Show the suspension view in place, keeping the current URL
    Banned,

    /// Mount the protected content
    Admit,
}

impl Decision {
    pub fn is_admit(&self) -> bool {
        matches!(self, Decision::Admit)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Decision::Wait => "wait",
            Decision::Redirect(_) => "redirect",
            Decision::Banned => "banned",
            Decision::Admit => "admit",
        }
    }
}

/// Decide admission for a route restricted to `allowed_roles`.
///
/// `None` admits any signed-in, non-banned principal. The checks run in a
/// fixed order: a pending session never redirects, and the ban check comes
/// before role matching so banned admins and organizers still see the
/// suspension view.
pub fn decide(session: &Session, allowed_roles: Option<&[Role]>) -> Decision {
    if session.loading {
        return Decision::Wait;
    }

    if !session.is_authenticated() {
        return Decision::Redirect(paths::LOGIN.to_string());
    }

    if session.is_banned() {
        return Decision::Banned;
    }

    if let Some(allowed) = allowed_roles {
        if !session.has_any_role(allowed) {
            return Decision::Redirect(paths::ROOT.to_string());
        }
    }

    Decision::Admit
}
