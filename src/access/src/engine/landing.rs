//! Root route resolution
//!
//! The landing route is public, so it uses a looser rule than [`decide`]:
//! nobody is redirected to login, and signed-in principals are sent to their
//! role's dashboard.
//!
//! [`decide`]: super::decision::decide

use serde::Serialize;
use volunteerverse_core::Session;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum LandingView {
    /// Neutral placeholder while the session resolves
    Loading,

    /// Public landing content
    PublicLanding,

    /// Role home route
    Redirect(&'static str),
}

pub fn resolve_landing(session: &Session) -> LandingView {
    if session.loading {
        return LandingView::Loading;
    }

    if !session.is_authenticated() {
        return LandingView::PublicLanding;
    }

    match session.role().and_then(|role| role.home_path()) {
        Some(home) => LandingView::Redirect(home),
        None => LandingView::PublicLanding,
    }
}
