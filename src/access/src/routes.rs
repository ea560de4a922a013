//! Application route table and navigator
//!
//! Every navigable path with its admission rule, keyed by the same [`Role`]
//! enum as the resolver and the role menus.

use crate::engine::{decide, resolve_landing, Decision, LandingView, SuspensionView};
use serde::Serialize;
use volunteerverse_core::{paths, Role, Session};

/// How a route is admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Root route: landing dispatch
    Landing,
    /// Anyone, signed in or not
    Public,
    /// Standalone suspension page
    Suspension,
    /// Restricted to one role
    Protected(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub access: RouteAccess,
}

const fn route(path: &'static str, access: RouteAccess) -> RouteEntry {
    RouteEntry { path, access }
}

static ROUTES: [RouteEntry; 21] = [
    route(paths::ROOT, RouteAccess::Landing),
    route(paths::LOGIN, RouteAccess::Public),
    route(paths::REGISTER, RouteAccess::Public),
    route(paths::BANNED, RouteAccess::Suspension),
    // Volunteer
    route(paths::VOLUNTEER_DASHBOARD, RouteAccess::Protected(Role::Volunteer)),
    route(paths::VOLUNTEER_ARTICLES, RouteAccess::Protected(Role::Volunteer)),
    route(paths::VOLUNTEER_QA, RouteAccess::Protected(Role::Volunteer)),
    route(paths::VOLUNTEER_GALLERY, RouteAccess::Protected(Role::Volunteer)),
    route(paths::VOLUNTEER_MY_EVENTS, RouteAccess::Protected(Role::Volunteer)),
    route(paths::VOLUNTEER_NOTICES, RouteAccess::Protected(Role::Volunteer)),
    // Organizer
    route(paths::ORGANIZER_DASHBOARD, RouteAccess::Protected(Role::Organizer)),
    route(paths::ORGANIZER_ARTICLES, RouteAccess::Protected(Role::Organizer)),
    route(paths::ORGANIZER_QA, RouteAccess::Protected(Role::Organizer)),
    route(paths::ORGANIZER_GALLERY, RouteAccess::Protected(Role::Organizer)),
    route(paths::ORGANIZER_VOLUNTEER_STATS, RouteAccess::Protected(Role::Organizer)),
    route(paths::ORGANIZER_NOTICES, RouteAccess::Protected(Role::Organizer)),
    route(paths::ORGANIZER_EVENT_REQUESTS, RouteAccess::Protected(Role::Organizer)),
    // Admin
    route(paths::ADMIN_DASHBOARD, RouteAccess::Protected(Role::Admin)),
    route(paths::ADMIN_EVENTS, RouteAccess::Protected(Role::Admin)),
    route(paths::ADMIN_NOTICES, RouteAccess::Protected(Role::Admin)),
    route(paths::ADMIN_USERS, RouteAccess::Protected(Role::Admin)),
];

/// What navigating to a path produces for the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum NavOutcome {
    /// Render the route's own content
    Render,
    /// Neutral placeholder while the session resolves
    Loading,
    /// Public landing content at the root
    PublicLanding,
    Redirect(String),
    Banned(SuspensionView),
    NotFound,
}

pub fn routes() -> &'static [RouteEntry] {
    &ROUTES
}

/// Route entry for `path` (trailing slashes ignored)
pub fn lookup(path: &str) -> Option<&'static RouteEntry> {
    let path = paths::normalize(path);
    ROUTES.iter().find(|entry| entry.path == path)
}

/// Paths restricted to `role`
pub fn protected_paths(role: &Role) -> impl Iterator<Item = &'static str> + '_ {
    ROUTES.iter().filter_map(move |entry| match &entry.access {
        RouteAccess::Protected(required) if required == role => Some(entry.path),
        _ => None,
    })
}

/// Resolve a navigation to `path` against `session`
pub fn resolve(path: &str, session: &Session) -> NavOutcome {
    let Some(entry) = lookup(path) else {
        return NavOutcome::NotFound;
    };

    match &entry.access {
        RouteAccess::Landing => match resolve_landing(session) {
            LandingView::Loading => NavOutcome::Loading,
            LandingView::PublicLanding => NavOutcome::PublicLanding,
            LandingView::Redirect(home) => NavOutcome::Redirect(home.to_string()),
        },
        RouteAccess::Public => NavOutcome::Render,
        RouteAccess::Suspension => {
            if session.loading {
                NavOutcome::Loading
            } else if session.is_authenticated() {
                NavOutcome::Banned(SuspensionView::for_session(session))
            } else {
                NavOutcome::Redirect(paths::ROOT.to_string())
            }
        }
        RouteAccess::Protected(role) => match decide(session, Some(std::slice::from_ref(role))) {
            Decision::Wait => NavOutcome::Loading,
            Decision::Redirect(target) => NavOutcome::Redirect(target),
            Decision::Banned => NavOutcome::Banned(SuspensionView::for_session(session)),
            Decision::Admit => NavOutcome::Render,
        },
    }
}
