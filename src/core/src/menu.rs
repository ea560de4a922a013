//! Per-role navigation menus
//!
//! Keyed by the same [`Role`] enum the access resolver matches on, so the
//! set of roles has one definition shared by routing and navigation.

use crate::paths;
use crate::types::Role;
use serde::Serialize;

/// One navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub path: &'static str,
    pub label: &'static str,
    /// Show the unread-notices badge on this entry
    pub badge: bool,
}

const fn item(path: &'static str, label: &'static str) -> MenuItem {
    MenuItem { path, label, badge: false }
}

const VOLUNTEER_ITEMS: &[MenuItem] = &[
    item(paths::VOLUNTEER_DASHBOARD, "Home"),
    item(paths::VOLUNTEER_ARTICLES, "Articles"),
    item(paths::VOLUNTEER_QA, "Q/A"),
    item(paths::VOLUNTEER_GALLERY, "Gallery"),
    item(paths::VOLUNTEER_MY_EVENTS, "My Events"),
    MenuItem {
        path: paths::VOLUNTEER_NOTICES,
        label: "Notices",
        badge: true,
    },
];

const ORGANIZER_ITEMS: &[MenuItem] = &[
    item(paths::ORGANIZER_DASHBOARD, "Dashboard"),
    item(paths::ORGANIZER_EVENT_REQUESTS, "Event Requests"),
    item(paths::ORGANIZER_ARTICLES, "Articles"),
    item(paths::ORGANIZER_QA, "Q/A"),
    item(paths::ORGANIZER_GALLERY, "Gallery"),
    item(paths::ORGANIZER_VOLUNTEER_STATS, "VolunteerStats"),
    item(paths::ORGANIZER_NOTICES, "Notices"),
];

const ADMIN_ITEMS: &[MenuItem] = &[
    item(paths::ADMIN_DASHBOARD, "Dashboard"),
    item(paths::ADMIN_EVENTS, "Event Requests"),
    item(paths::ADMIN_USERS, "Manage Users"),
    item(paths::ADMIN_NOTICES, "Notices"),
];

/// Navigation menu for a recognized role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleMenu {
    Volunteer,
    Organizer,
    Admin,
}

impl RoleMenu {
    /// Menu for `role`; unrecognized roles get none
    pub fn for_role(role: &Role) -> Option<Self> {
        match role {
            Role::Volunteer => Some(RoleMenu::Volunteer),
            Role::Organizer => Some(RoleMenu::Organizer),
            Role::Admin => Some(RoleMenu::Admin),
            Role::Unrecognized(_) => None,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RoleMenu::Volunteer => Role::Volunteer,
            RoleMenu::Organizer => Role::Organizer,
            RoleMenu::Admin => Role::Admin,
        }
    }

    pub fn items(&self) -> &'static [MenuItem] {
        match self {
            RoleMenu::Volunteer => VOLUNTEER_ITEMS,
            RoleMenu::Organizer => ORGANIZER_ITEMS,
            RoleMenu::Admin => ADMIN_ITEMS,
        }
    }

    /// Brand link target; same as the role's landing redirect
    pub fn home(&self) -> &'static str {
        match self {
            RoleMenu::Volunteer => paths::VOLUNTEER_DASHBOARD,
            RoleMenu::Organizer => paths::ORGANIZER_DASHBOARD,
            RoleMenu::Admin => paths::ADMIN_DASHBOARD,
        }
    }

    /// Whether any entry carries the unread-notices badge
    pub fn has_badge(&self) -> bool {
        self.items().iter().any(|item| item.badge)
    }
}
