//! Application roles

use crate::paths;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Application-level role assigned by the directory service.
///
/// The directory may return a role string this client does not know; it is
/// kept as [`Role::Unrecognized`] so it can be displayed and logged, but it
/// never matches an allowed-roles list and has no home route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Volunteer,
    Organizer,
    Admin,
    Unrecognized(String),
}

impl Role {
    /// The three roles the application routes on
    pub const KNOWN: [Role; 3] = [Role::Volunteer, Role::Organizer, Role::Admin];

    /// Parse a directory role string (case-sensitive)
    pub fn parse(value: &str) -> Self {
        match value {
            "volunteer" => Role::Volunteer,
            "organizer" => Role::Organizer,
            "admin" => Role::Admin,
            other => Role::Unrecognized(other.to_string()),
        }
    }

    /// Wire form of the role
    pub fn as_str(&self) -> &str {
        match self {
            Role::Volunteer => "volunteer",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
            Role::Unrecognized(other) => other,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }

    /// Route a signed-in principal with this role lands on
    pub fn home_path(&self) -> Option<&'static str> {
        match self {
            Role::Volunteer => Some(paths::VOLUNTEER_DASHBOARD),
            Role::Organizer => Some(paths::ORGANIZER_DASHBOARD),
            Role::Admin => Some(paths::ADMIN_DASHBOARD),
            Role::Unrecognized(_) => None,
        }
    }

    /// Label shown on the suspension view
    pub fn suspension_label(&self) -> &'static str {
        match self {
            Role::Volunteer => "Volunteer",
            Role::Organizer => "Organizer",
            _ => "User",
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match Role::parse(&value) {
            Role::Unrecognized(_) => Role::Unrecognized(value),
            known => known,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unrecognized(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
