//! Directory service wire types

use super::role::Role;
use super::session::Profile;
use serde::{Deserialize, Serialize};

/// Application user record returned by `GET /api/users/me`.
///
/// Only the fields the session consumes are modelled; the directory sends
/// more (email, timestamps, ids) which are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRecord {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Absent or `null` means not banned
    #[serde(default)]
    pub is_banned: Option<bool>,
}

impl DirectoryRecord {
    /// Record for a principal with the given role and no ban
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Default::default()
        }
    }

    pub fn banned(mut self, is_banned: bool) -> Self {
        self.is_banned = Some(is_banned);
        self
    }

    pub fn named(mut self, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.display_name = Some(display_name.into());
        self
    }
}

impl From<DirectoryRecord> for Profile {
    fn from(record: DirectoryRecord) -> Self {
        Profile {
            role: record.role.as_deref().map(Role::parse),
            username: record.username,
            display_name: record.display_name,
            is_banned: record.is_banned.unwrap_or(false),
        }
    }
}
