//! Session snapshot types

use super::role::Role;
use crate::UserId;
use serde::{Deserialize, Serialize};

/// Signed-in principal as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-issued stable user id
    pub uid: UserId,

    /// Email the principal signed in with, if the provider exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<UserId>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Whether both handles refer to the same principal
    pub fn same_principal(&self, other: &Identity) -> bool {
        self.uid == other.uid
    }
}

/// Authorization attributes resolved from one directory response.
///
/// The session only ever replaces a `Profile` as a whole, so a role can never
/// be observed next to the ban flag of a different response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub role: Option<Role>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_banned: bool,
}

/// Process-wide resolved view of the current principal.
///
/// Snapshots are immutable values; the session store publishes a new one for
/// every change and bumps `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub identity: Option<Identity>,

    #[serde(flatten)]
    pub profile: Profile,

    /// True until the first identity-event round-trip completes
    pub loading: bool,

    /// Incremented on every published update
    pub version: u64,
}

impl Session {
    /// State at process start: nothing known yet
    pub fn initial() -> Self {
        Self {
            identity: None,
            profile: Profile::default(),
            loading: true,
            version: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn uid(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.uid.as_str())
    }

    pub fn role(&self) -> Option<&Role> {
        self.profile.role.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.profile.username.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.profile.display_name.as_deref()
    }

    pub fn is_banned(&self) -> bool {
        self.profile.is_banned
    }

    /// Whether the resolved role is one of `allowed`
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.role().map(|role| allowed.contains(role)).unwrap_or(false)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_session() {
        let session = Session::initial();
        assert!(session.loading);
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
        assert!(!session.is_banned());
        assert_eq!(session.version, 0);
    }

    #[test]
    fn test_has_any_role() {
        let mut session = Session::initial();
        assert!(!session.has_any_role(&[Role::Volunteer]));

        session.profile.role = Some(Role::Volunteer);
        assert!(session.has_any_role(&[Role::Volunteer, Role::Admin]));
        assert!(!session.has_any_role(&[Role::Organizer]));
        assert!(!session.has_any_role(&[]));
    }

    #[test]
    fn test_same_principal_ignores_email() {
        let a = Identity::new("uid-1").with_email("a@example.com");
        let b = Identity::new("uid-1");
        let c = Identity::new("uid-2");

        assert!(a.same_principal(&b));
        assert!(!a.same_principal(&c));
    }

    #[test]
    fn test_snapshot_serializes_flat() {
        let session = Session {
            identity: Some(Identity::new("uid-1")),
            profile: Profile {
                role: Some(Role::Admin),
                username: Some("root".to_string()),
                display_name: None,
                is_banned: false,
            },
            loading: false,
            version: 3,
        };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["role"], "admin");
        assert_eq!(value["username"], "root");
        assert_eq!(value["isBanned"], false);
        assert_eq!(value["loading"], false);
        assert_eq!(value["identity"]["uid"], "uid-1");
    }
}
