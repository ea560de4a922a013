//! # VolunteerVerse Core
//!
//! Shared types, traits, and error handling for the VolunteerVerse client.
//! The access crate builds the session store and route admission on top of
//! these; consumers that only read session snapshots depend on this crate alone.

pub mod types;
pub mod traits;
pub mod menu;
pub mod paths;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use menu::{MenuItem, RoleMenu};
pub use traits::{DirectoryService, IdentityEvent, IdentityEventStream, IdentityProvider};
pub use types::{DirectoryRecord, Identity, Profile, Role, Session};

/// Stable user identifier issued by the identity provider
pub type UserId = String;
