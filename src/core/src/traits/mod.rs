//! Collaborator traits consumed by the session store

pub mod identity;
pub mod directory;

pub use directory::DirectoryService;
pub use identity::{IdentityEvent, IdentityEventStream, IdentityProvider};
