//! Shared types for the VolunteerVerse client

pub mod role;
pub mod session;
pub mod directory;

// Re-export commonly used types
pub use directory::DirectoryRecord;
pub use role::Role;
pub use session::{Identity, Profile, Session};
