//! Session state: the store, its read-only subscriptions, and a fixed
//! identity provider for tools and tests

pub mod store;
pub mod subscription;
pub mod static_provider;

pub use static_provider::StaticIdentityProvider;
pub use store::{LookupOutcome, SessionPump, SessionStore};
pub use subscription::SessionSubscription;
