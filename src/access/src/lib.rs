//! # VolunteerVerse Access Layer
//!
//! Client-side session and access control for VolunteerVerse.
//!
//! ## Features
//!
//! - **Session store** combining the identity provider's principal with the
//!   directory's role and ban flag, published as immutable snapshots
//! - **Stale-response guard** so a slow lookup for a previous principal never
//!   overwrites the current session
//! - **Access resolver** deciding wait / redirect / banned / admit for a route
//! - **Route admission** that mounts protected content only when admitted
//! - **Navigator** over the full application route table and role menus
//! - **Notice badge poller** tracking unread notices for the signed-in user
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use volunteerverse_access::{
//!     AccessConfig, Gate, HttpDirectory, SessionStore, StaticIdentityProvider,
//! };
//! use volunteerverse_core::{Identity, Role};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AccessConfig::load(None)?;
//!     let provider = StaticIdentityProvider::signed_in(Identity::new("uid-1"), "id-token");
//!
//!     let store = SessionStore::new(Arc::new(provider), Arc::new(HttpDirectory::new(&config)?));
//!     let _pump = store.attach();
//!     store.subscribe().resolved().await;
//!
//!     let gate = Gate::new(&store);
//!     let screen = gate
//!         .protect(Some(&[Role::Organizer]), |session| format!("Welcome {:?}", session.username()))
//!         .await;
//!
//!     if let Some(content) = screen.admitted() {
//!         println!("{}", content);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod notices;
pub mod routes;
pub mod session;

pub use client::HttpDirectory;
pub use config::{AccessConfig, ApiBase};
pub use engine::{
    decide, protect, protect_async, resolve_landing, AccessMetrics, Admission, Decision, Gate,
    LandingView, MetricsCollector, SuspensionView,
};
pub use error::{AccessError, Result};
pub use notices::{HttpNoticeSource, NoticeItem, NoticePoller, NoticeSource};
pub use routes::NavOutcome;
pub use session::{
    LookupOutcome, SessionPump, SessionStore, SessionSubscription, StaticIdentityProvider,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
