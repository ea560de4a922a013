//! Access engine
//!
//! Pure decision functions (route admission, landing dispatch) plus the
//! admission wrapper that applies them, and metrics for both.
//!
//! ```text
//! IdentityProvider ─▶ SessionStore ─▶ Session snapshot ─┬─▶ decide()  ─▶ Gate::protect ─▶ mount / redirect / banned / loading
//!                          ▲                              └─▶ resolve_landing()
//!                     DirectoryService                                     │
//!                                                                   [Metrics]
//! ```

pub mod decision;
pub mod landing;
pub mod admission;
pub mod metrics;

pub use admission::{protect, protect_async, Admission, Gate, SuspensionView};
pub use decision::{decide, Decision};
pub use landing::{resolve_landing, LandingView};
pub use metrics::{AccessMetrics, MetricsCollector};
