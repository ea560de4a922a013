//! # Session Probe
//!
//! Runs one session cycle against a live VolunteerVerse backend and prints
//! the resolved session plus the navigator outcome for each requested path.
//!
//! ## Configuration
//!
//! - `--config` / `VOLUNTEERVERSE_CONFIG` - optional TOML file
//! - `--token` / `VOLUNTEERVERSE_ID_TOKEN` - bearer token for the directory
//! - `RUST_LOG` - log filter (default: config `log_level`)

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use volunteerverse_access::{
    routes, AccessConfig, HttpDirectory, HttpNoticeSource, MetricsCollector, NavOutcome,
    NoticePoller, SessionStore, StaticIdentityProvider,
};
use volunteerverse_core::{Identity, RoleMenu, Session};

/// VolunteerVerse session probe
#[derive(Parser)]
#[command(name = "session-probe")]
#[command(about = "Resolve a VolunteerVerse session and check route access")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "VOLUNTEERVERSE_CONFIG")]
    config: Option<PathBuf>,

    /// ID token presented to the directory
    #[arg(short, long, env = "VOLUNTEERVERSE_ID_TOKEN")]
    token: String,

    /// Principal uid the token belongs to
    #[arg(long, default_value = "probe")]
    uid: String,

    /// Principal email, shown on the suspension view
    #[arg(long)]
    email: Option<String>,

    /// Paths to resolve (defaults to the role menu)
    #[arg(short, long = "path")]
    paths: Vec<String>,

    /// Also check the unread-notices badge
    #[arg(long)]
    notices: bool,

    /// Print collected metrics in Prometheus text format
    #[arg(long)]
    metrics: bool,

    /// Seconds to wait for the session to resolve
    #[arg(long, default_value_t = 15)]
    wait_secs: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathReport {
    path: String,
    outcome: NavOutcome,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProbeReport {
    session: Session,
    routes: Vec<PathReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_unread_notices: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AccessConfig::load(cli.config.as_deref()).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!(
        "Starting session probe v{} against {}",
        volunteerverse_access::VERSION,
        config.api_base
    );

    let mut identity = Identity::new(cli.uid);
    if let Some(email) = cli.email {
        identity = identity.with_email(email);
    }

    let metrics = Arc::new(MetricsCollector::new());
    let provider = Arc::new(StaticIdentityProvider::signed_in(identity, cli.token));
    let directory = Arc::new(HttpDirectory::new(&config)?);
    let store = SessionStore::with_metrics(provider, directory, Arc::clone(&metrics));

    let pump = store.attach();
    let resolved = tokio::time::timeout(
        Duration::from_secs(cli.wait_secs),
        store.subscribe().resolved(),
    )
    .await
    .context("timed out waiting for the session to resolve")?;
    pump.shutdown();

    let session = resolved.context("session store closed before resolving")?;

    let paths = if cli.paths.is_empty() {
        default_paths(&session)
    } else {
        cli.paths
    };

    let routes = paths
        .into_iter()
        .map(|path| PathReport {
            outcome: routes::resolve(&path, &session),
            path,
        })
        .collect();

    let has_unread_notices = if cli.notices {
        let source = Arc::new(HttpNoticeSource::new(&config)?);
        let poller = NoticePoller::new(source, store.subscribe(), config.notice_poll_interval());
        Some(poller.check().await)
    } else {
        None
    };

    let report = ProbeReport {
        session,
        routes,
        has_unread_notices,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if cli.metrics {
        eprintln!("{}", metrics.export_prometheus().await);
    }

    Ok(())
}

/// Root plus every menu entry for the resolved role
fn default_paths(session: &Session) -> Vec<String> {
    let mut paths = vec![volunteerverse_core::paths::ROOT.to_string()];
    match session.role().and_then(RoleMenu::for_role) {
        Some(menu) => paths.extend(menu.items().iter().map(|item| item.path.to_string())),
        None => warn!("No recognized role resolved; only checking the root route"),
    }
    paths
}
