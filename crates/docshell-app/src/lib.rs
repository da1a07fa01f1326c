//! docshell - Headless driver
//!
//! Runs the shell against a real HTTP origin with in-memory page and
//! history, walks a list of paths and reports where it ended up.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

use docshell_core::{
    HttpFetcher, MemoryNavigationHost, MemoryPage, MemoryServiceWorkerRegistry, Navigated,
    NavigationHost, PendingNavigation, RenderReadiness, Shell, ShellConfig, ShellHosts,
    StaticRenderer,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "docshell", version, about = "Drive the document shell headlessly")]
pub struct Args {
    /// Origin serving the shell and its documents
    #[arg(long)]
    pub origin: Url,

    /// Path the shell page is loaded at
    #[arg(long, default_value = "/pwa/")]
    pub start: String,

    /// JSON shell configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to navigate to, in order; may be repeated
    #[arg(long = "visit")]
    pub visits: Vec<String>,

    /// Press back once after the visits
    #[arg(long)]
    pub back: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub location: String,
    pub address_bar: String,
    pub history: Vec<String>,
    pub page_title: String,
    pub mounted: Option<String>,
}

pub async fn run(args: Args) -> anyhow::Result<Report> {
    let config = match &args.config {
        Some(path) => ShellConfig::from_json_file(path)?,
        None => ShellConfig::default(),
    };

    let start = args
        .origin
        .join(&args.start)
        .with_context(|| format!("invalid start path {}", args.start))?;

    let navigation = Arc::new(MemoryNavigationHost::new(start));
    let page = MemoryPage::new();
    let readiness = RenderReadiness::new();

    let (shell, initial) = Shell::launch(
        &config,
        ShellHosts {
            navigation: navigation.clone(),
            fetcher: Arc::new(HttpFetcher::new(&config.user_agent)?),
            page: page.clone(),
            readiness: readiness.clone(),
            service_workers: Some(Arc::new(MemoryServiceWorkerRegistry::new())),
        },
    )?;

    // The rendering runtime finishes loading after the shell is up.
    readiness.signal_ready(Arc::new(StaticRenderer));

    if let Some(initial) = initial {
        settle(initial).await?;
    }

    for path in &args.visits {
        settle(shell.navigate_to(path))
            .await
            .with_context(|| format!("navigation to {} failed", path))?;
    }

    if args.back && navigation.back() {
        if let Some(pending) = shell.handle_pop_state() {
            settle(pending).await?;
        }
    }

    Ok(Report {
        location: shell.current_location(),
        address_bar: navigation.location().to_string(),
        history: navigation.entries().iter().map(Url::to_string).collect(),
        page_title: page.title(),
        mounted: shell.viewer().mounted().map(|m| m.url.to_string()),
    })
}

/// Wait for a navigation and, if it mounted something, for the attachment
async fn settle(pending: PendingNavigation) -> anyhow::Result<()> {
    match pending.await? {
        Navigated::Cleared => {}
        Navigated::Shown(handle) => {
            let mounted = handle.wait().await?;
            tracing::info!(url = %mounted.url, title = ?mounted.title, "Mounted");
        }
    }
    Ok(())
}
