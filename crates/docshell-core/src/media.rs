//! Media query evaluation workaround
//!
//! Some IE builds evaluate `matchMedia` against a stale viewport right after
//! load. A query pinned to the current inner width must match; until it
//! does, media-dependent layout is wrong. [`check_and_fix`] polls until the
//! browser catches up or gives up after a bounded wait.

use futures_util::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const MAX_WAIT: Duration = Duration::from_millis(2000);

/// The slice of a browser window the workaround needs
pub trait MediaWindow: Send + Sync {
    fn inner_width(&self) -> u32;

    fn match_media(&self, query: &str) -> Result<bool, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ie,
    Other,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("Trident") || user_agent.contains("MSIE") {
            Platform::Ie
        } else {
            Platform::Other
        }
    }
}

/// Returns a future that resolves once media queries evaluate correctly, or
/// `None` when there is nothing to wait for.
pub fn check_and_fix(
    window: Arc<dyn MediaWindow>,
    platform: Platform,
) -> Option<BoxFuture<'static, ()>> {
    if platform != Platform::Ie || media_matches(window.as_ref()) {
        return None;
    }

    Some(
        async move {
            let end = Instant::now() + MAX_WAIT;
            let mut ticks = time::interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
            loop {
                ticks.tick().await;
                let matches = media_matches(window.as_ref());
                if matches || Instant::now() > end {
                    if !matches {
                        tracing::error!("IE media never resolved");
                    }
                    return;
                }
            }
        }
        .boxed(),
    )
}

fn media_matches(window: &dyn MediaWindow) -> bool {
    let width = window.inner_width();
    let query = format!("(min-width: {}px) AND (max-width: {}px)", width, width);
    match window.match_media(&query) {
        Ok(matches) => matches,
        Err(e) => {
            // A broken API is not worth polling.
            tracing::error!(error = %e, "IE matchMedia failed");
            true
        }
    }
}
