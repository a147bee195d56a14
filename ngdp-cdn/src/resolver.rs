//! Host resolver: picks the lowest-latency CDN edge host from a candidate list.
//!
//! Candidates come from a server descriptor's whitespace-separated `Hosts`
//! field. Every candidate is probed concurrently with a lightweight HTTP HEAD;
//! all probes run to completion (success or failure) and the fastest
//! successful one wins. Resolution can be cancelled from another task via a
//! [`CancellationToken`]; in-flight probes are simply dropped and their
//! outcomes discarded.

use crate::{Error, Result};
use futures_util::future::join_all;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Upper bound on how long a single probe is allowed to take.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Cooperative cancellation signal shared between a resolver caller and its
/// in-flight probes.
#[derive(Clone)]
pub struct CancellationToken {
    tx: watch::Sender<bool>,
}

impl CancellationToken {
    /// Creates a fresh, not-yet-cancelled token.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// `true` if [`Self::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of probing a single host.
struct ProbeResult {
    host: String,
    latency: Duration,
}

/// Probes `host` with an HTTP HEAD request and reports the round-trip time.
async fn probe_host(client: &reqwest::Client, host: &str) -> Option<ProbeResult> {
    let url = format!("http://{host}/");
    let start = Instant::now();

    let result = tokio::time::timeout(PROBE_TIMEOUT, client.head(&url).send()).await;

    match result {
        Ok(Ok(_response)) => Some(ProbeResult {
            host: host.to_string(),
            latency: start.elapsed(),
        }),
        Ok(Err(e)) => {
            debug!(host, error = %e, "host probe failed");
            None
        }
        Err(_) => {
            debug!(host, "host probe timed out");
            None
        }
    }
}

/// Selects the lowest-latency host out of `hosts`, or fails if every probe
/// fails or the token is cancelled first.
///
/// `hosts` is the whitespace-separated list already split by the caller
/// (typically the server descriptor's `Hosts` field).
pub async fn resolve_host(
    client: &reqwest::Client,
    hosts: &[String],
    token: &CancellationToken,
) -> Result<String> {
    if hosts.is_empty() {
        return Err(Error::invalid_host("no candidate hosts supplied"));
    }

    let mut cancelled = token.subscribe();
    if *cancelled.borrow() {
        return Err(Error::Cancelled);
    }
    let probes = hosts.iter().map(|host| probe_host(client, host));

    let results = tokio::select! {
        results = join_all(probes) => results,
        _ = cancelled.changed() => {
            warn!("host resolution cancelled while probes were in flight");
            return Err(Error::Cancelled);
        }
    };

    results
        .into_iter()
        .flatten()
        .min_by_key(|r| r.latency)
        .map(|winner| {
            debug!(host = %winner.host, latency_ms = winner.latency.as_millis(), "selected CDN host");
            winner.host
        })
        .ok_or(Error::AllHostsFailed { count: hosts.len() })
}
