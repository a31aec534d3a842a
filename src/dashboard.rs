//! Composition root: three independent pollers and their state slots.
//!
//! ```text
//!              ┌── Poller "status"    (5s)  ──▶ PollState<Status>
//! ApiClient ───┼── Poller "upstreams" (10s) ──▶ PollState<UpstreamsResponse>
//!              └── Poller "health"    (5s)  ──▶ PollState<HealthReport>
//! ```
//!
//! Each slot is written only by its own poller; readers borrow them for
//! rendering. Shutting the dashboard down stops all three tasks.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

use crate::config::Intervals;
use crate::data::HealthIndicator;
use crate::source::{
    ApiClient, HealthReport, PollState, Poller, PollerHandle, RequestError, Status,
    UpstreamsResponse,
};

/// Running dashboard state.
#[derive(Debug)]
pub struct Dashboard {
    client: ApiClient,
    intervals: Intervals,
    status: PollerHandle<Status>,
    upstreams: PollerHandle<UpstreamsResponse>,
    health: PollerHandle<HealthReport>,
}

impl Dashboard {
    /// Start polling all three endpoints. Must be called inside a tokio runtime.
    pub fn start(client: ApiClient, intervals: Intervals) -> Self {
        info!(base_url = %client.base_url(), "starting dashboard pollers");

        let c = client.clone();
        let status = Poller::builder("status")
            .interval(intervals.status)
            .build()
            .spawn(move || {
                let c = c.clone();
                async move { c.fetch_status().await }
            });

        let c = client.clone();
        let upstreams = Poller::builder("upstreams")
            .interval(intervals.upstreams)
            .build()
            .spawn(move || {
                let c = c.clone();
                async move { c.fetch_upstreams().await }
            });

        let c = client.clone();
        let health = Poller::builder("health")
            .interval(intervals.health)
            .build()
            .spawn(move || {
                let c = c.clone();
                async move { Ok::<_, RequestError>(check_health(&c).await) }
            });

        Self {
            client,
            intervals,
            status,
            upstreams,
            health,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn intervals(&self) -> Intervals {
        self.intervals
    }

    pub fn status(&self) -> watch::Ref<'_, PollState<Status>> {
        self.status.state()
    }

    pub fn upstreams(&self) -> watch::Ref<'_, PollState<UpstreamsResponse>> {
        self.upstreams.state()
    }

    pub fn health(&self) -> watch::Ref<'_, PollState<HealthReport>> {
        self.health.state()
    }

    pub fn health_indicator(&self) -> HealthIndicator {
        HealthIndicator::from_state(&self.health())
    }

    /// Receivers for awaiting slot changes.
    pub fn subscribe(
        &self,
    ) -> (
        watch::Receiver<PollState<Status>>,
        watch::Receiver<PollState<UpstreamsResponse>>,
        watch::Receiver<PollState<HealthReport>>,
    ) {
        (
            self.status.subscribe(),
            self.upstreams.subscribe(),
            self.health.subscribe(),
        )
    }

    /// Trigger an immediate cycle on every poller.
    pub fn refresh_all(&self) {
        self.status.refresh();
        self.upstreams.refresh();
        self.health.refresh();
    }

    /// Copy of the data currently held in the slots.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let status = self.status().clone();
        let upstreams = self.upstreams().clone();

        let mut errors = BTreeMap::new();
        if let Some(e) = status.error {
            errors.insert("status".to_string(), e);
        }
        if let Some(e) = upstreams.error {
            errors.insert("upstreams".to_string(), e);
        }

        DashboardSnapshot {
            status: status.data,
            upstreams: upstreams.data,
            healthy: self.health_indicator().is_operational(),
            errors,
        }
    }

    /// Stop all pollers and wait for them to exit.
    pub async fn shutdown(self) {
        tokio::join!(
            self.status.shutdown(),
            self.upstreams.shutdown(),
            self.health.shutdown(),
        );
        info!("dashboard pollers stopped");
    }
}

/// Health probe for the health poller: a request that never completes counts
/// as unhealthy instead of failing the cycle.
async fn check_health(client: &ApiClient) -> HealthReport {
    client
        .fetch_health()
        .await
        .unwrap_or_else(|e| HealthReport::unreachable(e.to_string()))
}

/// Point-in-time copy of all three resources, used for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub status: Option<Status>,
    pub upstreams: Option<UpstreamsResponse>,
    pub healthy: bool,
    /// Failure message per resource that failed.
    pub errors: BTreeMap<String, String>,
}

impl DashboardSnapshot {
    /// Fetch every resource once, concurrently.
    pub async fn fetch(client: &ApiClient) -> Self {
        let (status, upstreams, health) = tokio::join!(
            client.fetch_status(),
            client.fetch_upstreams(),
            check_health(client),
        );

        let mut errors = BTreeMap::new();
        let status = status
            .map_err(|e| errors.insert("status".to_string(), e.to_string()))
            .ok();
        let upstreams = upstreams
            .map_err(|e| errors.insert("upstreams".to_string(), e.to_string()))
            .ok();

        Self {
            status,
            upstreams,
            healthy: health.healthy,
            errors,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the pretty JSON document to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
