//! # leanpoint-dash
//!
//! A terminal dashboard and library for monitoring a Leanpoint checkpoint
//! sync provider.
//!
//! Leanpoint polls several lean consensus nodes and serves the finalized
//! checkpoint they agree on. This crate keeps a live view of that provider:
//! its own checkpoint status, the per-upstream table with the consensus
//! summary, and its health endpoint. Each resource is refreshed by an
//! independent background poller on its own cadence.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (views)  │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌───────────┐   ┌─────────┐                                │
//! │  │ dashboard │──▶│ source  │◀── ApiClient + 3 × Poller      │
//! │  │  (slots)  │   │ (input) │                                │
//! │  └───────────┘   └─────────┘                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: HTTP client for the provider API, wire types, and the
//!   generic [`Poller`] that keeps one [`PollState`] slot current
//! - **[`dashboard`]**: Starts the status, upstreams and health pollers and
//!   exposes their slots
//! - **[`data`]**: Display models derived from the slots (status cards,
//!   upstream rows, consensus summary, health badge)
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`app`]** / **[`events`]**: Interactive state and key handling
//! - **[`config`]**: Layered settings (defaults, file, environment, flags)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a local provider
//! leanpoint-dash
//!
//! # Watch a remote provider with a faster status cadence
//! leanpoint-dash --url http://checkpoint.example:5555 --status-interval 2s
//!
//! # Fetch everything once and write JSON
//! leanpoint-dash --export state.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use leanpoint_dash::{ApiClient, Dashboard, Intervals};
//!
//! # tokio_test::block_on(async {
//! let client = ApiClient::builder()
//!     .base_url("http://localhost:5555")
//!     .build()
//!     .unwrap();
//! let dashboard = Dashboard::start(client, Intervals::default());
//!
//! let (mut status, _, _) = dashboard.subscribe();
//! status.wait_for(|s| !s.loading).await.unwrap();
//! println!("{:?}", dashboard.status().data);
//!
//! dashboard.shutdown().await;
//! # });
//! ```
//!
//! ### Polling anything
//!
//! ```
//! use std::time::Duration;
//! use leanpoint_dash::{Poller, RequestError};
//!
//! # tokio_test::block_on(async {
//! let handle = Poller::builder("answer")
//!     .interval(Duration::from_secs(1))
//!     .build()
//!     .spawn(|| async { Ok::<_, RequestError>(42u64) });
//!
//! let mut rx = handle.subscribe();
//! rx.wait_for(|s| s.data.is_some()).await.unwrap();
//! assert_eq!(handle.state().data, Some(42));
//! handle.shutdown().await;
//! # });
//! ```

pub mod app;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{Intervals, Overrides, Settings};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use data::{HealthIndicator, SlotView, StatusSummary, UpstreamsView};
pub use source::{
    ApiClient, ApiClientBuilder, ConsensusSummary, HealthReport, PollState, Poller,
    PollerBuilder, PollerHandle, RequestError, Status, Upstream, UpstreamsResponse,
};
pub use ui::Theme;
