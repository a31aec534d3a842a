//! Data acquisition from the provider's HTTP API.
//!
//! This module provides the HTTP accessor ([`ApiClient`]), the wire types it
//! decodes into, and the [`Poller`] that runs periodic fetches into
//! independent [`PollState`] slots.

mod client;
mod error;
mod poller;
mod snapshot;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{
    ApiClient, ApiClientBuilder, DEFAULT_BASE_URL, HEALTH_PATH, STATUS_PATH, UPSTREAMS_PATH,
};
pub use error::RequestError;
pub use poller::{PollState, Poller, PollerBuilder, PollerHandle, UNKNOWN_ERROR};
pub use snapshot::{ConsensusSummary, HealthReport, Status, Upstream, UpstreamsResponse};
