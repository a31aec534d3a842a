//! Presentation state derived from polled snapshots.
//!
//! This module turns raw provider payloads held in [`PollState`] slots into
//! display-ready models. Nothing here performs I/O or writes to a slot.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of interval strings (e.g., "5s", "500ms")
//! - [`time`]: Elapsed-seconds, "time ago" labels, slot number formatting
//! - [`slot`]: Shared loading/error/data precedence ([`SlotView`])
//! - [`status`]: Status cards ([`StatusSummary`])
//! - [`upstreams`]: Upstream table and consensus summary ([`UpstreamsView`])
//! - [`health`]: Operational/Degraded badge ([`HealthIndicator`])
//!
//! ## Data Flow
//!
//! ```text
//! PollState<T> (one slot per poller)
//!        │
//!        ▼
//! SlotView::of()  ── Loading | Error | NoData
//!        │
//!        └──▶ Ready { data } ──▶ StatusSummary / UpstreamsView / HealthIndicator
//! ```
//!
//! [`PollState`]: crate::source::PollState

pub mod duration;
pub mod health;
pub mod slot;
pub mod status;
pub mod time;
pub mod upstreams;

pub use health::HealthIndicator;
pub use slot::SlotView;
pub use status::{Freshness, StatusSummary};
pub use upstreams::{ConsensusView, UpstreamError, UpstreamRow, UpstreamsView};
