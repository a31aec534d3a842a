//! Derived view of the provider's checkpoint status.

use super::time::elapsed_secs;
use crate::source::Status;

/// Freshness badge, taken verbatim from the server's `stale` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

impl Freshness {
    pub fn label(&self) -> &'static str {
        match self {
            Freshness::Fresh => "Fresh",
            Freshness::Stale => "Stale",
        }
    }
}

/// Display-ready status cards for one [`Status`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub finalized_slot: u64,
    pub justified_slot: u64,
    pub freshness: Freshness,
    /// Whole seconds since the provider last refreshed.
    pub updated_secs_ago: u64,
    /// Whole seconds since the provider last refreshed successfully.
    pub success_secs_ago: u64,
    pub error_count: u64,
    /// Shown in a dedicated panel below the cards when present.
    pub last_error: Option<String>,
}

impl StatusSummary {
    pub fn from_status(status: &Status, now_ms: u64) -> Self {
        Self {
            finalized_slot: status.finalized_slot,
            justified_slot: status.justified_slot,
            freshness: if status.stale {
                Freshness::Stale
            } else {
                Freshness::Fresh
            },
            updated_secs_ago: elapsed_secs(status.last_updated_ms, now_ms),
            success_secs_ago: elapsed_secs(status.last_success_ms, now_ms),
            error_count: status.error_count,
            last_error: status.last_error.clone().filter(|e| !e.is_empty()),
        }
    }

    /// Whether the error panel should be rendered.
    pub fn has_error_panel(&self) -> bool {
        self.last_error.is_some()
    }
}
