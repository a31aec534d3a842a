//! Two-state provider health badge.

use crate::source::{HealthReport, PollState};

/// Health badge shown in the header.
///
/// Fail-closed: only a completed check that returned healthy is
/// `Operational`. Anything else, including no result yet, is `Degraded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthIndicator {
    Operational,
    Degraded,
}

impl HealthIndicator {
    pub fn from_state(state: &PollState<HealthReport>) -> Self {
        if state.error.is_some() {
            return HealthIndicator::Degraded;
        }
        match state.data {
            Some(ref report) if report.healthy => HealthIndicator::Operational,
            _ => HealthIndicator::Degraded,
        }
    }

    pub fn is_operational(&self) -> bool {
        matches!(self, HealthIndicator::Operational)
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthIndicator::Operational => "Operational",
            HealthIndicator::Degraded => "Degraded",
        }
    }
}
