//! Wire types for the provider's read-only HTTP API.
//!
//! These match the JSON produced by the Leanpoint service on `/status` and
//! `/api/upstreams`. The dashboard never mutates them: every poll cycle
//! replaces the held value wholesale.

use serde::{Deserialize, Serialize};

/// The provider's own aggregated checkpoint view (`GET /status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Latest justified slot agreed by the upstream majority.
    pub justified_slot: u64,
    /// Latest finalized slot agreed by the upstream majority.
    ///
    /// Expected to be `<= justified_slot`; not enforced here.
    pub finalized_slot: u64,
    /// Unix time (ms) of the provider's last refresh attempt.
    pub last_updated_ms: u64,
    /// Unix time (ms) of the provider's last successful refresh.
    pub last_success_ms: u64,
    /// Server-declared staleness flag.
    pub stale: bool,
    /// Number of refresh errors seen by the provider.
    pub error_count: u64,
    /// Most recent refresh error, if any.
    #[serde(default)]
    pub last_error: Option<String>,
}

/// One monitored lean node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upstream {
    /// Unique display name.
    pub name: String,
    pub url: String,
    pub path: String,
    pub healthy: bool,
    #[serde(default)]
    pub last_success_ms: Option<u64>,
    pub error_count: u64,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub last_justified_slot: Option<u64>,
    #[serde(default)]
    pub last_finalized_slot: Option<u64>,
}

/// Consensus verdict computed by the provider across all upstreams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusSummary {
    pub total_upstreams: u64,
    pub responding_upstreams: u64,
    /// Percentage of responding upstreams required to agree.
    pub consensus_threshold: f64,
    pub has_consensus: bool,
}

/// Response body of `GET /api/upstreams`.
///
/// Upstream order is server-supplied and preserved for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamsResponse {
    pub upstreams: Vec<Upstream>,
    #[serde(default)]
    pub consensus: Option<ConsensusSummary>,
}

/// Result of probing `GET /healthz`.
///
/// Only the HTTP status matters; the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub healthy: bool,
    /// Why the check was considered unhealthy, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HealthReport {
    /// A report derived from a received HTTP response.
    pub fn from_response(healthy: bool) -> Self {
        Self {
            healthy,
            reason: None,
        }
    }

    /// A report for a check whose request never completed.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            healthy: false,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_status() {
        let json = r#"{
            "justified_slot": 1234,
            "finalized_slot": 1200,
            "last_updated_ms": 1700000000000,
            "last_success_ms": 1699999990000,
            "stale": false,
            "error_count": 2,
            "last_error": null
        }"#;

        let status: Status = serde_json::from_str(json).unwrap();
        assert_eq!(status.justified_slot, 1234);
        assert_eq!(status.finalized_slot, 1200);
        assert!(!status.stale);
        assert_eq!(status.error_count, 2);
        assert!(status.last_error.is_none());
    }

    #[test]
    fn test_deserialize_upstreams_with_nulls() {
        let json = r#"{
            "upstreams": [
                {
                    "name": "zeam_0",
                    "url": "http://127.0.0.1:8081",
                    "path": "/lean/v0/states/finalized",
                    "healthy": true,
                    "last_success_ms": 1700000000000,
                    "error_count": 0,
                    "last_error": null,
                    "last_justified_slot": 64,
                    "last_finalized_slot": 32
                },
                {
                    "name": "ream_0",
                    "url": "http://127.0.0.1:8082",
                    "path": "/lean/v0/states/finalized",
                    "healthy": false,
                    "last_success_ms": null,
                    "error_count": 7,
                    "last_error": "connection refused",
                    "last_justified_slot": null,
                    "last_finalized_slot": null
                }
            ],
            "consensus": {
                "total_upstreams": 2,
                "responding_upstreams": 1,
                "consensus_threshold": 50,
                "has_consensus": false
            }
        }"#;

        let response: UpstreamsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.upstreams.len(), 2);
        assert_eq!(response.upstreams[0].name, "zeam_0");
        assert_eq!(response.upstreams[0].last_finalized_slot, Some(32));
        assert_eq!(response.upstreams[1].last_success_ms, None);
        assert_eq!(
            response.upstreams[1].last_error.as_deref(),
            Some("connection refused")
        );

        let consensus = response.consensus.unwrap();
        assert_eq!(consensus.total_upstreams, 2);
        assert_eq!(consensus.consensus_threshold, 50.0);
        assert!(!consensus.has_consensus);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{ "justified_slot": 1, "stale": false }"#;
        assert!(serde_json::from_str::<Status>(json).is_err());
    }

    #[test]
    fn test_health_report_constructors() {
        assert!(HealthReport::from_response(true).healthy);
        let down = HealthReport::unreachable("dns failure");
        assert!(!down.healthy);
        assert_eq!(down.reason.as_deref(), Some("dns failure"));
    }
}
