//! Derived view of the upstream node table and consensus summary.

use super::time::{format_ago, format_optional_slot};
use crate::source::{ConsensusSummary, Upstream, UpstreamsResponse};

/// One rendered table row, in server-supplied order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRow {
    pub name: String,
    pub url: String,
    pub healthy: bool,
    pub finalized: String,
    pub justified: String,
    pub error_count: u64,
    pub last_success: String,
}

impl UpstreamRow {
    pub fn from_upstream(upstream: &Upstream, now_ms: u64) -> Self {
        Self {
            name: upstream.name.clone(),
            url: upstream.url.clone(),
            healthy: upstream.healthy,
            finalized: format_optional_slot(upstream.last_finalized_slot),
            justified: format_optional_slot(upstream.last_justified_slot),
            error_count: upstream.error_count,
            last_success: format_ago(upstream.last_success_ms, now_ms),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.healthy {
            "Healthy"
        } else {
            "Unhealthy"
        }
    }
}

/// Error panel for one upstream reporting a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    pub name: String,
    pub message: String,
}

/// Consensus summary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusView {
    pub total: u64,
    pub responding: u64,
    pub threshold: String,
    pub reached: bool,
}

impl ConsensusView {
    pub fn from_summary(summary: &ConsensusSummary) -> Self {
        Self {
            total: summary.total_upstreams,
            responding: summary.responding_upstreams,
            threshold: format_percent(summary.consensus_threshold),
            reached: summary.has_consensus,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.reached {
            "Reached"
        } else {
            "Not Reached"
        }
    }
}

/// Everything the upstreams section renders for one response.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamsView {
    /// The provider reports no upstreams at all.
    NoneConfigured,
    Table {
        consensus: Option<ConsensusView>,
        rows: Vec<UpstreamRow>,
        errors: Vec<UpstreamError>,
    },
}

impl UpstreamsView {
    pub fn from_response(response: &UpstreamsResponse, now_ms: u64) -> Self {
        if response.upstreams.is_empty() {
            return UpstreamsView::NoneConfigured;
        }

        let rows = response
            .upstreams
            .iter()
            .map(|u| UpstreamRow::from_upstream(u, now_ms))
            .collect();

        let errors = response
            .upstreams
            .iter()
            .filter_map(|u| match u.last_error.as_deref() {
                Some(message) if !message.is_empty() => Some(UpstreamError {
                    name: u.name.clone(),
                    message: message.to_string(),
                }),
                _ => None,
            })
            .collect();

        UpstreamsView::Table {
            consensus: response.consensus.as_ref().map(ConsensusView::from_summary),
            rows,
            errors,
        }
    }
}

/// Threshold percentage without a trailing `.0` for whole numbers.
fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}%", value)
    } else {
        format!("{}%", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000_000;

    fn upstream(name: &str) -> Upstream {
        Upstream {
            name: name.to_string(),
            url: format!("http://{}.local:5052", name),
            path: "/lean/v0/states/finalized".to_string(),
            healthy: true,
            last_success_ms: Some(NOW - 30_000),
            error_count: 0,
            last_error: None,
            last_justified_slot: Some(2_048),
            last_finalized_slot: Some(1_984),
        }
    }

    fn response(upstreams: Vec<Upstream>) -> UpstreamsResponse {
        UpstreamsResponse {
            upstreams,
            consensus: Some(ConsensusSummary {
                total_upstreams: 5,
                responding_upstreams: 3,
                consensus_threshold: 50.0,
                has_consensus: true,
            }),
        }
    }

    #[test]
    fn test_empty_list_is_distinct_state() {
        let view = UpstreamsView::from_response(&response(vec![]), NOW);
        assert_eq!(view, UpstreamsView::NoneConfigured);
    }

    #[test]
    fn test_consensus_summary_values() {
        let view = UpstreamsView::from_response(&response(vec![upstream("a")]), NOW);
        let UpstreamsView::Table { consensus, .. } = view else {
            panic!("expected table");
        };
        let consensus = consensus.unwrap();
        assert_eq!(consensus.responding, 3);
        assert_eq!(consensus.total, 5);
        assert_eq!(consensus.threshold, "50%");
        assert_eq!(consensus.label(), "Reached");
    }

    #[test]
    fn test_consensus_not_reached_and_fractional_threshold() {
        let summary = ConsensusSummary {
            total_upstreams: 3,
            responding_upstreams: 1,
            consensus_threshold: 66.7,
            has_consensus: false,
        };
        let view = ConsensusView::from_summary(&summary);
        assert_eq!(view.threshold, "66.7%");
        assert_eq!(view.label(), "Not Reached");
    }

    #[test]
    fn test_missing_consensus_is_omitted() {
        let mut r = response(vec![upstream("a")]);
        r.consensus = None;
        let UpstreamsView::Table { consensus, .. } = UpstreamsView::from_response(&r, NOW) else {
            panic!("expected table");
        };
        assert!(consensus.is_none());
    }

    #[test]
    fn test_rows_preserve_server_order_and_format() {
        let mut b = upstream("beta");
        b.healthy = false;
        b.last_success_ms = None;
        b.last_finalized_slot = None;
        b.last_justified_slot = None;

        let view = UpstreamsView::from_response(&response(vec![upstream("zulu"), b]), NOW);
        let UpstreamsView::Table { rows, .. } = view else {
            panic!("expected table");
        };

        assert_eq!(rows[0].name, "zulu");
        assert_eq!(rows[0].status_label(), "Healthy");
        assert_eq!(rows[0].finalized, "1,984");
        assert_eq!(rows[0].justified, "2,048");
        assert_eq!(rows[0].last_success, "30s ago");

        assert_eq!(rows[1].name, "beta");
        assert_eq!(rows[1].status_label(), "Unhealthy");
        assert_eq!(rows[1].finalized, "N/A");
        assert_eq!(rows[1].justified, "N/A");
        assert_eq!(rows[1].last_success, "Never");
    }

    #[test]
    fn test_one_error_panel_per_failing_upstream() {
        let mut failing = upstream("ream_0");
        failing.last_error = Some("connection refused".to_string());

        let view =
            UpstreamsView::from_response(&response(vec![upstream("zeam_0"), failing]), NOW);
        let UpstreamsView::Table { errors, .. } = view else {
            panic!("expected table");
        };

        assert_eq!(
            errors,
            vec![UpstreamError {
                name: "ream_0".to_string(),
                message: "connection refused".to_string(),
            }]
        );
    }

    #[test]
    fn test_error_panels_follow_table_order() {
        let mut a = upstream("a");
        a.last_error = Some("first".to_string());
        let mut c = upstream("c");
        c.last_error = Some("third".to_string());
        let mut b = upstream("b");
        b.last_error = Some(String::new());

        let view = UpstreamsView::from_response(&response(vec![c, b, a]), NOW);
        let UpstreamsView::Table { errors, .. } = view else {
            panic!("expected table");
        };
        let names: Vec<&str> = errors.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
    }
}
