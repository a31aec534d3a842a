//! Upstream lean nodes section.
//!
//! Displays the consensus summary, the node table with a selectable row,
//! and one error line per node that reports a failure.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{ConsensusView, SlotView, UpstreamError, UpstreamRow, UpstreamsView};
use crate::ui::status::{render_message, section_block};
use crate::ui::Theme;

/// Render the upstreams section from the upstreams slot.
pub fn render(frame: &mut Frame, app: &App, area: Rect, now_ms: u64) {
    let state = app.dashboard().upstreams().clone();
    let theme = &app.theme;

    let view = SlotView::of(&state);
    let refreshing = matches!(view, SlotView::Ready { refreshing: true, .. });
    let block = section_block(" Upstream Lean Nodes ", refreshing, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let response = match view {
        SlotView::Loading => {
            render_message(frame, inner, "Loading upstreams...", theme.muted);
            return;
        }
        SlotView::Error(message) => {
            let message = format!("Error: {}", message);
            render_message(frame, inner, &message, theme.error_style());
            return;
        }
        SlotView::NoData => {
            render_message(frame, inner, "No data available", theme.muted);
            return;
        }
        SlotView::Ready { data, .. } => data,
    };

    let (consensus, rows, errors) = match UpstreamsView::from_response(response, now_ms) {
        UpstreamsView::NoneConfigured => {
            render_message(frame, inner, "No upstreams configured", theme.muted);
            return;
        }
        UpstreamsView::Table {
            consensus,
            rows,
            errors,
        } => (consensus, rows, errors),
    };

    let error_height = u16::try_from(errors.len()).unwrap_or(u16::MAX);
    let chunks = Layout::vertical([
        Constraint::Length(if consensus.is_some() { 2 } else { 0 }),
        Constraint::Min(3),
        Constraint::Length(error_height),
    ])
    .split(inner);

    if let Some(ref consensus) = consensus {
        render_consensus(frame, chunks[0], theme, consensus);
    }
    render_table(frame, chunks[1], theme, &rows, app.selected_upstream());
    render_errors(frame, chunks[2], theme, &errors);
}

fn render_consensus(frame: &mut Frame, area: Rect, theme: &Theme, consensus: &ConsensusView) {
    let line = Line::from(vec![
        Span::styled(" Total Upstreams: ", theme.muted),
        Span::raw(consensus.total.to_string()),
        Span::styled("  Responding: ", theme.muted),
        Span::raw(consensus.responding.to_string()),
        Span::styled("  Threshold: ", theme.muted),
        Span::raw(consensus.threshold.clone()),
        Span::styled("  Consensus: ", theme.muted),
        Span::styled(consensus.label(), theme.badge_style(consensus.reached)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    rows: &[UpstreamRow],
    selected: usize,
) {
    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Status"),
        Cell::from("Finalized"),
        Cell::from("Justified"),
        Cell::from("Errors"),
        Cell::from("Last Success"),
    ])
    .height(1)
    .style(theme.header);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let name = Line::from(vec![
                Span::raw(row.name.clone()),
                Span::styled(format!(" {}", row.url), theme.muted),
            ]);
            let errors_style = if row.error_count > 0 {
                Style::default().fg(theme.warning)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(name),
                Cell::from(row.status_label()).style(theme.badge_style(row.healthy)),
                Cell::from(row.finalized.clone()),
                Cell::from(row.justified.clone()),
                Cell::from(row.error_count.to_string()).style(errors_style),
                Cell::from(row.last_success.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Min(10),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Min(7),
        Constraint::Fill(1),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .row_highlight_style(theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_errors(frame: &mut Frame, area: Rect, theme: &Theme, errors: &[UpstreamError]) {
    let lines: Vec<Line> = errors
        .iter()
        .map(|e| {
            Line::from(Span::styled(
                format!(" {}: {}", e.name, e.message),
                theme.error_style(),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::config::Intervals;
    use crate::dashboard::Dashboard;
    use crate::source::test_server::{serve, upstreams_json};
    use crate::source::ApiClient;
    use crate::ui::test_support::render_to_text;
    use crate::ui::Theme;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};

    const NOW: u64 = 1_700_000_030_000;

    async fn app_with_upstreams(router: Router) -> App {
        let base = serve(router).await;
        let client = ApiClient::builder().base_url(base).build().unwrap();
        let dashboard = Dashboard::start(client, Intervals::default());
        let (_, mut upstreams, _) = dashboard.subscribe();
        upstreams.wait_for(|s| !s.loading).await.unwrap();
        App::new(dashboard, Theme::dark())
    }

    fn upstreams_router(body: Value) -> Router {
        Router::new().route("/api/upstreams", get(move || async move { Json(body) }))
    }

    #[tokio::test]
    async fn test_table_and_consensus() {
        let app = app_with_upstreams(upstreams_router(upstreams_json())).await;
        let text = render_to_text(&app, 120, 30, NOW);

        assert!(text.contains("Total Upstreams: 2"));
        assert!(text.contains("Responding: 1"));
        assert!(text.contains("Threshold: 50%"));
        assert!(text.contains("Consensus: Reached"));

        assert!(text.contains("zeam_0"));
        assert!(text.contains("Unhealthy"));
        assert!(text.contains("30s ago"));
        assert!(text.contains("Never"));
        assert!(text.contains("N/A"));
        assert!(text.contains("ream_0: connection refused"));

        app.into_dashboard().shutdown().await;
    }

    #[tokio::test]
    async fn test_no_upstreams_configured() {
        let body = json!({ "upstreams": [], "consensus": null });
        let app = app_with_upstreams(upstreams_router(body)).await;
        let text = render_to_text(&app, 100, 30, NOW);

        assert!(text.contains("No upstreams configured"));

        app.into_dashboard().shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_consensus_hides_summary() {
        let mut body = upstreams_json();
        body["consensus"] = Value::Null;
        let app = app_with_upstreams(upstreams_router(body)).await;
        let text = render_to_text(&app, 120, 30, NOW);

        assert!(text.contains("zeam_0"));
        assert!(!text.contains("Total Upstreams"));

        app.into_dashboard().shutdown().await;
    }

    #[tokio::test]
    async fn test_upstreams_error_replaces_table() {
        let router =
            Router::new().route("/api/upstreams", get(|| async { StatusCode::BAD_GATEWAY }));
        let app = app_with_upstreams(router).await;
        let text = render_to_text(&app, 100, 30, NOW);

        assert!(text.contains("Error: HTTP 502: Bad Gateway"));
        assert!(!text.contains("Last Success"));

        app.into_dashboard().shutdown().await;
    }

    #[tokio::test]
    async fn test_loading_placeholder_before_first_response() {
        let router = Router::new().route(
            "/api/upstreams",
            get(|| std::future::pending::<StatusCode>()),
        );
        let base = serve(router).await;
        let client = ApiClient::builder().base_url(base).build().unwrap();
        let app = App::new(Dashboard::start(client, Intervals::default()), Theme::dark());

        let text = render_to_text(&app, 100, 30, NOW);
        assert!(text.contains("Loading upstreams..."));
        assert!(!text.contains("Last Success"));

        app.into_dashboard().shutdown().await;
    }
}
