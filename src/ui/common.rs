//! Common UI components shared across sections.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_interval;
use crate::source::{HEALTH_PATH, STATUS_PATH};

/// Render the header bar with the provider health badge.
///
/// Displays: title, provider base URL, health indicator.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = app.dashboard();
    let health = dashboard.health_indicator();

    let line = Line::from(vec![
        Span::styled(
            " ⚡ LEANPOINT ",
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(dashboard.base_url().to_string(), app.theme.muted),
        Span::raw(" │ "),
        Span::styled(format!("● {}", health.label()), app.theme.health_style(health)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows the poll intervals and available controls, or a temporary
/// status message while one is active.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let intervals = app.dashboard().intervals();
    let status = format!(
        " Polling status {} · upstreams {} · health {} | ↑↓:select r:refresh e:export ?:help q:quit",
        format_interval(intervals.status),
        format_interval(intervals.upstreams),
        format_interval(intervals.health),
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts and quick-start hints.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let base = app.dashboard().base_url();

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  ↑/↓ j/k     Select upstream"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  r           Refresh now"),
        Line::from("  e           Export to JSON"),
        Line::from("  ?           Toggle help"),
        Line::from("  q/Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(" Quick Start", bold)]),
        Line::from(format!("  curl {}{}", base, STATUS_PATH)),
        Line::from(format!("  curl {}/metrics", base)),
        Line::from(format!("  curl {}{}", base, HEALTH_PATH)),
        Line::from(""),
        Line::from(vec![Span::styled(" About", bold)]),
        Line::from("  Leanpoint polls multiple lean consensus nodes"),
        Line::from("  and serves the finalized checkpoint agreed on"),
        Line::from("  by at least 50% of responding upstreams."),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    // Center the help overlay, shrinking to fit small terminals
    let help_width = 56u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Intervals;
    use crate::dashboard::Dashboard;
    use crate::source::test_server::serve;
    use crate::source::ApiClient;
    use crate::ui::test_support::render_to_text;
    use crate::ui::Theme;
    use axum::{http::StatusCode, routing::get, Router};
    use std::time::Duration;

    async fn app_with_health(code: StatusCode) -> App {
        let router = Router::new().route("/healthz", get(move || async move { code }));
        let base = serve(router).await;
        let client = ApiClient::builder().base_url(base).build().unwrap();
        let intervals = Intervals {
            status: Duration::from_millis(250),
            upstreams: Duration::from_secs(10),
            health: Duration::from_secs(5),
        };
        let dashboard = Dashboard::start(client, intervals);
        let (_, _, mut health) = dashboard.subscribe();
        health.wait_for(|s| s.data.is_some()).await.unwrap();
        App::new(dashboard, Theme::dark())
    }

    #[tokio::test]
    async fn test_header_shows_operational() {
        let app = app_with_health(StatusCode::OK).await;
        let text = render_to_text(&app, 100, 30, 0);
        let header = text.lines().next().unwrap();

        assert!(header.contains("LEANPOINT"));
        assert!(header.contains(app.dashboard().base_url()));
        assert!(header.contains("● Operational"));

        app.into_dashboard().shutdown().await;
    }

    #[tokio::test]
    async fn test_header_shows_degraded() {
        let app = app_with_health(StatusCode::SERVICE_UNAVAILABLE).await;
        let text = render_to_text(&app, 100, 30, 0);
        assert!(text.lines().next().unwrap().contains("● Degraded"));

        app.into_dashboard().shutdown().await;
    }

    #[tokio::test]
    async fn test_status_bar_lists_intervals() {
        let app = app_with_health(StatusCode::OK).await;
        let text = render_to_text(&app, 120, 30, 0);
        let bar = text.lines().last().unwrap();

        assert!(bar.contains("status 250ms"));
        assert!(bar.contains("upstreams 10s"));
        assert!(bar.contains("q:quit"));

        app.into_dashboard().shutdown().await;
    }

    #[tokio::test]
    async fn test_help_overlay_has_quick_start() {
        let mut app = app_with_health(StatusCode::OK).await;
        app.toggle_help();
        let text = render_to_text(&app, 100, 30, 0);

        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("/healthz"));
        assert!(text.contains("50%"));

        app.into_dashboard().shutdown().await;
    }
}
