//! Checkpoint status section.
//!
//! Four cards (finalized slot, justified slot, freshness, errors) followed
//! by a last-error panel when the provider reports one.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::time::format_slot;
use crate::data::{SlotView, StatusSummary};
use crate::ui::Theme;

/// Render the status section from the status slot.
pub fn render(frame: &mut Frame, app: &App, area: Rect, now_ms: u64) {
    // Clone so the poller is never blocked on the render.
    let state = app.dashboard().status().clone();
    let theme = &app.theme;

    let view = SlotView::of(&state);
    let refreshing = matches!(view, SlotView::Ready { refreshing: true, .. });
    let block = section_block(" Checkpoint Status ", refreshing, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let status = match view {
        SlotView::Loading => {
            render_message(frame, inner, "Loading status...", theme.muted);
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

    let summary = StatusSummary::from_status(status, now_ms);

    let rows = Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).split(inner);
    let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(rows[0]);

    render_card(
        frame,
        cards[0],
        theme,
        "Finalized Slot",
        Span::styled(format_slot(summary.finalized_slot), theme.header),
        "Latest finalized checkpoint",
    );
    render_card(
        frame,
        cards[1],
        theme,
        "Justified Slot",
        Span::styled(format_slot(summary.justified_slot), theme.header),
        "Latest justified checkpoint",
    );
    render_card(
        frame,
        cards[2],
        theme,
        "Status",
        Span::styled(
            summary.freshness.label(),
            theme.freshness_style(summary.freshness),
        ),
        &format!("Updated {}s ago", summary.updated_secs_ago),
    );
    render_card(
        frame,
        cards[3],
        theme,
        "Errors",
        Span::styled(
            summary.error_count.to_string(),
            theme.badge_style(summary.error_count == 0),
        ),
        &format!("Last success {}s ago", summary.success_secs_ago),
    );

    if let Some(ref error) = summary.last_error {
        let line = Line::from(vec![
            Span::styled("Last Error: ", theme.error_style().add_modifier(Modifier::BOLD)),
            Span::styled(error.clone(), theme.error_style()),
        ]);
        frame.render_widget(Paragraph::new(line), rows[1]);
    }
}

/// Bordered section block; a refresh marker is appended while a cycle runs.
pub(crate) fn section_block<'a>(title: &'a str, refreshing: bool, theme: &Theme) -> Block<'a> {
    let mut title = Line::from(Span::styled(title, theme.header));
    if refreshing {
        title.push_span(Span::styled("⟳ ", Style::default().fg(theme.warning)));
    }
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
}

/// Single centered message in place of section content.
pub(crate) fn render_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(paragraph, area);
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    value: Span<'_>,
    caption: &str,
) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", label), theme.muted))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let text = vec![Line::from(value), Line::from(Span::styled(caption, theme.muted))];
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
