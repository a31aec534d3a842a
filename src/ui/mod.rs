//! Terminal UI rendering using ratatui.
//!
//! Each section is implemented in its own submodule with a `render`
//! function. Sections only read their own state slot.
//!
//! ## Submodules
//!
//! - [`status`]: Checkpoint status cards and last-error panel
//! - [`upstreams`]: Consensus summary, upstream node table, per-node error panels
//! - [`common`]: Shared components (header with health badge, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header + health badge (common)       │
//! ├──────────────────────────────────────┤
//! │ Checkpoint Status (status::render)   │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Upstream Lean Nodes                  │
//! │ (upstreams::render)                  │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top: common::render_help
//! ```

pub mod common;
pub mod status;
pub mod theme;
pub mod upstreams;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for usable display
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Height of the status section (cards plus error panel).
const STATUS_HEIGHT: u16 = 9;

/// Draw the whole dashboard for the wall-clock time `now_ms`.
pub fn draw(frame: &mut Frame, app: &App, now_ms: u64) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.warning));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
            .intersection(area);
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),             // Header bar
        Constraint::Length(STATUS_HEIGHT), // Checkpoint status
        Constraint::Min(6),                // Upstreams
        Constraint::Length(1),             // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    status::render(frame, app, chunks[1], now_ms);
    upstreams::render(frame, app, chunks[2], now_ms);
    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
