//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{Freshness, HealthIndicator};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for stale or refreshing indicators.
    pub warning: Color,
    /// Color for unhealthy badges and error panels.
    pub critical: Color,
    /// Color for healthy badges.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for card labels and secondary text.
    pub muted: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a two-state badge (healthy/unhealthy, reached/not reached).
    pub fn badge_style(&self, ok: bool) -> Style {
        if ok {
            Style::default().fg(self.healthy).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        }
    }

    pub fn freshness_style(&self, freshness: Freshness) -> Style {
        match freshness {
            Freshness::Fresh => Style::default().fg(self.healthy).add_modifier(Modifier::BOLD),
            Freshness::Stale => Style::default().fg(self.warning).add_modifier(Modifier::BOLD),
        }
    }

    pub fn health_style(&self, health: HealthIndicator) -> Style {
        self.badge_style(health.is_operational())
    }

    /// Style for inline error panels.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.critical)
    }
}
