//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::dashboard::Dashboard;
use crate::ui::Theme;

/// How long a transient status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Polled data
    dashboard: Dashboard,

    // Navigation state
    pub selected_upstream: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App over a running dashboard.
    pub fn new(dashboard: Dashboard, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            dashboard,
            selected_upstream: 0,
            theme,
            status_message: None,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Give back the dashboard so it can be shut down.
    pub fn into_dashboard(self) -> Dashboard {
        self.dashboard
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Number of rows in the upstream table (0 until data arrives).
    pub fn upstream_count(&self) -> usize {
        self.dashboard
            .upstreams()
            .data
            .as_ref()
            .map_or(0, |r| r.upstreams.len())
    }

    /// Selected row, clamped to the current table size.
    pub fn selected_upstream(&self) -> usize {
        self.selected_upstream
            .min(self.upstream_count().saturating_sub(1))
    }

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        let max = self.upstream_count().saturating_sub(1);
        self.selected_upstream = (self.selected_upstream + 1).min(max);
    }

    /// Move selection up by one row.
    pub fn select_prev(&mut self) {
        self.selected_upstream = self.selected_upstream().saturating_sub(1);
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.selected_upstream = 0;
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        self.selected_upstream = self.upstream_count().saturating_sub(1);
    }

    /// Ask every poller for an immediate cycle.
    pub fn refresh(&mut self) {
        self.dashboard.refresh_all();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the data currently held by the dashboard to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let snapshot = self.dashboard.snapshot();
        if snapshot.status.is_none() && snapshot.upstreams.is_none() {
            bail!("No data to export");
        }
        snapshot.write_json(path)
    }
}
