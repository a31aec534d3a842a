//! Dashboard settings.
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. an optional settings file (`--config`, TOML/YAML/JSON by extension)
//! 3. `LEANPOINT_*` environment variables (e.g. `LEANPOINT_BASE_URL`)
//! 4. explicit command-line flags
//!
//! ```toml
//! base_url = "http://checkpoint.example:5555"
//! status_interval = "5s"
//! upstreams_interval = "10s"
//! health_interval = "5s"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::source::DEFAULT_BASE_URL;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LEANPOINT";

/// Refresh cadence for each polled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub status: Duration,
    pub upstreams: Duration,
    pub health: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            status: Duration::from_secs(5),
            upstreams: Duration::from_secs(10),
            health: Duration::from_secs(5),
        }
    }
}

/// Fully resolved dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Provider base URL the API paths are joined onto.
    pub base_url: String,
    pub intervals: Intervals,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            intervals: Intervals::default(),
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub status_interval: Option<String>,
    pub upstreams_interval: Option<String>,
    pub health_interval: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    base_url: String,
    status_interval: String,
    upstreams_interval: String,
    health_interval: String,
}

impl Settings {
    /// Resolve settings from defaults, an optional file, the process
    /// environment and command-line overrides.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(config_path, overrides, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(
        config_path: Option<&Path>,
        overrides: &Overrides,
        env: Environment,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("status_interval", "5s")?
            .set_default("upstreams_interval", "10s")?
            .set_default("health_interval", "5s")?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let raw: RawSettings = builder
            .add_source(env)
            .set_override_option("base_url", overrides.base_url.clone())?
            .set_override_option("status_interval", overrides.status_interval.clone())?
            .set_override_option("upstreams_interval", overrides.upstreams_interval.clone())?
            .set_override_option("health_interval", overrides.health_interval.clone())?
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let base_url = raw.base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("base_url must start with http:// or https://, got '{}'", base_url);
        }

        let intervals = Intervals {
            status: parse_interval("status_interval", &raw.status_interval)?,
            upstreams: parse_interval("upstreams_interval", &raw.upstreams_interval)?,
            health: parse_interval("health_interval", &raw.health_interval)?,
        };

        Ok(Self {
            base_url,
            intervals,
        })
    }
}

fn parse_interval(key: &str, value: &str) -> Result<Duration> {
    let interval = parse_duration(value).with_context(|| format!("Invalid {}", key))?;
    if interval.is_zero() {
        bail!("{} must be greater than zero", key);
    }
    Ok(interval)
}
