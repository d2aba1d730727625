extern crate anyhow;
extern crate chrono_tz;
extern crate serde;
extern crate serde_json;
extern crate serde_with;
extern crate std;

use anyhow::Context;
use crate::colors;
use crate::result;
use crate::schedule;
use serde_with::{serde_as, DurationSecondsWithFrac};
use std::time::Duration;

// Montgomery St., platform 2. The key is BART's public demo key.
pub const DEFAULT_ENDPOINT: &str =
    "https://api.bart.gov/api/etd.aspx?cmd=etd&orig=MONT&plat=2&key=MW9S-E7SL-26DU-VV8V&json=y";

/// How long each screen stays up. All values in (fractional) seconds.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DwellConfig {
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub page: Duration,
    // The last schedule page of a cycle.
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub final_page: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub imminent: Duration,
    // Clock when there is no data.
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub clock: Duration,
    // Clock shown after the schedule pages.
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub after_pages: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub flash: Duration,
}

impl Default for DwellConfig {
    fn default() -> DwellConfig {
        return DwellConfig{
            page: Duration::from_secs(5),
            final_page: Duration::from_secs(10),
            imminent: Duration::from_secs(2),
            clock: Duration::from_secs(2),
            after_pages: Duration::from_secs(1),
            flash: Duration::from_millis(200),
        };
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub fetch_timeout: Duration,
    pub timezone: String,
    pub colors: std::collections::BTreeMap<String, String>,
    pub unknown_color_code: String,
    pub strict_collisions: bool,
    #[serde_as(as = "Option<DurationSecondsWithFrac<f64>>")]
    pub retry_backoff: Option<Duration>,
    pub font_path: String,
    pub dwell: DwellConfig,
}

impl Default for Config {
    fn default() -> Config {
        return Config{
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fetch_timeout: Duration::from_secs(10),
            timezone: "America/Los_Angeles".to_string(),
            colors: colors::DEFAULT_COLORS.iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
            unknown_color_code: "?".to_string(),
            strict_collisions: false,
            retry_backoff: None,
            font_path: "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf".to_string(),
            dwell: DwellConfig::default(),
        };
    }
}

impl Config {
    pub fn color_table(&self) -> colors::ColorTable {
        return colors::ColorTable::new(&self.colors, &self.unknown_color_code);
    }

    pub fn collision_policy(&self) -> schedule::CollisionPolicy {
        if self.strict_collisions {
            return schedule::CollisionPolicy::Reject;
        }
        return schedule::CollisionPolicy::LastWriteWins;
    }

    pub fn tz(&self) -> result::BartDashResult<chrono_tz::Tz> {
        return self.timezone.parse::<chrono_tz::Tz>()
            .map_err(|e| result::BartDashError::Config(
                format!("bad timezone '{}': {}", self.timezone, e)));
    }
}

pub fn config_from_str(raw_json: &str) -> result::BartDashResult<Config> {
    let config: Config = serde_json::from_str(raw_json)
        .map_err(|e| result::BartDashError::Config(format!("{}", e)))?;
    config.tz()?;
    return Ok(config);
}

pub fn config_from_file<P: AsRef<std::path::Path>>(path: P) -> result::BartDashResult<Config> {
    let debug_path = path.as_ref().to_string_lossy().to_string();
    let raw_json = std::fs::read_to_string(path)
        .with_context(|| format!("Opening config from '{}'", debug_path))?;
    return config_from_str(&raw_json);
}
