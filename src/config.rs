use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// Top-level headgate configuration.
///
/// Dates are quoted `"YYYY-MM-DD"` strings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadgateConfig {
    /// Synthesis settings.
    #[serde(default)]
    pub synthesis: SynthesisToml,

    /// Water-right records.
    #[serde(default)]
    pub rights: Vec<RightToml>,

    /// Supplied series: daily templates and comparison data.
    #[serde(default)]
    pub series: Vec<SeriesToml>,
}

impl HeadgateConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&text).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisToml {
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_policy")]
    pub policy: String,
    #[serde(default)]
    pub parcel_year: Option<i32>,
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
    #[serde(default = "default_free_water_threshold")]
    pub free_water_threshold: f64,
    #[serde(default = "default_free_water_policy")]
    pub free_water_policy: String,
    #[serde(default)]
    pub fallback_date: Option<NaiveDate>,
    #[serde(default = "default_units")]
    pub units: String,
}

impl Default for SynthesisToml {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            policy: default_policy(),
            parcel_year: None,
            period_start: None,
            period_end: None,
            free_water_threshold: default_free_water_threshold(),
            free_water_policy: default_free_water_policy(),
            fallback_date: None,
            units: default_units(),
        }
    }
}

fn default_interval() -> String {
    "month".to_string()
}
fn default_policy() -> String {
    "location".to_string()
}
fn default_free_water_threshold() -> f64 {
    headgate_rights::DEFAULT_FREE_WATER_THRESHOLD
}
fn default_free_water_policy() -> String {
    "none".to_string()
}
fn default_units() -> String {
    "CFS".to_string()
}

/// One water right.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RightToml {
    #[serde(default = "default_kind")]
    pub kind: String,
    pub location: String,
    pub id: String,
    pub decree: f64,
    /// Administration number, kept as text.
    #[serde(default)]
    pub admin: String,
    #[serde(default = "default_on_off")]
    pub on_off: i32,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub parcel_id: Option<String>,
    #[serde(default)]
    pub parcel_year: Option<i32>,
}

fn default_kind() -> String {
    "diversion".to_string()
}
fn default_on_off() -> i32 {
    1
}

/// A regular series given inline.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesToml {
    pub id: String,
    #[serde(default = "default_series_interval")]
    pub interval: String,
    pub start: NaiveDate,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default)]
    pub missing: Option<f64>,
    pub values: Vec<f64>,
}

fn default_series_interval() -> String {
    "day".to_string()
}
