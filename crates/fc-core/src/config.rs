//! Runtime tunables
//!
//! Everything else is fixed by the page context. The content-script loader
//! may pass these as a JSON object; missing keys keep their defaults.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Interval between marker checks
    pub poll_interval_ms: u32,
    /// Marker checks before giving up
    pub poll_attempts: u32,
    /// Delay after `hashchange` before re-filtering the map
    pub hash_settle_ms: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            poll_attempts: 20,
            hash_settle_ms: 500,
        }
    }
}

impl FilterConfig {
    /// Parse an optional JSON config; `None` or blank gives the defaults.
    pub fn from_json(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json.map(str::trim) {
            Some(text) if !text.is_empty() => serde_json::from_str(text),
            _ => Ok(Self::default()),
        }
    }
}
