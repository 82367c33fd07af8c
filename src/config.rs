use std::str::FromStr;

use crate::limits::MAX_BOOKINGS;

/// Process settings, read from `SLOTKEEPER_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub metrics_port: Option<u16>,
    pub max_bookings: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
            metrics_port: None,
            max_bookings: MAX_BOOKINGS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparsable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind: lookup("SLOTKEEPER_BIND").unwrap_or(defaults.bind),
            port: parsed(&lookup, "SLOTKEEPER_PORT").unwrap_or(defaults.port),
            metrics_port: parsed(&lookup, "SLOTKEEPER_METRICS_PORT"),
            max_bookings: parsed(&lookup, "SLOTKEEPER_MAX_BOOKINGS")
                .unwrap_or(defaults.max_bookings),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.parse().ok())
}
