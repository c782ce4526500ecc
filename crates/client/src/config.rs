//! Client configuration.

use std::str::FromStr;
use std::time::Duration;

use crate::types::{
    CAMERA_HEIGHT, CAMERA_WIDTH, DEFAULT_HOST, DEFAULT_PORT, MAX_CAMERA_SIDE, POLL_INTERVAL_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub camera_width: u32,
    pub camera_height: u32,
    /// Readiness wait per loop iteration.
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            camera_width: CAMERA_WIDTH,
            camera_height: CAMERA_HEIGHT,
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

impl ClientConfig {
    /// Create from environment variables.
    ///
    /// - `OROGUE_HOST`, `OROGUE_PORT`: server address
    /// - `OROGUE_CAMERA_WIDTH`, `OROGUE_CAMERA_HEIGHT`: viewport size in cells
    /// - `OROGUE_POLL_MS`: readiness wait per loop iteration
    ///
    /// Unset or unparsable values keep their defaults, as do camera sides
    /// outside `1..=MAX_CAMERA_SIDE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("OROGUE_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);

        Self {
            host,
            port: parse_var(&lookup, "OROGUE_PORT").unwrap_or(defaults.port),
            camera_width: parse_var(&lookup, "OROGUE_CAMERA_WIDTH")
                .filter(|w: &u32| valid_camera_side(*w))
                .unwrap_or(defaults.camera_width),
            camera_height: parse_var(&lookup, "OROGUE_CAMERA_HEIGHT")
                .filter(|h: &u32| valid_camera_side(*h))
                .unwrap_or(defaults.camera_height),
            poll_interval: parse_var(&lookup, "OROGUE_POLL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
        }
    }

    /// `host:port`, resolved at connect time.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Whether `side` is a usable camera width or height.
pub fn valid_camera_side(side: u32) -> bool {
    (1..=MAX_CAMERA_SIDE).contains(&side)
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_client() {
        let config = ClientConfig::default();
        assert_eq!(config.addr(), "localhost:1029");
        assert_eq!((config.camera_width, config.camera_height), (64, 32));
        assert_eq!(config.poll_interval, Duration::from_millis(1));
    }

    #[test]
    fn lookup_overrides_and_ignores_garbage() {
        let config = ClientConfig::from_lookup(|key| match key {
            "OROGUE_HOST" => Some("10.0.0.2".to_string()),
            "OROGUE_PORT" => Some("nope".to_string()),
            "OROGUE_CAMERA_WIDTH" => Some("40".to_string()),
            "OROGUE_CAMERA_HEIGHT" => Some("0".to_string()),
            "OROGUE_POLL_MS" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(config.addr(), "10.0.0.2:1029");
        assert_eq!(config.camera_width, 40);
        assert_eq!(config.camera_height, 32);
        assert_eq!(config.poll_interval, Duration::from_millis(5));
    }

    #[test]
    fn oversized_camera_keeps_default() {
        let config = ClientConfig::from_lookup(|key| match key {
            "OROGUE_CAMERA_WIDTH" => Some("70000".to_string()),
            "OROGUE_CAMERA_HEIGHT" => Some(MAX_CAMERA_SIDE.to_string()),
            _ => None,
        });
        assert_eq!(config.camera_width, 64);
        assert_eq!(config.camera_height, MAX_CAMERA_SIDE);
        assert!(!valid_camera_side(0));
        assert!(!valid_camera_side(MAX_CAMERA_SIDE + 1));
    }
}
