use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::logging::LogLevel;

pub const CONFIG_ELEMENT_ID: &str = "behavior-config";

const DEFAULT_ACTIVE_LOOKAHEAD: f64 = 100.0;
const DEFAULT_HOME_OVERRIDE_BELOW: f64 = 100.0;
const DEFAULT_SCROLL_TOP_AFTER: f64 = 300.0;
const DEFAULT_SHADOW_AFTER: f64 = 50.0;
const DEFAULT_HOME_SECTION: &str = "hero";
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
const DEFAULT_REVEAL_BOTTOM_MARGIN: f64 = 50.0;
const DEFAULT_TYPE_MS: u64 = 100;
const DEFAULT_DELETE_MS: u64 = 50;
const DEFAULT_HOLD_MS: u64 = 2_000;
const DEFAULT_ADVANCE_MS: u64 = 500;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_ROLES: [&str; 3] = [
    "Software Engineer | Full Stack Developer",
    "Web Developer | Problem Solver",
    "Creative Coder | Tech Enthusiast",
];

const ACTIVE_LOOKAHEAD_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const HOME_OVERRIDE_BELOW_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const SCROLL_TOP_AFTER_BOUNDS: (f64, f64) = (0.0, 100_000.0);
const SHADOW_AFTER_BOUNDS: (f64, f64) = (0.0, 100_000.0);
const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const REVEAL_BOTTOM_MARGIN_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const TYPING_DELAY_MS_BOUNDS: (u64, u64) = (1, 60_000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("behavior config is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypingConfig {
    pub enabled: bool,
    pub roles: Vec<String>,
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub hold_delay: Duration,
    pub advance_delay: Duration,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            roles: DEFAULT_ROLES.iter().map(|role| role.to_string()).collect(),
            type_delay: Duration::from_millis(DEFAULT_TYPE_MS),
            delete_delay: Duration::from_millis(DEFAULT_DELETE_MS),
            hold_delay: Duration::from_millis(DEFAULT_HOLD_MS),
            advance_delay: Duration::from_millis(DEFAULT_ADVANCE_MS),
        }
    }
}

/// Pixel and ratio thresholds the page behavior keys off.
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorConfig {
    /// Added to `scrollY + headerHeight` before testing section ranges.
    pub active_lookahead: f64,
    /// Below this `scrollY` the home section is forced active.
    pub home_override_below: f64,
    pub scroll_top_after: f64,
    pub shadow_after: f64,
    pub home_section: String,
    pub reveal_threshold: f64,
    /// Bottom contraction of the reveal root, in pixels.
    pub reveal_bottom_margin: f64,
    pub typing: TypingConfig,
    pub log_level: LogLevel,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            active_lookahead: DEFAULT_ACTIVE_LOOKAHEAD,
            home_override_below: DEFAULT_HOME_OVERRIDE_BELOW,
            scroll_top_after: DEFAULT_SCROLL_TOP_AFTER,
            shadow_after: DEFAULT_SHADOW_AFTER,
            home_section: DEFAULT_HOME_SECTION.to_string(),
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_bottom_margin: DEFAULT_REVEAL_BOTTOM_MARGIN,
            typing: TypingConfig::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTypingConfig {
    enabled: Option<bool>,
    roles: Option<Vec<String>>,
    type_ms: Option<u64>,
    delete_ms: Option<u64>,
    hold_ms: Option<u64>,
    advance_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBehaviorConfig {
    active_lookahead: Option<f64>,
    home_override_below: Option<f64>,
    scroll_top_after: Option<f64>,
    shadow_after: Option<f64>,
    home_section: Option<String>,
    reveal_threshold: Option<f64>,
    reveal_bottom_margin: Option<f64>,
    typing: RawTypingConfig,
    log_level: Option<String>,
}

impl BehaviorConfig {
    /// Parses an override block. Each out-of-range value falls back to its
    /// default on its own; only malformed JSON is an error.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawBehaviorConfig = serde_json::from_str(raw)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawBehaviorConfig) -> Self {
        Self {
            active_lookahead: within(
                raw.active_lookahead,
                DEFAULT_ACTIVE_LOOKAHEAD,
                ACTIVE_LOOKAHEAD_BOUNDS,
            ),
            home_override_below: within(
                raw.home_override_below,
                DEFAULT_HOME_OVERRIDE_BELOW,
                HOME_OVERRIDE_BELOW_BOUNDS,
            ),
            scroll_top_after: within(
                raw.scroll_top_after,
                DEFAULT_SCROLL_TOP_AFTER,
                SCROLL_TOP_AFTER_BOUNDS,
            ),
            shadow_after: within(raw.shadow_after, DEFAULT_SHADOW_AFTER, SHADOW_AFTER_BOUNDS),
            home_section: raw
                .home_section
                .map(|value| value.trim().trim_start_matches('#').to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_HOME_SECTION.to_string()),
            reveal_threshold: within(
                raw.reveal_threshold,
                DEFAULT_REVEAL_THRESHOLD,
                REVEAL_THRESHOLD_BOUNDS,
            ),
            reveal_bottom_margin: within(
                raw.reveal_bottom_margin,
                DEFAULT_REVEAL_BOTTOM_MARGIN,
                REVEAL_BOTTOM_MARGIN_BOUNDS,
            ),
            typing: TypingConfig::from_raw(raw.typing),
            log_level: raw
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

impl TypingConfig {
    fn from_raw(raw: RawTypingConfig) -> Self {
        let defaults = Self::default();

        Self {
            enabled: raw.enabled.unwrap_or(defaults.enabled),
            roles: raw
                .roles
                .map(|roles| roles.into_iter().filter(|role| !role.is_empty()).collect())
                .unwrap_or(defaults.roles),
            type_delay: delay_ms(raw.type_ms, DEFAULT_TYPE_MS),
            delete_delay: delay_ms(raw.delete_ms, DEFAULT_DELETE_MS),
            hold_delay: delay_ms(raw.hold_ms, DEFAULT_HOLD_MS),
            advance_delay: delay_ms(raw.advance_ms, DEFAULT_ADVANCE_MS),
        }
    }
}

fn within<T: PartialOrd + Copy>(value: Option<T>, default: T, bounds: (T, T)) -> T {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn delay_ms(value: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(within(value, default, TYPING_DELAY_MS_BOUNDS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = BehaviorConfig::from_json("{}").expect("empty object parses");
        assert_eq!(config, BehaviorConfig::default());
        assert!(!config.typing.enabled);
        assert_eq!(config.typing.roles.len(), 3);
    }

    #[test]
    fn out_of_range_values_fall_back_individually() {
        let config = BehaviorConfig::from_json(
            r#"{"scroll_top_after": -5, "shadow_after": 80, "reveal_threshold": 1.5}"#,
        )
        .expect("valid JSON");

        assert_eq!(config.scroll_top_after, DEFAULT_SCROLL_TOP_AFTER);
        assert_eq!(config.shadow_after, 80.0);
        assert_eq!(config.reveal_threshold, DEFAULT_REVEAL_THRESHOLD);
    }

    #[test]
    fn typing_overrides_drop_empty_roles_and_bad_delays() {
        let config = BehaviorConfig::from_json(
            r#"{"typing": {"enabled": true, "roles": ["", "Rustacean"], "type_ms": 0, "hold_ms": 900}}"#,
        )
        .expect("valid JSON");

        assert!(config.typing.enabled);
        assert_eq!(config.typing.roles, vec!["Rustacean".to_string()]);
        assert_eq!(config.typing.type_delay, Duration::from_millis(DEFAULT_TYPE_MS));
        assert_eq!(config.typing.hold_delay, Duration::from_millis(900));
    }

    #[test]
    fn home_section_accepts_fragment_form() {
        let config =
            BehaviorConfig::from_json(r##"{"home_section": "#top", "log_level": "debug"}"##)
                .expect("valid JSON");

        assert_eq!(config.home_section, "top");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = BehaviorConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Malformed(_))));
    }
}
