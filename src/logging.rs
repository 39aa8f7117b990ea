use serde_json::{Map, Number, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            _ => None,
        }
    }
}

/// Leveled JSON event lines. Copy so it can ride along into every handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Logger {
    threshold: LogLevel,
}

impl Logger {
    pub fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }

    pub fn threshold(self) -> LogLevel {
        self.threshold
    }

    pub fn enabled(self, level: LogLevel) -> bool {
        level >= self.threshold
    }

    pub fn debug(self, event: &str, fields: Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(self, event: &str, fields: Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn warn(self, event: &str, fields: Value) {
        self.event(LogLevel::Warn, event, fields);
    }

    pub fn event(self, level: LogLevel, event: &str, fields: Value) {
        if let Some(line) = self.render(level, event, fields, now_unix_seconds()) {
            emit(level, line);
        }
    }

    /// Builds the line for an event, or `None` when it is below the threshold.
    pub fn render(self, level: LogLevel, event: &str, fields: Value, ts: u64) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }

        let mut payload = Map::new();
        payload.insert("ts".to_string(), Value::Number(Number::from(ts)));
        payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
        payload.insert("event".to_string(), Value::String(event.to_string()));

        if let Value::Object(extra) = fields {
            for (key, value) in extra {
                payload.insert(key, value);
            }
        }

        Some(Value::Object(payload).to_string())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: String) {
    match level {
        LogLevel::Warn => gloo::console::warn!(line),
        LogLevel::Debug | LogLevel::Info => gloo::console::log!(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: String) {
    eprintln!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_seconds() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_below_threshold_are_dropped() {
        let logger = Logger::new(LogLevel::Info);

        assert!(logger
            .render(LogLevel::Debug, "menu.toggled", json!({}), 1)
            .is_none());
        assert!(logger
            .render(LogLevel::Warn, "config.invalid", json!({}), 1)
            .is_some());
    }

    #[test]
    fn rendered_line_carries_fields_after_envelope() {
        let logger = Logger::new(LogLevel::Debug);
        let line = logger
            .render(LogLevel::Info, "contact.accepted", json!({"name": "Ada"}), 42)
            .expect("info passes a debug threshold");

        let parsed: Value = serde_json::from_str(&line).expect("line is JSON");
        assert_eq!(parsed["ts"], 42);
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "contact.accepted");
        assert_eq!(parsed["name"], "Ada");
    }

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("trace"), None);
    }
}
