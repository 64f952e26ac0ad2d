//! Structured logging with request context.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use shelf_core::RequestId;

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for production/log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Request ID for correlation.
    pub request_id: String,
    /// Workload name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    /// Route path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    pub elapsed_us: u64,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {} ({}us)", self.level, self.message, self.elapsed_us);

        if !self.fields.is_empty() {
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(" | ");
            s.push_str(&fields.join(" "));
        }

        s
    }

    /// Get a field value.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// In-memory log buffer, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog(Arc<Mutex<Vec<LogEntry>>>);

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.0.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    /// Entries with a given message.
    pub fn find(&self, message: &str) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.message == message)
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.0.lock() {
            entries.push(entry);
        }
    }
}

/// Destination for formatted log lines.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    /// Write lines to stderr (Spin captures this).
    #[default]
    Stderr,
    /// Forward lines as `tracing` events.
    Tracing,
    /// Keep entries in memory.
    Memory(MemoryLog),
}

impl LogSink {
    fn write(&self, entry: LogEntry, format: LogFormat) {
        match self {
            LogSink::Stderr => eprintln!("{}", format_line(&entry, format)),
            LogSink::Tracing => {
                let line = format_line(&entry, format);
                match entry.level {
                    LogLevel::Trace => tracing::trace!(target: "quick_shelf", "{}", line),
                    LogLevel::Debug => tracing::debug!(target: "quick_shelf", "{}", line),
                    LogLevel::Info => tracing::info!(target: "quick_shelf", "{}", line),
                    LogLevel::Warn => tracing::warn!(target: "quick_shelf", "{}", line),
                    LogLevel::Error => tracing::error!(target: "quick_shelf", "{}", line),
                }
            }
            LogSink::Memory(log) => log.push(entry),
        }
    }
}

fn format_line(entry: &LogEntry, format: LogFormat) -> String {
    match format {
        LogFormat::Json => entry.to_json(),
        LogFormat::Human => entry.to_human(),
    }
}

/// Structured logger with request context.
///
/// One logger is created per request; every entry carries the request ID
/// and the time elapsed since the logger was created.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    request_id: RequestId,
    workload: Option<String>,
    route: Option<String>,
    start_time: Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl StructuredLogger {
    /// Create a new logger with request context.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            workload: None,
            route: None,
            start_time: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: LogSink::Stderr,
        }
    }

    /// Set the workload name.
    pub fn with_workload(mut self, workload: impl Into<String>) -> Self {
        self.workload = Some(workload.into());
        self
    }

    /// Set the route path.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the sink.
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            request_id: self.request_id.to_string(),
            workload: self.workload.clone(),
            route: self.route.clone(),
            fields,
            elapsed_us: self.elapsed_us(),
        };

        self.sink.write(entry, self.format);
    }

    /// Get the request ID.
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Get elapsed time since logger creation.
    pub fn elapsed_us(&self) -> u64 {
        self.start_time.elapsed().as_micros() as u64
    }

    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }

    /// Start building an error log entry.
    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Error, message)
    }

    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a duration field (in milliseconds).
    pub fn duration_ms(mut self, key: &str, duration: Duration) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(duration.as_millis() as u64));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_logger() -> (StructuredLogger, MemoryLog) {
        let log = MemoryLog::new();
        let logger = StructuredLogger::new(RequestId::from_string("req-1"))
            .with_workload("quick-search")
            .with_route("/quick-shelf/v1/search")
            .with_sink(LogSink::Memory(log.clone()));
        (logger, log)
    }

    #[test]
    fn test_entries_carry_request_context() {
        let (logger, log) = memory_logger();
        logger.info("search completed");

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].request_id, "req-1");
        assert_eq!(entries[0].workload.as_deref(), Some("quick-search"));
        assert_eq!(entries[0].route.as_deref(), Some("/quick-shelf/v1/search"));
    }

    #[test]
    fn test_min_level_filters() {
        let (logger, log) = memory_logger();
        let logger = logger.with_min_level(LogLevel::Warn);

        logger.info("dropped");
        logger.debug("dropped");
        logger.warn("kept");

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
    }

    #[test]
    fn test_builder_fields() {
        let (logger, log) = memory_logger();
        logger
            .info_builder("search completed")
            .field("term", "mug")
            .field_i64("results", 3)
            .field_bool("nonce_present", true)
            .emit();

        let entry = &log.find("search completed")[0];
        assert_eq!(entry.field("term"), Some(&serde_json::json!("mug")));
        assert_eq!(entry.field("results"), Some(&serde_json::json!(3)));
        assert_eq!(entry.field("nonce_present"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_json_format_flattens_fields() {
        let (logger, log) = memory_logger();
        logger.warn_builder("rejected").field("code", "no_term").emit();

        let json: serde_json::Value = serde_json::from_str(&log.entries()[0].to_json()).unwrap();
        assert_eq!(json["level"], "warn");
        assert_eq!(json["code"], "no_term");
        assert_eq!(json["request_id"], "req-1");
    }

    #[test]
    fn test_human_format() {
        let (logger, log) = memory_logger();
        logger.error_builder("catalog failed").field_i64("status", 500).emit();

        let line = log.entries()[0].to_human();
        assert!(line.starts_with("[ERROR] catalog failed"));
        assert!(line.contains("status=500"));
    }

    #[test]
    fn test_level_deserializes_lowercase() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);
        let format: LogFormat = serde_json::from_str("\"human\"").unwrap();
        assert_eq!(format, LogFormat::Human);
    }
}
