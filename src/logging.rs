use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a diagnostic record. Ordering follows severity, so
/// `LogLevel::Debug < LogLevel::Warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn all() -> [LogLevel; 5] {
        [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ]
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds for the in-memory diagnostics journal. Once the active segment
/// would exceed `max_bytes` it is sealed and a fresh one opened; only the
/// newest `max_segments` sealed segments are retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRetention {
    pub max_bytes: usize,
    pub max_segments: usize,
}

impl Default for LogRetention {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_segments: 8,
        }
    }
}

/// A sealed or active run of JSON lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSegment {
    lines: Vec<String>,
    bytes: usize,
}

impl LogSegment {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug)]
struct LogBuffer {
    level: LogLevel,
    sealed: VecDeque<LogSegment>,
    active: LogSegment,
    next_seq: u64,
}

impl LogBuffer {
    fn new() -> Self {
        Self {
            level: LogLevel::Info,
            sealed: VecDeque::new(),
            active: LogSegment::default(),
            next_seq: 0,
        }
    }
}

/// Thread-safe JSON-line diagnostics journal shared by the verification
/// stores. Clones share the same buffer; records carry a monotonic `seq`
/// assigned under the buffer lock, so the journal orders totally even when
/// stores log from racing threads.
#[derive(Debug, Clone)]
pub struct ProbeLog {
    retention: LogRetention,
    buffer: Arc<Mutex<LogBuffer>>,
}

impl ProbeLog {
    pub fn new(retention: LogRetention) -> Self {
        Self {
            retention,
            buffer: Arc::new(Mutex::new(LogBuffer::new())),
        }
    }

    pub fn with_level(self, level: LogLevel) -> Self {
        self.set_level(level);
        self
    }

    pub fn level(&self) -> LogLevel {
        self.buffer.lock().unwrap().level
    }

    pub fn set_level(&self, level: LogLevel) {
        self.buffer.lock().unwrap().level = level;
    }

    pub fn retention(&self) -> LogRetention {
        self.retention
    }

    /// Appends one record. Records below the configured level are dropped
    /// without consuming a sequence number.
    pub fn log(&self, level: LogLevel, component: &str, message: &str) {
        let mut buffer = self.buffer.lock().unwrap();
        if level < buffer.level {
            return;
        }
        let seq = buffer.next_seq;
        buffer.next_seq += 1;
        let line = serde_json::json!({
            "seq": seq,
            "level": level.as_str(),
            "component": component,
            "message": message,
        })
        .to_string();
        self.append(&mut buffer, line);
    }

    pub fn trace(&self, component: &str, message: &str) {
        self.log(LogLevel::Trace, component, message);
    }

    pub fn debug(&self, component: &str, message: &str) {
        self.log(LogLevel::Debug, component, message);
    }

    pub fn info(&self, component: &str, message: &str) {
        self.log(LogLevel::Info, component, message);
    }

    pub fn warn(&self, component: &str, message: &str) {
        self.log(LogLevel::Warn, component, message);
    }

    pub fn error(&self, component: &str, message: &str) {
        self.log(LogLevel::Error, component, message);
    }

    fn append(&self, buffer: &mut LogBuffer, line: String) {
        let incoming = line.len() + 1;
        if buffer.active.bytes + incoming > self.retention.max_bytes && !buffer.active.is_empty() {
            let sealed = std::mem::take(&mut buffer.active);
            buffer.sealed.push_back(sealed);
            while buffer.sealed.len() > self.retention.max_segments {
                buffer.sealed.pop_front();
            }
        }
        buffer.active.bytes += incoming;
        buffer.active.lines.push(line);
    }

    /// Snapshot of every retained segment, oldest first, active segment last.
    pub fn segments(&self) -> Vec<LogSegment> {
        let buffer = self.buffer.lock().unwrap();
        let mut segments: Vec<LogSegment> = buffer.sealed.iter().cloned().collect();
        if !buffer.active.is_empty() {
            segments.push(buffer.active.clone());
        }
        segments
    }

    /// All retained lines in order, flattened across segments.
    pub fn lines(&self) -> Vec<String> {
        self.segments()
            .into_iter()
            .flat_map(|segment| segment.lines)
            .collect()
    }
}

impl Default for ProbeLog {
    fn default() -> Self {
        Self::new(LogRetention::default())
    }
}
