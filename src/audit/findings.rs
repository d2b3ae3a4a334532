use crate::logging::{LogLevel, ProbeLog};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Classification of a delivery finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// A step event arrived more than once.
    Duplicated,
    /// An expected step event never arrived.
    Missing,
    /// A registration consumed a slot that an expected step never filled.
    Unexpected,
    /// The receiver was unreachable for longer than the tolerated window.
    Unavailable,
}

impl FindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::Duplicated => "duplicated",
            FindingKind::Missing => "missing",
            FindingKind::Unexpected => "unexpected",
            FindingKind::Unavailable => "unavailable",
        }
    }

    pub fn all() -> [FindingKind; 4] {
        [
            FindingKind::Duplicated,
            FindingKind::Missing,
            FindingKind::Unexpected,
            FindingKind::Unavailable,
        ]
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded observation. Findings are append-only; once recorded they
/// are never mutated or removed for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub description: String,
}

/// Point-in-time copy of every recorded finding, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FindingsSnapshot {
    pub duplicated: Vec<String>,
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
    pub unavailable: Vec<String>,
}

impl FindingsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.duplicated.len() + self.missing.len() + self.unexpected.len() + self.unavailable.len()
    }

    pub fn of_kind(&self, kind: FindingKind) -> &[String] {
        match kind {
            FindingKind::Duplicated => &self.duplicated,
            FindingKind::Missing => &self.missing,
            FindingKind::Unexpected => &self.unexpected,
            FindingKind::Unavailable => &self.unavailable,
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    duplicated: Vec<Finding>,
    missing: Vec<Finding>,
    unexpected: Vec<Finding>,
    unavailable: Vec<Finding>,
}

impl Recorded {
    fn bucket(&self, kind: FindingKind) -> &Vec<Finding> {
        match kind {
            FindingKind::Duplicated => &self.duplicated,
            FindingKind::Missing => &self.missing,
            FindingKind::Unexpected => &self.unexpected,
            FindingKind::Unavailable => &self.unavailable,
        }
    }

    fn bucket_mut(&mut self, kind: FindingKind) -> &mut Vec<Finding> {
        match kind {
            FindingKind::Duplicated => &mut self.duplicated,
            FindingKind::Missing => &mut self.missing,
            FindingKind::Unexpected => &mut self.unexpected,
            FindingKind::Unavailable => &mut self.unavailable,
        }
    }
}

/// Thread-safe, append-only sink of classified findings. One instance backs
/// a verification session; clones share the same sink, so every store and
/// every thread reports into the same buckets.
#[derive(Debug, Clone, Default)]
pub struct FindingLog {
    recorded: Arc<Mutex<Recorded>>,
    log: Option<ProbeLog>,
}

impl FindingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a diagnostics journal; every reported finding is mirrored
    /// there at warn level.
    pub fn with_log(mut self, log: ProbeLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Records one finding under the given kind.
    pub fn report(&self, kind: FindingKind, description: impl Into<String>) {
        let description = description.into();
        if let Some(log) = &self.log {
            log.log(LogLevel::Warn, "findings", &format!("{kind}: {description}"));
        }
        let mut recorded = self.recorded.lock().unwrap();
        recorded.bucket_mut(kind).push(Finding { kind, description });
    }

    /// True when nothing has been recorded under the given kind.
    pub fn is_empty(&self, kind: FindingKind) -> bool {
        self.recorded.lock().unwrap().bucket(kind).is_empty()
    }

    /// True when nothing has been recorded at all.
    pub fn is_clean(&self) -> bool {
        let recorded = self.recorded.lock().unwrap();
        FindingKind::all()
            .iter()
            .all(|&kind| recorded.bucket(kind).is_empty())
    }

    /// Copies of the findings recorded under the given kind, in report order.
    pub fn of_kind(&self, kind: FindingKind) -> Vec<Finding> {
        self.recorded.lock().unwrap().bucket(kind).clone()
    }

    pub fn total(&self) -> usize {
        let recorded = self.recorded.lock().unwrap();
        FindingKind::all()
            .iter()
            .map(|&kind| recorded.bucket(kind).len())
            .sum()
    }

    /// Consistent copy of every bucket, taken under a single lock hold.
    pub fn snapshot(&self) -> FindingsSnapshot {
        let recorded = self.recorded.lock().unwrap();
        let describe =
            |bucket: &[Finding]| bucket.iter().map(|f| f.description.clone()).collect();
        FindingsSnapshot {
            duplicated: describe(&recorded.duplicated),
            missing: describe(&recorded.missing),
            unexpected: describe(&recorded.unexpected),
            unavailable: describe(&recorded.unavailable),
        }
    }
}
