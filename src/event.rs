use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Wire type of the numbered step events emitted by the probe sender.
pub const STEP_EVENT_TYPE: &str = "io.relaywatch.probe.step";

/// Wire type of the terminal finished notification.
pub const FINISHED_EVENT_TYPE: &str = "io.relaywatch.probe.finished";

/// One numbered probe event. The sender numbers steps contiguously from 1
/// and each number is expected to be delivered exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Step {
    pub number: u64,
}

impl Step {
    pub fn new(number: u64) -> Self {
        Self { number }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.number)
    }
}

/// A contiguous window during which the sender could not reach the receiver.
///
/// The anchoring step is optional; senders that detect an outage between
/// steps report the window without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailablePeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    pub period_ms: u64,
}

impl UnavailablePeriod {
    pub fn new(step: Option<Step>, period_ms: u64) -> Self {
        Self { step, period_ms }
    }

    /// Window length as a [`Duration`].
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Terminal notification closing a probe session. `events_sent` declares how
/// many step events the sender emitted, which fixes the expected step range
/// to `1..=events_sent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finished {
    pub events_sent: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable_periods: Vec<UnavailablePeriod>,
}

impl Finished {
    pub fn new(events_sent: u64) -> Self {
        Self {
            events_sent,
            unavailable_periods: Vec::new(),
        }
    }

    pub fn with_unavailable_period(mut self, period: UnavailablePeriod) -> Self {
        self.unavailable_periods.push(period);
        self
    }
}

/// An event observed by the probe receiver, tagged on the wire with the
/// `type` discriminator so journals can interleave both shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProbeEvent {
    #[serde(rename = "io.relaywatch.probe.step")]
    Step(Step),
    #[serde(rename = "io.relaywatch.probe.finished")]
    Finished(Finished),
}

impl ProbeEvent {
    /// Wire type discriminator for this event.
    pub fn event_type(&self) -> &'static str {
        match self {
            ProbeEvent::Step(_) => STEP_EVENT_TYPE,
            ProbeEvent::Finished(_) => FINISHED_EVENT_TYPE,
        }
    }
}

impl From<Step> for ProbeEvent {
    fn from(step: Step) -> Self {
        ProbeEvent::Step(step)
    }
}

impl From<Finished> for ProbeEvent {
    fn from(finished: Finished) -> Self {
        ProbeEvent::Finished(finished)
    }
}
