use crate::audit::findings::{FindingLog, FindingsSnapshot};
use crate::audit::finish::FinishGate;
use crate::audit::steps::StepLedger;
use serde::Serialize;
use std::fmt;

/// Lifecycle of a verification session as report consumers see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No finished notification accepted yet; counts are provisional.
    Active,
    /// Reconciled with zero findings.
    Success,
    /// Reconciled with at least one finding.
    Failed,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Active => "active",
            SessionState::Success => "success",
            SessionState::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable summary of a verification session, built for the probe's
/// reporting endpoint and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub state: SessionState,
    /// Declared step count, present once a finished notification landed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_sent: Option<u64>,
    pub distinct_steps: u64,
    pub registrations: u64,
    pub finished_attempts: u64,
    pub findings: FindingsSnapshot,
}

impl DeliveryReport {
    /// Collects the current state of the three stores into one summary.
    /// Advisory while the session is active; authoritative once reconciled.
    pub fn collect(steps: &StepLedger, gate: &FinishGate, findings: &FindingLog) -> Self {
        let census = steps.snapshot();
        let findings = findings.snapshot();
        let events_sent = gate.events_sent();
        let state = match events_sent {
            None => SessionState::Active,
            Some(_) if findings.is_empty() => SessionState::Success,
            Some(_) => SessionState::Failed,
        };
        Self {
            state,
            events_sent,
            distinct_steps: census.distinct(),
            registrations: census.registrations(),
            finished_attempts: gate.attempts(),
            findings,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state != SessionState::Active
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
