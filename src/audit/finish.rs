use crate::audit::findings::{FindingKind, FindingLog};
use crate::audit::steps::{StepLedger, StepLedgerSnapshot};
use crate::config::ErrorRules;
use crate::event::{Finished, UnavailablePeriod};
use crate::logging::ProbeLog;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy)]
struct AcceptedFinish {
    events_sent: u64,
}

#[derive(Debug, Default)]
struct GateState {
    accepted: Option<AcceptedFinish>,
    attempts: u64,
}

/// Guards the terminal transition of a verification session. The first
/// finished notification is accepted and reconciled against the step ledger;
/// every later one only raises a duplicated finding and leaves the
/// reconciled outcome untouched.
#[derive(Debug, Clone)]
pub struct FinishGate {
    state: Arc<Mutex<GateState>>,
    steps: StepLedger,
    findings: FindingLog,
    rules: ErrorRules,
    log: Option<ProbeLog>,
}

impl FinishGate {
    pub fn new(steps: StepLedger, findings: FindingLog, rules: ErrorRules) -> Self {
        Self {
            state: Arc::new(Mutex::new(GateState::default())),
            steps,
            findings,
            rules,
            log: None,
        }
    }

    pub fn with_log(mut self, log: ProbeLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Handles one finished notification. The gate lock is held through
    /// reconciliation, so racing calls serialize and exactly one of them
    /// reconciles.
    pub fn register_finished(&self, finished: &Finished) {
        let mut state = self.state.lock().unwrap();
        state.attempts += 1;
        if state.accepted.is_some() {
            drop(state);
            self.findings.report(
                FindingKind::Duplicated,
                "finished notification already received; reconciliation runs once per session",
            );
            return;
        }
        state.accepted = Some(AcceptedFinish {
            events_sent: finished.events_sent,
        });
        if let Some(log) = &self.log {
            log.info(
                "finish",
                &format!(
                    "finished notification received; sender declared {} step events",
                    finished.events_sent
                ),
            );
        }
        let census = self.steps.snapshot();
        self.reconcile(finished.events_sent, &census);
        self.check_availability(&finished.unavailable_periods);
    }

    /// Compares the declared range `1..=events_sent` against the census.
    /// Absent numbers become missing findings; surplus occurrences become
    /// unexpected findings when registrations reached the declared total
    /// while distinct coverage did not.
    fn reconcile(&self, events_sent: u64, census: &StepLedgerSnapshot) {
        for number in 1..=events_sent {
            if !census.contains(number) {
                self.findings.report(
                    FindingKind::Missing,
                    format!("step event #{number} was never received"),
                );
            }
        }
        if census.registrations() >= events_sent && census.distinct() < events_sent {
            for (number, count) in census.iter() {
                for occurrence in 2..=count {
                    self.findings.report(
                        FindingKind::Unexpected,
                        format!(
                            "occurrence {occurrence} of step event #{number} filled a slot left by a missing step"
                        ),
                    );
                }
            }
        }
    }

    fn check_availability(&self, periods: &[UnavailablePeriod]) {
        let threshold = self.rules.unavailable_period_to_report();
        for period in periods {
            if period.period() < threshold {
                continue;
            }
            let anchor = match period.step {
                Some(step) => format!("around step event {step}"),
                None => "at an unknown step".to_string(),
            };
            self.findings.report(
                FindingKind::Unavailable,
                format!(
                    "receiver was unavailable for {}ms {anchor}; tolerated window is {}ms",
                    period.period_ms,
                    threshold.as_millis()
                ),
            );
        }
    }

    /// True once a finished notification has been accepted and reconciled.
    pub fn is_reconciled(&self) -> bool {
        self.state.lock().unwrap().accepted.is_some()
    }

    /// Declared step count from the accepted notification, if any.
    pub fn events_sent(&self) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .accepted
            .map(|accepted| accepted.events_sent)
    }

    /// How many finished notifications arrived, accepted one included.
    pub fn attempts(&self) -> u64 {
        self.state.lock().unwrap().attempts
    }

    pub fn rules(&self) -> ErrorRules {
        self.rules
    }
}
