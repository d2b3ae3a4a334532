use crate::audit::findings::FindingLog;
use crate::audit::finish::FinishGate;
use crate::audit::steps::StepLedger;
use crate::config::ProbeConfig;
use crate::event::ProbeEvent;
use crate::logging::{LogRetention, ProbeLog};
use crate::report::DeliveryReport;

/// One verification session: the three stores wired together the way the
/// probe receiver wires them, sharing a findings sink and a diagnostics
/// journal. Clones share all state, so a session handle can be handed to
/// every delivery thread.
#[derive(Debug, Clone)]
pub struct ProbeSession {
    steps: StepLedger,
    gate: FinishGate,
    findings: FindingLog,
    log: ProbeLog,
}

impl ProbeSession {
    pub fn new(config: &ProbeConfig) -> Self {
        let log = ProbeLog::new(LogRetention::default()).with_level(config.log_level);
        let findings = FindingLog::new().with_log(log.clone());
        let steps = StepLedger::new(findings.clone()).with_log(log.clone());
        let gate = FinishGate::new(steps.clone(), findings.clone(), config.receiver.errors)
            .with_log(log.clone());
        Self {
            steps,
            gate,
            findings,
            log,
        }
    }

    /// Routes one observed event to the store that handles it.
    pub fn observe(&self, event: &ProbeEvent) {
        match event {
            ProbeEvent::Step(step) => self.steps.register_step(step),
            ProbeEvent::Finished(finished) => self.gate.register_finished(finished),
        }
    }

    /// Replays a recorded sequence of events in order.
    pub fn replay(&self, events: &[ProbeEvent]) {
        for event in events {
            self.observe(event);
        }
    }

    pub fn report(&self) -> DeliveryReport {
        DeliveryReport::collect(&self.steps, &self.gate, &self.findings)
    }

    pub fn steps(&self) -> &StepLedger {
        &self.steps
    }

    pub fn gate(&self) -> &FinishGate {
        &self.gate
    }

    pub fn findings(&self) -> &FindingLog {
        &self.findings
    }

    pub fn log(&self) -> &ProbeLog {
        &self.log
    }
}

impl Default for ProbeSession {
    fn default() -> Self {
        Self::new(&ProbeConfig::default())
    }
}
