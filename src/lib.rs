//! Delivery-verification core for the relaywatch continual-delivery probe.
//!
//! A probe sender emits numbered step events through the system under test
//! and closes the run with a finished notification declaring how many it
//! sent. The stores in [`audit`] record what actually arrived, reconcile it
//! against the declaration exactly once, and classify every discrepancy as
//! a duplicated, missing, unexpected, or unavailable finding.

pub mod audit;
pub mod config;
pub mod event;
pub mod journal;
pub mod logging;
pub mod report;

pub use audit::findings::{Finding, FindingKind, FindingLog, FindingsSnapshot};
pub use audit::finish::FinishGate;
pub use audit::session::ProbeSession;
pub use audit::steps::{StepLedger, StepLedgerSnapshot};
pub use config::{ConfigError, ErrorRules, ProbeConfig, ReceiverConfig};
pub use event::{
    Finished, ProbeEvent, Step, UnavailablePeriod, FINISHED_EVENT_TYPE, STEP_EVENT_TYPE,
};
pub use journal::{load_journal, parse_journal, JournalError};
pub use logging::{LogLevel, LogRetention, LogSegment, ProbeLog};
pub use report::{DeliveryReport, SessionState};
