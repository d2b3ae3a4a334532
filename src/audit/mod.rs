//! Verification stores for one probe session.
//!
//! Three cooperating stores audit a delivery run: [`steps::StepLedger`]
//! counts step arrivals, [`finish::FinishGate`] accepts the terminal
//! notification and reconciles the ledger against the declared range, and
//! [`findings::FindingLog`] collects everything the other two flag.
//! [`session::ProbeSession`] wires all three together.

pub mod findings;
pub mod finish;
pub mod session;
pub mod steps;
