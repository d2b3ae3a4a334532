use crate::audit::findings::{FindingKind, FindingLog};
use crate::event::Step;
use crate::logging::ProbeLog;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

// Shard count must stay a power of two for the index mask.
const LEDGER_SHARDS: usize = 64;

/// Consistent view of the occurrence table at one point in time. Numbers
/// iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLedgerSnapshot {
    counts: BTreeMap<u64, u64>,
}

impl StepLedgerSnapshot {
    /// Number of distinct step numbers received at least once.
    pub fn distinct(&self) -> u64 {
        self.counts.len() as u64
    }

    /// Total registrations, duplicates included.
    pub fn registrations(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn contains(&self, number: u64) -> bool {
        self.counts.contains_key(&number)
    }

    /// Occurrence count for one number; zero when never received.
    pub fn count_of(&self, number: u64) -> u64 {
        self.counts.get(&number).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&number, &count)| (number, count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Sharded occurrence table tracking how many times each step number was
/// received. Registration locks a single shard, so steps land concurrently
/// without contending on one table-wide lock; a snapshot locks every shard
/// at once to produce a consistent cut.
#[derive(Debug, Clone)]
pub struct StepLedger {
    shards: Arc<[Mutex<HashMap<u64, u64>>]>,
    findings: FindingLog,
    log: Option<ProbeLog>,
}

impl StepLedger {
    pub fn new(findings: FindingLog) -> Self {
        let shards = (0..LEDGER_SHARDS)
            .map(|_| Mutex::new(HashMap::new()))
            .collect();
        Self {
            shards,
            findings,
            log: None,
        }
    }

    pub fn with_log(mut self, log: ProbeLog) -> Self {
        self.log = Some(log);
        self
    }

    fn shard_for(number: u64) -> usize {
        number as usize & (LEDGER_SHARDS - 1)
    }

    /// Records one arrival of `step`. Every occurrence past the first raises
    /// a duplicated finding, one finding per extra occurrence.
    pub fn register_step(&self, step: &Step) {
        let seen = {
            let mut shard = self.shards[Self::shard_for(step.number)].lock().unwrap();
            let count = shard.entry(step.number).or_insert(0);
            *count += 1;
            *count
        };
        if let Some(log) = &self.log {
            log.debug("steps", &format!("step event {step} received"));
        }
        if seen > 1 {
            self.findings.report(
                FindingKind::Duplicated,
                format!("step event {step} received {seen} times; expected exactly once"),
            );
        }
    }

    /// Consistent cut of the whole table. Holds every shard lock, in shard
    /// order, for the duration of the copy.
    pub fn snapshot(&self) -> StepLedgerSnapshot {
        let guards: Vec<_> = self
            .shards
            .iter()
            .map(|shard| shard.lock().unwrap())
            .collect();
        let mut counts = BTreeMap::new();
        for guard in &guards {
            for (&number, &count) in guard.iter() {
                counts.insert(number, count);
            }
        }
        StepLedgerSnapshot { counts }
    }
}
