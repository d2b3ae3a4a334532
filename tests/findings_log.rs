use relaywatch::{FindingKind, FindingLog, LogLevel, LogRetention, ProbeLog};
use std::thread;

#[test]
fn buckets_keep_kinds_separate() {
    let findings = FindingLog::new();
    assert!(findings.is_clean());

    findings.report(FindingKind::Duplicated, "first");
    findings.report(FindingKind::Missing, "second");
    findings.report(FindingKind::Duplicated, "third");

    assert_eq!(findings.of_kind(FindingKind::Duplicated).len(), 2);
    assert_eq!(findings.of_kind(FindingKind::Missing).len(), 1);
    assert!(findings.is_empty(FindingKind::Unexpected));
    assert!(findings.is_empty(FindingKind::Unavailable));
    assert_eq!(findings.total(), 3);
    assert!(!findings.is_clean());
}

#[test]
fn findings_keep_report_order_within_a_bucket() {
    let findings = FindingLog::new();
    for i in 0..5 {
        findings.report(FindingKind::Missing, format!("observation {i}"));
    }

    let missing = findings.of_kind(FindingKind::Missing);
    let descriptions: Vec<&str> = missing.iter().map(|f| f.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "observation 0",
            "observation 1",
            "observation 2",
            "observation 3",
            "observation 4",
        ]
    );
}

#[test]
fn snapshot_copies_every_bucket() {
    let findings = FindingLog::new();
    for kind in FindingKind::all() {
        findings.report(kind, format!("{kind} sample"));
    }

    let snapshot = findings.snapshot();
    assert_eq!(snapshot.total(), 4);
    for kind in FindingKind::all() {
        assert_eq!(snapshot.of_kind(kind).len(), 1);
        assert!(snapshot.of_kind(kind)[0].contains(kind.as_str()));
    }

    // Later reports do not leak into an already taken snapshot.
    findings.report(FindingKind::Missing, "late");
    assert_eq!(snapshot.missing.len(), 1);
    assert_eq!(findings.snapshot().missing.len(), 2);
}

#[test]
fn concurrent_reports_lose_nothing() {
    let findings = FindingLog::new();
    let handles: Vec<_> = (0..8usize)
        .map(|worker| {
            let findings = findings.clone();
            thread::spawn(move || {
                for i in 0..100usize {
                    let kind = FindingKind::all()[(worker + i) % 4];
                    findings.report(kind, format!("worker {worker} observation {i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(findings.total(), 800);
    assert_eq!(findings.of_kind(FindingKind::Duplicated).len(), 200);
    assert_eq!(findings.of_kind(FindingKind::Unavailable).len(), 200);
}

#[test]
fn reported_findings_mirror_into_the_diagnostics_journal() {
    let log = ProbeLog::new(LogRetention::default()).with_level(LogLevel::Debug);
    let findings = FindingLog::new().with_log(log.clone());
    findings.report(FindingKind::Missing, "step event #9 was never received");

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(record["level"], "WARN");
    assert_eq!(record["component"], "findings");
    let message = record["message"].as_str().unwrap();
    assert!(message.contains("missing"));
    assert!(message.contains("#9"));
}
