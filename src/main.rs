use anyhow::{bail, Context, Result};
use relaywatch::{load_journal, ProbeConfig, ProbeSession, SessionState};
use std::env;
use std::fs;
use std::process;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FINDINGS: i32 = 1;
const EXIT_ACTIVE: i32 = 2;
const EXIT_FATAL: i32 = 3;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let code = match args.first().map(String::as_str) {
        Some("verify") => exit_code(run_verify(&args[1..])),
        Some("defaults") => exit_code(run_defaults()),
        _ => usage(),
    };
    process::exit(code);
}

fn usage() -> i32 {
    eprintln!("usage:");
    eprintln!("  relaywatch verify <journal.json> [--config <config.json>]");
    eprintln!("  relaywatch defaults");
    EXIT_FATAL
}

fn exit_code(outcome: Result<i32>) -> i32 {
    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("fatal: {err:#}");
            EXIT_FATAL
        }
    }
}

fn run_verify(args: &[String]) -> Result<i32> {
    let mut journal_path: Option<&str> = None;
    let mut config_path: Option<&str> = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(iter.next().context("--config requires a path")?.as_str());
            }
            other if journal_path.is_none() => journal_path = Some(other),
            other => bail!("unexpected argument: {other}"),
        }
    }
    let journal_path = journal_path.context("missing journal path")?;

    let config = match config_path {
        Some(path) => {
            let payload = fs::read_to_string(path)
                .with_context(|| format!("failed to read probe config {path}"))?;
            ProbeConfig::from_json(&payload)
                .with_context(|| format!("failed to load probe config {path}"))?
        }
        None => ProbeConfig::default(),
    };

    let events = load_journal(journal_path)?;
    let session = ProbeSession::new(&config);
    session.replay(&events);
    let report = session.report();
    println!("{}", report.to_json_pretty()?);

    Ok(match report.state {
        SessionState::Success => EXIT_SUCCESS,
        SessionState::Failed => EXIT_FINDINGS,
        SessionState::Active => EXIT_ACTIVE,
    })
}

fn run_defaults() -> Result<i32> {
    let config = ProbeConfig::default();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(EXIT_SUCCESS)
}
