//! CLI entrypoint for the bridgekit equivalence harness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use bridgekit_harness::{
    EquivalenceReport, HarnessError, LogEmitter, LogEntry, LogLevel, Outcome, run_full_suite,
};

/// Equivalence tooling for the bridgekit shims.
#[derive(Debug, Parser)]
#[command(name = "bridgekit-harness")]
#[command(about = "Equivalence-testing harness for the bridgekit shims")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the full shim-vs-direct suite and emit a report.
    Run {
        /// Output report path (JSON). Prints a summary to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Structured JSONL log path (stdout when omitted).
        #[arg(long)]
        log: Option<PathBuf>,
        /// Trace id recorded on every log line.
        #[arg(long, default_value = "local")]
        trace_id: String,
    },
    /// Validate a previously written report's digest and summary counts.
    Validate {
        /// Report JSON path.
        #[arg(long)]
        report: PathBuf,
    },
}

fn run(output: Option<PathBuf>, log: Option<PathBuf>, trace_id: &str) -> Result<bool, HarnessError> {
    let suite = run_full_suite()?;

    let mut emitter = match &log {
        Some(path) => LogEmitter::file(path)?,
        None => LogEmitter::stdout(),
    };
    for case in &suite.cases {
        let outcome = if case.matched { Outcome::Pass } else { Outcome::Fail };
        let level = if case.matched { LogLevel::Info } else { LogLevel::Error };
        let entry = LogEntry::new(trace_id, level, "case_executed")
            .with_symbol(case.name.as_str())
            .with_shape(case.shape.as_str())
            .with_verb(case.verb)
            .with_codes(case.shim_code, case.direct_code)
            .with_outcome(outcome);
        emitter.emit(&entry)?;
    }

    let report = EquivalenceReport::from_suite(suite)?;
    let clean = report.mismatched == 0;
    match output {
        Some(path) => report.write_json(&path)?,
        None => {
            println!(
                "{} cases, {} mismatched, sha256 {}",
                report.total, report.mismatched, report.sha256
            );
        }
    }
    Ok(clean)
}

fn validate(report: &PathBuf) -> Result<bool, HarnessError> {
    let report = EquivalenceReport::load(report)?;
    report.verify()?;
    println!(
        "report ok: {} cases, {} mismatched",
        report.total, report.mismatched
    );
    Ok(report.mismatched == 0)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run {
            output,
            log,
            trace_id,
        } => run(output, log, &trace_id),
        Command::Validate { report } => validate(&report),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("harness error: {e}");
            ExitCode::FAILURE
        }
    }
}
