//! falcon-kat: Falcon known-answer-test runner
//!
//! Replays NIST `.rsp` vectors through the in-process and precompiled
//! verifiers, and verifies one-off signatures from the command line.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use falcon_verifier::{
    parse_kats, status_name, FalconBackend, FalconVerificationApi, FalconVerificationService,
    KatRecord, PrecompiledBackend, PureBackend, SchoolbookLattice, SignatureType, VerifierConfig,
    FALCON_ERR_SUCCESS,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// falcon-kat: Falcon known-answer-test runner
#[derive(Parser, Debug)]
#[command(name = "falcon-kat")]
#[command(about = "Run Falcon KAT vectors and verify signatures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify every record of a `.rsp` file
    Run {
        /// Path to the KAT response file
        file: PathBuf,

        /// Which verifier(s) to run
        #[arg(long, value_enum, default_value_t = BackendChoice::Both)]
        backend: BackendChoice,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify a single signature given as hex
    Verify {
        /// Signature type code (0 inferred, 1 compressed, 2 padded, 3 ct)
        #[arg(long = "type", default_value_t = 1)]
        signature_type: u8,

        #[arg(long)]
        sig: String,

        #[arg(long)]
        msg: String,

        #[arg(long)]
        pk: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    Pure,
    Precompiled,
    Both,
}

/// Outcome of one KAT record.
#[derive(Debug, Serialize)]
struct RecordReport {
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pure: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    precompiled: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    passed: bool,
}

/// Summary of a KAT run.
#[derive(Debug, Serialize)]
struct RunReport {
    total: usize,
    passed: usize,
    failed: usize,
    records: Vec<RecordReport>,
}

impl RunReport {
    fn from_records(records: Vec<RecordReport>) -> Self {
        let passed = records.iter().filter(|r| r.passed).count();
        Self {
            total: records.len(),
            passed,
            failed: records.len() - passed,
            records,
        }
    }
}

/// Run one record through the selected backends.
///
/// A record passes when every selected backend reports success; with both
/// selected the statuses must also agree.
fn check_record(
    record: &KatRecord,
    pure: Option<&dyn FalconBackend>,
    precompiled: Option<&dyn FalconBackend>,
) -> RecordReport {
    let signature = match record.repack_signature() {
        Ok(sig) => sig,
        Err(e) => {
            return RecordReport {
                count: record.count,
                pure: None,
                precompiled: None,
                error: Some(e.to_string()),
                passed: false,
            }
        }
    };

    let run = |backend: &dyn FalconBackend| {
        backend.verify(
            SignatureType::Compressed.code(),
            &signature,
            &record.msg,
            &record.pk,
        )
    };
    let pure = pure.map(run);
    let precompiled = precompiled.map(run);

    let statuses = [pure, precompiled];
    let all_success = statuses.iter().flatten().all(|&s| s == FALCON_ERR_SUCCESS);
    let agree = match (pure, precompiled) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    };
    let error = (!agree).then(|| "backends disagree".to_string());

    RecordReport {
        count: record.count,
        pure,
        precompiled,
        error,
        passed: all_success && agree,
    }
}

fn run_kats(file: PathBuf, choice: BackendChoice, json: bool) -> Result<ExitCode> {
    let reader = BufReader::new(
        File::open(&file).with_context(|| format!("opening {}", file.display()))?,
    );
    let records =
        parse_kats(reader).with_context(|| format!("parsing {}", file.display()))?;
    info!(records = records.len(), file = %file.display(), "Loaded KAT file");

    let config = VerifierConfig::from_env();
    let pure = PureBackend::new(&config);
    let precompiled = PrecompiledBackend::new(&config);
    let pure_ref = matches!(choice, BackendChoice::Pure | BackendChoice::Both)
        .then_some(&pure as &dyn FalconBackend);
    let precompiled_ref = matches!(choice, BackendChoice::Precompiled | BackendChoice::Both)
        .then_some(&precompiled as &dyn FalconBackend);

    let reports: Vec<RecordReport> = records
        .par_iter()
        .map(|record| check_record(record, pure_ref, precompiled_ref))
        .collect();
    let report = RunReport::from_records(reports);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for record in report.records.iter().filter(|r| !r.passed) {
            warn!(
                count = record.count,
                pure = ?record.pure,
                precompiled = ?record.precompiled,
                error = record.error.as_deref().unwrap_or(""),
                "KAT record failed"
            );
        }
        println!(
            "{}: {} records, {} passed, {} failed",
            file.display(),
            report.total,
            report.passed,
            report.failed
        );
    }

    Ok(if report.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn verify_one(signature_type: u8, sig: &str, msg: &str, pk: &str) -> Result<ExitCode> {
    let sig = hex::decode(sig.trim()).context("--sig is not valid hex")?;
    let msg = hex::decode(msg.trim()).context("--msg is not valid hex")?;
    let pk = hex::decode(pk.trim()).context("--pk is not valid hex")?;

    let config = VerifierConfig::from_env();
    let service = FalconVerificationService::with_config(SchoolbookLattice, config.batch);
    let verdict = service.verify_detailed(
        signature_type,
        &sig,
        sig.len(),
        &msg,
        msg.len(),
        &pk,
        pk.len(),
    );

    println!(
        "status {} ({}), reason {} ({}), packed {}",
        verdict.status,
        status_name(verdict.status),
        verdict.reason.code(),
        verdict.reason.describe(),
        verdict.packed()
    );
    Ok(if verdict.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> Result<ExitCode> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("building log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            file,
            backend,
            json,
        } => run_kats(file, backend, json),
        Command::Verify {
            signature_type,
            sig,
            msg,
            pk,
        } => verify_one(signature_type, &sig, &msg, &pk),
    }
}
