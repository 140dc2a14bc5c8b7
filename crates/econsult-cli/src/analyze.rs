//! `econsult analyze`: file → sections → comments → sentiment → report.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, ValueEnum};
use econsult_ai::SentimentClassifier;
use econsult_core::{AnalysisReport, aggregate};
use econsult_ingest::{FileKind, IngestError};
use tracing::{error, info};

use crate::display;

/// Exit code for a bad or unsupported input file.
const EXIT_INPUT_ERROR: u8 = 2;
/// Exit code for any other failure.
const EXIT_INTERNAL_ERROR: u8 = 1;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyse, or `-` for stdin
    pub path: PathBuf,

    /// File type (`pdf` or `csv`); taken from the file name when omitted
    #[arg(long)]
    pub format: Option<String>,

    #[arg(long, value_enum, default_value_t = Output::Json)]
    pub output: Output,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Output {
    Json,
    Text,
}

/// Run the command, printing either the rendered report or an error
/// envelope to stdout.
pub fn run(args: &AnalyzeArgs, classifier: &SentimentClassifier) -> ExitCode {
    match execute(args, classifier) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let (code, message) = error_response(&e);
            println!("{}", serde_json::json!({ "error": message }));
            ExitCode::from(code)
        }
    }
}

fn execute(args: &AnalyzeArgs, classifier: &SentimentClassifier) -> anyhow::Result<String> {
    let kind = declared_kind(&args.path, args.format.as_deref())?;
    let bytes = read_input(&args.path)?;
    let report = analyze_bytes(kind, &bytes, classifier)?;

    match args.output {
        Output::Text => Ok(display::render_report(&report)),
        Output::Json if args.pretty => {
            serde_json::to_string_pretty(&report).context("serialising report")
        }
        Output::Json => serde_json::to_string(&report).context("serialising report"),
    }
}

/// Run the full pipeline on an uploaded file's bytes.
pub fn analyze_bytes(
    kind: FileKind,
    bytes: &[u8],
    classifier: &SentimentClassifier,
) -> Result<AnalysisReport, IngestError> {
    let sections = econsult_ingest::ingest(kind, bytes)?;
    let analysis = aggregate(&sections);
    let sentiments = classifier.analyze(&analysis.all_comments);

    let report = AnalysisReport::build(analysis, sentiments);
    info!(
        kind = %kind,
        sections = report.sections.len(),
        comments = report.total_comments,
        decision = %report.decision,
        inferred = report.inferred_from_sentiment,
        "analysed upload"
    );
    Ok(report)
}

/// An explicit `--format` wins; otherwise the extension of the path.
/// Stdin has no name, so it needs `--format`.
fn declared_kind(path: &Path, format: Option<&str>) -> Result<FileKind, IngestError> {
    match format {
        Some(format) => FileKind::from_extension(format.trim_start_matches('.')),
        None if is_stdin(path) => Err(IngestError::UnsupportedFormat(String::new())),
        None => FileKind::from_file_name(&path.to_string_lossy()),
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if is_stdin(path) {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("reading stdin")?;
        return Ok(bytes);
    }
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Exit code and message for a failed run. Input errors are reported as is;
/// everything else is logged with its full chain and reported generically.
fn error_response(e: &anyhow::Error) -> (u8, String) {
    match e.downcast_ref::<IngestError>() {
        Some(input) if input.is_input_error() => (EXIT_INPUT_ERROR, input.to_string()),
        _ => {
            let chain = format!("{e:#}");
            error!(error = %chain, "analysis failed");
            (EXIT_INTERNAL_ERROR, format!("Internal server error: {chain}"))
        }
    }
}
