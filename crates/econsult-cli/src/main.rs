mod analyze;
mod display;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use econsult_ai::SentimentClassifier;
use econsult_core::keywords::DEFAULT_TOP_K;
use tracing_subscriber::EnvFilter;

/// Analyse stakeholder consultation documents and recommend a decision.
#[derive(Parser, Debug)]
#[command(name = "econsult", version, about, long_about = None)]
struct Cli {
    /// Directory holding model.onnx, tokenizer.json and config.json.
    /// Without it only the keyword rules are used.
    #[arg(long, env = "ECONSULT_MODEL_DIR", global = true)]
    model_dir: Option<PathBuf>,

    /// Keywords kept per sentiment bucket (0 keeps all).
    #[arg(long, env = "ECONSULT_TOP_K", default_value_t = DEFAULT_TOP_K, global = true)]
    top_k: usize,

    #[arg(long, env = "ECONSULT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse a PDF or CSV consultation file
    Analyze(analyze::AnalyzeArgs),
    /// Report whether the sentiment model is loaded
    Health,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);
    tracing::debug!("econsult v{}", env!("CARGO_PKG_VERSION"));

    let classifier = econsult_ai::install(
        SentimentClassifier::load(cli.model_dir.as_deref()).with_top_k(cli.top_k),
    );

    match cli.command {
        Command::Analyze(args) => analyze::run(&args, classifier),
        Command::Health => {
            println!("{}", health(classifier));
            ExitCode::SUCCESS
        }
    }
}

/// Logs go to stderr; stdout carries only the command output.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn health(classifier: &SentimentClassifier) -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "model_loaded": classifier.model_loaded(),
    })
}
