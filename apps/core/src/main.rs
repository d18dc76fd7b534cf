// callaudit command-line entry point
// Runs the transcript audit stages against the configured resources.

use anyhow::Context;
use callaudit::analysis::{
    read_transcript, transcript_name, CallAnalyzer, FileCountStore, ProtocolVerifier,
    SentimentScorer, Tokenizer, WordListValidator,
};
use callaudit::{telemetry, AuditConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "callaudit", version, about = "Sentiment and protocol audit for call transcripts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run tokenization, sentiment scoring and protocol verification
    Analyze {
        /// Plain-text transcript
        transcript: PathBuf,
        /// Print the full outcome as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Merge a transcript's recognized words into a token store
    Tokenize {
        transcript: PathBuf,
        /// Token store (defaults to the layout's store for this transcript)
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Score a token store and write the sentiment report
    Sentiment {
        /// Transcript name (file stem) whose store and report to use
        name: String,
        #[arg(long)]
        tokens: Option<PathBuf>,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Verify protocol compliance and write the protocol report
    Protocol {
        transcript: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn run(cli: Cli, config: AuditConfig) -> anyhow::Result<()> {
    let layout = config.layout();

    match cli.command {
        Command::Analyze { transcript, json } => {
            let analyzer = CallAnalyzer::from_config(&config)
                .context("failed to initialize the analyzer")?;
            let outcome = analyzer
                .analyze(&transcript)
                .with_context(|| format!("analysis of {:?} failed", transcript))?;
            if json {
                println!("{}", outcome.to_json()?);
            } else {
                println!("{}", outcome.summary());
            }
        }
        Command::Tokenize { transcript, store } => {
            let validator = WordListValidator::from_file(&config.word_list_path())
                .context("failed to initialize the word validator")?;
            let text = read_transcript(&transcript)?;
            let store_path = match store {
                Some(path) => path,
                None => layout.tokens_path(&transcript_name(&transcript)?),
            };
            let mut store = FileCountStore::new(&store_path);
            let merged = Tokenizer::new(validator).tokenize(&text, &mut store)?;
            println!("{} distinct words in {}", merged.len(), store_path.display());
        }
        Command::Sentiment {
            name,
            tokens,
            report,
        } => {
            let scorer = SentimentScorer::from_lexicon_file(&config.lexicon_path())
                .context("failed to load the sentiment lexicon")?;
            let store = FileCountStore::new(tokens.unwrap_or_else(|| layout.tokens_path(&name)));
            let report = report.unwrap_or_else(|| layout.sentiment_report_path(&name));
            let result = scorer.score_to_report(&store, &report)?;
            println!("{}", result.summary());
        }
        Command::Protocol { transcript, report } => {
            let verifier = ProtocolVerifier::from_dir(&config.protocols_dir_path())?;
            let text = read_transcript(&transcript)?;
            let report = match report {
                Some(path) => path,
                None => layout.protocol_report_path(&transcript_name(&transcript)?),
            };
            let result = verifier.verify_to_report(&text, &report)?;
            println!("{}", result.summary());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AuditConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init_tracing(config.log_format) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    info!("Configuration loaded (base dir: {})", config.base_dir);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
