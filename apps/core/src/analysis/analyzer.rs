//! Call Analyzer - end-to-end orchestrator for one transcript.
//!
//! Two independent branches share the transcript text:
//! 1. tokenize → token store → sentiment score → sentiment report
//! 2. protocol verification → protocol report

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use super::counts::{FileCountStore, TokenCounts};
use super::lexical::{WordListValidator, WordValidator};
use super::protocol::{ProtocolResult, ProtocolVerifier};
use super::sentiment::{Classification, SentimentResult, SentimentScorer};
use super::tokenizer::Tokenizer;
use crate::config::AuditConfig;
use crate::error::{AuditError, AuditResult, ResourceKind};
use crate::paths::PathLayout;

/// Read a transcript. A missing transcript is fatal.
pub fn read_transcript(path: &Path) -> AuditResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AuditError::MissingResource {
            kind: ResourceKind::Transcript,
            path: path.to_path_buf(),
        },
        _ => AuditError::Io(e),
    })
}

/// Name used to derive output locations: the transcript's file stem.
pub fn transcript_name(path: &Path) -> AuditResult<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AuditError::Validation(format!("cannot derive a transcript name from {:?}", path))
        })
}

/// Everything produced for one transcript.
#[derive(Debug, Clone, Serialize)]
pub struct AuditOutcome {
    pub name: String,
    pub transcript_path: PathBuf,
    pub counts: TokenCounts,
    pub classification: Classification,
    pub sentiment: SentimentResult,
    pub protocol: ProtocolResult,
    pub tokens_path: PathBuf,
    pub sentiment_report_path: PathBuf,
    pub protocol_report_path: PathBuf,
    pub processing_time_ms: u64,
}

impl AuditOutcome {
    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "[{}] {}; {}; {} distinct words stored",
            self.name,
            self.sentiment.summary(),
            self.protocol.summary(),
            self.counts.len()
        )
    }

    /// Pretty-printed JSON of the whole outcome.
    pub fn to_json(&self) -> AuditResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the whole audit for transcripts laid out under one output directory.
pub struct CallAnalyzer<V: WordValidator> {
    tokenizer: Tokenizer<V>,
    scorer: SentimentScorer,
    verifier: ProtocolVerifier,
    layout: PathLayout,
}

impl CallAnalyzer<WordListValidator> {
    /// Build every component from configured resources. Fails if the word
    /// list is unavailable or the lexicon is malformed.
    pub fn from_config(config: &AuditConfig) -> AuditResult<Self> {
        let validator = WordListValidator::from_file(&config.word_list_path())?;
        let scorer = SentimentScorer::from_lexicon_file(&config.lexicon_path())?;
        let verifier = ProtocolVerifier::from_dir(&config.protocols_dir_path())?;
        Ok(Self::new(Tokenizer::new(validator), scorer, verifier, config.layout()))
    }
}

impl<V: WordValidator> CallAnalyzer<V> {
    pub fn new(
        tokenizer: Tokenizer<V>,
        scorer: SentimentScorer,
        verifier: ProtocolVerifier,
        layout: PathLayout,
    ) -> Self {
        Self {
            tokenizer,
            scorer,
            verifier,
            layout,
        }
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    /// Place the transcript at its layout location, copying it when it lives
    /// elsewhere. Returns the layout path.
    pub fn ingest_transcript(&self, source: &Path) -> AuditResult<PathBuf> {
        let name = transcript_name(source)?;
        let target = self.layout.transcript_path(&name);

        if !source.exists() {
            return Err(AuditError::MissingResource {
                kind: ResourceKind::Transcript,
                path: source.to_path_buf(),
            });
        }
        let already_in_place = match (fs::canonicalize(source), fs::canonicalize(&target)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        if !already_in_place {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(source, &target)?;
            info!("Transcript copied to {:?}", target);
        }
        Ok(target)
    }

    /// Full pipeline for one transcript.
    pub fn analyze(&self, transcript: &Path) -> AuditResult<AuditOutcome> {
        let start = Instant::now();
        self.layout.init()?;

        let transcript_path = self.ingest_transcript(transcript)?;
        let name = transcript_name(&transcript_path)?;
        let text = read_transcript(&transcript_path)?;
        info!("Analyzing transcript '{}' ({} bytes)", name, text.len());

        // 1. Tokenize into the transcript's store
        let tokens_path = self.layout.tokens_path(&name);
        let mut store = FileCountStore::new(&tokens_path);
        let counts = self.tokenizer.tokenize(&text, &mut store)?;

        // 2. Score sentiment from the store
        let sentiment_report_path = self.layout.sentiment_report_path(&name);
        let sentiment = self.scorer.score_to_report(&store, &sentiment_report_path)?;

        // 3. Verify protocol on the raw text
        let protocol_report_path = self.layout.protocol_report_path(&name);
        let protocol = self
            .verifier
            .verify_to_report(&text, &protocol_report_path)?;

        let outcome = AuditOutcome {
            name,
            transcript_path,
            counts,
            classification: sentiment.classification(),
            sentiment,
            protocol,
            tokens_path,
            sentiment_report_path,
            protocol_report_path,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };
        info!("{}", outcome.summary());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_transcript_name() {
        assert_eq!(transcript_name(Path::new("a/b/script1.txt")).unwrap(), "script1");
        assert!(transcript_name(Path::new("/")).is_err());
    }

    #[test]
    fn test_read_missing_transcript() {
        let dir = tempdir().unwrap();
        let err = read_transcript(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(
            err,
            AuditError::MissingResource {
                kind: ResourceKind::Transcript,
                ..
            }
        ));
    }
}
