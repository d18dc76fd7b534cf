//! Call-center transcript auditing.
//!
//! Scores transcripts for sentiment with a weighted lexicon and checks them
//! against a fixed interaction protocol (greeting, identification, closing,
//! no forbidden language). See [`analysis`] for the components.

pub mod analysis;
pub mod config;
pub mod error;
pub mod paths;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use analysis::{
    AuditOutcome, CallAnalyzer, Classification, FileCountStore, Lexicon, PhraseLists,
    ProtocolResult, ProtocolVerifier, SentimentResult, SentimentScorer, TokenCountStore,
    TokenCounts, Tokenizer, WordListValidator, WordValidator,
};
pub use config::AuditConfig;
pub use error::{AuditError, AuditResult};
