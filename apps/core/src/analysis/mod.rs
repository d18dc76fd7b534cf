//! # Analysis Module
//!
//! Text-analytics stage of the call audit. Works on plain-text transcripts;
//! audio and speech-to-text live outside this crate.
//!
//! ## Components
//! - `lexical`: "is this a word of the language?" capability
//! - `counts`: persisted, additively merged token frequencies
//! - `tokenizer`: word extraction feeding the count store
//! - `lexicon`: word → sentiment weight table
//! - `sentiment`: weighted scoring and classification
//! - `protocol`: greeting / identification / closing / forbidden-language checks
//! - `report`: plain-text report writer
//! - `analyzer`: end-to-end orchestrator

pub mod analyzer;
pub mod counts;
pub mod lexical;
pub mod lexicon;
pub mod protocol;
pub mod report;
pub mod sentiment;
pub mod tokenizer;

pub use analyzer::{read_transcript, transcript_name, AuditOutcome, CallAnalyzer};
pub use counts::{FileCountStore, MemoryCountStore, TokenCountStore, TokenCounts};
pub use lexical::{AcceptAll, WordListValidator, WordValidator};
pub use lexicon::Lexicon;
pub use protocol::{CategoryCheck, PhraseLists, ProtocolCategory, ProtocolResult, ProtocolVerifier};
pub use sentiment::{Classification, SentimentResult, SentimentScorer, WordScore};
pub use tokenizer::Tokenizer;
