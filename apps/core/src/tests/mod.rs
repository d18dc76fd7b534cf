//! Test Module
//!
//! Scenario suites for the audit stages.
//!
//! ## Test Categories
//! - `tokenizer_tests`: word extraction and store accumulation
//! - `sentiment_tests`: lexicon loading, scoring and report files
//! - `protocol_tests`: phrase lists, verification and report files
//! - `integration_tests`: full pipeline over a data directory

pub mod sentiment_tests;
