//! Lexical validation.
//!
//! Answers a single question for the tokenizer: is this word a recognized term
//! of the target language? The tokenizer only sees the [`WordValidator`] trait;
//! the dictionary behind it is chosen by the caller.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{AuditError, AuditResult};

/// "Is-recognized-word" capability injected into the tokenizer.
pub trait WordValidator {
    /// `word` is already case-folded.
    fn is_recognized(&self, word: &str) -> bool;
}

/// Recognizes every word. Only for callers that explicitly run without a dictionary.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl WordValidator for AcceptAll {
    fn is_recognized(&self, _word: &str) -> bool {
        true
    }
}

/// Dictionary-backed validator loaded from a word list resource.
///
/// Two formats are understood:
/// - plain text, one word per line; Hunspell `.dic` files work too (the
///   `/FLAGS` suffix is stripped and the leading entry count is skipped)
/// - a JSON word-frequency object (`{"hola": 1520, ...}`) when the file has a
///   `.json` extension
#[derive(Debug, Clone)]
pub struct WordListValidator {
    words: HashSet<String>,
    source: PathBuf,
}

impl WordListValidator {
    /// Load the dictionary. A missing or unreadable resource is fatal: the
    /// tokenizer cannot run without it.
    pub fn from_file(path: &Path) -> AuditResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| AuditError::CapabilityUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let words = if is_json {
            parse_frequency_json(&content).map_err(|e| AuditError::CapabilityUnavailable {
                path: path.to_path_buf(),
                reason: format!("invalid word-frequency JSON: {}", e),
            })?
        } else {
            parse_word_list(&content)
        };

        if words.is_empty() {
            return Err(AuditError::CapabilityUnavailable {
                path: path.to_path_buf(),
                reason: "dictionary contains no words".to_string(),
            });
        }

        info!("Loaded {} dictionary words from {:?}", words.len(), path);

        Ok(Self {
            words,
            source: path.to_path_buf(),
        })
    }

    /// Build a validator from an in-memory word set.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            source: PathBuf::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Where the dictionary was loaded from (empty for in-memory validators).
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl WordValidator for WordListValidator {
    fn is_recognized(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

fn parse_word_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        // Hunspell header: the first line is the entry count
        .filter(|line| !line.chars().all(|c| c.is_ascii_digit()))
        .map(|line| {
            let word = line.split('/').next().unwrap_or(line);
            word.trim().to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn parse_frequency_json(content: &str) -> Result<HashSet<String>, serde_json::Error> {
    let frequencies: HashMap<String, u64> = serde_json::from_str(content)?;
    Ok(frequencies
        .into_keys()
        .map(|w| w.to_lowercase())
        .collect())
}
