//! Transcript tokenization with persistent frequency accumulation.
//!
//! Splits the NFC-normalized, case-folded text into maximal runs of Unicode
//! word characters, keeps the purely alphabetic runs the word validator
//! recognizes, and adds their counts to a [`TokenCountStore`].

use regex::Regex;
use std::sync::LazyLock;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use super::counts::{TokenCountStore, TokenCounts};
use super::lexical::WordValidator;
use crate::error::AuditResult;

// NOTE: expect() is acceptable here, the pattern is a compile-time constant
static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("Invalid regex: word run pattern"));

/// Tokenizer bound to a word validator.
pub struct Tokenizer<V: WordValidator> {
    validator: V,
}

impl<V: WordValidator> Tokenizer<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    /// Recognized words of `text`, case-folded, in order of appearance.
    fn words<'t>(&'t self, folded: &'t str) -> impl Iterator<Item = &'t str> + 't {
        WORD_RUN
            .find_iter(folded)
            .map(|m| m.as_str())
            .filter(|word| word.chars().all(char::is_alphabetic))
            .filter(|word| self.validator.is_recognized(word))
    }

    /// Count the recognized words of `text` without touching any store.
    pub fn count(&self, text: &str) -> TokenCounts {
        // Composed form, so "e" + U+0301 is the single letter "é"
        let folded = text.nfc().collect::<String>().to_lowercase();
        let mut observed = TokenCounts::new();
        for word in self.words(&folded) {
            observed.record(word);
        }
        observed
    }

    /// Count `text` and merge the result into `store`, returning the merged
    /// counts. The store is overwritten with the merged contents.
    pub fn tokenize(
        &self,
        text: &str,
        store: &mut dyn TokenCountStore,
    ) -> AuditResult<TokenCounts> {
        let observed = self.count(text);
        let merged = store.merge(&observed)?;

        info!(
            "Tokenized {} recognized words ({} distinct); store {} now holds {} words",
            observed.total(),
            observed.len(),
            store.location(),
            merged.len()
        );

        Ok(merged)
    }
}
