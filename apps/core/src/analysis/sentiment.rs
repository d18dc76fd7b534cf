//! Dictionary-weighted sentiment scoring.
//!
//! Every counted word found in the lexicon contributes `weight × count` to the
//! total. Words with a positive weight go to the positive bucket; all others
//! (including zero-weight words) go to the negative bucket.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::info;

use super::counts::{TokenCountStore, TokenCounts};
use super::lexicon::Lexicon;
use super::report;
use crate::error::{AuditError, AuditResult, ResourceKind};

/// Overall polarity of a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Positive,
    Negative,
    Neutral,
}

impl Classification {
    pub fn from_score(total: i64) -> Self {
        match total {
            t if t > 0 => Classification::Positive,
            t if t < 0 => Classification::Negative,
            _ => Classification::Neutral,
        }
    }

    /// Returns the programmatic label
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Positive => "Positive",
            Classification::Negative => "Negative",
            Classification::Neutral => "Neutral",
        }
    }

    /// Label used in the written report
    pub fn report_label(&self) -> &'static str {
        match self {
            Classification::Positive => "Positivo",
            Classification::Negative => "Negativo",
            Classification::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A word together with its total contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub score: i64,
}

/// Outcome of one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub total_score: i64,
    pub positive_contributions: BTreeMap<String, i64>,
    pub negative_contributions: BTreeMap<String, i64>,
    pub top_positive: Option<WordScore>,
    pub top_negative: Option<WordScore>,
}

impl SentimentResult {
    pub fn classification(&self) -> Classification {
        Classification::from_score(self.total_score)
    }

    /// Positive words, highest contribution first. Ties keep word order.
    pub fn positive_ranked(&self) -> Vec<WordScore> {
        let mut ranked = to_word_scores(&self.positive_contributions);
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Negative words, most negative first. Ties keep word order.
    pub fn negative_ranked(&self) -> Vec<WordScore> {
        let mut ranked = to_word_scores(&self.negative_contributions);
        ranked.sort_by(|a, b| a.score.cmp(&b.score));
        ranked
    }

    /// Plain-text report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Reporte de Análisis de Sentimiento ===\n\n");
        out.push_str(&format!(
            "Sentimiento general: {} ({})\n",
            self.classification().report_label(),
            self.total_score
        ));
        out.push_str(&format!(
            "Palabras positivas: {}\n",
            self.positive_contributions.len()
        ));
        if let Some(top) = &self.top_positive {
            out.push_str(&format!("Palabra más positiva: {}, {}\n", top.word, top.score));
        }
        out.push_str(&format!(
            "Palabras negativas: {}\n",
            self.negative_contributions.len()
        ));
        if let Some(top) = &self.top_negative {
            out.push_str(&format!("Palabra más negativa: {}, {}\n", top.word, top.score));
        }

        out.push_str("\nDetalle palabras positivas:\n");
        for entry in self.positive_ranked() {
            out.push_str(&format!("- {}: +{}\n", entry.word, entry.score));
        }

        out.push_str("\nDetalle palabras negativas:\n");
        for entry in self.negative_ranked() {
            out.push_str(&format!("- {}: {}\n", entry.word, entry.score));
        }
        out
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "Sentiment: {} ({}), positive words: {}, negative words: {}",
            self.classification(),
            self.total_score,
            self.positive_contributions.len(),
            self.negative_contributions.len()
        )
    }
}

fn to_word_scores(map: &BTreeMap<String, i64>) -> Vec<WordScore> {
    map.iter()
        .map(|(word, score)| WordScore {
            word: word.clone(),
            score: *score,
        })
        .collect()
}

/// Add `value` to the running total of `word`, starting from zero.
fn add_contribution(
    bucket: &mut BTreeMap<String, i64>,
    word: &str,
    value: i64,
) -> AuditResult<()> {
    let slot = bucket.entry(word.to_string()).or_insert(0);
    *slot = slot
        .checked_add(value)
        .ok_or_else(|| AuditError::ScoreOverflow { word: word.to_string() })?;
    Ok(())
}

/// `weight × count`, failing instead of wrapping.
fn contribution_of(word: &str, weight: i64, count: u64) -> AuditResult<i64> {
    i64::try_from(count)
        .ok()
        .and_then(|count| weight.checked_mul(count))
        .ok_or_else(|| AuditError::ScoreOverflow { word: word.to_string() })
}

/// Scores token counts against a lexicon.
pub struct SentimentScorer {
    lexicon: Lexicon,
}

impl SentimentScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Load the lexicon from `path` (missing file → empty lexicon).
    pub fn from_lexicon_file(path: &Path) -> AuditResult<Self> {
        Ok(Self::new(Lexicon::load(path)?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score in-memory counts. Words are visited in ascending order; the first
    /// word reaching a top value keeps it on ties. Fails with
    /// [`AuditError::ScoreOverflow`] when a score leaves the `i64` range.
    pub fn score_counts(&self, counts: &TokenCounts) -> AuditResult<SentimentResult> {
        let mut result = SentimentResult::default();

        for (word, count) in counts.iter() {
            let Some(weight) = self.lexicon.weight(word) else {
                continue;
            };
            let contribution = contribution_of(word, weight, count)?;
            result.total_score = result
                .total_score
                .checked_add(contribution)
                .ok_or_else(|| AuditError::ScoreOverflow { word: word.to_string() })?;

            if weight > 0 {
                add_contribution(&mut result.positive_contributions, word, contribution)?;
                let current = result.top_positive.as_ref().map_or(0, |t| t.score);
                if contribution > current {
                    result.top_positive = Some(WordScore {
                        word: word.to_string(),
                        score: contribution,
                    });
                }
            } else {
                add_contribution(&mut result.negative_contributions, word, contribution)?;
                let current = result.top_negative.as_ref().map_or(0, |t| t.score);
                if contribution < current {
                    result.top_negative = Some(WordScore {
                        word: word.to_string(),
                        score: contribution,
                    });
                }
            }
        }

        Ok(result)
    }

    /// Score the contents of `store`. A store that has never been written is
    /// fatal: there is nothing to score.
    pub fn score(&self, store: &dyn TokenCountStore) -> AuditResult<SentimentResult> {
        let counts = store.load()?.ok_or_else(|| AuditError::MissingResource {
            kind: ResourceKind::TokenCounts,
            path: store.location().into(),
        })?;
        let result = self.score_counts(&counts)?;
        info!("{}", result.summary());
        Ok(result)
    }

    /// Score `store` and write the report to `report_path`. Nothing is
    /// written when scoring fails.
    pub fn score_to_report(
        &self,
        store: &dyn TokenCountStore,
        report_path: &Path,
    ) -> AuditResult<SentimentResult> {
        let result = self.score(store)?;
        report::write_report(report_path, &result.render())?;
        Ok(result)
    }
}
