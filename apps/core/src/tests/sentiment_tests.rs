//! Sentiment Module Tests
//!
//! Lexicon loading policies, scoring invariants and report files.

use crate::analysis::{
    Classification, FileCountStore, Lexicon, MemoryCountStore, SentimentScorer, TokenCounts,
};
use crate::error::{AuditError, ResourceKind};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn counts(pairs: &[(&str, u64)]) -> TokenCounts {
    pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
}

#[cfg(test)]
mod scoring_tests {
    use super::*;

    #[test]
    fn test_repeated_positive_word() {
        let lexicon = Lexicon::parse("excelente: 5\n", Path::new("lexicon.txt")).unwrap();
        let scorer = SentimentScorer::new(lexicon);
        let store = MemoryCountStore::with_counts(counts(&[("excelente", 2)]));

        let result = scorer.score(&store).unwrap();
        assert_eq!(result.total_score, 10);
        assert_eq!(result.classification(), Classification::Positive);
        let top = result.top_positive.unwrap();
        assert_eq!((top.word.as_str(), top.score), ("excelente", 10));
    }

    #[test]
    fn test_empty_lexicon_is_neutral() {
        let scorer = SentimentScorer::new(Lexicon::new());
        let store = MemoryCountStore::with_counts(counts(&[
            ("excelente", 3),
            ("malo", 7),
            ("hola", 1),
        ]));

        let result = scorer.score(&store).unwrap();
        assert_eq!(result.total_score, 0);
        assert_eq!(result.classification(), Classification::Neutral);
        assert!(result.positive_contributions.is_empty());
        assert!(result.negative_contributions.is_empty());
        assert!(result.top_positive.is_none());
        assert!(result.top_negative.is_none());
    }

    #[test]
    fn test_total_is_order_independent() {
        let lexicon = Lexicon::parse(
            "bueno: 2\nmalo: -3\ngenial: 4\nterrible: -5\n",
            Path::new("lexicon.txt"),
        )
        .unwrap();
        let scorer = SentimentScorer::new(lexicon);
        let origin = Path::new("tokens.txt");

        let orderings = [
            "bueno,3\ngenial,1\nmalo,2\nterrible,1\n",
            "terrible,1\nmalo,2\ngenial,1\nbueno,3\n",
            "malo,2\nbueno,3\nterrible,1\ngenial,1\n",
        ];
        let totals: Vec<i64> = orderings
            .iter()
            .map(|content| {
                let parsed = TokenCounts::parse(content, origin).unwrap();
                scorer.score_counts(&parsed).unwrap().total_score
            })
            .collect();

        // 6 - 6 + 4 - 5
        assert_eq!(totals, vec![-1, -1, -1]);
    }

    #[test]
    fn test_total_equals_sum_of_contributions() {
        let lexicon = Lexicon::parse(
            "amable: 3\ngracias: 2\nqueja: -2\nnormal: 0\n",
            Path::new("lexicon.txt"),
        )
        .unwrap();
        let scorer = SentimentScorer::new(lexicon);
        let result = scorer.score_counts(&counts(&[
            ("amable", 2),
            ("gracias", 4),
            ("queja", 5),
            ("normal", 9),
            ("pedido", 3),
        ]))
        .unwrap();

        let sum: i64 = result
            .positive_contributions
            .values()
            .chain(result.negative_contributions.values())
            .sum();
        assert_eq!(result.total_score, sum);
        assert_eq!(result.total_score, 4);
        assert_eq!(result.negative_contributions.len(), 2);
    }

    #[test]
    fn test_duplicate_lexicon_key_uses_last_weight() {
        let lexicon =
            Lexicon::parse("rapido: 4\nrapido: -4\n", Path::new("lexicon.txt")).unwrap();
        let scorer = SentimentScorer::new(lexicon);
        let result = scorer.score_counts(&counts(&[("rapido", 1)])).unwrap();
        assert_eq!(result.total_score, -4);
        assert_eq!(result.classification(), Classification::Negative);
    }
}

#[cfg(test)]
mod resource_tests {
    use super::*;

    #[test]
    fn test_malformed_lexicon_fails_whole_load() {
        let dir = tempdir().unwrap();
        let lexicon_path = dir.path().join("lexicon.txt");
        fs::write(&lexicon_path, "bueno: 2\nexcelente-5\nmalo: -3\n").unwrap();

        let result = SentimentScorer::from_lexicon_file(&lexicon_path);
        assert!(matches!(
            result,
            Err(AuditError::MalformedLexicon { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_lexicon_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let scorer = SentimentScorer::from_lexicon_file(&dir.path().join("absent.txt")).unwrap();
        assert!(scorer.lexicon().is_empty());
    }

    #[test]
    fn test_missing_token_store_fails_without_report() {
        let dir = tempdir().unwrap();
        let scorer = SentimentScorer::new(Lexicon::new());
        let store = FileCountStore::new(dir.path().join("tokens").join("x_tokens.txt"));
        let report = dir.path().join("reports").join("x_sentimiento.txt");

        let err = scorer.score_to_report(&store, &report).unwrap_err();
        assert!(matches!(
            err,
            AuditError::MissingResource {
                kind: ResourceKind::TokenCounts,
                ..
            }
        ));
        assert!(!report.exists());
    }

    #[test]
    fn test_huge_count_fails_without_report() {
        let dir = tempdir().unwrap();
        let tokens = dir.path().join("tokens.txt");
        fs::write(&tokens, "excelente,9223372036854775808\n").unwrap();
        let lexicon = Lexicon::parse("excelente: 1\n", Path::new("l")).unwrap();
        let report = dir.path().join("reports").join("big_sentimiento.txt");

        let err = SentimentScorer::new(lexicon)
            .score_to_report(&FileCountStore::new(&tokens), &report)
            .unwrap_err();
        assert!(matches!(err, AuditError::ScoreOverflow { .. }));
        assert!(!report.exists());
    }

    #[test]
    fn test_report_written_from_file_store() {
        let dir = tempdir().unwrap();
        let tokens = dir.path().join("tokens.txt");
        fs::write(&tokens, "excelente,2\nhola,4\nmolesto,1\n").unwrap();
        let lexicon = Lexicon::parse("excelente: 5\nmolesto: -2\n", Path::new("l")).unwrap();
        let report = dir.path().join("reports").join("call_sentimiento.txt");

        let result = SentimentScorer::new(lexicon)
            .score_to_report(&FileCountStore::new(&tokens), &report)
            .unwrap();
        assert_eq!(result.total_score, 8);

        let written = fs::read_to_string(&report).unwrap();
        assert!(written.starts_with("=== Reporte de Análisis de Sentimiento ===\n\n"));
        assert!(written.contains("Sentimiento general: Positivo (8)\n"));
        assert!(written.contains("Palabra más positiva: excelente, 10\n"));
        assert!(written.contains("Palabra más negativa: molesto, -2\n"));
        assert!(written.contains("- excelente: +10\n"));
        assert!(written.ends_with("- molesto: -2\n"));
    }
}
