//! Sentiment lexicon: word → signed integer weight.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{AuditError, AuditResult};

/// Weighted sentiment vocabulary. Loaded fresh for each analysis.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    weights: HashMap<String, i64>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a lexicon file. A missing file yields an empty lexicon (logged);
    /// any malformed line rejects the whole file.
    pub fn load(path: &Path) -> AuditResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Sentiment lexicon not found at {:?}; scoring with an empty lexicon",
                    path
                );
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let lexicon = Self::parse(&content, path)?;
        info!("Loaded {} lexicon entries from {:?}", lexicon.len(), path);
        Ok(lexicon)
    }

    /// Parse `word: weight` lines. Exactly one `:` per line; a repeated word
    /// takes the weight of its last occurrence.
    pub fn parse(content: &str, origin: &Path) -> AuditResult<Self> {
        let mut weights = HashMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = |reason: &str| AuditError::MalformedLexicon {
                path: origin.to_path_buf(),
                line: idx + 1,
                content: line.to_string(),
                reason: reason.to_string(),
            };

            let mut parts = line.split(':');
            let (word, weight) = match (parts.next(), parts.next(), parts.next()) {
                (Some(word), Some(weight), None) => (word.trim(), weight.trim()),
                (_, None, _) => return Err(malformed("missing ':' delimiter")),
                _ => return Err(malformed("more than one ':' delimiter")),
            };
            if word.is_empty() {
                return Err(malformed("empty word"));
            }
            let weight: i64 = weight
                .parse()
                .map_err(|_| malformed("weight is not an integer"))?;

            if let Some(previous) = weights.insert(word.to_string(), weight) {
                warn!(
                    "Duplicate lexicon entry '{}' at line {} ({} replaces {})",
                    word,
                    idx + 1,
                    weight,
                    previous
                );
            }
        }

        Ok(Self { weights })
    }

    /// Weight of `word`, if it is part of the lexicon.
    pub fn weight(&self, word: &str) -> Option<i64> {
        self.weights.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl FromIterator<(String, i64)> for Lexicon {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(content: &str) -> AuditResult<Lexicon> {
        Lexicon::parse(content, Path::new("lexicon.txt"))
    }

    #[test]
    fn test_parse_trims_and_signs() {
        let lexicon = parse("excelente: 5\n  malo :-3 \n\nbien:+2\n").unwrap();
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.weight("excelente"), Some(5));
        assert_eq!(lexicon.weight("malo"), Some(-3));
        assert_eq!(lexicon.weight("bien"), Some(2));
        assert_eq!(lexicon.weight("regular"), None);
    }

    #[test]
    fn test_missing_delimiter_is_fatal() {
        let err = parse("bueno: 2\nexcelente-5\n").unwrap_err();
        match err {
            AuditError::MalformedLexicon { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "excelente-5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_integer_weight_is_fatal() {
        assert!(matches!(
            parse("bueno: dos"),
            Err(AuditError::MalformedLexicon { line: 1, .. })
        ));
        assert!(matches!(
            parse("bueno: 2.5"),
            Err(AuditError::MalformedLexicon { .. })
        ));
    }

    #[test]
    fn test_extra_delimiter_is_fatal() {
        assert!(matches!(
            parse("hora: 10:30"),
            Err(AuditError::MalformedLexicon { .. })
        ));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let lexicon = parse("genial: 3\ngenial: -1\n").unwrap();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.weight("genial"), Some(-1));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let lexicon = Lexicon::load(&dir.path().join("absent.txt")).unwrap();
        assert!(lexicon.is_empty());
    }
}
