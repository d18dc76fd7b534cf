//! Token count store.
//!
//! Word frequencies accumulate across transcripts: every tokenization run adds
//! its observations to whatever the store already holds. The on-disk format is
//! one `word,count` pair per line, sorted by word.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{AuditError, AuditResult};

/// Word → occurrence count. Iterates in ascending word order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenCounts {
    counts: BTreeMap<String, u64>,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment `word` by one.
    pub fn record(&mut self, word: &str) {
        self.add(word, 1);
    }

    /// Add `count` occurrences of `word`. Saturates at `u64::MAX`.
    pub fn add(&mut self, word: &str, count: u64) {
        let slot = self.counts.entry(word.to_string()).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    /// Additively merge `other` into `self`.
    pub fn merge(&mut self, other: &TokenCounts) {
        for (word, count) in other.iter() {
            self.add(word, count);
        }
    }

    /// Count for `word`, zero when unseen. Never inserts.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Serialize as `word,count` lines.
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for (word, count) in self.iter() {
            out.push_str(word);
            out.push(',');
            out.push_str(&count.to_string());
            out.push('\n');
        }
        out
    }

    /// Parse `word,count` lines. Blank lines are skipped; a repeated word keeps
    /// its last count. `origin` only labels errors.
    pub fn parse(content: &str, origin: &Path) -> AuditResult<Self> {
        let mut counts = TokenCounts::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || AuditError::MalformedCounts {
                path: origin.to_path_buf(),
                line: idx + 1,
                content: line.to_string(),
            };
            let (word, count) = line.split_once(',').ok_or_else(malformed)?;
            let word = word.trim();
            if word.is_empty() {
                return Err(malformed());
            }
            let count: u64 = count.trim().parse().map_err(|_| malformed())?;
            if counts.counts.insert(word.to_string(), count).is_some() {
                warn!("Word '{}' repeated in {:?}, keeping line {}", word, origin, idx + 1);
            }
        }
        Ok(counts)
    }
}

impl FromIterator<(String, u64)> for TokenCounts {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = TokenCounts::new();
        for (word, count) in iter {
            counts.add(&word, count);
        }
        counts
    }
}

/// Persistence seam for token counts.
pub trait TokenCountStore {
    /// Current contents, or `None` when the store has never been written.
    fn load(&self) -> AuditResult<Option<TokenCounts>>;

    /// Replace the stored contents.
    fn save(&mut self, counts: &TokenCounts) -> AuditResult<()>;

    /// Human-readable location, for logs and errors.
    fn location(&self) -> String;

    /// Add `observed` to the stored counts, persist, and return the merged result.
    /// An absent store merges as empty.
    fn merge(&mut self, observed: &TokenCounts) -> AuditResult<TokenCounts> {
        let mut merged = self.load()?.unwrap_or_default();
        merged.merge(observed);
        self.save(&merged)?;
        Ok(merged)
    }
}

/// Token counts persisted as a text file.
#[derive(Debug, Clone)]
pub struct FileCountStore {
    path: PathBuf,
}

impl FileCountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenCountStore for FileCountStore {
    fn load(&self) -> AuditResult<Option<TokenCounts>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => TokenCounts::parse(&content, &self.path).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, counts: &TokenCounts) -> AuditResult<()> {
        write_atomically(&self.path, counts.to_lines().as_bytes())?;
        debug!("Saved {} token counts to {:?}", counts.len(), self.path);
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Volatile store, for callers that do not want token counts on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryCountStore {
    counts: Option<TokenCounts>,
}

impl MemoryCountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `counts`.
    pub fn with_counts(counts: TokenCounts) -> Self {
        Self {
            counts: Some(counts),
        }
    }
}

impl TokenCountStore for MemoryCountStore {
    fn load(&self) -> AuditResult<Option<TokenCounts>> {
        Ok(self.counts.clone())
    }

    fn save(&mut self, counts: &TokenCounts) -> AuditResult<()> {
        self.counts = Some(counts.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

/// Write `bytes` to `path` through a temp file in the same directory, creating
/// the directory if needed.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> AuditResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        writer.write_all(bytes)?;
        writer.flush()?;
    }
    temp_file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn counts(pairs: &[(&str, u64)]) -> TokenCounts {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_lines_are_sorted() {
        let c = counts(&[("zapato", 1), ("amable", 3), ("hola", 2)]);
        assert_eq!(c.to_lines(), "amable,3\nhola,2\nzapato,1\n");
    }

    #[test]
    fn test_parse_keeps_last_duplicate_and_skips_blanks() {
        let parsed = TokenCounts::parse("hola,2\n\nhola,3\nadios,1\n", Path::new("t")).unwrap();
        assert_eq!(parsed.get("hola"), 3);
        assert_eq!(parsed.get("adios"), 1);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_parse_rejects_bad_line() {
        let err = TokenCounts::parse("hola,2\nsin-coma\n", Path::new("t")).unwrap_err();
        assert!(matches!(err, AuditError::MalformedCounts { line: 2, .. }));

        let err = TokenCounts::parse("hola,-1\n", Path::new("t")).unwrap_err();
        assert!(matches!(err, AuditError::MalformedCounts { line: 1, .. }));
    }

    #[test]
    fn test_add_saturates() {
        let mut c = counts(&[("hola", u64::MAX - 1)]);
        c.add("hola", 5);
        assert_eq!(c.get("hola"), u64::MAX);
    }

    #[test]
    fn test_get_does_not_insert() {
        let c = TokenCounts::new();
        assert_eq!(c.get("nada"), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn test_file_store_absent_loads_none() {
        let dir = tempdir().unwrap();
        let store = FileCountStore::new(dir.path().join("tokens.txt"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_merge_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("tokens").join("a_tokens.txt");
        let mut store = FileCountStore::new(&path);

        let merged = store.merge(&counts(&[("hola", 1)])).unwrap();
        assert_eq!(merged.get("hola"), 1);

        let merged = store.merge(&counts(&[("hola", 2), ("gracias", 1)])).unwrap();
        assert_eq!(merged.get("hola"), 3);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "gracias,1\nhola,3\n"
        );
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryCountStore::new();
        assert!(store.load().unwrap().is_none());
        store.merge(&counts(&[("bien", 2)])).unwrap();
        assert_eq!(store.load().unwrap().unwrap().get("bien"), 2);
        assert_eq!(store.location(), "<memory>");
    }
}
