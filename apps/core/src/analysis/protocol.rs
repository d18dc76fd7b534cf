//! Protocol verification using phrase lists.
//!
//! Each protocol category has an ordered list of lowercase phrases. The
//! greeting, identification and closing phases are satisfied by the first
//! phrase of their list found in the transcript; the forbidden category
//! collects every phrase found and is satisfied only when none is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use super::report;
use crate::error::AuditResult;

/// Interaction phases checked in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolCategory {
    /// Opening greeting
    Greeting,
    /// Agent/customer identification
    Identification,
    /// Polite closing
    Closing,
    /// Forbidden (rude) language
    Forbidden,
}

impl fmt::Display for ProtocolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ProtocolCategory {
    /// Report order.
    pub const ALL: [ProtocolCategory; 4] = [
        ProtocolCategory::Greeting,
        ProtocolCategory::Identification,
        ProtocolCategory::Forbidden,
        ProtocolCategory::Closing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProtocolCategory::Greeting => "greeting",
            ProtocolCategory::Identification => "identification",
            ProtocolCategory::Closing => "closing",
            ProtocolCategory::Forbidden => "forbidden",
        }
    }

    /// Phrase list file name inside the protocol dictionary directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ProtocolCategory::Greeting => "saludos.txt",
            ProtocolCategory::Identification => "identificacion.txt",
            ProtocolCategory::Closing => "despedidas.txt",
            ProtocolCategory::Forbidden => "prohibidas.txt",
        }
    }
}

/// Load one phrase list: trimmed, case-folded, blank lines skipped.
/// A missing file is an empty list.
pub fn load_phrases(path: &Path) -> AuditResult<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse_phrases(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Phrase list not found at {:?}; category will be empty", path);
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn parse_phrases(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Phrase lists for all four categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseLists {
    pub greeting: Vec<String>,
    pub identification: Vec<String>,
    pub closing: Vec<String>,
    pub forbidden: Vec<String>,
}

impl PhraseLists {
    /// Load every category from `dir` (see [`ProtocolCategory::file_name`]).
    pub fn load_dir(dir: &Path) -> AuditResult<Self> {
        let lists = Self {
            greeting: load_phrases(&dir.join(ProtocolCategory::Greeting.file_name()))?,
            identification: load_phrases(&dir.join(ProtocolCategory::Identification.file_name()))?,
            closing: load_phrases(&dir.join(ProtocolCategory::Closing.file_name()))?,
            forbidden: load_phrases(&dir.join(ProtocolCategory::Forbidden.file_name()))?,
        };
        debug!(
            "Loaded phrase lists from {:?}: greeting={}, identification={}, closing={}, forbidden={}",
            dir,
            lists.greeting.len(),
            lists.identification.len(),
            lists.closing.len(),
            lists.forbidden.len()
        );
        Ok(lists)
    }

    pub fn phrases(&self, category: ProtocolCategory) -> &[String] {
        match category {
            ProtocolCategory::Greeting => &self.greeting,
            ProtocolCategory::Identification => &self.identification,
            ProtocolCategory::Closing => &self.closing,
            ProtocolCategory::Forbidden => &self.forbidden,
        }
    }
}

/// Verdict for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCheck {
    pub satisfied: bool,
    /// Matching phrase(s); empty when nothing matched.
    pub evidence: Vec<String>,
}

impl CategoryCheck {
    /// First evidence phrase, if any.
    pub fn phrase(&self) -> Option<&str> {
        self.evidence.first().map(String::as_str)
    }
}

/// Verdicts for all categories of one transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolResult {
    pub greeting: CategoryCheck,
    pub identification: CategoryCheck,
    pub closing: CategoryCheck,
    pub forbidden: CategoryCheck,
}

impl ProtocolResult {
    pub fn check(&self, category: ProtocolCategory) -> &CategoryCheck {
        match category {
            ProtocolCategory::Greeting => &self.greeting,
            ProtocolCategory::Identification => &self.identification,
            ProtocolCategory::Closing => &self.closing,
            ProtocolCategory::Forbidden => &self.forbidden,
        }
    }

    /// True when every category is satisfied.
    pub fn is_compliant(&self) -> bool {
        ProtocolCategory::ALL
            .iter()
            .all(|category| self.check(*category).satisfied)
    }

    /// Plain-text report, one line per category.
    pub fn render(&self) -> String {
        let mut out = String::from("=== Reporte de Verificación de Protocolos ===\n\n");
        out.push_str(&phase_line("Fase de saludo", &self.greeting));
        out.push_str(&phase_line("Identificación del cliente", &self.identification));

        out.push_str("Uso de palabras rudas: ");
        if self.forbidden.satisfied {
            out.push_str("Ninguna detectada");
        } else {
            out.push_str(&format!(
                "Detectadas (Palabras encontradas: {})",
                self.forbidden.evidence.join(", ")
            ));
        }
        out.push('\n');

        out.push_str(&phase_line("Despedida amable", &self.closing));
        out
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        let failed: Vec<&str> = ProtocolCategory::ALL
            .iter()
            .filter(|c| !self.check(**c).satisfied)
            .map(|c| c.label())
            .collect();
        if failed.is_empty() {
            "Protocol: compliant".to_string()
        } else {
            format!("Protocol: failed [{}]", failed.join(", "))
        }
    }
}

fn phase_line(title: &str, check: &CategoryCheck) -> String {
    match (check.satisfied, check.phrase()) {
        (true, Some(phrase)) => format!("{}: OK (Palabra encontrada: '{}')\n", title, phrase),
        (true, None) => format!("{}: OK\n", title),
        (false, _) => format!("{}: Faltante\n", title),
    }
}

/// Checks transcripts against the protocol phrase lists.
pub struct ProtocolVerifier {
    phrases: PhraseLists,
}

impl ProtocolVerifier {
    pub fn new(phrases: PhraseLists) -> Self {
        Self { phrases }
    }

    /// Load phrase lists from a directory; missing files leave their category empty.
    pub fn from_dir(dir: &Path) -> AuditResult<Self> {
        Ok(Self::new(PhraseLists::load_dir(dir)?))
    }

    pub fn phrases(&self) -> &PhraseLists {
        &self.phrases
    }

    /// First phrase of `phrases`, in list order, contained in `text`.
    fn first_match(text: &str, phrases: &[String]) -> CategoryCheck {
        match phrases.iter().find(|phrase| text.contains(phrase.as_str())) {
            Some(phrase) => CategoryCheck {
                satisfied: true,
                evidence: vec![phrase.clone()],
            },
            None => CategoryCheck::default(),
        }
    }

    /// Every phrase of `phrases` contained in `text`; satisfied when none is.
    fn no_match(text: &str, phrases: &[String]) -> CategoryCheck {
        let found: Vec<String> = phrases
            .iter()
            .filter(|phrase| text.contains(phrase.as_str()))
            .cloned()
            .collect();
        CategoryCheck {
            satisfied: found.is_empty(),
            evidence: found,
        }
    }

    pub fn verify(&self, transcript: &str) -> ProtocolResult {
        let text = transcript.to_lowercase();
        let result = ProtocolResult {
            greeting: Self::first_match(&text, &self.phrases.greeting),
            identification: Self::first_match(&text, &self.phrases.identification),
            closing: Self::first_match(&text, &self.phrases.closing),
            forbidden: Self::no_match(&text, &self.phrases.forbidden),
        };
        info!("{}", result.summary());
        result
    }

    /// Verify and write the protocol report to `report_path`.
    pub fn verify_to_report(&self, transcript: &str, report_path: &Path) -> AuditResult<ProtocolResult> {
        let result = self.verify(transcript);
        report::write_report(report_path, &result.render())?;
        Ok(result)
    }
}
