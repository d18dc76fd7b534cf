use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory layout of the audit outputs.
///
/// ```text
/// <output>/transcripts/<name>.txt
/// <output>/tokens/<name>_tokens.txt
/// <output>/reports/<name>_sentimiento.txt
/// <output>/reports/<name>_protocolos.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    output_dir: PathBuf,
}

impl PathLayout {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Root output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Transcripts directory (./outputs/transcripts).
    pub fn transcripts_dir(&self) -> PathBuf {
        self.output_dir.join("transcripts")
    }

    /// Token stores directory (./outputs/tokens).
    pub fn tokens_dir(&self) -> PathBuf {
        self.output_dir.join("tokens")
    }

    /// Reports directory (./outputs/reports).
    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir.join("reports")
    }

    pub fn transcript_path(&self, name: &str) -> PathBuf {
        self.transcripts_dir().join(format!("{}.txt", name))
    }

    pub fn tokens_path(&self, name: &str) -> PathBuf {
        self.tokens_dir().join(format!("{}_tokens.txt", name))
    }

    pub fn sentiment_report_path(&self, name: &str) -> PathBuf {
        self.reports_dir().join(format!("{}_sentimiento.txt", name))
    }

    pub fn protocol_report_path(&self, name: &str) -> PathBuf {
        self.reports_dir().join(format!("{}_protocolos.txt", name))
    }

    /// Creates the transcripts, tokens and reports directories if they don't exist.
    pub fn init(&self) -> Result<(), std::io::Error> {
        for dir in [self.transcripts_dir(), self.tokens_dir(), self.reports_dir()] {
            if !dir.exists() {
                info!("Creating output directory: {:?}", dir);
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
