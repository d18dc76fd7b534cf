//! Runtime configuration from environment variables (optionally via `.env`).
//!
//! | Variable                  | Default                                             |
//! |---------------------------|-----------------------------------------------------|
//! | `CALLAUDIT_BASE_DIR`      | `.`                                                 |
//! | `CALLAUDIT_WORD_LIST`     | `data/diccionarios/es_words.txt`                    |
//! | `CALLAUDIT_LEXICON`       | `data/diccionarios/palabras_positivas-negativas.txt` |
//! | `CALLAUDIT_PROTOCOLS_DIR` | `data/diccionarios/protocolos`                      |
//! | `CALLAUDIT_OUTPUT_DIR`    | `outputs`                                           |
//! | `CALLAUDIT_LOG_FORMAT`    | `pretty` (or `json`)                                |
//!
//! Relative paths resolve against the base directory.

use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use validator::Validate;

use crate::error::{AuditError, AuditResult};
use crate::paths::PathLayout;

const DEFAULT_WORD_LIST: &str = "data/diccionarios/es_words.txt";
const DEFAULT_LEXICON: &str = "data/diccionarios/palabras_positivas-negativas.txt";
const DEFAULT_PROTOCOLS_DIR: &str = "data/diccionarios/protocolos";
const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Log output flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines on stderr
    #[default]
    Pretty,
    /// Bunyan-style JSON lines on stderr
    Json,
}

impl FromStr for LogFormat {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AuditError::Config(format!(
                "unknown log format '{}' (expected 'pretty' or 'json')",
                other
            ))),
        }
    }
}

/// Locations of every resource the audit reads or writes.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AuditConfig {
    #[validate(length(min = 1))]
    pub base_dir: String,
    #[validate(length(min = 1))]
    pub word_list: String,
    #[validate(length(min = 1))]
    pub lexicon: String,
    #[validate(length(min = 1))]
    pub protocols_dir: String,
    #[validate(length(min = 1))]
    pub output_dir: String,
    pub log_format: LogFormat,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
            word_list: DEFAULT_WORD_LIST.to_string(),
            lexicon: DEFAULT_LEXICON.to_string(),
            protocols_dir: DEFAULT_PROTOCOLS_DIR.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AuditConfig {
    /// Load `.env` (if present) and read the configuration from the environment.
    pub fn load() -> AuditResult<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Read the configuration from the current environment only.
    pub fn from_env() -> AuditResult<Self> {
        let defaults = Self::default();
        let config = Self {
            base_dir: var_or("CALLAUDIT_BASE_DIR", &defaults.base_dir),
            word_list: var_or("CALLAUDIT_WORD_LIST", &defaults.word_list),
            lexicon: var_or("CALLAUDIT_LEXICON", &defaults.lexicon),
            protocols_dir: var_or("CALLAUDIT_PROTOCOLS_DIR", &defaults.protocols_dir),
            output_dir: var_or("CALLAUDIT_OUTPUT_DIR", &defaults.output_dir),
            log_format: match env::var("CALLAUDIT_LOG_FORMAT") {
                Ok(value) => value.parse()?,
                Err(_) => LogFormat::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration rooted at `base_dir` with default relative locations.
    pub fn with_base_dir(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.display().to_string(),
            ..Self::default()
        }
    }

    fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.base_dir).join(path)
        }
    }

    pub fn word_list_path(&self) -> PathBuf {
        self.resolve(&self.word_list)
    }

    pub fn lexicon_path(&self) -> PathBuf {
        self.resolve(&self.lexicon)
    }

    pub fn protocols_dir_path(&self) -> PathBuf {
        self.resolve(&self.protocols_dir)
    }

    pub fn layout(&self) -> PathLayout {
        PathLayout::new(self.resolve(&self.output_dir))
    }
}
