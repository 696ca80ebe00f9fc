//! Configuration management for dochint.
//!
//! Looks for `.dochint/config.toml` in the project, then `~/.dochint/config.toml`,
//! and falls back to built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Effective dochint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub advisory: AdvisoryConfig,

    #[serde(default)]
    pub hook: HookConfig,
}

/// Where documentation lives and which files count as documentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Documentation root, relative to the working directory unless absolute.
    #[serde(default = "default_docs_root")]
    pub root: PathBuf,

    /// File extensions to scan, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Marker cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Marker directory. Defaults to `<temp>/dochint-cache`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Minutes before a shown advisory may be shown again.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
}

/// Relevance scoring knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Files larger than this many bytes are never scored.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// A document qualifies only with a score strictly above this.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_path_bonus")]
    pub path_bonus: f64,

    #[serde(default = "default_occurrence_weight")]
    pub occurrence_weight: f64,

    #[serde(default = "default_occurrence_cap")]
    pub occurrence_cap: usize,
}

/// Advisory text layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    #[serde(default = "default_header_keywords")]
    pub header_keywords: usize,
}

/// Which host tools trigger the matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookConfig {
    #[serde(default = "default_tools")]
    pub tools: Vec<String>,
}

fn default_docs_root() -> PathBuf {
    PathBuf::from("research")
}

fn default_extensions() -> Vec<String> {
    vec![
        "md".to_string(),
        "txt".to_string(),
        "rst".to_string(),
        "adoc".to_string(),
    ]
}

fn default_ttl_minutes() -> i64 {
    30
}

fn default_max_files() -> usize {
    5
}

fn default_max_file_size() -> u64 {
    50_000
}

fn default_threshold() -> f64 {
    0.5
}

fn default_path_bonus() -> f64 {
    5.0
}

fn default_occurrence_weight() -> f64 {
    0.2
}

fn default_occurrence_cap() -> usize {
    10
}

fn default_preview_chars() -> usize {
    1500
}

fn default_header_keywords() -> usize {
    8
}

fn default_tools() -> Vec<String> {
    vec![
        "Write".to_string(),
        "Edit".to_string(),
        "MultiEdit".to_string(),
        "Task".to_string(),
    ]
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            root: default_docs_root(),
            extensions: default_extensions(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_file_size: default_max_file_size(),
            threshold: default_threshold(),
            path_bonus: default_path_bonus(),
            occurrence_weight: default_occurrence_weight(),
            occurrence_cap: default_occurrence_cap(),
        }
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
            header_keywords: default_header_keywords(),
        }
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            tools: default_tools(),
        }
    }
}

impl CacheConfig {
    /// Marker directory, falling back to the system temp dir.
    pub fn dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("dochint-cache"))
    }

    /// Expiry window. Negative or out-of-range values are config errors.
    pub fn ttl(&self) -> Result<chrono::Duration, Error> {
        if self.ttl_minutes < 0 {
            return Err(Error::ConfigParse(format!(
                "cache.ttl_minutes must not be negative, got {}",
                self.ttl_minutes
            )));
        }
        chrono::Duration::try_minutes(self.ttl_minutes).ok_or_else(|| {
            Error::ConfigParse(format!(
                "cache.ttl_minutes out of range: {}",
                self.ttl_minutes
            ))
        })
    }
}

impl DocsConfig {
    /// Documentation root resolved against `work_root`.
    pub fn resolved_root(&self, work_root: &Path) -> PathBuf {
        if self.root.is_absolute() {
            self.root.clone()
        } else {
            work_root.join(&self.root)
        }
    }
}

impl Config {
    /// Project config path.
    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(".dochint").join("config.toml")
    }

    /// Global config path (~/.dochint/config.toml).
    pub fn global_path() -> Result<PathBuf, Error> {
        let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
        Ok(home.join(".dochint").join("config.toml"))
    }

    /// Load the project config, then the global one, else defaults.
    pub fn load(project_root: &Path) -> Result<Self, Error> {
        let project = Self::project_path(project_root);
        if project.exists() {
            return Self::load_from(&project);
        }

        match Self::global_path() {
            Ok(global) if global.exists() => Self::load_from(&global),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}
