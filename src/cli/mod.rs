//! CLI commands for dochint.

pub mod config;
pub mod explain;
pub mod hook;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::error::Error;

/// dochint - surface relevant local documentation once per edit
#[derive(Parser)]
#[command(name = "dochint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct Settings {
    /// Config file to use instead of the project/global lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Documentation root (overrides config)
    #[arg(long, global = true)]
    pub docs_root: Option<PathBuf>,

    /// Marker cache directory (overrides config)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a hook request read from stdin (exit 2 = intercept)
    Hook,

    /// Show keywords and matching docs for a file, without caching
    Explain {
        /// File whose path and contents are matched
        path: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

impl Settings {
    /// Load config and apply command-line overrides.
    ///
    /// Returns the config and the working root it resolves against.
    pub fn load(&self) -> Result<(Config, PathBuf), Error> {
        let work_root = std::env::current_dir()?;

        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load(&work_root)?,
        };

        if let Some(root) = &self.docs_root {
            config.docs.root = root.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.cache.dir = Some(dir.clone());
        }

        Ok((config, work_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dochint",
            "hook",
            "--docs-root",
            "notes",
            "--cache-dir",
            "/tmp/markers",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Hook));
        assert_eq!(cli.settings.docs_root, Some(PathBuf::from("notes")));
        assert_eq!(cli.settings.cache_dir, Some(PathBuf::from("/tmp/markers")));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[docs]\nroot = \"from-file\"\n").unwrap();

        let settings = Settings {
            config: Some(path),
            docs_root: Some(PathBuf::from("from-flag")),
            cache_dir: None,
        };
        let (config, _) = settings.load().unwrap();
        assert_eq!(config.docs.root, PathBuf::from("from-flag"));
        assert!(config.cache.dir.is_none());
    }
}
