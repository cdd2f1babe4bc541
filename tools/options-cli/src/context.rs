//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use options_core::catalog::OptionCatalog;
use options_observability::{LogFormat, LogLevel, RequestId, StructuredLogger};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Logger configured from `[logging]`; `--verbose` lowers the level to debug.
    pub fn logger(&self, component: &str) -> StructuredLogger {
        let level = if self.output.is_verbose() {
            LogLevel::Debug
        } else {
            self.config.logging.level.parse().unwrap_or(LogLevel::Warn)
        };
        let format = self
            .config
            .logging
            .format
            .parse()
            .unwrap_or(LogFormat::Human);

        StructuredLogger::new(RequestId::generate())
            .with_component(component)
            .with_min_level(level)
            .with_format(format)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The option sets file: the argument, else `catalog.path` from config.
    pub fn catalog_path(&self, arg: Option<&str>) -> Result<PathBuf> {
        match arg.or(self.config.catalog.path.as_deref()) {
            Some(path) => Ok(self.resolve_path(path)),
            None => bail!("No option sets file given and catalog.path is not configured"),
        }
    }

    /// Read and parse an option sets file.
    pub async fn load_catalog(&self, arg: Option<&str>) -> Result<OptionCatalog> {
        let path = self.catalog_path(arg)?;
        self.output.debug(&format!("Loading option sets from {}", path.display()));

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read option sets: {}", path.display()))?;
        OptionCatalog::from_json(&content)
            .with_context(|| format!("Failed to parse option sets: {}", path.display()))
    }
}
