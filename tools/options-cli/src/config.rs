//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use options_core::rules::NumberBounds;
use options_core::Currency;
use options_observability::{LogFormat, LogLevel};
use options_render::RenderConfig;
use serde::{Deserialize, Serialize};

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["options.toml", ".options.toml", "options.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where option sets come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Form rendering.
    #[serde(default)]
    pub render: RenderSection,

    /// Structured logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Problems with the configured values: `(errors, warnings)`.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let prefix = &self.render.class_prefix;
        if prefix.is_empty() {
            errors.push("render.class_prefix is required".to_string());
        } else if !prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            || prefix.starts_with(|c: char| c.is_ascii_digit())
        {
            errors.push(format!(
                "render.class_prefix '{}' is not a valid CSS class name",
                prefix
            ));
        }

        if Currency::from_code(&self.render.currency).is_none() {
            errors.push(format!(
                "render.currency '{}' is not a supported currency",
                self.render.currency
            ));
        }

        if self.render.number_min > self.render.number_max {
            errors.push("render.number_min must not exceed render.number_max".to_string());
        }

        if self.render.notice_ms < 500 {
            warnings.push(format!(
                "render.notice_ms {} is too short to read",
                self.render.notice_ms
            ));
        }

        if self.logging.level.parse::<LogLevel>().is_err() {
            errors.push(format!("logging.level '{}' is unknown", self.logging.level));
        }
        if self.logging.format.parse::<LogFormat>().is_err() {
            errors.push(format!("logging.format '{}' is unknown", self.logging.format));
        }

        if let Some(ref path) = self.catalog.path {
            if path.trim().is_empty() {
                warnings.push("catalog.path is empty".to_string());
            }
        }

        (errors, warnings)
    }

    /// Render configuration for the renderers.
    pub fn render_config(&self) -> Result<RenderConfig> {
        let currency = Currency::from_code(&self.render.currency)
            .ok_or_else(|| anyhow!("Unsupported currency: {}", self.render.currency))?;
        Ok(RenderConfig {
            class_prefix: self.render.class_prefix.clone(),
            currency,
            bounds: NumberBounds {
                min: self.render.number_min,
                max: self.render.number_max,
            },
            notice_ms: self.render.notice_ms,
        })
    }
}

/// Option set source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Default option sets file, relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `[render]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSection {
    /// CSS class prefix.
    #[serde(default = "default_prefix")]
    pub class_prefix: String,

    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Clamp notice duration in milliseconds.
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u32,

    /// Smallest accepted number option value.
    #[serde(default)]
    pub number_min: i64,

    /// Largest accepted number option value.
    #[serde(default = "default_number_max")]
    pub number_max: i64,
}

fn default_prefix() -> String {
    RenderConfig::default().class_prefix
}

fn default_currency() -> String {
    RenderConfig::default().currency.code().to_string()
}

fn default_notice_ms() -> u32 {
    RenderConfig::default().notice_ms
}

fn default_number_max() -> i64 {
    NumberBounds::default().max
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            class_prefix: default_prefix(),
            currency: default_currency(),
            notice_ms: default_notice_ms(),
            number_min: NumberBounds::default().min,
            number_max: default_number_max(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn, error.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: human or json.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "human".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Generate a default options.toml config file.
pub fn generate_default_config() -> String {
    r#"# Product options configuration

[catalog]
# path = "option-sets.json"

[render]
class_prefix = "po"
currency = "USD"
notice_ms = 2500
number_min = 0
number_max = 99

[logging]
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        let (errors, warnings) = config.check();
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
        assert_eq!(config.render_config().unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_check_reports_bad_values() {
        let config: CliConfig = toml::from_str(
            r#"
[render]
class_prefix = "9 bad"
currency = "XYZ"
number_min = 10
number_max = 5
notice_ms = 100

[logging]
level = "loud"
"#,
        )
        .unwrap();
        let (errors, warnings) = config.check();
        assert_eq!(errors.len(), 4);
        assert_eq!(warnings.len(), 1);
        assert!(config.render_config().is_err());
    }
}
