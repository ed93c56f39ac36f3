//! Tokensmith configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tokensmith_scss::{FileHeader, RenderMode, ThemePartition};
use tokensmith_tokens::{BrokenReferencePolicy, TokenFilter};

pub const CONFIG_FILE: &str = "tokensmith.toml";

/// Top-level Tokensmith configuration (tokensmith.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct TokensmithConfig {
    /// Source globs, relative to the config directory
    #[serde(default = "default_source")]
    pub source: Vec<String>,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformConfig>,
}

fn default_source() -> Vec<String> {
    vec!["sources/*.json".to_string()]
}

/// How warnings are surfaced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    #[default]
    Warn,
    /// Any warning fails the build
    Error,
    Disabled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Silent,
    #[default]
    Default,
    Verbose,
}

impl Verbosity {
    /// Default `EnvFilter` directive for this verbosity
    pub fn filter(self) -> &'static str {
        match self {
            Verbosity::Silent => "error",
            Verbosity::Default => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Logging and error policy
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default)]
    pub warnings: WarningLevel,
    #[serde(default)]
    pub verbosity: Verbosity,
    #[serde(default)]
    pub broken_references: BrokenReferencePolicy,
}

/// Generated-file header
#[derive(Debug, Deserialize, Serialize)]
pub struct HeaderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Offset from UTC for the `created at` timestamp
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
}

fn default_true() -> bool {
    true
}

fn default_utc_offset() -> i32 {
    9
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            utc_offset_hours: default_utc_offset(),
        }
    }
}

impl HeaderConfig {
    pub fn file_header(&self) -> Result<Option<FileHeader>> {
        if !self.enabled {
            return Ok(None);
        }
        FileHeader::with_utc_offset_hours(self.utc_offset_hours)
            .map(Some)
            .with_context(|| {
                format!(
                    "header.utc_offset_hours = {} is out of range",
                    self.utc_offset_hours
                )
            })
    }
}

/// One output platform (a build directory and its files)
#[derive(Debug, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Output directory, relative to the config directory
    #[serde(default = "default_build_path")]
    pub build_path: String,
    #[serde(default)]
    pub files: Vec<FileConfig>,
}

fn default_build_path() -> String {
    "tokens/".to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Flat,
    Theme,
    Composite,
}

/// One generated file
#[derive(Debug, Deserialize, Serialize)]
pub struct FileConfig {
    pub destination: String,
    #[serde(default)]
    pub format: FileFormat,
    /// Partition key / theme name; derived from `destination` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Source-file substring filter, overriding the partition-derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Token-name prefix filter; takes precedence over the source filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    /// Themes of a composite file, in output order
    #[serde(default = "default_themes", skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
    /// Core partition of a composite file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<String>,
}

fn default_themes() -> Vec<String> {
    vec!["light".to_string(), "dark".to_string()]
}

impl FileConfig {
    pub fn new(destination: &str, format: FileFormat) -> Self {
        Self {
            destination: destination.to_string(),
            format,
            partition: None,
            filter: None,
            name_prefix: None,
            themes: Vec::new(),
            core: None,
        }
    }

    /// `tokens.light.scss` -> `light`; `core.scss` -> `core`
    pub fn partition(&self) -> String {
        if let Some(partition) = &self.partition {
            return partition.clone();
        }
        let parts: Vec<&str> = self.destination.split('.').collect();
        if parts.len() >= 3 {
            return parts[1].to_string();
        }
        Path::new(&self.destination)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.destination.clone())
    }

    fn source_filter(&self) -> TokenFilter {
        if let Some(prefix) = &self.name_prefix {
            return TokenFilter::NamePrefix(prefix.clone());
        }
        TokenFilter::source(self.filter.clone().unwrap_or_else(|| self.partition()))
    }

    pub fn render_mode(&self) -> RenderMode {
        match self.format {
            FileFormat::Flat => RenderMode::Flat {
                filter: self.source_filter(),
            },
            FileFormat::Theme => RenderMode::Theme(
                ThemePartition::new(self.partition()).with_filter(self.source_filter()),
            ),
            FileFormat::Composite => {
                let themes = if self.themes.is_empty() {
                    default_themes()
                } else {
                    self.themes.clone()
                };
                RenderMode::Composite {
                    themes: themes.into_iter().map(ThemePartition::new).collect(),
                    core: TokenFilter::source(self.core.as_deref().unwrap_or("core")),
                }
            }
        }
    }
}

impl TokensmithConfig {
    /// Load configuration from a directory (looks for tokensmith.toml) or a file path
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = config_path(path);

        if !config_path.exists() {
            anyhow::bail!(
                "No {CONFIG_FILE} found in {}. Run `tokensmith init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: TokensmithConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Starter configuration: core, light and dark outputs under `tokens/`
    pub fn starter() -> Self {
        let mut platforms = BTreeMap::new();
        platforms.insert(
            "scss".to_string(),
            PlatformConfig {
                build_path: default_build_path(),
                files: vec![
                    FileConfig::new("tokens.core.scss", FileFormat::Flat),
                    FileConfig::new("tokens.light.scss", FileFormat::Theme),
                    FileConfig::new("tokens.dark.scss", FileFormat::Theme),
                ],
            },
        );
        Self {
            source: default_source(),
            log: LogConfig::default(),
            header: HeaderConfig::default(),
            platforms,
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// The config file for `path`, which may name the file or its directory
pub fn config_path(path: &Path) -> PathBuf {
    if path.is_file() {
        path.to_path_buf()
    } else {
        path.join(CONFIG_FILE)
    }
}

/// Directory that source globs and build paths are relative to
pub fn project_root(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_prefix_overrides_source_filter() {
        let mut file = FileConfig::new("tokens.spacing.scss", FileFormat::Flat);
        file.filter = Some("core".to_string());
        file.name_prefix = Some("space-".to_string());
        match file.render_mode() {
            RenderMode::Flat { filter } => {
                assert!(matches!(filter, TokenFilter::NamePrefix(ref p) if p == "space-"))
            }
            other => panic!("expected flat mode, got {other:?}"),
        }
    }

    #[test]
    fn partition_derives_from_destination() {
        assert_eq!(FileConfig::new("tokens.light.scss", FileFormat::Theme).partition(), "light");
        assert_eq!(FileConfig::new("core.scss", FileFormat::Flat).partition(), "core");

        let mut explicit = FileConfig::new("tokens.scss", FileFormat::Flat);
        explicit.partition = Some("brand".to_string());
        assert_eq!(explicit.partition(), "brand");
    }

    #[test]
    fn parses_full_config() {
        let config: TokensmithConfig = toml::from_str(
            r#"
            source = ["sources/*.tokens.json"]

            [log]
            warnings = "error"
            verbosity = "verbose"
            broken_references = "console"

            [header]
            utc_offset_hours = 0

            [platforms.scss]
            build_path = "dist/"

            [[platforms.scss.files]]
            destination = "tokens.light.scss"
            format = "theme"
            filter = "light.tokens.json"

            [[platforms.scss.files]]
            destination = "tokens.scss"
            format = "composite"
            core = "core.tokens.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.source, vec!["sources/*.tokens.json"]);
        assert_eq!(config.log.warnings, WarningLevel::Error);
        assert_eq!(config.log.verbosity, Verbosity::Verbose);
        assert_eq!(config.log.broken_references, BrokenReferencePolicy::Console);
        assert!(config.header.enabled);

        let scss = &config.platforms["scss"];
        assert_eq!(scss.build_path, "dist/");

        match scss.files[0].render_mode() {
            RenderMode::Theme(theme) => {
                assert_eq!(theme.name, "light");
                assert!(matches!(theme.filter, TokenFilter::SourceContains(ref k) if k == "light.tokens.json"));
            }
            other => panic!("expected theme mode, got {other:?}"),
        }

        match scss.files[1].render_mode() {
            RenderMode::Composite { themes, core } => {
                let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
                assert_eq!(names, vec!["light", "dark"]);
                assert!(matches!(core, TokenFilter::SourceContains(ref k) if k == "core.tokens.json"));
            }
            other => panic!("expected composite mode, got {other:?}"),
        }
    }

    #[test]
    fn starter_round_trips_through_toml() {
        let text = TokensmithConfig::starter().to_toml().unwrap();
        let config: TokensmithConfig = toml::from_str(&text).unwrap();
        let destinations: Vec<&str> = config.platforms["scss"]
            .files
            .iter()
            .map(|f| f.destination.as_str())
            .collect();
        assert_eq!(
            destinations,
            vec!["tokens.core.scss", "tokens.light.scss", "tokens.dark.scss"]
        );
    }

    #[test]
    fn out_of_range_header_offset_is_an_error() {
        let header = HeaderConfig {
            enabled: true,
            utc_offset_hours: 99,
        };
        assert!(header.file_header().is_err());
    }
}
