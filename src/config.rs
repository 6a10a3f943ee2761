use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::{Source, SourceKind};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The two source URL lists. Plain sources are always processed before
/// base64 sources; within each list, config order is preserved.
#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    #[serde(default = "default_plain_urls")]
    pub plain_urls: Vec<String>,
    #[serde(default = "default_base64_urls")]
    pub base64_urls: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            plain_urls: default_plain_urls(),
            base64_urls: default_base64_urls(),
        }
    }
}

fn default_plain_urls() -> Vec<String> {
    vec!["https://raw.githubusercontent.com/dimzon/scaling-sniffle/main/all-sort.txt".to_string()]
}

fn default_base64_urls() -> Vec<String> {
    vec!["https://raw.githubusercontent.com/dimzon/scaling-sniffle/main/base64.txt".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory output files are written to.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Maximum size of one output file, in bytes, before the base64
    /// expansion correction (see [`OutputConfig::raw_threshold`]).
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,

    /// Output filename prefix; files are named `<prefix>NNN<extension>`.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Output filename extension, including the leading dot.
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            max_file_bytes: default_max_file_bytes(),
            file_prefix: default_file_prefix(),
            file_extension: default_file_extension(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_file_bytes() -> usize {
    1024 * 1024 // 1 MiB
}

fn default_file_prefix() -> String {
    "base64-".to_string()
}

fn default_file_extension() -> String {
    ".txt".to_string()
}

impl OutputConfig {
    /// Raw-size ceiling for one chunk. Base64 expands payloads by 4/3, so
    /// the raw text must stay within 3/4 of the per-file budget.
    pub fn raw_threshold(&self) -> usize {
        self.max_file_bytes * 3 / 4
    }
}

impl Config {
    /// Assemble the declared source sequence: plain sources first, then
    /// base64 sources, each group in config order.
    pub fn declared_sources(&self) -> Vec<Source> {
        let plain = self.sources.plain_urls.iter().map(|url| Source {
            url: url.clone(),
            kind: SourceKind::Plain,
        });
        let base64 = self.sources.base64_urls.iter().map(|url| Source {
            url: url.clone(),
            kind: SourceKind::Base64,
        });
        plain.chain(base64).collect()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.sources.plain_urls.is_empty() && config.sources.base64_urls.is_empty() {
        anyhow::bail!("at least one URL must be configured under [sources]");
    }

    if config.fetch.timeout_secs == 0 {
        anyhow::bail!("fetch.timeout_secs must be > 0");
    }

    if config.output.max_file_bytes == 0 {
        anyhow::bail!("output.max_file_bytes must be > 0");
    }

    if config.output.file_prefix.is_empty() {
        anyhow::bail!("output.file_prefix must not be empty");
    }

    if !config.output.file_extension.starts_with('.') {
        anyhow::bail!(
            "output.file_extension must start with '.', got '{}'",
            config.output.file_extension
        );
    }

    Ok(config)
}
