//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use paper_extractor_core::{DateField, SortBy, SortOrder};
use serde::Deserialize;

const CONFIG_DIR_NAME: &str = "paper-extractor";
const CONFIG_FILE_NAME: &str = "config.toml";

/// TOML-backed file configuration for paper-extractor defaults.
///
/// Every key is optional; CLI flags override whatever is set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Base directory for topic folders.
    pub download_dir: Option<PathBuf>,
    /// Default result cap (same range as CLI).
    pub max_results: Option<u32>,
    /// Default result ordering for `search`.
    pub sort_by: Option<SortBy>,
    /// Default ordering direction.
    pub sort_order: Option<SortOrder>,
    /// Minimum delay between arXiv requests in milliseconds.
    pub rate_limit: Option<u64>,
    /// arXiv API endpoint.
    pub api_url: Option<String>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Timestamp used by `--recent-days`.
    pub date_field: Option<DateField>,
}

impl FileConfig {
    /// Validates configuration values against CLI-equivalent ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_results) = self.max_results
            && !(1..=2000).contains(&max_results)
        {
            bail!("Invalid config value for `max_results`: {max_results}. Expected range: 1..=2000");
        }

        if let Some(rate_limit) = self.rate_limit
            && rate_limit > 60_000
        {
            bail!("Invalid config value for `rate_limit`: {rate_limit}. Expected range: 0..=60000");
        }

        if let Some(api_url) = self.api_url.as_deref()
            && !(api_url.starts_with("http://") || api_url.starts_with("https://"))
        {
            bail!("Invalid config value for `api_url`: {api_url}. Expected an http(s) URL");
        }

        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

impl LoadedConfig {
    /// Returns the parsed config, or an empty one when no file was loaded.
    pub fn file_config(&self) -> FileConfig {
        self.config.clone().unwrap_or_default()
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/paper-extractor/config.toml`
/// 2. `$HOME/.config/paper-extractor/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig { path, config: None });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig { path, config: None });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(raw)?;
    config.validate()?;
    Ok(config)
}
