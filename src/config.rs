//! Configuration file handling.
//!
//! Settings come from `docsym.toml`, looked up in this order:
//! 1. an explicit `--config` path
//! 2. `./docsym.toml`
//! 3. `<config dir>/docsym/docsym.toml` (e.g. `~/.config/docsym/docsym.toml`)
//!
//! Every field has a default, so running without a file is fine. CLI flags override
//! whatever the file says.

use crate::error::Result;
use crate::load::LoadOptions;
use crate::search::PartitionRule;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name searched for in the working and config directories.
pub const CONFIG_FILE_NAME: &str = "docsym.toml";

const DEFAULT_LIMIT: usize = 25;
const DEFAULT_LOAD_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON bucket map, search script, or directory of `all_*.js` scripts
    pub index: Option<PathBuf>,
    /// Number of leading normalized units forming a bucket key
    pub partition_width: usize,
    /// Result cap applied when a request does not set one
    pub default_limit: usize,
    /// Seconds before an index load is abandoned; 0 disables the timeout
    pub load_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index: None,
            partition_width: 1,
            default_limit: DEFAULT_LIMIT,
            load_timeout_secs: DEFAULT_LOAD_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Load the config from `explicit` or the first default location that exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = [
            Some(PathBuf::from(CONFIG_FILE_NAME)),
            dirs::config_dir().map(|dir| dir.join("docsym").join(CONFIG_FILE_NAME)),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::debug!("Using config file {}", path.display());
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.partition_width == 0 {
            anyhow::bail!("partition_width must be at least 1");
        }
        if self.default_limit == 0 {
            anyhow::bail!("default_limit must be at least 1");
        }
        Ok(())
    }

    /// Index location with `~` expanded.
    pub fn index_path(&self) -> Option<PathBuf> {
        self.index
            .as_ref()
            .map(|path| PathBuf::from(expand_tilde(&path.to_string_lossy()).as_ref()))
    }

    pub fn partition(&self) -> Result<PartitionRule> {
        PartitionRule::leading_units(self.partition_width)
            .context("partition_width must be at least 1")
    }

    pub fn load_options(&self) -> Result<LoadOptions> {
        Ok(LoadOptions {
            partition: self.partition()?,
            timeout: (self.load_timeout_secs > 0)
                .then(|| Duration::from_secs(self.load_timeout_secs)),
        })
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
