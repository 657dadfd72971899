//! Kernel configuration, loadable from TOML.
//!
//! ```toml
//! user = "amy"
//! host = "den"
//! channel_capacity = 8192
//!
//! [seed]
//! directories = ["/etc", "/tmp"]
//!
//! [[seed.files]]
//! path = "/etc/motd"
//! content = "hello\n"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default channel capacity in bytes.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 4096;

/// Smallest usable channel: one data byte plus the reserved slot.
pub const MIN_CHANNEL_CAPACITY: usize = 2;

/// Errors loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("channel_capacity must be at least {MIN_CHANNEL_CAPACITY}, got {0}")]
    Capacity(usize),
}

/// Configuration for kernel initialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelConfig {
    /// User name shown in the prompt.
    pub user: String,
    /// Host name shown in the prompt.
    pub host: String,
    /// Home directory. Defaults to `/home/<user>`.
    pub home: Option<String>,
    /// Initial working directory. Defaults to the home directory.
    pub cwd: Option<String>,
    /// Size of the stdin ring in bytes (one byte stays reserved).
    pub channel_capacity: usize,
    /// Colorize the prompt.
    pub color: bool,
    /// Bootstrap content.
    pub seed: SeedConfig,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            host: "burrow".to_string(),
            home: None,
            cwd: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            color: true,
            seed: SeedConfig::default(),
        }
    }
}

impl KernelConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity < MIN_CHANNEL_CAPACITY {
            return Err(ConfigError::Capacity(self.channel_capacity));
        }
        Ok(())
    }

    /// The home directory, `/home/<user>` unless configured.
    pub fn home_dir(&self) -> String {
        self.home
            .clone()
            .unwrap_or_else(|| format!("/home/{}", self.user))
    }

    /// Where the shell starts.
    pub fn initial_cwd(&self) -> String {
        self.cwd.clone().unwrap_or_else(|| self.home_dir())
    }
}

/// Directories and files created before the shell starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// Directories, created with `mkdir -p` semantics.
    pub directories: Vec<String>,
    /// Files with text content.
    pub files: Vec<SeedFile>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            directories: ["/bin", "/etc", "/tmp", "/usr", "/var"]
                .into_iter()
                .map(String::from)
                .collect(),
            files: Vec::new(),
        }
    }
}

/// One seeded file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    pub path: String,
    #[serde(default)]
    pub content: String,
}
