use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default location relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = "config/dnspeek.toml";
pub const SYSTEM_CONFIG_PATH: &str = "/etc/dnspeek/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// How decoded messages are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Live terminal UI with a one-line log entry per message.
    Tui,
    /// Full multi-line report per message on stdout.
    Report,
    /// One line per message on stdout.
    Summary,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Device to capture on; prompted for when unset.
    pub interface: Option<String>,
    /// BPF expression applied to the capture.
    pub filter: String,
    pub snaplen: i32,
    /// Read timeout in milliseconds.
    pub timeout_ms: i32,
    pub promiscuous: bool,
    /// Save every captured packet to this pcap file.
    pub export: Option<PathBuf>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interface: None,
            filter: "udp port 53".to_string(),
            snaplen: 65535,
            timeout_ms: 100,
            promiscuous: false,
            export: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Lines kept in the TUI log panel.
    pub max_log_lines: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Tui,
            max_log_lines: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `dnspeek=debug`.
    pub level: String,
    /// Write logs here instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub interface: Option<String>,
    pub filter: Option<String>,
    pub export: Option<PathBuf>,
    pub mode: Option<DisplayMode>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads configuration and applies command-line overrides.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. `config/dnspeek.toml` in the current directory
    /// 3. `/etc/dnspeek/config.toml`
    /// 4. Defaults
    pub fn load(path: Option<&Path>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let candidates = [Path::new(LOCAL_CONFIG_PATH), Path::new(SYSTEM_CONFIG_PATH)];
        let mut config = match locate(path, &candidates) {
            Some(found) => Self::from_file(&found)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(interface) = overrides.interface {
            self.capture.interface = Some(interface);
        }
        if let Some(filter) = overrides.filter {
            self.capture.filter = filter;
        }
        if let Some(export) = overrides.export {
            self.capture.export = Some(export);
        }
        if let Some(mode) = overrides.mode {
            self.display.mode = mode;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.display.max_log_lines == 0 {
            return Err(ConfigError::Validation(
                "display.max_log_lines must be at least 1".to_string(),
            ));
        }
        if self.capture.snaplen <= 0 {
            return Err(ConfigError::Validation(format!(
                "capture.snaplen must be positive, got {}",
                self.capture.snaplen
            )));
        }
        Ok(())
    }
}

/// The explicit path if given, else the first existing candidate.
///
/// An explicit path is returned even if it does not exist, so that the
/// read error names it.
pub fn locate(explicit: Option<&Path>, candidates: &[&Path]) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .map(|candidate| candidate.to_path_buf())
}
