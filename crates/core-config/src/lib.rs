//! Configuration loading and parsing.
//!
//! Reads `ledit.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [buffer]
//! max_lines = 1000
//! max_line_len = 256   # bytes, counting the line terminator
//! tab_width = 4
//!
//! [autosave]
//! enabled = true
//! interval_secs = 30
//! ```
//!
//! Every field is optional. A missing file or a parse error yields defaults;
//! unknown fields are ignored. Out-of-range values are replaced when the
//! effective settings are computed (`Config::limits`,
//! `Config::autosave_interval`), never rejected.

use anyhow::Result;
use core_text::{DEFAULT_MAX_LINE_LEN, DEFAULT_MAX_LINES, DEFAULT_TAB_WIDTH, Limits};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "ledit.toml";
pub const DEFAULT_AUTOSAVE_SECS: u64 = 30;
/// Longest accepted autosave period (one day).
pub const MAX_AUTOSAVE_SECS: u64 = 24 * 60 * 60;
pub const MAX_TAB_WIDTH: usize = 16;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    #[serde(default = "BufferConfig::default_max_lines")]
    pub max_lines: usize,
    #[serde(default = "BufferConfig::default_max_line_len")]
    pub max_line_len: usize,
    #[serde(default = "BufferConfig::default_tab_width")]
    pub tab_width: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            max_lines: Self::default_max_lines(),
            max_line_len: Self::default_max_line_len(),
            tab_width: Self::default_tab_width(),
        }
    }
}

impl BufferConfig {
    const fn default_max_lines() -> usize {
        DEFAULT_MAX_LINES
    }
    const fn default_max_line_len() -> usize {
        DEFAULT_MAX_LINE_LEN
    }
    const fn default_tab_width() -> usize {
        DEFAULT_TAB_WIDTH
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AutosaveConfig {
    #[serde(default = "AutosaveConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "AutosaveConfig::default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            interval_secs: Self::default_interval_secs(),
        }
    }
}

impl AutosaveConfig {
    const fn default_enabled() -> bool {
        true
    }
    const fn default_interval_secs() -> u64 {
        DEFAULT_AUTOSAVE_SECS
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub buffer: BufferConfig,
    #[serde(default)]
    pub autosave: AutosaveConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings, or defaults when no usable file was found.
    pub file: ConfigFile,
}

/// Config path: `./ledit.toml` when present, else the platform config dir
/// (`<config_dir>/ledit/ledit.toml`).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ledit").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config { file })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_error_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Effective buffer capacities. Zero values fall back to defaults, the tab
    /// width is capped at `MAX_TAB_WIDTH`, and the line length always leaves
    /// room for one tab plus the terminator.
    pub fn limits(&self) -> Limits {
        let b = &self.file.buffer;
        let pick = |raw: usize, default: usize, field: &'static str| {
            if raw == 0 {
                info!(target: "config", field, default, "zero_value_replaced");
                default
            } else {
                raw
            }
        };
        let max_lines = pick(b.max_lines, DEFAULT_MAX_LINES, "buffer.max_lines");
        let mut tab_width = pick(b.tab_width, DEFAULT_TAB_WIDTH, "buffer.tab_width");
        if tab_width > MAX_TAB_WIDTH {
            warn!(target: "config", raw = tab_width, clamped = MAX_TAB_WIDTH, "tab_width_capped");
            tab_width = MAX_TAB_WIDTH;
        }
        let raw_len = pick(b.max_line_len, DEFAULT_MAX_LINE_LEN, "buffer.max_line_len");
        let max_line_len = raw_len.max(tab_width + 2);
        if max_line_len != raw_len {
            info!(target: "config", raw = raw_len, clamped = max_line_len, "max_line_len_raised");
        }
        Limits {
            max_lines,
            max_line_len,
            tab_width,
        }
    }

    /// Autosave period, or `None` when autosave is disabled. Zero means the
    /// default; anything above `MAX_AUTOSAVE_SECS` is capped.
    pub fn autosave_interval(&self) -> Option<Duration> {
        let a = &self.file.autosave;
        if !a.enabled {
            return None;
        }
        let secs = match a.interval_secs {
            0 => DEFAULT_AUTOSAVE_SECS,
            s if s > MAX_AUTOSAVE_SECS => {
                warn!(target: "config", raw = s, clamped = MAX_AUTOSAVE_SECS, "autosave_interval_capped");
                MAX_AUTOSAVE_SECS
            }
            s => s,
        };
        Some(Duration::from_secs(secs))
    }
}
