//! Configuration for the decision console
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/dcon/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod copilot;
mod observability;
mod serialization;


pub use copilot::{CopilotConfig, FileCopilot};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_TICK_RATE_MS: u64 = 250;
const DEFAULT_THEME: &str = "auto";

// ─────────────────────────────────────────────────────────────────────────────
// Start Screen
// ─────────────────────────────────────────────────────────────────────────────

/// Screen shown when the console starts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartScreen {
    #[default]
    Dashboard,
    Agents,
}

impl StartScreen {
    /// Parse from config; unknown values fall back to the dashboard
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "agents" | "agent_center" => Self::Agents,
            _ => Self::Dashboard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Agents => "agents",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Redraw interval of the TUI
    pub tick_rate_ms: u64,

    /// Theme name: "auto" or "slate"
    pub theme: String,

    /// Screen shown on startup
    pub start_screen: StartScreen,

    /// Simulated Copilot replies
    pub copilot: CopilotConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            theme: DEFAULT_THEME.to_string(),
            start_screen: StartScreen::Dashboard,
            copilot: CopilotConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub tick_rate_ms: Option<u64>,
    pub theme: Option<String>,
    pub start_screen: Option<String>,

    /// Optional [copilot] section
    pub copilot: Option<FileCopilot>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/dcon/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("dcon").join("config.toml"))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Parse a config file. A missing file yields defaults; a broken one is
    /// an error so the user isn't left debugging silently ignored settings.
    pub(crate) fn load_file_config(path: &Path) -> anyhow::Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn load() -> anyhow::Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with environment overrides
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick_rate_ms = file
            .tick_rate_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.tick_rate_ms);

        // Theme: env > file > default
        let theme = env("DCON_THEME").or(file.theme).unwrap_or(defaults.theme);

        let start_screen = file
            .start_screen
            .map(|s| StartScreen::from_str(&s))
            .unwrap_or(defaults.start_screen);

        // Reply delay: env > file > default
        let mut copilot = CopilotConfig::from_file(file.copilot);
        if let Some(ms) = env("DCON_REPLY_DELAY_MS").and_then(|v| v.parse().ok()) {
            copilot.reply_delay_ms = ms;
        }

        // Log directory: env > file > default
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(dir) = env("DCON_LOG_DIR") {
            logging.file_dir = PathBuf::from(dir);
        }

        Self {
            tick_rate_ms,
            theme,
            start_screen,
            copilot,
            logging,
        }
    }
}
