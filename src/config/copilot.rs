//! Copilot chat configuration

use serde::Deserialize;
use std::time::Duration;

use crate::conversation::DEFAULT_REPLY_TEXT;

/// Simulated agent reply settings
#[derive(Debug, Clone, PartialEq)]
pub struct CopilotConfig {
    /// Delay between a user message and the agent acknowledgment
    pub reply_delay_ms: u64,
    /// Text of the acknowledgment
    pub reply_text: String,
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            reply_text: DEFAULT_REPLY_TEXT.to_string(),
        }
    }
}

/// Copilot settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCopilot {
    pub reply_delay_ms: Option<u64>,
    pub reply_text: Option<String>,
}

impl CopilotConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileCopilot>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            reply_delay_ms: file.reply_delay_ms.unwrap_or(defaults.reply_delay_ms),
            reply_text: file
                .reply_text
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(defaults.reply_text),
        }
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}
