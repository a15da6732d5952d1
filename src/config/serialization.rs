//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Render the full config as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# dcon configuration

# Theme: auto (terminal palette), slate (true color)
theme = {theme}

# Screen shown on startup: dashboard, agents
start_screen = "{start_screen}"

# UI redraw interval in milliseconds
tick_rate_ms = {tick_rate_ms}

# Simulated Copilot replies in the decision chat
[copilot]
# DCON_REPLY_DELAY_MS env var overrides
reply_delay_ms = {reply_delay_ms}
reply_text = {reply_text}

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = {log_level}
# File logging (in addition to the in-TUI log panel)
file_enabled = {log_file_enabled}
# DCON_LOG_DIR env var overrides
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            theme = quoted(&self.theme),
            start_screen = self.start_screen.as_str(),
            tick_rate_ms = self.tick_rate_ms,
            reply_delay_ms = self.copilot.reply_delay_ms,
            reply_text = quoted(&self.copilot.reply_text),
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
