// Theme support for the console
//
// Two palettes: "auto" uses the terminal's ANSI colors, "slate" is true color
// (RGB) matching the dark cyan-on-slate look of the web console. Status badge
// colors are fixed across themes so RISK always reads as red.

use crate::detail::StatusLevel;
use ratatui::style::Color;

/// Badge color for a status level
pub fn status_color(status: StatusLevel) -> Color {
    match status {
        StatusLevel::Risk => Color::Red,
        StatusLevel::Normal | StatusLevel::Verified => Color::Green,
        StatusLevel::Processing => Color::Blue,
        StatusLevel::Uncertain => Color::Gray,
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Chrome ─────────────────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub border_focused: Color,
    pub status_bar: Color,
    pub muted: Color,
    pub text: Color,
    pub highlight: Color,

    // ─── Content ────────────────────────────────────────────
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warn: Color,
    pub chart_line: Color,
    pub chat_user: Color,
    pub chat_agent: Color,
}

impl Theme {
    /// Load theme by name; unknown names fall back to "auto"
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "slate" => Self::slate(),
            _ => Self::auto(),
        }
    }

    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            title: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            status_bar: Color::DarkGray,
            muted: Color::DarkGray,
            text: Color::Reset,
            highlight: Color::Yellow,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            warn: Color::Yellow,
            chart_line: Color::Cyan,
            chat_user: Color::Blue,
            chat_agent: Color::Cyan,
        }
    }

    pub fn slate() -> Self {
        Self {
            name: "slate".to_string(),
            title: Color::Rgb(0x22, 0xd3, 0xee),
            border: Color::Rgb(0x33, 0x41, 0x55),
            border_focused: Color::Rgb(0x06, 0xb6, 0xd4),
            status_bar: Color::Rgb(0x64, 0x74, 0x8b),
            muted: Color::Rgb(0x64, 0x74, 0x8b),
            text: Color::Rgb(0xe2, 0xe8, 0xf0),
            highlight: Color::Rgb(0xfb, 0xbf, 0x24),
            accent: Color::Rgb(0x06, 0xb6, 0xd4),
            alert: Color::Rgb(0xef, 0x44, 0x44),
            success: Color::Rgb(0x10, 0xb9, 0x81),
            warn: Color::Rgb(0xf5, 0x9e, 0x0b),
            chart_line: Color::Rgb(0x06, 0xb6, 0xd4),
            chat_user: Color::Rgb(0x3b, 0x82, 0xf6),
            chat_agent: Color::Rgb(0x22, 0xd3, 0xee),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(StatusLevel::Risk), Color::Red);
        assert_eq!(status_color(StatusLevel::Normal), Color::Green);
        assert_eq!(status_color(StatusLevel::Verified), Color::Green);
        assert_eq!(status_color(StatusLevel::Processing), Color::Blue);
        assert_eq!(status_color(StatusLevel::Uncertain), Color::Gray);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_auto() {
        assert_eq!(Theme::by_name("SLATE").name, "slate");
        assert_eq!(Theme::by_name("solarized").name, "auto");
    }
}
