// Status badge
//
// `[风险]` style tag colored by status level.

use crate::detail::StatusLevel;
use crate::theme::status_color;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

pub fn badge(status: StatusLevel) -> Span<'static> {
    Span::styled(
        format!("[{}]", status.label()),
        Style::default()
            .fg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_badge_text_and_color() {
        let span = badge(StatusLevel::Risk);
        assert_eq!(span.content, "[风险]");
        assert_eq!(span.style.fg, Some(Color::Red));
    }
}
