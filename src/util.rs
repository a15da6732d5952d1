//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` terminal columns, appending `…` when
/// anything was cut.
///
/// Width is measured in display columns, not bytes, so CJK text (two
/// columns per character) never overflows its cell.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Leave one column for the ellipsis
    let target = max_width - 1;
    let mut width = 0;
    let mut end = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        width += w;
        end = i + c.len_utf8();
    }

    let mut out = s[..end].to_string();
    out.push('…');
    out
}

/// Truncate, then pad with spaces to exactly `width` columns
pub fn fit_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let pad = width.saturating_sub(out.width());
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// The longest suffix of `s` that fits in `width` columns
pub fn tail_to_width(s: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = s.len();
    for (i, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = i;
    }
    s[start..].to_string()
}

/// Break `s` into lines of at most `width` columns, splitting on character
/// boundaries. Existing newlines are kept.
pub fn wrap_to_width(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in s.split('\n') {
        let mut line = String::new();
        let mut used = 0;
        for c in raw.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            line.push(c);
            used += w;
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_cjk_by_columns() {
        // Each character is two columns wide
        let s = "质量异常根因";
        assert_eq!(truncate_to_width(s, 12), s);
        assert_eq!(truncate_to_width(s, 7), "质量异…");
        assert_eq!(truncate_to_width(s, 6), "质量…");
    }

    #[test]
    fn test_truncate_to_zero() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_fit_width_pads() {
        assert_eq!(fit_width("ab", 4), "ab  ");
        assert_eq!(fit_width("质量", 5), "质量 ");
        assert_eq!(fit_width("质量异常", 5).width(), 5);
    }

    #[test]
    fn test_tail_keeps_end() {
        assert_eq!(tail_to_width("abcdef", 3), "def");
        assert_eq!(tail_to_width("根因分析", 5), "分析");
        assert_eq!(tail_to_width("ab", 10), "ab");
    }

    #[test]
    fn test_wrap_splits_wide_chars() {
        assert_eq!(wrap_to_width("质量偏移预警", 5), vec!["质量", "偏移", "预警"]);
        assert_eq!(wrap_to_width("ab\ncd", 10), vec!["ab", "cd"]);
        assert_eq!(wrap_to_width("", 4), vec![""]);
    }
}
