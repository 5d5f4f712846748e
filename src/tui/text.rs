//! Display-width helpers. Most of K-Bot's text is CJK, where one `char`
//! takes two terminal cells, so byte or char counts are never widths.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cuts `s` to at most `max_width` cells, ending in `…` if anything was dropped.
pub fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1; // room for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Wraps `s` into lines of at most `width` cells, breaking inside words
/// when needed.
pub fn wrap(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width).break_words(true);
    textwrap::wrap(s, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_is_double_width() {
        assert_eq!(display_width("冲绳"), 4);
        assert_eq!(display_width("K-Bot"), 5);
    }

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate("免费", 10), "免费");
    }

    #[test]
    fn test_truncate_respects_wide_chars() {
        // 5 cells available: two CJK chars (4 cells) + ellipsis
        let cut = truncate("古宇利岛大桥", 5);
        assert_eq!(cut, "古宇…");
        assert!(display_width(&cut) <= 5);
    }

    #[test]
    fn test_wrap_never_exceeds_width() {
        let lines = wrap("开车穿过跨海大桥的瞬间，你会爱上冲绳。", 10);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| display_width(l) <= 10));
    }

    #[test]
    fn test_wrap_zero_width_is_empty() {
        assert!(wrap("anything", 0).is_empty());
    }
}
