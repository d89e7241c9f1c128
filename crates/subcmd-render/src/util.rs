//! Column helpers.

use unicode_width::UnicodeWidthStr;

/// Display width of `s` in terminal columns, ignoring ANSI escapes.
pub fn display_width(s: &str) -> usize {
    console::strip_ansi_codes(s).width()
}

/// Pads `s` with trailing spaces to at least `width` columns.
///
/// Strings already at or past `width` are returned unchanged.
///
/// ```rust
/// use subcmd_render::min_width;
///
/// assert_eq!(min_width("key", 6), "key   ");
/// assert_eq!(min_width("longer", 3), "longer");
/// ```
pub fn min_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_width_pads_short() {
        assert_eq!(min_width("ab", 5), "ab   ");
        assert_eq!(min_width("", 2), "  ");
    }

    #[test]
    fn test_min_width_keeps_long() {
        assert_eq!(min_width("abcdef", 3), "abcdef");
        assert_eq!(min_width("abc", 3), "abc");
    }

    #[test]
    fn test_min_width_counts_wide_chars() {
        // Each CJK character takes two columns.
        assert_eq!(min_width("日本", 6), "日本  ");
    }
}
