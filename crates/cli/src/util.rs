use unicode_width::UnicodeWidthStr;

/// Display width of a string, accounting for CJK double-width and emoji.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad a string with spaces to exactly `width` display columns,
/// trimming whole characters off the end when it runs over.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > width {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out.push_str(&" ".repeat(width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_right_pads_and_trims() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcd");
        // Double-width emoji never splits in half
        assert_eq!(pad_right("🐶🐶", 3), "🐶 ");
    }

    #[test]
    fn display_width_counts_emoji_as_two() {
        assert_eq!(display_width("🐶"), 2);
        assert_eq!(display_width("hi"), 2);
    }
}
