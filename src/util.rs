use unicode_width::UnicodeWidthChar;

const TAB_STOP: usize = 8;

/// Terminal column reached after printing `s` from column 0.
pub fn display_width(s: &str) -> usize {
    s.chars().fold(0, |col, c| match c {
        '\t' => (col / TAB_STOP + 1) * TAB_STOP,
        _ => col + c.width().unwrap_or(0),
    })
}

/// Split a line into its leading whitespace and the content that has to be typed.
pub fn split_indent(line: &str) -> (&str, &str) {
    let content = line.trim_start();
    (&line[..line.len() - content.len()], content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_display_width_wide_chars() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("a日"), 3);
    }

    #[test]
    fn test_display_width_tabs_snap_to_stops() {
        assert_eq!(display_width("\t"), 8);
        assert_eq!(display_width("ab\t"), 8);
        assert_eq!(display_width("\t\tx"), 17);
        assert_eq!(display_width("  \tx"), 9);
    }

    #[test]
    fn test_split_indent() {
        assert_eq!(split_indent("    let x = 1;"), ("    ", "let x = 1;"));
        assert_eq!(split_indent("\t\tfoo bar"), ("\t\t", "foo bar"));
        assert_eq!(split_indent("plain"), ("", "plain"));
    }

    #[test]
    fn test_split_indent_blank_lines() {
        assert_eq!(split_indent(""), ("", ""));
        assert_eq!(split_indent("   "), ("   ", ""));
    }

    #[test]
    fn test_split_indent_keeps_inner_and_trailing_space() {
        assert_eq!(split_indent("  a  b  "), ("  ", "a  b  "));
    }

    #[test]
    fn test_split_indent_unicode_whitespace() {
        // ideographic space is whitespace too
        assert_eq!(split_indent("\u{3000}あ"), ("\u{3000}", "あ"));
    }
}
