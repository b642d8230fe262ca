//! Re-indentation of raw declaration fragments.
//!
//! A fragment is cut out of a source file with whatever indentation its
//! surroundings imposed. Normalizing shifts it left so the shallowest line
//! starts at column 0 while keeping every relative offset intact.

/// The de-indented lines of one declaration fragment.
///
/// An empty entry stands for a line that was nothing but indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFragment<'a> {
    lines: Vec<&'a str>,
    min_indent: usize,
}

impl<'a> NormalizedFragment<'a> {
    /// Normalize `raw` into de-indented lines.
    pub fn new(raw: &'a str) -> Self {
        let text = strip_trailing_trivia(raw);
        let min_indent = min_indent(split_lines(text));

        let lines = split_lines(text)
            .skip_while(|line| is_blank(line))
            .map(|line| slice_chars(line, min_indent))
            .collect();

        Self { lines, min_indent }
    }

    /// Output lines in source order.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Width of the indentation that was removed from every line.
    pub fn min_indent(&self) -> usize {
        self.min_indent
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Normalize a fragment and collect owned lines.
pub fn normalize(raw: &str) -> Vec<String> {
    NormalizedFragment::new(raw)
        .lines()
        .iter()
        .map(|line| line.to_string())
        .collect()
}

/// Drop the trivia after the last token: trailing blanks on its line and the
/// line break that ends it.
fn strip_trailing_trivia(raw: &str) -> &str {
    let text = raw.trim_end_matches([' ', '\t']);
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    text.trim_end_matches([' ', '\t'])
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn min_indent<'a>(lines: impl Iterator<Item = &'a str>) -> usize {
    let mut min: Option<usize> = None;
    for line in lines.filter(|line| !is_blank(line)) {
        let indent = leading_whitespace(line);
        if min.is_none_or(|current| indent < current) {
            min = Some(indent);
        }
        if indent == 0 {
            break;
        }
    }
    min.unwrap_or(0)
}

/// Remove the first `count` characters; a line no longer than that becomes empty.
fn slice_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_common_indent() {
        let raw = "    class Foo\n    {\n        int X;\n    }";
        assert_eq!(normalize(raw), vec!["class Foo", "{", "    int X;", "}"]);
    }

    #[test]
    fn test_already_flush_input_is_unchanged() {
        let raw = "class Foo\n{\n    int X;\n}";
        assert_eq!(normalize(raw), vec!["class Foo", "{", "    int X;", "}"]);
        assert_eq!(NormalizedFragment::new(raw).min_indent(), 0);
    }

    #[test]
    fn test_skips_leading_blank_lines() {
        let raw = "\n   \n\t\n        class Foo { }";
        assert_eq!(normalize(raw), vec!["class Foo { }"]);
    }

    #[test]
    fn test_keeps_trailing_blank_lines() {
        let raw = "    class Foo { }\n\n    \n";
        assert_eq!(normalize(raw), vec!["class Foo { }", "", ""]);
    }

    #[test]
    fn test_short_whitespace_line_becomes_empty() {
        let raw = "    a\n  \n    b";
        assert_eq!(normalize(raw), vec!["a", "", "b"]);
    }

    #[test]
    fn test_long_whitespace_line_keeps_remainder() {
        let raw = "    a\n       \n    b";
        assert_eq!(normalize(raw), vec!["a", "   ", "b"]);
    }

    #[test]
    fn test_preserves_trailing_whitespace_of_kept_lines() {
        let raw = "    a  \n    b";
        assert_eq!(normalize(raw), vec!["a  ", "b"]);
    }

    #[test]
    fn test_trailing_trivia_on_last_line_is_dropped() {
        let raw = "    class Foo { }   \n";
        assert_eq!(normalize(raw), vec!["class Foo { }"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = "\r\n    class Foo\r\n    {\r\n    }\r\n";
        assert_eq!(normalize(raw), vec!["class Foo", "{", "}"]);
    }

    #[test]
    fn test_all_blank_input() {
        let fragment = NormalizedFragment::new("  \n\t\n   ");
        assert_eq!(fragment.min_indent(), 0);
        assert!(fragment.is_empty());
    }

    #[test]
    fn test_min_indent_counts_characters_not_bytes() {
        let raw = "\u{3000}\u{3000}é\n\u{3000}\u{3000}\u{3000}ü";
        let fragment = NormalizedFragment::new(raw);
        assert_eq!(fragment.min_indent(), 2);
        assert_eq!(fragment.lines(), &["é", "\u{3000}ü"]);
    }

    #[test]
    fn test_min_indent_ignores_blank_lines() {
        let raw = "        a\n\n      b";
        let fragment = NormalizedFragment::new(raw);
        assert_eq!(fragment.min_indent(), 6);
        assert_eq!(fragment.lines(), &["  a", "", "b"]);
    }

    #[test]
    fn test_shallowest_line_lands_at_column_zero() {
        let raw = "\t\t\tpublic int A;\n\t\tpublic int B;\n\t\t\t\tpublic int C;";
        let lines = normalize(raw);
        let min = lines
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
            .min();
        assert_eq!(min, Some(0));
    }

    #[test]
    fn test_reindenting_restores_original_lines() {
        let raw = "        class Foo\n        {\n            int X;\n\n            int Y;\n        }";
        let fragment = NormalizedFragment::new(raw);
        let pad = " ".repeat(fragment.min_indent());

        let restored: Vec<String> = fragment
            .lines()
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| format!("{}{}", pad, line))
            .collect();
        let original: Vec<&str> = raw.lines().filter(|line| !line.trim().is_empty()).collect();

        assert_eq!(restored, original);
    }
}
