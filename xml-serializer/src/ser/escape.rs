// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Character escaping and the XML 1.0 productions checked in well-formed mode.

use xml::common::{is_name_char, is_name_start_char};
use xml::escape::escape_str_pcdata;

/// Appends `text` as character data, escaping `&`, `<`, and `>`.
pub(crate) fn write_text(out: &mut String, text: &str) {
    out.push_str(&escape_str_pcdata(text));
}

/// Appends `value` for use within a double-quoted attribute value.
///
/// Tab, line feed, and carriage return are written as character references
/// so attribute-value normalization on reparse doesn't turn them into spaces.
/// Unlike `xml::escape::escape_str_attribute`, `'` is left alone.
pub(crate) fn write_attribute_value(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
}

/// `Char` from XML 1.0 section 2.2.
pub(crate) fn is_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

pub(crate) fn all_chars(s: &str) -> bool {
    s.chars().all(is_char)
}

/// `Name` from XML 1.0 section 2.3.
pub(crate) fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_name_start_char(c) => chars.all(is_name_char),
        _ => false,
    }
}

/// `PubidChar*` from XML 1.0 section 2.3.
pub(crate) fn is_pubid_literal(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                ' ' | '\r'
                    | '\n'
                    | '-'
                    | '\''
                    | '('
                    | ')'
                    | '+'
                    | ','
                    | '.'
                    | '/'
                    | ':'
                    | '='
                    | '?'
                    | ';'
                    | '!'
                    | '*'
                    | '#'
                    | '@'
                    | '$'
                    | '_'
                    | '%'
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> String {
        let mut out = String::new();
        write_text(&mut out, s);
        out
    }

    fn attr(s: &str) -> String {
        let mut out = String::new();
        write_attribute_value(&mut out, s);
        out
    }

    #[test]
    fn text_escapes() {
        assert_eq!(text("a & b < c > d"), "a &amp; b &lt; c &gt; d");
        assert_eq!(text("&amp;"), "&amp;amp;");
        assert_eq!(text("\t\"'"), "\t\"'");
    }

    #[test]
    fn text_matches_xml_rs() {
        for s in ["a&b<c>d", "&amp;", "\t\"' \u{3042}", "]]>", ""] {
            assert_eq!(text(s), escape_str_pcdata(s), "{:?}", s);
        }
    }

    #[test]
    fn attribute_escapes() {
        assert_eq!(attr("\t"), "&#9;");
        assert_eq!(attr("\n"), "&#xA;");
        assert_eq!(attr("\r"), "&#xD;");
        assert_eq!(attr("\"&<>'"), "&quot;&amp;&lt;&gt;'");
        assert_eq!(attr("\u{3042}%"), "\u{3042}%");
    }

    #[test]
    fn productions() {
        assert!(all_chars("plain \t\n\r \u{10000}"));
        assert!(!all_chars("nul\u{0}"));
        assert!(!all_chars("\u{FFFE}"));
        assert!(!all_chars("\u{B}"));

        assert!(is_name("foo"));
        assert!(is_name("_f.o-o1"));
        assert!(is_name("a:b"));
        assert!(!is_name(""));
        assert!(!is_name("1foo"));
        assert!(!is_name("foo bar"));

        assert!(is_pubid_literal("-//W3C//DTD XHTML 1.0 Strict//EN"));
        assert!(!is_pubid_literal("\""));
        assert!(!is_pubid_literal("\u{3042}"));
    }
}
