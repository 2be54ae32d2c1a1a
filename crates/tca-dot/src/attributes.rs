//! Attribute lists and comment stripping

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeMap;

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\w+)\s*=\s*(\w[\w.\-]*|"[^"]*"|'[^']*')"#).expect("attribute pattern is valid")
});

/// Quoted strings are matched first and kept, so comment markers inside
/// attribute values survive
static COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?ms)("(?:[^"\\]|\\.)*"|'[^']*')|/\*.*?\*/|//[^\n]*|^[ \t]*#[^\n]*"#)
        .expect("comment pattern is valid")
});

/// DOT keywords that introduce default-attribute statements
const KEYWORDS: [&str; 3] = ["graph", "node", "edge"];

/// Parse `key=value` pairs; keys are lowercased, quotes stripped
///
/// A repeated key keeps its last value.
pub(crate) fn parse_attributes(list: &str) -> BTreeMap<String, String> {
    ATTRIBUTE
        .captures_iter(list)
        .map(|caps| (caps[1].to_ascii_lowercase(), unquote(&caps[2]).to_string()))
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Render attributes as `key="value", ...`
pub(crate) fn render_attributes(attributes: &BTreeMap<String, String>) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn strip_comments(source: &str) -> Cow<'_, str> {
    COMMENT.replace_all(source, |caps: &Captures<'_>| {
        caps.get(1)
            .map_or_else(String::new, |quoted| quoted.as_str().to_string())
    })
}

pub(crate) fn is_keyword(name: &str) -> bool {
    KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_attributes_strips_quotes_and_lowercases_keys() {
        let attrs = parse_attributes(r#"Shape="Square", color='red' width=1.5"#);
        let expected: BTreeMap<String, String> = [
            ("color".to_string(), "red".to_string()),
            ("shape".to_string(), "Square".to_string()),
            ("width".to_string(), "1.5".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(attrs, expected);
    }

    #[test]
    fn test_render_attributes_sorted() {
        let attrs = parse_attributes("label=x, color=red");
        assert_eq!(render_attributes(&attrs), r#"color="red", label="x""#);
    }

    #[test]
    fn test_strip_comments() {
        let source = "a [shape=square]; // trailing\n# hash line\n/* block\n b -> c; */ a -> d;";
        let stripped = strip_comments(source);
        assert!(!stripped.contains("trailing"));
        assert!(!stripped.contains("hash"));
        assert!(!stripped.contains("b -> c"));
        assert!(stripped.contains("a -> d;"));
    }

    #[test]
    fn test_strip_comments_keeps_quoted_values() {
        let source = "a [URL=\"http://example.com\", label='/* kept */'] // dropped\nb [tooltip=\"# not a comment\"];";
        let stripped = strip_comments(source);
        assert!(stripped.contains(r#"URL="http://example.com""#));
        assert!(stripped.contains("'/* kept */'"));
        assert!(stripped.contains(r##""# not a comment""##));
        assert!(!stripped.contains("dropped"));
    }

    #[test]
    fn test_keywords() {
        assert!(is_keyword("node"));
        assert!(is_keyword("EDGE"));
        assert!(!is_keyword("nodes"));
    }
}
