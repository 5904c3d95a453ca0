//! Code and tag matching
//!
//! Feature codes are matched three ways: exact name, wildcard pattern
//! (`*` and `?`), and `#tag` tokens resolved through the active code table.
//! Rule parameters pass whitespace-separated token lists with OR semantics.

use std::collections::{HashMap, HashSet};

use crate::geometry::Geometry;

/// One code-table record: the set of tags the code is grouped under
#[derive(Debug, Clone, Default)]
pub struct CodeTableEntry {
    pub tags: HashSet<String>,
}

/// Read-only view of the host's active code table, keyed by exact code name
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    entries: HashMap<String, CodeTableEntry>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, tags: impl IntoIterator<Item = impl Into<String>>) {
        self.entries.insert(
            name.into(),
            CodeTableEntry {
                tags: tags.into_iter().map(Into::into).collect(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CodeTableEntry> {
        self.entries.get(name)
    }

    /// True when the named code exists in the table and carries the tag
    pub fn has_tag(&self, code_name: &str, tag: &str) -> bool {
        self.entries
            .get(code_name)
            .map(|entry| entry.tags.contains(tag))
            .unwrap_or(false)
    }
}

/// Position-by-position wildcard comparison of two code strings
///
/// `*` in either string ends the match successfully at that position; `?` in
/// either matches any character. Without a `*` escape, the strings must be
/// the same length. The asymmetric corner is intentional: an empty string
/// never matches a non-empty one, even one starting with `*`, because the
/// positional loop runs zero times and never sees the wildcard.
pub fn wildcard_match(pattern: &str, candidate: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();
    let shorter = pattern.len().min(candidate.len());

    for i in 0..shorter {
        if pattern[i] == '*' || candidate[i] == '*' {
            return true;
        }
        if pattern[i] == '?' || candidate[i] == '?' {
            continue;
        }
        if pattern[i] != candidate[i] {
            return false;
        }
    }

    pattern.len() == candidate.len()
}

/// Exact-name membership test over the geometry's attached codes
pub fn has_code(g: &Geometry, name: &str) -> bool {
    g.codes.iter().any(|code| code.name == name)
}

/// True when the geometry carries at least one of the given code names
pub fn has_any_code(g: &Geometry, names: &HashSet<String>) -> bool {
    g.codes.iter().any(|code| names.contains(&code.name))
}

/// Match one token against one attached code name
///
/// A `#tag` token matches when the code's table entry carries the tag;
/// anything else is a wildcard pattern against the code name.
fn token_matches(code_name: &str, token: &str, table: &CodeTable) -> bool {
    match token.strip_prefix('#') {
        Some(tag) => table.has_tag(code_name, tag),
        None => wildcard_match(token, code_name),
    }
}

/// Token-list membership test: true when any whitespace-separated token
/// matches any of the geometry's attached codes
pub fn has_code_or_tag(g: &Geometry, tokens: &str, table: &CodeTable) -> bool {
    tokens.split_whitespace().any(|token| {
        g.codes
            .iter()
            .any(|code| token_matches(&code.name, token, table))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Code, Vertex};

    #[test]
    fn test_wildcard_reflexive_without_wildcards() {
        for s in ["", "0101", "contour-major", "A7"] {
            assert!(wildcard_match(s, s), "{s:?} should match itself");
        }
    }

    #[test]
    fn test_wildcard_question_mark() {
        assert!(wildcard_match("12?45", "12a45"));
        assert!(wildcard_match("12?45", "12045"));
        assert!(wildcard_match("12?45", "12945"));
        // Length mismatch, no wildcard reached
        assert!(!wildcard_match("12?45", "1245"));
    }

    #[test]
    fn test_wildcard_star() {
        assert!(wildcard_match("12*", "12abcdefg"));
        assert!(!wildcard_match("12*", "13abc"));
        // The star works from either operand
        assert!(wildcard_match("12abcdefg", "12*"));
    }

    #[test]
    fn test_wildcard_empty_corner() {
        assert!(wildcard_match("", ""));
        // The loop never runs, so the star in the non-empty operand is
        // never reached
        assert!(!wildcard_match("", "*anything"));
        assert!(!wildcard_match("*anything", ""));
    }

    fn coded_point(names: &[&str]) -> Geometry {
        let mut g = Geometry::point(1, Vertex::new(0.0, 0.0, 0.0));
        for name in names {
            g = g.with_code(Code::new(*name));
        }
        g
    }

    #[test]
    fn test_has_code_is_exact() {
        let g = coded_point(&["0101", "0204"]);
        assert!(has_code(&g, "0101"));
        assert!(!has_code(&g, "01"));
        assert!(!has_code(&g, "0102"));
    }

    #[test]
    fn test_has_code_or_tag_tokens() {
        let mut table = CodeTable::new();
        table.insert("0101", ["hydrology"]);
        table.insert("0204", ["roads"]);

        let g = coded_point(&["0204"]);
        assert!(has_code_or_tag(&g, "#roads", &table));
        assert!(!has_code_or_tag(&g, "#hydrology", &table));
        assert!(has_code_or_tag(&g, "02*", &table));
        // OR semantics across the token list
        assert!(has_code_or_tag(&g, "#hydrology 02?4", &table));
        assert!(!has_code_or_tag(&g, "#hydrology 9999", &table));
    }
}
