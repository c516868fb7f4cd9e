use regex::{Regex, RegexBuilder};

use crate::search::normalize_search;

/// Case-insensitive matcher for the literal search text, used to mark the
/// matched part of names. `None` when the query is blank.
pub fn build_highlight_regex(query: &str) -> Option<Regex> {
    let normalized = normalize_search(query);
    if normalized.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(&normalized))
        .case_insensitive(true)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        let regex = build_highlight_regex("  LOVE ").expect("regex");
        let matches: Vec<_> = regex
            .find_iter("Ada Lovelace")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(matches, vec!["Love"]);
    }

    #[test]
    fn treats_query_as_literal_text() {
        let regex = build_highlight_regex("a.b").expect("regex");
        assert!(regex.is_match("xa.by"));
        assert!(!regex.is_match("axb"));
    }

    #[test]
    fn blank_query_has_no_highlight() {
        assert!(build_highlight_regex("").is_none());
        assert!(build_highlight_regex(" \u{3000} ").is_none());
    }
}
