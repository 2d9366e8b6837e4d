//! Tag extraction
//!
//! A tag is `#` followed by one or more ASCII word characters, Hiragana,
//! Katakana or CJK ideographs. Matches are non-overlapping, left to right.
//!
//! Two policies exist and are intentionally kept apart:
//! - [`extract_tags`] keeps duplicates (day-file log, write and read path)
//! - [`extract_unique_tags`] keeps first occurrences only (key-value store)

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| {
        Regex::new(
            r"#[A-Za-z0-9_\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{3400}-\x{4DBF}\x{4E00}-\x{9FAF}]+",
        )
        .expect("static tag pattern is valid")
    })
}

/// Extract every tag token in order of appearance, duplicates included
pub fn extract_tags(text: &str) -> Vec<String> {
    tag_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract tag tokens in order of first appearance, dropping repeats
pub fn extract_unique_tags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_tags(text)
        .into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Prefix a bare tag name with `#` unless it already has one
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keeps_duplicates() {
        assert_eq!(
            extract_tags("a #foo b #bar #foo"),
            vec!["#foo", "#bar", "#foo"]
        );
    }

    #[test]
    fn test_extract_unique_drops_repeats() {
        assert_eq!(extract_unique_tags("a #foo b #bar #foo"), vec!["#foo", "#bar"]);
    }

    #[test]
    fn test_japanese_tags() {
        assert_eq!(
            extract_tags("今日は#会議 と #タスク と #めも"),
            vec!["#会議", "#タスク", "#めも"]
        );
    }

    #[test]
    fn test_stops_at_punctuation() {
        assert_eq!(extract_tags("done #work, then #play."), vec!["#work", "#play"]);
        assert_eq!(extract_tags("#a-b"), vec!["#a"]);
    }

    #[test]
    fn test_bare_hash_is_not_a_tag() {
        assert!(extract_tags("issue # 42 and ##").is_empty());
    }

    #[test]
    fn test_adjacent_tags() {
        assert_eq!(extract_tags("#one#two"), vec!["#one", "#two"]);
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("work"), "#work");
        assert_eq!(normalize_tag("#work"), "#work");
        assert_eq!(normalize_tag(" work "), "#work");
    }
}
