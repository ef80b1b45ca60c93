//! Author-field repair and highlighting.
//!
//! Author lists reach the data file in three shapes: a ready string, a list
//! of names, or a list that was serialized one character per element
//! (`["C", "h", "e", "n", "y", "u", "", "T", ...]`). [`normalize_authors`]
//! turns any of them into a single `"A, B, C"` string and wraps the site
//! owner's name in an emphasis marker.
//!
//! The repair is a heuristic tuned to one observed corruption pattern. It is
//! not a general name parser.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::models::{value_text, AuthorsField};

pub const EMPHASIS_OPEN: &str = "<strong>";
pub const EMPHASIS_CLOSE: &str = "</strong>";

/// Upper bound on cleanup passes; real inputs settle after one or two.
const MAX_PASSES: usize = 8;

static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
static SPACED_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])\s+and\s+([A-Z])").unwrap());
static JOINED_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])and\s+([A-Z])").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

/// Word unit recovered from a per-character author list
#[derive(Debug, Clone, PartialEq)]
enum NameToken {
    Word(String),
    Space,
    Mark(char),
}

/// Normalize a raw `authors` value into one comma-separated string with
/// `highlight` emphasized.
///
/// Never fails: missing or malformed input degrades to best-effort text,
/// and `None` or an empty list yields `""`. Running the function on its own
/// output returns that output unchanged.
///
/// # Examples
///
/// ```
/// use sitepubs::{normalize_authors, AuthorsField};
///
/// let raw = AuthorsField::from_items(["Chenyu Tang", "Shengbo Wang"]);
/// assert_eq!(
///     normalize_authors(Some(&raw), "Shengbo Wang"),
///     "Chenyu Tang, <strong>Shengbo Wang</strong>"
/// );
/// assert_eq!(normalize_authors(None, "Shengbo Wang"), "");
/// ```
pub fn normalize_authors(raw: Option<&AuthorsField>, highlight: &str) -> String {
    let joined = match raw {
        None => return String::new(),
        Some(AuthorsField::Text(text)) => text.clone(),
        Some(AuthorsField::List(values)) => {
            let items: Vec<String> = values.iter().map(value_text).collect();
            if is_char_sequence(values) {
                reconstruct_from_chars(&items)
            } else {
                join_names(&items)
            }
        }
        Some(AuthorsField::Other(value)) => value_text(value),
    };

    let cleaned = clean_punctuation(&joined);
    highlight_author(&cleaned, highlight)
}

/// True when more than half of the items are one-character strings.
/// Numbers and other scalars never count.
fn is_char_sequence(items: &[Value]) -> bool {
    let singles = items
        .iter()
        .filter(|item| match item {
            Value::String(s) => single_char(s.trim()).is_some_and(char::is_alphanumeric),
            _ => false,
        })
        .count();
    singles * 2 > items.len()
}

fn join_names(items: &[String]) -> String {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rebuild names from a per-character list.
///
/// Empty elements stand for the original spaces. Whether one becomes a
/// space depends on the next non-empty element: an uppercase start means a
/// new name part, anything else is glued on (`"Tang" "" "and"` -> `Tangand`),
/// which [`clean_punctuation`] later turns into a separator.
fn reconstruct_from_chars(items: &[String]) -> String {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (idx, item) in items.iter().enumerate() {
        let piece = item.trim();

        if piece.is_empty() || piece == "," {
            flush_word(&mut current, &mut tokens);
            if piece.is_empty() {
                let next = items[idx + 1..]
                    .iter()
                    .map(|s| s.trim())
                    .find(|s| !s.is_empty());
                let starts_upper = next
                    .and_then(|s| s.chars().next())
                    .is_some_and(char::is_uppercase);
                if starts_upper && !tokens.is_empty() {
                    tokens.push(NameToken::Space);
                }
            }
        } else if piece.chars().all(char::is_alphanumeric) {
            current.push_str(piece);
        } else {
            flush_word(&mut current, &mut tokens);
            if let Some(mark @ ('.' | '&')) = single_char(piece) {
                tokens.push(NameToken::Mark(mark));
            }
        }
    }
    flush_word(&mut current, &mut tokens);

    let mut out = String::new();
    for token in &tokens {
        match token {
            NameToken::Word(word) => out.push_str(word),
            NameToken::Space => out.push(' '),
            NameToken::Mark(mark) => out.push(*mark),
        }
    }
    out
}

fn flush_word(current: &mut String, tokens: &mut Vec<NameToken>) {
    if !current.is_empty() {
        tokens.push(NameToken::Word(std::mem::take(current)));
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Insert missing separators and tidy spacing, repeated until stable.
fn clean_punctuation(text: &str) -> String {
    let mut current = text.trim().to_string();
    for _ in 0..MAX_PASSES {
        let next = clean_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn clean_pass(text: &str) -> String {
    let s = CASE_BOUNDARY.replace_all(text, "$1, $2");
    let s = SPACED_AND.replace_all(&s, "$1, $2");
    let s = JOINED_AND.replace_all(&s, "$1, $2");
    let s = WHITESPACE.replace_all(&s, " ");
    let s = COMMA.replace_all(&s, ", ");
    s.trim().to_string()
}

/// Name forms searched for, in priority order: as given, "First Last",
/// then "F. Last".
pub fn name_variants(name: &str) -> Vec<String> {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return Vec::new();
    };

    let mut variants = vec![parts.join(" ")];
    if parts.len() > 1 {
        variants.push(format!("{first} {last}"));
        if let Some(initial) = first.chars().next() {
            variants.push(format!("{initial}. {last}"));
        }
    }
    variants.dedup();
    variants
}

/// Wrap the first name variant found in `authors` with the emphasis marker.
///
/// Leaves the text alone when a variant is already wrapped.
///
/// # Examples
///
/// ```
/// use sitepubs::highlight_author;
///
/// assert_eq!(
///     highlight_author("A. Smith, S. Wang", "Shengbo Wang"),
///     "A. Smith, <strong>S. Wang</strong>"
/// );
/// ```
pub fn highlight_author(authors: &str, name: &str) -> String {
    for variant in name_variants(name) {
        let wrapped = format!("{EMPHASIS_OPEN}{variant}{EMPHASIS_CLOSE}");
        if authors.contains(&wrapped) {
            return authors.to_string();
        }
        if authors.contains(&variant) {
            return authors.replace(&variant, &wrapped);
        }
    }
    authors.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: &str = "Shengbo Wang";

    fn chars(items: &[&str]) -> AuthorsField {
        AuthorsField::from_items(items.iter().copied())
    }

    fn text(s: &str) -> AuthorsField {
        AuthorsField::Text(s.to_string())
    }

    #[test]
    fn test_corrupted_sequence_scenario() {
        let raw = chars(&[
            "C", "h", "e", "n", "y", "u", "", "T", "a", "n", "g", "", "a", "n", "d", "", "S", "h",
            "e", "n", "g", "b", "o", "", "W", "a", "n", "g",
        ]);
        assert_eq!(
            normalize_authors(Some(&raw), ME),
            "Chenyu Tang, <strong>Shengbo Wang</strong>"
        );
    }

    #[test]
    fn test_run_together_and_is_imperfect() {
        // The joined "and" rule needs whitespace after "and", so "Tangand"
        // keeps its suffix once the case boundary has become ", ".
        assert_eq!(
            normalize_authors(Some(&text("Chenyu TangandShengbo Wang")), ME),
            "Chenyu Tangand, <strong>Shengbo Wang</strong>"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_authors(None, ME), "");
        assert_eq!(normalize_authors(Some(&chars(&[])), ME), "");
        assert_eq!(normalize_authors(Some(&text("   ")), ME), "");
    }

    #[test]
    fn test_proper_list() {
        let raw = chars(&["Chenyu Tang", "Shengbo Wang"]);
        assert_eq!(
            normalize_authors(Some(&raw), ME),
            "Chenyu Tang, <strong>Shengbo Wang</strong>"
        );
    }

    #[test]
    fn test_proper_list_trims_and_drops_empties() {
        let raw = chars(&["  Alice Smith ", "", "Bob   Jones"]);
        assert_eq!(normalize_authors(Some(&raw), ME), "Alice Smith, Bob Jones");
    }

    #[test]
    fn test_half_single_chars_is_a_literal_list() {
        let raw = chars(&["A", "B", "Carol Smith", "Dan Jones"]);
        assert_eq!(normalize_authors(Some(&raw), ME), "A, B, Carol Smith, Dan Jones");
    }

    #[test]
    fn test_majority_single_chars_is_reconstructed() {
        let raw = chars(&["A", "l", "", "B"]);
        assert_eq!(normalize_authors(Some(&raw), ME), "Al B");
    }

    #[test]
    fn test_reconstruct_marks() {
        assert_eq!(reconstruct_from_chars(&strings(&["S", ".", "", "W", "a", "n", "g"])), "S. Wang");
        assert_eq!(reconstruct_from_chars(&strings(&["A", "b", "", "&", "", "C", "d"])), "Ab& Cd");
        // Commas only end the current word
        assert_eq!(reconstruct_from_chars(&strings(&["A", "b", ",", "C", "d"])), "AbCd");
        // Other punctuation is dropped
        assert_eq!(reconstruct_from_chars(&strings(&["A", "b", "-", "c"])), "Abc");
    }

    #[test]
    fn test_reconstructed_abbreviation_is_highlighted() {
        let raw = chars(&["S", ".", "", "W", "a", "n", "g"]);
        assert_eq!(normalize_authors(Some(&raw), ME), "<strong>S. Wang</strong>");
    }

    #[test]
    fn test_clean_punctuation() {
        assert_eq!(clean_punctuation("Alice Smith and Bob Jones"), "Alice Smith, Bob Jones");
        assert_eq!(clean_punctuation("Alice Smithand Bob Jones"), "Alice Smith, Bob Jones");
        assert_eq!(clean_punctuation("Alice SmithBob Jones"), "Alice Smith, Bob Jones");
        assert_eq!(clean_punctuation("Alice Smith ,Bob   Jones  "), "Alice Smith, Bob Jones");
        assert_eq!(clean_punctuation("Alice Smith,\tBob Jones"), "Alice Smith, Bob Jones");
    }

    #[test]
    fn test_highlight_priority() {
        assert_eq!(
            highlight_author("Shengbo Wang, S. Wang", ME),
            "<strong>Shengbo Wang</strong>, S. Wang"
        );
    }

    #[test]
    fn test_highlight_middle_name() {
        assert_eq!(
            highlight_author("Alice Smith, Shengbo Wang", "Shengbo X. Wang"),
            "Alice Smith, <strong>Shengbo Wang</strong>"
        );
    }

    #[test]
    fn test_highlight_does_not_double_wrap() {
        let once = "Alice Smith, <strong>Shengbo Wang</strong>";
        assert_eq!(highlight_author(once, ME), once);
        let abbreviated = "<strong>S. Wang</strong>, Alice Smith";
        assert_eq!(highlight_author(abbreviated, ME), abbreviated);
    }

    #[test]
    fn test_highlight_without_name() {
        assert_eq!(highlight_author("Alice Smith", ""), "Alice Smith");
        assert_eq!(highlight_author("Alice Smith", "Nobody Here"), "Alice Smith");
    }

    #[test]
    fn test_name_variants() {
        assert_eq!(
            name_variants("Shengbo Wang"),
            vec!["Shengbo Wang".to_string(), "S. Wang".to_string()]
        );
        assert_eq!(
            name_variants("  Shengbo  X.  Wang "),
            vec!["Shengbo X. Wang".to_string(), "Shengbo Wang".to_string(), "S. Wang".to_string()]
        );
        assert_eq!(name_variants("Wang"), vec!["Wang".to_string()]);
        assert!(name_variants(" ").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let inputs = vec![
            chars(&[
                "C", "h", "e", "n", "y", "u", "", "T", "a", "n", "g", "", "a", "n", "d", "", "S",
                "h", "e", "n", "g", "b", "o", "", "W", "a", "n", "g",
            ]),
            chars(&["Chenyu Tang", "Shengbo Wang", "S. Wang"]),
            chars(&["A", "b", ",", "C", "d"]),
            text("Chenyu TangandShengbo Wang"),
            text("x and y and Zed and Wu"),
            text("McDonald and Shengbo Wang"),
            text("  S. Wang ,  Alice Smith  "),
        ];
        for raw in inputs {
            let once = normalize_authors(Some(&raw), ME);
            let twice = normalize_authors(Some(&text(&once)), ME);
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_numbers_are_not_characters() {
        let raw = AuthorsField::List(vec![
            Value::Number(1.into()),
            Value::Number(2.into()),
            Value::Number(3.into()),
            Value::String("Alice Smith".into()),
        ]);
        assert_eq!(normalize_authors(Some(&raw), ME), "1, 2, 3, Alice Smith");
    }

    #[test]
    fn test_scalar_authors() {
        let raw = AuthorsField::Other(Value::Number(7.into()));
        assert_eq!(normalize_authors(Some(&raw), ME), "7");
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }
}
