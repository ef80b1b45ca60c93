//! Text folding for duplicate detection.
//!
//! Scholar profiles often list the same paper twice (preprint and published
//! version, or with different accents/casing in the title). Titles are
//! compared on a folded key:
//! - Distinct letters that don't decompose are mapped to ASCII (ł → l, ø → o)
//! - Accents are stripped via NFD
//! - Lowercase, punctuation removed, whitespace collapsed

use unicode_normalization::UnicodeNormalization;

/// Fold text into a comparison key.
///
/// # Examples
///
/// ```
/// use sitepubs::utils::fold_text;
///
/// assert_eq!(fold_text("Schrödinger's  Cat: A Study"), "schrodingers cat a study");
/// assert_eq!(fold_text("Łódź"), "lodz");
/// ```
pub fn fold_text(text: &str) -> String {
    text.chars()
        .map(ascii_substitute)
        .collect::<String>()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Letters that are not accented forms and so survive NFD.
fn ascii_substitute(c: char) -> char {
    match c {
        'Ł' => 'L',
        'ł' => 'l',
        'Ø' => 'O',
        'ø' => 'o',
        'Æ' => 'A',
        'æ' => 'a',
        'ß' => 's',
        'Ð' | 'Đ' => 'D',
        'ð' | 'đ' => 'd',
        'Þ' => 'T',
        'þ' => 't',
        'ı' => 'i',
        _ => c,
    }
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}
