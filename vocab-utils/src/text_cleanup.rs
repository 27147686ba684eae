//! Text normalization used when grading typed quiz answers.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::Language;

const COMBINING_TILDE: char = '\u{0303}';

/// Normalize text for grading purposes
///
/// - Replaces Unicode quote and hyphen variants with their ASCII equivalents
/// - Converts to lowercase and composes to NFC
/// - For Spanish: drops the inverted `¿` and `¡`
/// - Removes punctuation (except apostrophes and hyphens) and normalizes whitespace
pub fn normalize_for_grading(text: &str, language: Language) -> String {
    let normalized_chars = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}'
            | '\u{FF07}' | '\u{02BC}' | '`' | '\u{00B4}' => '\'',

            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{FF02}' => '"',

            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
            | '\u{2212}' | '\u{FF0D}' => '-',

            _ => c,
        })
        .collect::<String>();

    let lowercase = normalized_chars.nfc().collect::<String>().to_lowercase();

    lowercase
        .chars()
        .map(|c| match c {
            '¿' | '¡' if language == Language::Spanish => ' ',
            c if c.is_ascii_punctuation() && c != '\'' && c != '-' => ' ',
            c => c,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip accents ("canción" → "cancion") while keeping `ñ`, which is a separate letter in Spanish.
pub fn fold_accents(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    let mut previous_base = None;

    for c in text.nfd() {
        if is_combining_mark(c) {
            if c == COMBINING_TILDE && matches!(previous_base, Some('n' | 'N')) {
                folded.push(c);
            }
            continue;
        }
        folded.push(c);
        previous_base = Some(c);
    }

    folded.nfc().collect()
}
