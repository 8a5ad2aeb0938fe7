use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Punctuation that commonly varies between spellings of the same name
const NAME_PUNCTUATION: &[char] = &['.', ',', '\'', '\u{2019}', '-'];

/// Canonicalize a raw name into a comparable token sequence.
///
/// NFKD-decomposes and drops combining marks, lowercases, maps name
/// punctuation to spaces, collapses whitespace, and drops single-character
/// tokens (stray initials and punctuation remnants). Two names are the same
/// identity iff their normalized forms are equal.
pub fn normalize_name(raw: &str) -> String {
    let folded: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let spaced: String = folded
        .chars()
        .map(|c| if NAME_PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();

    spaced
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Final token of a normalized name, used for last-name grouping.
/// Empty normalized names group under the empty key.
pub fn last_token(normalized: &str) -> &str {
    normalized.rsplit(' ').next().unwrap_or("")
}
