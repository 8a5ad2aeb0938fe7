use rapidfuzz::distance::levenshtein;
use std::collections::BTreeSet;

/// Edit-distance similarity as an integer percentage.
///
/// `round((1 - distance / max(len_a, len_b, 1)) * 100)` over unit-cost
/// insert/delete/substitute distance. Two empty strings score 100.
pub fn ratio(a: &str, b: &str) -> u32 {
    let dist = levenshtein::distance(a.chars(), b.chars());
    let max_len = a.chars().count().max(b.chars().count()).max(1);
    ((1.0 - dist as f64 / max_len as f64) * 100.0).round() as u32
}

/// Token-set similarity as an integer percentage.
///
/// Treats each side as a sorted set of unique whitespace tokens and scores
/// the best of: common tokens vs either full string, and joined set vs
/// joined set. Rewards reordered tokens and extra middle names while still
/// penalizing wholesale mismatches. Sorting before joining keeps equal token
/// sets byte-identical, so the result is deterministic and symmetric.
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();

    let common = set_a
        .intersection(&set_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let joined_a = set_a.into_iter().collect::<Vec<_>>().join(" ");
    let joined_b = set_b.into_iter().collect::<Vec<_>>().join(" ");

    ratio(&common, a)
        .max(ratio(&common, b))
        .max(ratio(&joined_a, &joined_b))
}
