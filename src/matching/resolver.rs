use std::collections::HashMap;

use crate::core::{MatchRow, PlayerRecord};
use crate::matching::normalize::{last_token, normalize_name};
use crate::matching::scorer::token_set_ratio;
use crate::matching::MatchThresholds;

/// Resolve each input name against the record list.
///
/// Tiers, in strict order, first success wins:
/// 1. exact normalized-identity lookup;
/// 2. best token-set score across all records, accepted at `thresholds.high`;
/// 3. last-name grouping, highest rating among records sharing the input's
///    final normalized token (first encountered wins exact-rating ties);
/// 4. the same best fuzzy candidate, accepted at `thresholds.low`.
///
/// Every input yields exactly one row. Matched rows come back first, sorted
/// descending by rating (stable, so equal ratings keep input order) with
/// 1-based ranks; unmatched rows follow in input order with no rank.
pub fn resolve_names(
    inputs: &[String],
    records: &[PlayerRecord],
    thresholds: &MatchThresholds,
) -> Vec<MatchRow> {
    // Per-call indexes; nothing outlives this invocation.
    let normalized: Vec<String> = records.iter().map(|r| normalize_name(&r.name)).collect();

    let by_norm: HashMap<&str, &PlayerRecord> = normalized
        .iter()
        .zip(records)
        .map(|(norm, rec)| (norm.as_str(), rec))
        .collect();

    let mut by_last_name: HashMap<&str, Vec<&PlayerRecord>> = HashMap::new();
    for (norm, rec) in normalized.iter().zip(records) {
        by_last_name.entry(last_token(norm)).or_default().push(rec);
    }

    let mut matched: Vec<(String, &PlayerRecord)> = Vec::new();
    let mut unmatched: Vec<String> = Vec::new();

    for original in inputs {
        let norm = normalize_name(original);

        match resolve_one(&norm, records, &normalized, &by_norm, &by_last_name, thresholds) {
            Some(rec) => matched.push((original.clone(), rec)),
            None => unmatched.push(original.clone()),
        }
    }

    matched.sort_by(|a, b| {
        b.1.rating
            .partial_cmp(&a.1.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rows: Vec<MatchRow> = matched
        .into_iter()
        .enumerate()
        .map(|(idx, (original, rec))| {
            let mut row = MatchRow::matched(original, rec.name.clone(), rec.rating);
            row.sort_index = Some(idx + 1);
            row
        })
        .collect();

    rows.extend(unmatched.into_iter().map(MatchRow::unmatched));
    rows
}

fn resolve_one<'a>(
    norm: &str,
    records: &'a [PlayerRecord],
    normalized: &[String],
    by_norm: &HashMap<&str, &'a PlayerRecord>,
    by_last_name: &HashMap<&str, Vec<&'a PlayerRecord>>,
    thresholds: &MatchThresholds,
) -> Option<&'a PlayerRecord> {
    // Tier 1: exact identity
    if let Some(&rec) = by_norm.get(norm) {
        return Some(rec);
    }

    // Tiers 2 and 4 share the same best candidate; the strictly-greater
    // comparison keeps the first of equal scores.
    let mut best: Option<&PlayerRecord> = None;
    let mut best_score = 0u32;
    for (rec, rec_norm) in records.iter().zip(normalized) {
        let score = token_set_ratio(norm, rec_norm);
        if score > best_score {
            best_score = score;
            best = Some(rec);
        }
    }

    // Tier 2: high-confidence fuzzy
    if best_score >= thresholds.high {
        if let Some(rec) = best {
            tracing::debug!("fuzzy match at {} for '{}' -> '{}'", best_score, norm, rec.name);
            return Some(rec);
        }
    }

    // Tier 3: last-name grouping, highest rating wins
    if let Some(pool) = by_last_name.get(last_token(norm)) {
        let pick = pool
            .iter()
            .copied()
            .fold(None::<&PlayerRecord>, |acc, rec| match acc {
                Some(cur) if rec.rating > cur.rating => Some(rec),
                Some(cur) => Some(cur),
                None => Some(rec),
            });
        if let Some(rec) = pick {
            tracing::debug!("last-name match for '{}' -> '{}'", norm, rec.name);
            return Some(rec);
        }
    }

    // Tier 4: low-confidence fuzzy, last resort
    if best_score >= thresholds.low {
        if let Some(rec) = best {
            tracing::debug!(
                "low-confidence match at {} for '{}' -> '{}'",
                best_score,
                norm,
                rec.name
            );
            return Some(rec);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord::new("Francisco Castillo", 4.521),
            PlayerRecord::new("Big Show", 3.9),
        ]
    }

    #[test]
    fn test_exact_and_fuzzy_and_unmatched() {
        let records = sample_records();
        let inputs = vec![
            "Francisco Castillo".to_string(),
            "big show".to_string(),
            "Nonexistent Player".to_string(),
        ];

        let rows = resolve_names(&inputs, &records, &MatchThresholds::default());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].player, "Francisco Castillo");
        assert_eq!(rows[0].rating, Some(4.521));
        assert_eq!(rows[0].sort_index, Some(1));
        assert_eq!(rows[1].player, "Big Show");
        assert_eq!(rows[1].sort_index, Some(2));
        assert_eq!(rows[2].player, "Nonexistent Player");
        assert_eq!(rows[2].rating, None);
        assert_eq!(rows[2].sort_index, None);
    }

    #[test]
    fn test_misspelling_resolves_via_fuzzy_tier() {
        let records = sample_records();
        let inputs = vec!["Francsco Castilo".to_string()];

        let rows = resolve_names(&inputs, &records, &MatchThresholds::default());

        assert_eq!(rows[0].player, "Francisco Castillo");
        assert_eq!(rows[0].rating, Some(4.521));
    }

    #[test]
    fn test_last_name_tier_picks_highest_rating() {
        let records = vec![
            PlayerRecord::new("Ana Castillo", 3.1),
            PlayerRecord::new("Francisco Castillo", 4.521),
        ];
        // first name shares nothing; only the last name lines up
        let inputs = vec!["Zzyzx Castillo".to_string()];

        let rows = resolve_names(&inputs, &records, &MatchThresholds::default());

        assert_eq!(rows[0].player, "Francisco Castillo");
    }

    #[test]
    fn test_last_name_tier_first_wins_rating_tie() {
        let records = vec![
            PlayerRecord::new("Ana Castillo", 4.0),
            PlayerRecord::new("Francisco Castillo", 4.0),
        ];
        let inputs = vec!["Zzyzx Castillo".to_string()];

        let rows = resolve_names(&inputs, &records, &MatchThresholds::default());

        assert_eq!(rows[0].player, "Ana Castillo");
    }

    #[test]
    fn test_never_drops_inputs() {
        let records = sample_records();
        let inputs: Vec<String> = ["a b", "Big Show", "q r s", "Francisco Castillo"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = resolve_names(&inputs, &records, &MatchThresholds::default());
        assert_eq!(rows.len(), inputs.len());
    }

    #[test]
    fn test_rank_sequence_contiguous_and_sorted() {
        let records = vec![
            PlayerRecord::new("Low Player", 2.0),
            PlayerRecord::new("High Player", 5.0),
            PlayerRecord::new("Mid Player", 3.5),
        ];
        let inputs: Vec<String> = ["Low Player", "High Player", "Mid Player"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = resolve_names(&inputs, &records, &MatchThresholds::default());

        let ranks: Vec<Option<usize>> = rows.iter().map(|r| r.sort_index).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3)]);
        let ratings: Vec<f64> = rows.iter().filter_map(|r| r.rating).collect();
        assert_eq!(ratings, vec![5.0, 3.5, 2.0]);
    }

    #[test]
    fn test_equal_ratings_keep_input_order() {
        let records = vec![
            PlayerRecord::new("First Tied", 4.0),
            PlayerRecord::new("Second Tied", 4.0),
        ];
        let inputs: Vec<String> = ["Second Tied", "First Tied"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = resolve_names(&inputs, &records, &MatchThresholds::default());

        assert_eq!(rows[0].player, "Second Tied");
        assert_eq!(rows[0].sort_index, Some(1));
        assert_eq!(rows[1].player, "First Tied");
        assert_eq!(rows[1].sort_index, Some(2));
    }

    #[test]
    fn test_unmatched_keep_input_order_after_matched() {
        let records = sample_records();
        let inputs: Vec<String> = ["Zz Qq", "Big Show", "Yy Xx"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = resolve_names(&inputs, &records, &MatchThresholds::default());

        assert_eq!(rows[0].player, "Big Show");
        assert_eq!(rows[1].original, "Zz Qq");
        assert_eq!(rows[2].original, "Yy Xx");
    }

    #[test]
    fn test_empty_records_leaves_all_unmatched() {
        let inputs = vec!["Anyone".to_string()];
        let rows = resolve_names(&inputs, &[], &MatchThresholds::default());
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_matched());
    }
}
