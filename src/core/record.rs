use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::matching::normalize::normalize_name;

/// One player row as extracted from a ranking table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRecord {
    /// Display name, original spelling from the source table
    pub name: String,

    /// Published rating
    pub rating: f64,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, rating: f64) -> Self {
        Self {
            name: name.into(),
            rating,
        }
    }
}

/// Collapse raw rows into one record per normalized-name identity.
///
/// Two spellings that normalize to the same key are the same player; the
/// record with the highest rating survives and keeps its original display
/// spelling. First-seen order is preserved so downstream tie-breaks stay
/// deterministic.
pub fn dedup_records(raw: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
    let mut by_norm: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<PlayerRecord> = Vec::new();

    for rec in raw {
        let key = normalize_name(&rec.name);
        match by_norm.get(&key) {
            Some(&idx) => {
                if rec.rating > out[idx].rating {
                    out[idx] = rec;
                }
            }
            None => {
                by_norm.insert(key, out.len());
                out.push(rec);
            }
        }
    }

    out
}
