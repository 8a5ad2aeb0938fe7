pub mod normalize;
pub mod resolver;
pub mod scorer;

pub use normalize::normalize_name;
pub use resolver::resolve_names;
pub use scorer::{ratio, token_set_ratio};

/// Acceptance thresholds for the fuzzy resolution tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchThresholds {
    /// Minimum token-set score for a high-confidence fuzzy match (tier 2)
    pub high: u32,

    /// Minimum token-set score for a last-resort fuzzy match (tier 4)
    pub low: u32,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self { high: 85, low: 75 }
    }
}
