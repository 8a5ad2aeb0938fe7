pub mod web;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use web::WebSource;

/// Which published ranking list to consult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Singles,
    #[default]
    Doubles,
}

impl Mode {
    /// Lenient parse matching the published endpoint: anything that is not
    /// `singles` resolves to doubles
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("singles") {
            Mode::Singles
        } else {
            Mode::Doubles
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Singles => "singles",
            Mode::Doubles => "doubles",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for ranking document sources.
///
/// The engine only needs a complete in-memory text payload per mode; how it
/// was retrieved is the source's concern. Retrieval failures surface as
/// `FetchFailed`, distinct from parse errors.
#[async_trait]
pub trait RankingSource: Send + Sync {
    /// Fetch the complete raw text of the ranking page for a mode
    async fn fetch(&self, mode: Mode) -> Result<String>;

    /// Source name for logging
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_lenient() {
        assert_eq!(Mode::parse("singles"), Mode::Singles);
        assert_eq!(Mode::parse("SINGLES"), Mode::Singles);
        assert_eq!(Mode::parse("doubles"), Mode::Doubles);
        assert_eq!(Mode::parse("anything"), Mode::Doubles);
        assert_eq!(Mode::parse(""), Mode::Doubles);
    }

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Singles).unwrap(), r#""singles""#);
        let mode: Mode = serde_json::from_str(r#""doubles""#).unwrap();
        assert_eq!(mode, Mode::Doubles);
    }
}
