//! # Ranking Resolution Engine
//!
//! Resolves free-text player names against a published ranking table:
//! - Table extraction from weakly-structured text (markdown pipe tables,
//!   HTML tables) with label/content column inference
//! - Diacritic- and punctuation-insensitive name normalization
//! - Tiered fuzzy matching (exact, token-set, last-name grouping, low
//!   confidence) with deterministic tie-breaking
//! - Async fetch boundary, pure synchronous core
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rank_resolver_engine::{Mode, RankEngine, ResolveRequest, WebSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = RankEngine::new(Arc::new(WebSource::new()?));
//!
//!     let response = engine.resolve(ResolveRequest {
//!         names: vec!["Big Show".to_string(), "Francsco Castilo".to_string()],
//!         mode: Mode::Doubles,
//!     }).await?;
//!
//!     for row in &response.rows {
//!         println!("{:?} {} {:?}", row.sort_index, row.player, row.rating);
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod extract;
pub mod matching;
pub mod sources;

// Re-export primary types
pub use crate::core::{MatchRow, PlayerRecord, ResolveResponse};
pub use crate::engine::{parse_name_list, RankEngine, ResolveRequest};
pub use crate::error::{EngineError, Result};
pub use crate::matching::MatchThresholds;
pub use crate::sources::{Mode, RankingSource, WebSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
