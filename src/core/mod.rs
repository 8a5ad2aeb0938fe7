pub mod match_row;
pub mod record;

pub use match_row::{MatchRow, ResolveResponse};
pub use record::{dedup_records, PlayerRecord};
