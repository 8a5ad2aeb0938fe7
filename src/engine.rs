use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

use crate::core::{PlayerRecord, ResolveResponse};
use crate::error::{EngineError, Result};
use crate::extract::{HtmlExtractor, MarkdownExtractor, TableExtractor};
use crate::matching::{resolve_names, MatchThresholds};
use crate::sources::{Mode, RankingSource};

/// Main ranking resolution orchestrator: fetch, extract, resolve
pub struct RankEngine {
    source: Arc<dyn RankingSource>,
    extractors: Vec<Box<dyn TableExtractor>>,
    thresholds: MatchThresholds,
}

/// One resolution request
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub names: Vec<String>,
    pub mode: Mode,
}

impl RankEngine {
    /// Create an engine with the default extraction strategies:
    /// markdown first, HTML as the fallback shape
    pub fn new(source: Arc<dyn RankingSource>) -> Self {
        Self {
            source,
            extractors: vec![
                Box::new(MarkdownExtractor::new()),
                Box::new(HtmlExtractor::new()),
            ],
            thresholds: MatchThresholds::default(),
        }
    }

    /// Override the fuzzy acceptance thresholds
    pub fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Override the extraction strategy list (tried in order)
    pub fn with_extractors(mut self, extractors: Vec<Box<dyn TableExtractor>>) -> Self {
        self.extractors = extractors;
        self
    }

    /// Resolve a list of names against the current published ranking.
    ///
    /// Unmatched names are data, not errors: every input yields exactly one
    /// row. The call fails only when the page cannot be fetched or no table
    /// can be extracted from it.
    pub async fn resolve(&self, request: ResolveRequest) -> Result<ResolveResponse> {
        let start = Instant::now();

        let text = self.source.fetch(request.mode).await?;
        let fetched_at = Utc::now();

        let (records, extractor) = self.extract_records(&text)?;
        tracing::debug!(
            "{} canonical records extracted via {} for {}",
            records.len(),
            extractor,
            request.mode
        );

        let rows = resolve_names(&request.names, &records, &self.thresholds);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(ResolveResponse {
            mode: request.mode,
            rows,
            fetched_at,
            latency_ms,
            extractor,
        })
    }

    /// Fetch and extract the canonical record list without resolving names
    pub async fn records(&self, mode: Mode) -> Result<Vec<PlayerRecord>> {
        let text = self.source.fetch(mode).await?;
        let (records, _) = self.extract_records(&text)?;
        Ok(records)
    }

    fn extract_records(&self, text: &str) -> Result<(Vec<PlayerRecord>, String)> {
        // A table that was found but not understood outranks finding nothing
        let mut last_err = EngineError::NoTableFound;

        for extractor in &self.extractors {
            match extractor.extract(text) {
                Ok(records) => return Ok((records, extractor.name().to_string())),
                Err(e) => {
                    tracing::debug!("Extractor {} failed: {}", extractor.name(), e);
                    if matches!(e, EngineError::UnrecognizedShape) {
                        last_err = e;
                    }
                }
            }
        }

        Err(last_err)
    }
}

/// Split a caller-supplied name list on comma, pipe, or newline; trim each
/// entry and drop empties. An empty result is the caller's validation
/// problem, not the engine's.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(['\n', ',', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
