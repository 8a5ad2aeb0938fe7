use crate::core::{dedup_records, PlayerRecord};
use crate::error::{EngineError, Result};
use crate::extract::{collect_rows, resolve_columns, TableExtractor};

/// Markdown pipe-table extractor.
///
/// The published ranking page is served through a text proxy that renders
/// tables as pipe-delimited markdown: a header row, a separator row of
/// dashes, then data rows. A document may contain several independent table
/// blocks; candidates are evaluated in scan order and the first one that
/// yields at least one valid record wins.
pub struct MarkdownExtractor;

impl MarkdownExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// A row with at least two pipes
fn is_pipe_row(line: &str) -> bool {
    line.matches('|').count() >= 2
}

/// A pipe followed by optional whitespace and at least three dashes
fn is_separator_row(line: &str) -> bool {
    line.split('|')
        .skip(1)
        .any(|segment| segment.trim_start().starts_with("---"))
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

impl TableExtractor for MarkdownExtractor {
    fn extract(&self, text: &str) -> Result<Vec<PlayerRecord>> {
        let lines: Vec<&str> = text.lines().collect();

        // Collect candidate blocks: header + separator + trailing pipe rows
        let mut blocks: Vec<&[&str]> = Vec::new();
        let mut i = 0;
        while i + 1 < lines.len() {
            if is_pipe_row(lines[i]) && is_separator_row(lines[i + 1]) {
                let mut j = i + 2;
                while j < lines.len() && is_pipe_row(lines[j]) {
                    j += 1;
                }
                blocks.push(&lines[i..j]);
                i = j + 1;
            } else {
                i += 1;
            }
        }

        if blocks.is_empty() {
            return Err(EngineError::NoTableFound);
        }

        for block in &blocks {
            if block.len() < 3 {
                continue;
            }

            let header = split_cells(block[0]);
            let data: Vec<Vec<String>> = block[2..].iter().map(|line| split_cells(line)).collect();

            let Some((name_idx, rating_idx)) = resolve_columns(&header, &data) else {
                continue;
            };

            let items = collect_rows(name_idx, rating_idx, &data);
            if !items.is_empty() {
                tracing::debug!("markdown block yielded {} raw rows", items.len());
                return Ok(dedup_records(items));
            }
        }

        Err(EngineError::UnrecognizedShape)
    }

    fn name(&self) -> &str {
        "markdown"
    }
}
