pub mod html;
pub mod markdown;

use crate::core::PlayerRecord;
use crate::error::Result;

pub use html::HtmlExtractor;
pub use markdown::MarkdownExtractor;

/// Trait for table extraction strategies (markdown-shaped, HTML-shaped, ...)
pub trait TableExtractor: Send + Sync {
    /// Extract a deduplicated record list from raw source text.
    ///
    /// Fails with `NoTableFound` when no table-shaped region exists, or
    /// `UnrecognizedShape` when candidate tables were found but none yielded
    /// a valid name + rating row.
    fn extract(&self, text: &str) -> Result<Vec<PlayerRecord>>;

    /// Strategy name for logging
    fn name(&self) -> &str;
}

/// Header labels that identify the name column
const NAME_LABELS: &[&str] = &["name", "player"];

/// Header labels that identify the rating column
const RATING_LABELS: &[&str] = &["rating", "doubles", "singles", "cirp"];

/// Parse a rating cell: strip everything outside `[0-9.]`, then read the
/// leading float (a second dot ends the number, parseFloat-style)
pub(crate) fn parse_rating(cell: &str) -> Option<f64> {
    let mut buf = String::new();
    let mut seen_dot = false;
    for c in cell.chars().filter(|c| c.is_ascii_digit() || *c == '.') {
        match c {
            '.' if seen_dot => break,
            '.' => {
                seen_dot = true;
                buf.push(c);
            }
            _ => buf.push(c),
        }
    }
    if !buf.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    buf.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn find_label(header: &[String], labels: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let cell = cell.to_lowercase();
        labels.iter().any(|label| cell.contains(label))
    })
}

/// Locate the name and rating columns of one candidate table.
///
/// Stage one matches header labels case-insensitively. Any column still
/// unidentified is inferred from content: the rating column is the one with
/// the most numeric cells, the name column the one with the fewest, first
/// occurrence winning ties.
pub(crate) fn resolve_columns(
    header: &[String],
    data: &[Vec<String>],
) -> Option<(usize, usize)> {
    let mut name_idx = find_label(header, NAME_LABELS);
    let mut rating_idx = find_label(header, RATING_LABELS);

    if name_idx.is_none() || rating_idx.is_none() {
        let col_count = data.iter().map(|row| row.len()).max().unwrap_or(0);
        if col_count == 0 {
            return None;
        }

        let mut numeric = vec![0usize; col_count];
        for row in data {
            for (col, cell) in row.iter().enumerate() {
                if parse_rating(cell).is_some() {
                    numeric[col] += 1;
                }
            }
        }

        if rating_idx.is_none() {
            let mut best = 0;
            for (col, &count) in numeric.iter().enumerate() {
                if count > numeric[best] {
                    best = col;
                }
            }
            rating_idx = Some(best);
        }
        if name_idx.is_none() {
            let mut best = 0;
            for (col, &count) in numeric.iter().enumerate() {
                if count < numeric[best] {
                    best = col;
                }
            }
            name_idx = Some(best);
        }
    }

    Some((name_idx?, rating_idx?))
}

/// Pull (name, rating) rows out of a candidate table body, dropping rows
/// with empty names or unparseable ratings
pub(crate) fn collect_rows(
    name_idx: usize,
    rating_idx: usize,
    data: &[Vec<String>],
) -> Vec<PlayerRecord> {
    let mut items = Vec::new();
    for row in data {
        let name = row.get(name_idx).map(|s| s.trim()).unwrap_or("");
        if name.is_empty() {
            continue;
        }
        if let Some(rating) = row.get(rating_idx).and_then(|s| parse_rating(s)) {
            items.push(PlayerRecord::new(name, rating));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_strips_noise() {
        assert_eq!(parse_rating("4.521"), Some(4.521));
        assert_eq!(parse_rating(" 4.5 *"), Some(4.5));
        assert_eq!(parse_rating("#12"), Some(12.0));
        assert_eq!(parse_rating("n/a"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("..."), None);
    }

    #[test]
    fn test_parse_rating_second_dot_ends_number() {
        assert_eq!(parse_rating("4.5.2"), Some(4.5));
        assert_eq!(parse_rating("v1.2.3"), Some(1.2));
    }

    #[test]
    fn test_resolve_columns_by_label() {
        let header = vec!["".into(), "Player".into(), "Doubles Rating".into(), "".into()];
        let data = vec![vec!["".into(), "Big Show".into(), "3.9".into(), "".into()]];
        assert_eq!(resolve_columns(&header, &data), Some((1, 2)));
    }

    #[test]
    fn test_resolve_columns_statistical_fallback() {
        let header = vec!["Who".into(), "Score".into()];
        let data = vec![
            vec!["Big Show".into(), "3.9".into()],
            vec!["Jose Nunez".into(), "4.1".into()],
        ];
        // no label hit on either column; content decides
        assert_eq!(resolve_columns(&header, &data), Some((0, 1)));
    }

    #[test]
    fn test_resolve_columns_no_data() {
        let header = vec!["Who".into(), "Score".into()];
        assert_eq!(resolve_columns(&header, &[]), None);
    }

    #[test]
    fn test_collect_rows_drops_invalid() {
        let data = vec![
            vec!["Big Show".into(), "3.9".into()],
            vec!["".into(), "4.0".into()],
            vec!["No Rating".into(), "tbd".into()],
        ];
        let rows = collect_rows(0, 1, &data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Big Show");
    }
}
