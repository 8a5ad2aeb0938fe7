use scraper::{Html, Selector};

use crate::core::{dedup_records, PlayerRecord};
use crate::error::{EngineError, Result};
use crate::extract::{collect_rows, resolve_columns, TableExtractor};

/// HTML table extractor, the fallback strategy for when the origin serves
/// real markup instead of proxied markdown.
///
/// Each `<table>` is a candidate: the first row is treated as the header and
/// the rest as data, then the same column inference as the markdown strategy
/// applies. The first candidate yielding at least one valid record wins.
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EngineError::Other(format!("{:?}", e)))
}

impl TableExtractor for HtmlExtractor {
    fn extract(&self, text: &str) -> Result<Vec<PlayerRecord>> {
        let document = Html::parse_document(text);
        let table_sel = selector("table")?;
        let row_sel = selector("tr")?;
        let cell_sel = selector("td, th")?;

        let mut saw_table = false;
        for table in document.select(&table_sel) {
            saw_table = true;

            let rows: Vec<Vec<String>> = table
                .select(&row_sel)
                .map(|tr| {
                    tr.select(&cell_sel)
                        .map(|cell| cell.text().collect::<String>().trim().to_string())
                        .collect::<Vec<String>>()
                })
                .filter(|cells| !cells.is_empty())
                .collect();

            if rows.len() < 2 {
                continue;
            }

            let header = &rows[0];
            let data = &rows[1..];

            let Some((name_idx, rating_idx)) = resolve_columns(header, data) else {
                continue;
            };

            let items = collect_rows(name_idx, rating_idx, data);
            if !items.is_empty() {
                tracing::debug!("html table yielded {} raw rows", items.len());
                return Ok(dedup_records(items));
            }
        }

        if saw_table {
            Err(EngineError::UnrecognizedShape)
        } else {
            Err(EngineError::NoTableFound)
        }
    }

    fn name(&self) -> &str {
        "html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANKINGS_HTML: &str = r#"
<html><body>
<table>
  <thead><tr><th>Player</th><th>Rating</th></tr></thead>
  <tbody>
    <tr><td>Francisco Castillo</td><td>4.521</td></tr>
    <tr><td>Big Show</td><td>3.9</td></tr>
  </tbody>
</table>
</body></html>
"#;

    #[test]
    fn test_extracts_html_table() {
        let records = HtmlExtractor::new().extract(RANKINGS_HTML).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Francisco Castillo");
        assert_eq!(records[0].rating, 4.521);
    }

    #[test]
    fn test_unlabeled_header_uses_content_inference() {
        let html = r#"
<table>
  <tr><td>Who</td><td>Score</td></tr>
  <tr><td>Big Show</td><td>3.9</td></tr>
  <tr><td>Jose Nunez</td><td>4.1</td></tr>
</table>
"#;
        let records = HtmlExtractor::new().extract(html).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Jose Nunez");
        assert_eq!(records[1].rating, 4.1);
    }

    #[test]
    fn test_no_table_in_document() {
        let err = HtmlExtractor::new()
            .extract("<html><body><p>no tables here</p></body></html>")
            .unwrap_err();
        assert!(matches!(err, EngineError::NoTableFound));
    }

    #[test]
    fn test_table_without_rows_is_unrecognized() {
        let err = HtmlExtractor::new()
            .extract("<table><tr><th>Name</th><th>Rating</th></tr></table>")
            .unwrap_err();
        assert!(matches!(err, EngineError::UnrecognizedShape));
    }

    #[test]
    fn test_duplicate_rows_dedup() {
        let html = r#"
<table>
  <tr><th>Name</th><th>Rating</th></tr>
  <tr><td>José Núñez</td><td>4.1</td></tr>
  <tr><td>Jose Nunez</td><td>3.5</td></tr>
</table>
"#;
        let records = HtmlExtractor::new().extract(html).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "José Núñez");
        assert_eq!(records[0].rating, 4.1);
    }
}
