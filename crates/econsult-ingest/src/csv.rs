//! CSV comment extraction.
//!
//! Every column is read as text through Arrow's CSV reader. The comment
//! column is the first column whose name matches [`PREFERRED_COLUMNS`]
//! (case-insensitive, in list order), else the first column.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, LargeStringArray, StringArray};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::IngestError;

/// Column names that hold comment text, in order of preference.
pub const PREFERRED_COLUMNS: &[&str] = &[
    "comment", "comments", "text", "response", "feedback", "remark",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read the comments of the CSV file at `path`, in row order.
pub fn read_comments(path: &Path) -> Result<Vec<String>, IngestError> {
    let bytes = std::fs::read(path)?;
    parse_comments(&bytes)
}

/// Extract comments from raw CSV bytes.
///
/// Tries the first row as a header, then no header. Null and blank cells
/// are dropped and embedded newlines become spaces.
pub fn parse_comments(bytes: &[u8]) -> Result<Vec<String>, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv);
    }

    let (schema, batches) = match read_table(bytes, true) {
        Ok(table) => table,
        Err(with_header) => {
            debug!(error = %with_header, "CSV did not parse with a header row; retrying without");
            read_table(bytes, false).map_err(|without_header| IngestError::UnparseableCsv {
                with_header: with_header.to_string(),
                without_header: without_header.to_string(),
            })?
        }
    };

    if schema.fields().is_empty() {
        return Err(IngestError::EmptyCsv);
    }
    let column = comment_column(&schema);
    debug!(column = %schema.field(column).name(), "selected comment column");

    let mut comments = Vec::new();
    for batch in &batches {
        let col = batch.column(column);
        for row in 0..batch.num_rows() {
            let Some(value) = get_string(col.as_ref(), row) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            comments.push(value.replace('\n', " "));
        }
    }
    Ok(comments)
}

/// Index of the comment column.
fn comment_column(schema: &Schema) -> usize {
    let names: Vec<String> = schema
        .fields()
        .iter()
        .map(|f| f.name().to_lowercase())
        .collect();
    PREFERRED_COLUMNS
        .iter()
        .find_map(|preferred| names.iter().position(|n| n == preferred))
        .unwrap_or(0)
}

/// Parse the whole file with every column typed as nullable text.
fn read_table(bytes: &[u8], header: bool) -> Result<(Arc<Schema>, Vec<RecordBatch>), ArrowError> {
    let format = Format::default()
        .with_header(header)
        .with_truncated_rows(true);
    let (inferred, _) = format.infer_schema(Cursor::new(bytes), None)?;

    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    if schema.fields().is_empty() {
        return Ok((schema, Vec::new()));
    }

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(header)
        .with_truncated_rows(true)
        .build(Cursor::new(bytes))?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

fn get_string(col: &dyn Array, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(row).to_string())
        .or_else(|| {
            col.as_any()
                .downcast_ref::<LargeStringArray>()
                .map(|arr| arr.value(row).to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_column_drops_blank_rows() {
        let csv = "feedback\nFirst remark\n\"\"\nSecond remark\nThird remark\n";
        let comments = parse_comments(csv.as_bytes()).unwrap();
        assert_eq!(comments, vec!["First remark", "Second remark", "Third remark"]);
    }

    #[test]
    fn prefers_named_comment_column() {
        let csv = "id,Name,Comment\n1,Asha,Support the draft\n2,Ravi,Too costly\n";
        let comments = parse_comments(csv.as_bytes()).unwrap();
        assert_eq!(comments, vec!["Support the draft", "Too costly"]);
    }

    #[test]
    fn preference_order_beats_column_order() {
        let csv = "remark,text\nfrom remark,from text\n";
        let comments = parse_comments(csv.as_bytes()).unwrap();
        assert_eq!(comments, vec!["from text"]);
    }

    #[test]
    fn falls_back_to_first_column() {
        let csv = "opinion,score\nLooks fine,3\nNeeds work,1\n";
        let comments = parse_comments(csv.as_bytes()).unwrap();
        assert_eq!(comments, vec!["Looks fine", "Needs work"]);
    }

    #[test]
    fn numeric_cells_are_read_as_text() {
        let csv = "comment\n42\n7\n";
        assert_eq!(parse_comments(csv.as_bytes()).unwrap(), vec!["42", "7"]);
    }

    #[test]
    fn strips_bom_and_joins_multiline_cells() {
        let csv = "\u{feff}comment\n\"line one\nline two\"\n";
        let comments = parse_comments(csv.as_bytes()).unwrap();
        assert_eq!(comments, vec!["line one line two"]);
    }

    #[test]
    fn short_rows_are_padded_with_nulls() {
        let csv = "name,comment\nA,Good idea\nB\nC,Bad idea\n";
        let comments = parse_comments(csv.as_bytes()).unwrap();
        assert_eq!(comments, vec!["Good idea", "Bad idea"]);
    }

    #[test]
    fn empty_input_is_empty_csv() {
        assert!(matches!(parse_comments(b""), Err(IngestError::EmptyCsv)));
        assert!(matches!(parse_comments(b"  \n\n"), Err(IngestError::EmptyCsv)));
        assert!(matches!(
            parse_comments(UTF8_BOM),
            Err(IngestError::EmptyCsv)
        ));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        std::fs::write(&path, "text\nWelcome change\n").unwrap();
        assert_eq!(read_comments(&path).unwrap(), vec!["Welcome change"]);
        assert!(matches!(
            read_comments(&dir.path().join("missing.csv")),
            Err(IngestError::TempFile(_))
        ));
    }

    #[test]
    fn empty_lines_are_not_comments() {
        let comments = parse_comments(b"feedback\nA\n\nB\nC\n").unwrap();
        assert_eq!(comments, vec!["A", "B", "C"]);

        let csv = "id,feedback\n1,First\n\n2,Second\n3,Third\n";
        let comments = parse_comments(csv.as_bytes()).unwrap();
        assert_eq!(comments, vec!["First", "Second", "Third"]);
    }
}
