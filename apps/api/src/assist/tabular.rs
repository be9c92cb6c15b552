//! Tabular input handling for the batch modes.
//!
//! The prompt templates take tabular data as a plain CSV snippet, so
//! line-per-entry input is serialized into a single-column CSV here, and
//! pasted/uploaded CSV is parsed just enough to check headers and build a
//! bounded preview. Quoting follows RFC 4180: fields containing a comma,
//! quote, or newline are wrapped in double quotes with inner quotes doubled.

use serde::Serialize;

/// Rows returned by a preview.
const PREVIEW_ROW_LIMIT: usize = 5;

/// A parsed CSV payload: header columns plus data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Bounded view of a CSV payload for UI display.
#[derive(Debug, Clone, Serialize)]
pub struct CsvPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl CsvTable {
    /// Whether the header carries the given column (name match after trim).
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.trim() == name)
    }

    /// First rows of the table, capped at the preview limit.
    pub fn preview(&self) -> CsvPreview {
        CsvPreview {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(PREVIEW_ROW_LIMIT).cloned().collect(),
            total_rows: self.rows.len(),
        }
    }
}

/// Serializes line-per-entry input into a single-column CSV with a `text`
/// header. Blank lines are dropped; returns `None` when nothing remains.
pub fn lines_to_csv(raw: &str) -> Option<String> {
    let entries: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if entries.is_empty() {
        return None;
    }

    let mut csv = String::from("text\n");
    for entry in entries {
        csv.push_str(&quote_field(entry));
        csv.push('\n');
    }
    Some(csv)
}

/// Parses CSV content into a header and data rows. Returns `None` when there
/// is no header record. Quoted fields may span lines; rows are padded or cut
/// to the header's column count.
pub fn parse_csv(content: &str) -> Option<CsvTable> {
    let mut records = split_csv_records(content)
        .into_iter()
        .filter(|record| !record.trim().is_empty());
    let columns = split_csv_fields(records.next()?);

    let rows = records
        .map(|record| {
            let mut fields = split_csv_fields(record);
            fields.resize(columns.len(), String::new());
            fields
        })
        .collect();

    Some(CsvTable { columns, rows })
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits content into records at newlines outside quoted fields. Handles
/// CRLF line endings by trimming the trailing `\r` from each record.
fn split_csv_records(content: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, c) in content.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => {
                let record = &content[start..i];
                records.push(record.strip_suffix('\r').unwrap_or(record));
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < content.len() {
        let record = &content[start..];
        records.push(record.strip_suffix('\r').unwrap_or(record));
    }
    records
}

/// Splits one record into fields, honoring double-quote escaping.
/// Quoted fields may contain commas and newlines; a doubled quote inside a
/// quoted field is a literal quote.
fn split_csv_fields(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_become_single_column_csv() {
        let csv = lines_to_csv("first message\nsecond message\n").unwrap();
        assert_eq!(csv, "text\nfirst message\nsecond message\n");
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let csv = lines_to_csv("one\n\n   \ntwo\n").unwrap();
        assert_eq!(csv, "text\none\ntwo\n");
    }

    #[test]
    fn test_lines_are_trimmed() {
        let csv = lines_to_csv("  padded entry  \n").unwrap();
        assert_eq!(csv, "text\npadded entry\n");
    }

    #[test]
    fn test_no_usable_lines_yields_none() {
        assert!(lines_to_csv("").is_none());
        assert!(lines_to_csv("\n  \n\n").is_none());
    }

    #[test]
    fn test_comma_in_entry_is_quoted() {
        let csv = lines_to_csv("balance wrong, missing money").unwrap();
        assert_eq!(csv, "text\n\"balance wrong, missing money\"\n");
    }

    #[test]
    fn test_quotes_in_entry_are_doubled() {
        let csv = lines_to_csv("she said \"refund\"").unwrap();
        assert_eq!(csv, "text\n\"she said \"\"refund\"\"\"\n");
    }

    #[test]
    fn test_lines_round_trip_through_parse() {
        let raw = "plain entry\nwith, comma\nwith \"quotes\"\n";
        let table = parse_csv(&lines_to_csv(raw).unwrap()).unwrap();
        assert_eq!(table.columns, vec!["text"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["plain entry".to_string()],
                vec!["with, comma".to_string()],
                vec!["with \"quotes\"".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_splits_header_and_rows() {
        let table = parse_csv("text,label\nhello,informational\nbad app,complaint\n").unwrap();
        assert_eq!(table.columns, vec!["text", "label"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["bad app", "complaint"]);
    }

    #[test]
    fn test_parse_handles_quoted_commas() {
        let table = parse_csv("text,label\n\"hi, there\",informational\n").unwrap();
        assert_eq!(table.rows[0], vec!["hi, there", "informational"]);
    }

    #[test]
    fn test_parse_handles_escaped_quotes() {
        let table = parse_csv("text\n\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(table.rows[0], vec!["say \"hi\""]);
    }

    #[test]
    fn test_parse_handles_newline_inside_quoted_field() {
        let table = parse_csv("text,label\n\"first line\nsecond line\",complaint\n").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0], vec!["first line\nsecond line", "complaint"]);
    }

    #[test]
    fn test_parse_strips_carriage_returns() {
        let table = parse_csv("text,label\r\nhi,ok\r\n").unwrap();
        assert_eq!(table.columns, vec!["text", "label"]);
        assert_eq!(table.rows[0], vec!["hi", "ok"]);
    }

    #[test]
    fn test_preview_counts_multiline_field_as_one_row() {
        let preview = parse_csv("text\n\"a\nb\"\nplain\n").unwrap().preview();
        assert_eq!(preview.total_rows, 2);
        assert_eq!(preview.rows[0], vec!["a\nb"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_csv("text,label\nonly text\n").unwrap();
        assert_eq!(table.rows[0], vec!["only text", ""]);
    }

    #[test]
    fn test_long_rows_are_cut_to_header_width() {
        let table = parse_csv("text\na,b,c\n").unwrap();
        assert_eq!(table.rows[0], vec!["a"]);
    }

    #[test]
    fn test_empty_content_has_no_table() {
        assert!(parse_csv("").is_none());
        assert!(parse_csv("\n\n").is_none());
    }

    #[test]
    fn test_has_column_trims_header_whitespace() {
        let table = parse_csv(" text , label \nhi,ok\n").unwrap();
        assert!(table.has_column("text"));
        assert!(table.has_column("label"));
        assert!(!table.has_column("Text"), "column match is case-sensitive");
    }

    #[test]
    fn test_preview_is_bounded() {
        let content = format!("text\n{}", "row\n".repeat(9));
        let preview = parse_csv(&content).unwrap().preview();
        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.total_rows, 9);
        assert_eq!(preview.columns, vec!["text"]);
    }

    #[test]
    fn test_preview_of_small_table_keeps_all_rows() {
        let preview = parse_csv("text\na\nb\n").unwrap().preview();
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.total_rows, 2);
    }
}
