//! CSV export and re-import of a result set.
//!
//! Layout: header `query,visible,sentiment,urls`, one record per row,
//! `visible` as `true`/`false`. Fields containing the delimiter, quotes or
//! line breaks are quoted with doubled inner quotes, so parsing the
//! output reconstructs the rows exactly.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{Result, VisibilityError};
use crate::types::AnalysisRow;

pub const HEADER: [&str; 4] = ["query", "visible", "sentiment", "urls"];

/// Default file name offered for a download.
pub const DEFAULT_FILE_NAME: &str = "search_visibility_results.csv";

const DELIMITER: char = ',';

fn escape_field(field: &str) -> String {
    if field.contains(DELIMITER)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serialize rows to CSV text (header included, trailing newline).
pub fn to_csv(rows: &[AnalysisRow]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');

    for row in rows {
        let fields = [
            escape_field(&row.query),
            row.visible.to_string(),
            escape_field(&row.sentiment),
            escape_field(&row.urls),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Split CSV text into records of raw field values.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                field_started = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                field_started = false;
            }
            _ => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(VisibilityError::Parse("unterminated quoted field".into()));
    }
    if field_started || !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

fn parse_bool(raw: &str, line: usize) -> Result<bool> {
    match raw.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(VisibilityError::Parse(format!(
            "record {line}: visible must be true or false, got {other:?}"
        ))),
    }
}

/// Parse CSV text produced by [`to_csv`] back into rows.
pub fn parse_csv(text: &str) -> Result<Vec<AnalysisRow>> {
    let mut records = parse_records(text)?.into_iter();

    let header = records
        .next()
        .ok_or_else(|| VisibilityError::Parse("missing header row".into()))?;
    if header != HEADER {
        return Err(VisibilityError::Parse(format!(
            "unexpected header {:?}, expected {:?}",
            header, HEADER
        )));
    }

    records
        .enumerate()
        .map(|(index, record)| {
            let line = index + 1;
            let [query, visible, sentiment, urls]: [String; 4] =
                record.try_into().map_err(|fields: Vec<String>| {
                    VisibilityError::Parse(format!(
                        "record {line}: expected 4 fields, got {}",
                        fields.len()
                    ))
                })?;

            Ok(AnalysisRow {
                query,
                visible: parse_bool(&visible, line)?,
                sentiment,
                urls,
            })
        })
        .collect()
}

/// Write rows to a CSV file.
pub fn write_csv(path: impl AsRef<Path>, rows: &[AnalysisRow]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_csv(rows))?;
    info!(path = %path.display(), rows = rows.len(), "Exported results");
    Ok(())
}

/// Read rows back from a CSV file.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<AnalysisRow>> {
    parse_csv(&fs::read_to_string(path)?)
}
