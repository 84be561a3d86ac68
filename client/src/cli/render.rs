//! Plain-text and JSON output

use serde::Serialize;

use crate::error::ClientResult;

/// Shown instead of an empty table
pub const EMPTY_PLACEHOLDER: &str = "Nothing found";

/// Where command results go
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `rows` as a table, or `value` as JSON in JSON mode
    pub fn list<T: Serialize>(
        &self,
        value: &[T],
        headers: &[&str],
        rows: Vec<Vec<String>>,
    ) -> ClientResult<()> {
        if self.json {
            return self.json_value(&value);
        }
        println!("{}", format_table(headers, &rows));
        Ok(())
    }

    /// Print a single record as `label: value` lines
    pub fn record<T: Serialize>(&self, value: &T, fields: Vec<(&str, String)>) -> ClientResult<()> {
        if self.json {
            return self.json_value(value);
        }
        println!("{}", format_record(&fields));
        Ok(())
    }

    pub fn message<T: Serialize>(&self, value: &T, text: &str) -> ClientResult<()> {
        if self.json {
            return self.json_value(value);
        }
        println!("{}", text);
        Ok(())
    }

    fn json_value<T: Serialize + ?Sized>(&self, value: &T) -> ClientResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

pub fn format_record(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| format!("{:<width$}  {}", format!("{}:", label), value, width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_shows_placeholder() {
        assert_eq!(format_table(&["ID", "Name"], &[]), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn test_columns_are_aligned() {
        let table = format_table(
            &["ID", "Name"],
            &[
                vec!["1".into(), "Gold".into()],
                vec!["12".into(), "Silver".into()],
            ],
        );
        assert_eq!(table, "ID  Name\n1   Gold\n12  Silver");
    }

    #[test]
    fn test_record_labels_are_aligned() {
        let record = format_record(&[("ID", "4".into()), ("Status", "pending".into())]);
        assert_eq!(record, "ID:      4\nStatus:  pending");
    }
}
