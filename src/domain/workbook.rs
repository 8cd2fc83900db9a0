// ============================================================
// WORKBOOK TABLE
// ============================================================
// First-sheet contents of an uploaded spreadsheet, header row split
// from the data rows. Cells are JSON values; `Null` marks a missing cell.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbookTable {
    /// Column names, in sheet order
    pub columns: Vec<String>,

    /// Data rows; every row has exactly `columns.len()` cells
    pub rows: Vec<Vec<Value>>,
}

impl WorkbookTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column with this exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Rewrite every column key with the same function
    pub fn rename_columns<F>(&mut self, rename: F)
    where
        F: Fn(&str) -> String,
    {
        self.columns = self.columns.iter().map(|c| rename(c)).collect();
    }

    /// Append a column holding `value` in every row. An existing column of
    /// the same name is overwritten instead.
    pub fn set_column(&mut self, name: &str, value: Value) {
        match self.column_index(name) {
            Some(index) => {
                for row in self.rows.iter_mut() {
                    row[index] = value.clone();
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in self.rows.iter_mut() {
                    row.push(value.clone());
                }
            }
        }
    }
}

/// Canonical form of a header: whitespace runs collapsed to one space,
/// lower-cased, trimmed. Applying it twice is a no-op.
pub fn canonical_column_name(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Spreadsheet null semantics: an empty cell or an empty string
pub fn is_null_cell(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
