// ============================================================
// EXCEL READER
// ============================================================
// Loads the first worksheet of an .xlsx file into a WorkbookTable.
// The first row is the header; fully blank rows are skipped.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::{Number, Value};

use crate::domain::error::{AppError, Result};
use crate::domain::workbook::WorkbookTable;

pub fn read_first_sheet(path: &Path) -> Result<WorkbookTable> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        AppError::ProcessingError(format!("Failed to open Excel file: {}", e))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ProcessingError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ProcessingError(format!("Failed to read Excel range: {}", e)))?;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(index, cell)| header_name(index, cell))
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<Value>> = rows
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_null()))
        .collect();

    tracing::debug!(
        columns = columns.len(),
        rows = data.len(),
        "Loaded first worksheet"
    );

    Ok(WorkbookTable::new(columns, data))
}

fn header_name(index: usize, cell: &Data) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {}", index),
        Data::String(s) if s.trim().is_empty() => format!("Unnamed: {}", index),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// Convert a cell to JSON. Whole floats become integers since xlsx stores
/// every number as a float.
pub fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}

fn float_value(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        return Value::Number((f as i64).into());
    }
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
