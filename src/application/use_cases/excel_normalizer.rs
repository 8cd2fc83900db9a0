// ============================================================
// EXCEL NORMALIZER
// ============================================================
// Turns the first sheet of an uploaded workbook into CompanyRecords:
// canonical headers -> contact column -> validation -> row filter ->
// projection -> rename.

use std::path::Path;

use serde_json::Value;

use crate::domain::company::CompanyRecord;
use crate::domain::error::{AppError, Result};
use crate::domain::workbook::{canonical_column_name, is_null_cell, WorkbookTable};
use crate::infrastructure::config::ExcelConfig;
use crate::infrastructure::excel::read_first_sheet;

pub const COMPANY_COLUMN: &str = "company name";
pub const URL_COLUMN: &str = "url";
pub const CONTACT_COLUMN: &str = "contact";

/// Columns kept in the output, in output order
pub const PROJECTED_COLUMNS: [&str; 8] = [
    COMPANY_COLUMN,
    URL_COLUMN,
    "description(full)",
    "location",
    "founded year",
    "total funding",
    "industry",
    CONTACT_COLUMN,
];

pub const VALIDATION_FAILED: &str = "Excel File validation failed";

/// What the validation pass found. Row numbers are 1-based data rows.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub missing_columns: Vec<&'static str>,
    pub incomplete_rows: Vec<usize>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing_columns.is_empty() && self.incomplete_rows.is_empty()
    }
}

pub struct ExcelNormalizer {
    options: ExcelConfig,
}

impl Default for ExcelNormalizer {
    fn default() -> Self {
        Self::new(ExcelConfig::default())
    }
}

impl ExcelNormalizer {
    pub fn new(options: ExcelConfig) -> Self {
        Self { options }
    }

    pub fn normalize_file(&self, path: &Path) -> Result<Vec<CompanyRecord>> {
        let table = read_first_sheet(path)?;
        self.normalize_table(table)
    }

    pub fn normalize_table(&self, mut table: WorkbookTable) -> Result<Vec<CompanyRecord>> {
        let input_rows = table.row_count();

        table.rename_columns(canonical_column_name);
        table.set_column(CONTACT_COLUMN, Value::String(String::new()));

        let report = validate(&table);
        let rejected = if self.options.require_complete_rows {
            !report.is_valid()
        } else {
            !report.missing_columns.is_empty()
        };
        if rejected {
            tracing::warn!(
                missing_columns = ?report.missing_columns,
                incomplete_rows = report.incomplete_rows.len(),
                "Excel validation failed"
            );
            return Err(self.validation_error(&report));
        }

        drop_incomplete_rows(&mut table);
        let records = project(&table)?;

        tracing::info!(
            input_rows,
            output_rows = records.len(),
            "Normalized Excel upload"
        );
        Ok(records)
    }

    fn validation_error(&self, report: &ValidationReport) -> AppError {
        if !self.options.split_validation_errors {
            return AppError::ValidationError(VALIDATION_FAILED.to_string());
        }

        let message = if !report.missing_columns.is_empty() {
            let columns = report
                .missing_columns
                .iter()
                .map(|c| format!("'{}'", c))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: missing columns {}", VALIDATION_FAILED, columns)
        } else {
            let rows = report
                .incomplete_rows
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: missing values in rows {}", VALIDATION_FAILED, rows)
        };
        AppError::ValidationError(message)
    }
}

/// Checks the required columns exist and lists rows with a null company or url
pub fn validate(table: &WorkbookTable) -> ValidationReport {
    let mut report = ValidationReport::default();
    let company = table.column_index(COMPANY_COLUMN);
    let url = table.column_index(URL_COLUMN);

    if company.is_none() {
        report.missing_columns.push(COMPANY_COLUMN);
    }
    if url.is_none() {
        report.missing_columns.push(URL_COLUMN);
    }

    for (index, row) in table.rows.iter().enumerate() {
        let null_in = |column: Option<usize>| column.map(|c| is_null_cell(&row[c])).unwrap_or(false);
        if null_in(company) || null_in(url) {
            report.incomplete_rows.push(index + 1);
        }
    }

    report
}

/// Removes rows with a null company name or url; order is preserved
pub fn drop_incomplete_rows(table: &mut WorkbookTable) {
    let (company, url) = match (table.column_index(COMPANY_COLUMN), table.column_index(URL_COLUMN)) {
        (Some(company), Some(url)) => (company, url),
        _ => return,
    };
    table
        .rows
        .retain(|row| !is_null_cell(&row[company]) && !is_null_cell(&row[url]));
}

/// Selects the output columns and renames them into CompanyRecords. Every
/// projected column must exist.
pub fn project(table: &WorkbookTable) -> Result<Vec<CompanyRecord>> {
    let mut indices = Vec::with_capacity(PROJECTED_COLUMNS.len());
    let mut missing = Vec::new();
    for column in PROJECTED_COLUMNS {
        match table.column_index(column) {
            Some(index) => indices.push(index),
            None => missing.push(format!("'{}'", column)),
        }
    }
    if !missing.is_empty() {
        return Err(AppError::ProcessingError(format!(
            "[{}] not in index",
            missing.join(", ")
        )));
    }

    let records = table
        .rows
        .iter()
        .map(|row| {
            let cell = |i: usize| row[indices[i]].clone();
            CompanyRecord {
                company: cell(0),
                url: cell(1),
                description: cell(2),
                location: cell(3),
                year: cell(4),
                total_funding: cell(5),
                industry: cell(6),
                contact: String::new(),
            }
        })
        .collect();
    Ok(records)
}
