//! Typed tabular data accepted by the report generator.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Columns of one data set, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

/// Homogeneous column values; `null` marks a missing cell.
///
/// A JSON array mixing numbers, booleans and strings matches none of the
/// variants and is rejected during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValues {
    Number(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Number(values) => values.len(),
            Self::Boolean(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "numeric",
            Self::Boolean(_) => "boolean",
            Self::Text(_) => "text",
        }
    }

    /// Infer the narrowest column type for raw text cells. Empty cells are
    /// missing values, and so are `nan`/`inf` cells in a numeric column.
    fn infer(cells: Vec<String>) -> Self {
        let present = || cells.iter().map(|cell| cell.trim()).filter(|cell| !cell.is_empty());

        if present().all(|cell| cell.parse::<f64>().is_ok()) {
            return Self::Number(cells.iter().map(|cell| parse_finite(cell.trim())).collect());
        }

        if present().all(|cell| parse_bool(cell).is_some()) {
            return Self::Boolean(cells.iter().map(|cell| parse_bool(cell.trim())).collect());
        }

        Self::Text(
            cells
                .into_iter()
                .map(|cell| if cell.trim().is_empty() { None } else { Some(cell) })
                .collect(),
        )
    }
}

fn parse_finite(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl DataFrame {
    /// Parse CSV bytes with a mandatory header row.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, ReportError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);

        let names: Vec<String> = reader.headers()?.iter().map(|name| name.trim().to_string()).collect();
        if names.is_empty() {
            return Err(ReportError::Schema("CSV has no header row".into()));
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for record in reader.records() {
            let record = record?;
            for (column, cell) in cells.iter_mut().zip(record.iter()) {
                column.push(cell.to_string());
            }
        }

        let frame = Self {
            columns: names
                .into_iter()
                .zip(cells)
                .map(|(name, cells)| Column { name, values: ColumnValues::infer(cells) })
                .collect(),
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Reject frames whose shape cannot be profiled.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.columns.is_empty() {
            return Err(ReportError::Schema("Data frame has no columns".into()));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.trim().is_empty() {
                return Err(ReportError::Schema("Column names cannot be empty".into()));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(ReportError::Schema(format!("Duplicate column name: {}", column.name)));
            }
            if let ColumnValues::Number(values) = &column.values {
                if values.iter().flatten().any(|value| !value.is_finite()) {
                    return Err(ReportError::Schema(format!("Column {} has non-finite values", column.name)));
                }
            }
        }

        let rows = self.row_count();
        if let Some(column) = self.columns.iter().find(|column| column.values.len() != rows) {
            return Err(ReportError::Schema(format!(
                "Column {} has {} values, expected {}",
                column.name,
                column.values.len(),
                rows
            )));
        }

        Ok(())
    }

    /// Rows in the first column
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |column| column.values.len())
    }
}
