use std::collections::HashSet;

use serde::Serialize;

use super::frame::{ColumnValues, DataFrame};

/// Summary statistics of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: &'static str,
    pub count: usize,
    pub missing: usize,
    pub distinct: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

/// Summary of a whole data frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameProfile {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

impl FrameProfile {
    pub fn of(frame: &DataFrame) -> Self {
        Self {
            rows: frame.row_count(),
            columns: frame.columns.iter().map(|column| profile_column(&column.name, &column.values)).collect(),
        }
    }

    /// Share of missing cells across the frame, 0 when the frame is empty
    pub fn missing_ratio(&self) -> f64 {
        let cells: usize = self.columns.iter().map(|column| column.count).sum();
        if cells == 0 {
            return 0.0;
        }
        let missing: usize = self.columns.iter().map(|column| column.missing).sum();
        missing as f64 / cells as f64
    }
}

fn profile_column(name: &str, values: &ColumnValues) -> ColumnProfile {
    let mut profile = ColumnProfile {
        name: name.to_string(),
        kind: values.kind(),
        count: values.len(),
        missing: 0,
        distinct: 0,
        min: None,
        max: None,
        mean: None,
    };

    match values {
        ColumnValues::Number(values) => {
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            profile.missing = values.len() - present.len();
            profile.distinct = present.iter().map(|value| value.to_bits()).collect::<HashSet<_>>().len();
            if !present.is_empty() {
                profile.min = present.iter().copied().reduce(f64::min);
                profile.max = present.iter().copied().reduce(f64::max);
                profile.mean = Some(present.iter().sum::<f64>() / present.len() as f64);
            }
        }
        ColumnValues::Boolean(values) => {
            let present: HashSet<bool> = values.iter().flatten().copied().collect();
            profile.missing = values.iter().filter(|value| value.is_none()).count();
            profile.distinct = present.len();
        }
        ColumnValues::Text(values) => {
            let present: HashSet<&str> = values.iter().flatten().map(String::as_str).collect();
            profile.missing = values.iter().filter(|value| value.is_none()).count();
            profile.distinct = present.len();
        }
    }

    profile
}
