//! End-of-run statistics over the output table.

use serde::Serialize;

use crate::metrics::MetricRecord;
use crate::table::OutputRow;

/// Mean and range of one metric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub name: &'static str,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Run summary: row counts plus per-column statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub articles_processed: usize,
    /// Rows with a non-zero `WORD COUNT`.
    pub articles_with_content: usize,
    pub columns: Vec<ColumnStats>,
}

impl Summary {
    /// Summarizes `rows`. Zero rows from failed articles are included in the statistics.
    ///
    /// With no rows every statistic is 0.
    pub fn from_rows(rows: &[OutputRow]) -> Self {
        let articles_with_content = rows.iter().filter(|row| row.metrics.word_count > 0).count();

        let columns = MetricRecord::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, &name)| {
                let values: Vec<f64> = rows.iter().map(|row| row.metrics.values()[i]).collect();
                column_stats(name, &values)
            })
            .collect();

        Self { articles_processed: rows.len(), articles_with_content, columns }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.name == name)
    }
}

fn column_stats(name: &'static str, values: &[f64]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats { name, mean: 0.0, min: 0.0, max: 0.0 };
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    ColumnStats { name, mean: sum / values.len() as f64, min, max }
}
