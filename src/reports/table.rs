use std::fmt::Write as _;

use serde::Serialize;

use crate::config;
use crate::models::{Dimension, Period};
use crate::pivot::PivotTable;

// ---------------------------------------------------------------------------
// VisualizationResult — latest column of the total pivot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationResult {
    pub period: Period,
    /// Mean price per dimension, ascending by dimension.
    pub values: Vec<(Dimension, f64)>,
}

impl VisualizationResult {
    /// Project the chronologically last period of `pivot`, or `None` when
    /// the pivot has no periods.
    pub fn from_pivot(pivot: &PivotTable) -> Option<Self> {
        let period = pivot.latest_period()?;
        let values = pivot
            .column(period)
            .into_iter()
            .map(|(dim, mean)| (dim.clone(), mean))
            .collect();
        Some(Self {
            period: period.clone(),
            values,
        })
    }

    pub fn labels(&self) -> Vec<String> {
        self.values.iter().map(|(d, _)| d.to_string()).collect()
    }

    pub fn means(&self) -> Vec<f64> {
        self.values.iter().map(|(_, v)| *v).collect()
    }
}

// ---------------------------------------------------------------------------
// TableView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub dimension: Dimension,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub period: Period,
    pub rows: Vec<TableRow>,
}

impl From<&VisualizationResult> for TableView {
    fn from(result: &VisualizationResult) -> Self {
        Self {
            period: result.period.clone(),
            rows: result
                .values
                .iter()
                .map(|(dimension, value)| TableRow {
                    dimension: dimension.clone(),
                    value: *value,
                })
                .collect(),
        }
    }
}

impl TableView {
    /// Two-column plain-text rendering headed by the period label.
    pub fn render_text(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|r| r.dimension.to_string().chars().count())
            .chain(std::iter::once(config::DIMENSION_COLUMN.len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", config::DATE_COLUMN, self.period);
        let _ = writeln!(out, "{:<width$}  {}", config::DIMENSION_COLUMN, config::PRICE_COLUMN);
        for row in &self.rows {
            let _ = writeln!(out, "{:<width$}  {:.2}", row.dimension.to_string(), row.value);
        }
        out
    }
}
