//! The multi-sheet pivot report and its `.xlsx` serialization.

use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::config;
use crate::delta::DeltaReport;
use crate::error::{PricePivotError, Result};
use crate::models::Dimension;
use crate::pivot::PivotTable;

// ---------------------------------------------------------------------------
// ReportCell / ReportSheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ReportCell {
    Empty,
    Number(f64),
    Text(String),
}

impl ReportCell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ReportCell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ReportCell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&Dimension> for ReportCell {
    fn from(value: &Dimension) -> Self {
        match value {
            Dimension::Number(v) => ReportCell::Number(v.0),
            Dimension::Text(s) => ReportCell::Text(s.clone()),
        }
    }
}

impl From<Option<f64>> for ReportCell {
    fn from(value: Option<f64>) -> Self {
        value.map(ReportCell::Number).unwrap_or(ReportCell::Empty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<ReportCell>>,
}

impl ReportSheet {
    /// Index of the named header column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Row whose first cell is the given dimension.
    pub fn row_for(&self, dimension: &Dimension) -> Option<&[ReportCell]> {
        let key = ReportCell::from(dimension);
        self.rows
            .iter()
            .find(|row| row.first() == Some(&key))
            .map(Vec::as_slice)
    }
}

/// Lay a pivot out as `WIDTH | <period> ...`, one row per dimension.
fn pivot_sheet(name: String, pivot: &PivotTable) -> ReportSheet {
    let mut header = vec![config::DIMENSION_COLUMN.to_string()];
    header.extend(pivot.periods().iter().map(|p| p.to_string()));

    let rows = pivot
        .dimensions()
        .map(|dim| {
            let mut row = vec![ReportCell::from(dim)];
            row.extend(
                pivot
                    .periods()
                    .iter()
                    .map(|p| ReportCell::from(pivot.get(dim, p))),
            );
            row
        })
        .collect();

    ReportSheet { name, header, rows }
}

// ---------------------------------------------------------------------------
// ReportWorkbook
// ---------------------------------------------------------------------------

/// Output workbook: one pivot sheet per source sheet, `TOTAL`, and the
/// `PERCENTAGE CHANGE SUMMARY` sheet when two periods could be compared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportWorkbook {
    pub sheets: Vec<ReportSheet>,
}

impl ReportWorkbook {
    pub fn build(sheet_pivots: &[(String, PivotTable)], total: &PivotTable, delta: &DeltaReport) -> Self {
        let mut names = SheetNames::reserving(&[config::TOTAL_SHEET, config::SUMMARY_SHEET]);
        let mut sheets = Vec::with_capacity(sheet_pivots.len() + 2);

        for (source, pivot) in sheet_pivots {
            sheets.push(pivot_sheet(names.claim(source), pivot));
        }

        let mut total_sheet = pivot_sheet(config::TOTAL_SHEET.to_string(), total);
        total_sheet.header.push(config::CHANGE_COLUMN.to_string());
        for (row, dim) in total_sheet.rows.iter_mut().zip(total.dimensions()) {
            let change = delta
                .change(dim)
                .map(|c| c.to_string())
                .filter(|s| !s.is_empty());
            row.push(change.map(ReportCell::Text).unwrap_or(ReportCell::Empty));
        }
        sheets.push(total_sheet);

        if delta.has_comparison() {
            let header = vec![
                config::DIMENSION_COLUMN.to_string(),
                config::PREVIOUS_VALUE_COLUMN.to_string(),
                config::PRESENT_VALUE_COLUMN.to_string(),
                config::CHANGE_COLUMN.to_string(),
            ];
            let rows = delta
                .entries
                .iter()
                .map(|(dim, entry)| {
                    let change = entry.change.to_string();
                    vec![
                        ReportCell::from(dim),
                        ReportCell::from(entry.previous),
                        ReportCell::from(entry.current),
                        if change.is_empty() {
                            ReportCell::Empty
                        } else {
                            ReportCell::Text(change)
                        },
                    ]
                })
                .collect();
            sheets.push(ReportSheet {
                name: config::SUMMARY_SHEET.to_string(),
                header,
                rows,
            });
        }

        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&ReportSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Serialize to `.xlsx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        for sheet in &self.sheets {
            let ws = workbook.add_worksheet();
            ws.set_name(&sheet.name)?;

            for (col, title) in sheet.header.iter().enumerate() {
                ws.write_string_with_format(0, column_number(&sheet.name, col)?, title, &bold)?;
            }
            for (r, row) in sheet.rows.iter().enumerate() {
                let r = row_number(&sheet.name, r + 1)?;
                for (col, cell) in row.iter().enumerate() {
                    let col = column_number(&sheet.name, col)?;
                    match cell {
                        ReportCell::Empty => {}
                        ReportCell::Number(v) => {
                            ws.write_number(r, col, *v)?;
                        }
                        ReportCell::Text(s) => {
                            ws.write_string(r, col, s)?;
                        }
                    }
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        super::write_atomically(path.as_ref(), &bytes)?;
        info!("Wrote report with {} sheet(s) to {}", self.sheets.len(), path.as_ref().display());
        Ok(())
    }
}

fn column_number(sheet: &str, col: usize) -> Result<u16> {
    u16::try_from(col)
        .ok()
        .filter(|c| *c < config::MAX_SHEET_COLUMNS)
        .ok_or_else(|| {
            PricePivotError::InvalidInput(format!(
                "sheet '{}' needs more than {} columns",
                sheet,
                config::MAX_SHEET_COLUMNS
            ))
        })
}

fn row_number(sheet: &str, row: usize) -> Result<u32> {
    u32::try_from(row)
        .ok()
        .filter(|r| *r < config::MAX_SHEET_ROWS)
        .ok_or_else(|| {
            PricePivotError::InvalidInput(format!(
                "sheet '{}' needs more than {} rows",
                sheet,
                config::MAX_SHEET_ROWS
            ))
        })
}

// ---------------------------------------------------------------------------
// Sheet naming
// ---------------------------------------------------------------------------

/// Hands out Excel-legal, case-insensitively unique worksheet names for
/// source sheets, never handing out a reserved name.
struct SheetNames {
    used: HashSet<String>,
}

impl SheetNames {
    fn reserving(reserved: &[&str]) -> Self {
        Self {
            used: reserved.iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    fn claim(&mut self, wanted: &str) -> String {
        let cleaned: String = wanted
            .chars()
            .map(|c| match c {
                '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
                other => other,
            })
            .collect();
        let cleaned = cleaned.trim_matches('\'');
        let base = if cleaned.is_empty() { "Sheet" } else { cleaned };

        let mut candidate = truncate_chars(base, config::MAX_SHEET_NAME_LEN);
        let mut n = 1;
        while self.used.contains(&candidate.to_lowercase()) {
            let suffix = n.to_string();
            let keep = config::MAX_SHEET_NAME_LEN - suffix.len();
            candidate = format!("{}{}", truncate_chars(base, keep), suffix);
            n += 1;
        }
        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
