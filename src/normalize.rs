//! Sheet qualification and row cleaning.
//!
//! A sheet takes part in the pipeline only when its header carries all of
//! `DATE`, `WIDTH` and `OLD PRICE`. Within a qualifying sheet every row is
//! reduced to a [`CleanRecord`] or dropped; nothing here raises for bad cells.

use tracing::{debug, info, warn};

use crate::config::{self, MixedDimensions};
use crate::error::{PricePivotError, Result};
use crate::models::{CellValue, CleanRecord, Dimension, Period, Sheet, SheetDataset, Workbook};

// ---------------------------------------------------------------------------
// Price parsing
// ---------------------------------------------------------------------------

/// Outcome of coercing an `OLD PRICE` cell to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceParse {
    Parsed(f64),
    /// The cell was empty or held only the glyph and separators.
    Blank,
    /// The cell held something that is not a finite number.
    Unparseable,
}

impl PriceParse {
    pub fn value(self) -> Option<f64> {
        match self {
            PriceParse::Parsed(v) => Some(v),
            PriceParse::Blank | PriceParse::Unparseable => None,
        }
    }
}

/// Coerce a price cell, stripping the currency glyph and thousands separators
/// from text.
pub fn parse_price(cell: &CellValue) -> PriceParse {
    match cell {
        CellValue::Empty => PriceParse::Blank,
        CellValue::Number(n) if n.is_finite() => PriceParse::Parsed(*n),
        CellValue::Number(_) => PriceParse::Unparseable,
        CellValue::Text(s) => parse_price_text(s),
        CellValue::Bool(_) | CellValue::DateTime(_) => PriceParse::Unparseable,
    }
}

pub fn parse_price_text(text: &str) -> PriceParse {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != config::CURRENCY_GLYPH && *c != config::THOUSANDS_SEPARATOR)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return PriceParse::Blank;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => PriceParse::Parsed(v),
        _ => PriceParse::Unparseable,
    }
}

// ---------------------------------------------------------------------------
// Sheet qualification
// ---------------------------------------------------------------------------

/// Required columns absent from the sheet's header.
pub fn missing_columns(sheet: &Sheet) -> Vec<&'static str> {
    config::required_columns()
        .into_iter()
        .filter(|name| sheet.column_index(name).is_none())
        .collect()
}

pub fn qualifies(sheet: &Sheet) -> bool {
    missing_columns(sheet).is_empty()
}

/// Clean one sheet, or `None` if it lacks a required column.
pub fn normalize_sheet(sheet: &Sheet) -> Option<SheetDataset> {
    let date_col = sheet.column_index(config::DATE_COLUMN)?;
    let dim_col = sheet.column_index(config::DIMENSION_COLUMN)?;
    let price_col = sheet.column_index(config::PRICE_COLUMN)?;

    let mut dataset = SheetDataset::new(sheet.name.clone(), Vec::with_capacity(sheet.rows.len()));
    let mut unparsed_labels = 0usize;

    for row in 0..sheet.rows.len() {
        let period = Period::from_cell(sheet.cell(row, date_col));
        let dimension = Dimension::from_cell(sheet.cell(row, dim_col));
        let price = parse_price(sheet.cell(row, price_col)).value();

        match (period, dimension, price) {
            (Some(period), Some(dimension), Some(price)) => {
                if !period.is_dated() {
                    unparsed_labels += 1;
                }
                dataset.records.push(CleanRecord {
                    period,
                    dimension,
                    price,
                });
            }
            _ => dataset.dropped_rows += 1,
        }
    }

    if unparsed_labels > 0 {
        warn!(
            "Sheet '{}': {} row(s) have a DATE that is not a recognized date",
            sheet.name, unparsed_labels
        );
    }
    debug!(
        "Sheet '{}': kept {} row(s), dropped {}",
        sheet.name,
        dataset.records.len(),
        dataset.dropped_rows
    );
    Some(dataset)
}

/// Clean every qualifying sheet of the workbook, in sheet order.
///
/// Fails with [`PricePivotError::NoValidData`] when no sheet qualifies or
/// the qualifying sheets produce no records at all.
pub fn load_workbook(workbook: &Workbook, mixed: MixedDimensions) -> Result<Vec<SheetDataset>> {
    let mut datasets = Vec::new();

    for sheet in &workbook.sheets {
        let missing = missing_columns(sheet);
        if !missing.is_empty() {
            debug!("Skipping sheet '{}': missing {}", sheet.name, missing.join(", "));
            continue;
        }
        if let Some(dataset) = normalize_sheet(sheet) {
            if mixed == MixedDimensions::Reject && dataset.has_mixed_dimensions() {
                return Err(PricePivotError::MixedDimensions {
                    sheet: dataset.sheet,
                });
            }
            datasets.push(dataset);
        }
    }

    let total: usize = datasets.iter().map(SheetDataset::len).sum();
    if total == 0 {
        info!(
            "No valid data: {} sheet(s) qualified, 0 records",
            datasets.len()
        );
        return Err(PricePivotError::NoValidData);
    }

    info!(
        "Loaded {} record(s) from {} of {} sheet(s)",
        total,
        datasets.len(),
        workbook.sheets.len()
    );
    Ok(datasets)
}
