//! `.xlsx` decoding into the in-memory [`Workbook`].
//!
//! The first row of every worksheet is taken as its header; the remaining
//! rows are data. Empty worksheets become sheets with no columns.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::debug;

use crate::error::{PricePivotError, Result};
use crate::models::{CellValue, Sheet, Workbook};

/// Decode an `.xlsx` file. Any other extension is rejected before opening.
pub fn read_xlsx<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if !is_xlsx {
        return Err(PricePivotError::InvalidInput(format!(
            "expected an .xlsx file, got {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(PricePivotError::InvalidInput(format!(
            "no such file: {}",
            path.display()
        )));
    }

    let mut xlsx: Xlsx<_> = open_workbook(path)?;
    decode(&mut xlsx)
}

/// Decode an in-memory `.xlsx` upload.
pub fn read_xlsx_bytes(bytes: &[u8]) -> Result<Workbook> {
    let mut xlsx = Xlsx::new(Cursor::new(bytes))?;
    decode(&mut xlsx)
}

fn decode<RS: Read + Seek>(xlsx: &mut Xlsx<RS>) -> Result<Workbook> {
    let names = xlsx.sheet_names().to_owned();
    let mut sheets = Vec::with_capacity(names.len());

    for name in names {
        let range = xlsx.worksheet_range(&name)?;
        let mut rows = range.rows();

        let columns: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(header_text).collect())
            .unwrap_or_default();

        let mut sheet = Sheet::new(name, columns);
        for row in rows {
            sheet.push_row(row.iter().map(cell_value).collect());
        }
        debug!("Decoded sheet '{}': {} column(s), {} row(s)", sheet.name, sheet.columns.len(), sheet.rows.len());
        sheets.push(sheet);
    }

    Ok(Workbook::new(sheets))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Map one calamine cell onto a [`CellValue`]. Date-formatted serials become
/// `DateTime`; ISO date strings are kept as text for [`Period`] parsing.
///
/// [`Period`]: crate::models::Period
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        // cell errors (#N/A, #VALUE!, ...) carry no usable value
        _ => CellValue::Empty,
    }
}
