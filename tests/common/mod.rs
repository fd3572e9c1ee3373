//! Shared fixtures for the price-pivot integration tests.
//!
//! Builds small in-memory workbooks shaped like the upload the pipeline
//! expects: a header row of column names followed by data rows.

#![allow(dead_code)]

use chrono::NaiveDate;
use price_pivot::{CellValue, Sheet, Workbook};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// A sheet with the standard `DATE | WIDTH | OLD PRICE` header.
pub fn price_sheet(name: &str, rows: Vec<(CellValue, CellValue, CellValue)>) -> Sheet {
    let mut sheet = Sheet::new(name, columns(&["DATE", "WIDTH", "OLD PRICE"]));
    for (d, w, p) in rows {
        sheet.push_row(vec![d, w, p]);
    }
    sheet
}

pub fn row(d: NaiveDate, width: i32, price: &str) -> (CellValue, CellValue, CellValue) {
    (d.into(), width.into(), price.into())
}

/// The two-sheet workbook used throughout:
///
/// - Sheet1: (2024-01-01, 10, ₹100), (2024-02-01, 10, ₹120)
/// - Sheet2: (2024-01-01, 20, ₹200)
pub fn two_sheet_workbook() -> Workbook {
    Workbook::new(vec![
        price_sheet(
            "Sheet1",
            vec![
                row(date(2024, 1, 1), 10, "₹100"),
                row(date(2024, 2, 1), 10, "₹120"),
            ],
        ),
        price_sheet("Sheet2", vec![row(date(2024, 1, 1), 20, "₹200")]),
    ])
}

/// A sheet without any of the required columns.
pub fn unrelated_sheet(name: &str) -> Sheet {
    let mut sheet = Sheet::new(name, columns(&["NAME", "QTY"]));
    sheet.push_row(vec!["bolt".into(), 4.into()]);
    sheet
}
