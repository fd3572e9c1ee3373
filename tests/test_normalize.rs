//! Sheet qualification and row cleaning tests.

mod common;

use common::{columns, date, price_sheet, row, unrelated_sheet};
use calamine::Data;
use price_pivot::normalize::{self, parse_price, parse_price_text, PriceParse};
use price_pivot::{reader, CellValue, Dimension, MixedDimensions, Period, PricePivotError, Sheet, Workbook};

// ---------------------------------------------------------------------------
// parse_price
// ---------------------------------------------------------------------------

#[test]
fn currency_glyph_and_separators_match_plain_number() {
    assert_eq!(parse_price_text("₹1,234.00"), parse_price_text("1234.00"));
    assert_eq!(parse_price_text("₹1,234.00"), PriceParse::Parsed(1234.0));
    assert_eq!(parse_price_text("₹12,34,567.5"), PriceParse::Parsed(1234567.5));
    assert_eq!(parse_price_text(" ₹ 99 "), PriceParse::Parsed(99.0));
}

#[test]
fn numeric_cells_pass_through() {
    assert_eq!(parse_price(&CellValue::Number(42.5)), PriceParse::Parsed(42.5));
}

#[test]
fn unparseable_price_is_named_outcome() {
    assert_eq!(parse_price_text("n/a"), PriceParse::Unparseable);
    assert_eq!(parse_price_text("$100"), PriceParse::Unparseable);
    assert_eq!(parse_price_text("inf"), PriceParse::Unparseable);
    assert_eq!(parse_price(&CellValue::Bool(true)), PriceParse::Unparseable);
    assert_eq!(parse_price_text("n/a").value(), None);
}

#[test]
fn blank_price_is_blank() {
    assert_eq!(parse_price(&CellValue::Empty), PriceParse::Blank);
    assert_eq!(parse_price_text("₹"), PriceParse::Blank);
    assert_eq!(parse_price_text("   "), PriceParse::Blank);
}

// ---------------------------------------------------------------------------
// qualification
// ---------------------------------------------------------------------------

#[test]
fn sheet_without_required_columns_does_not_qualify() {
    let sheet = unrelated_sheet("Notes");
    assert!(!normalize::qualifies(&sheet));
    assert_eq!(
        normalize::missing_columns(&sheet),
        vec!["DATE", "WIDTH", "OLD PRICE"]
    );
    assert!(normalize::normalize_sheet(&sheet).is_none());
}

#[test]
fn sheet_missing_one_column_does_not_qualify() {
    let sheet = Sheet::new("Partial", columns(&["DATE", "WIDTH", "NEW PRICE"]));
    assert_eq!(normalize::missing_columns(&sheet), vec!["OLD PRICE"]);
}

#[test]
fn extra_columns_and_header_whitespace_are_tolerated() {
    let mut sheet = Sheet::new("Wide", columns(&["ITEM", " DATE", "WIDTH ", "OLD PRICE", "NOTE"]));
    sheet.push_row(vec![
        "pipe".into(),
        date(2024, 3, 1).into(),
        12.into(),
        "₹50".into(),
        "ok".into(),
    ]);
    let dataset = normalize::normalize_sheet(&sheet).unwrap();
    assert_eq!(dataset.records.len(), 1);
    assert_eq!(dataset.records[0].dimension, Dimension::from(12));
    assert_eq!(dataset.records[0].price, 50.0);
}

#[test]
fn skipped_sheet_leaves_other_sheets_untouched() {
    let only = Workbook::new(vec![price_sheet("A", vec![row(date(2024, 1, 1), 5, "₹10")])]);
    let with_noise = Workbook::new(vec![
        unrelated_sheet("Before"),
        price_sheet("A", vec![row(date(2024, 1, 1), 5, "₹10")]),
        unrelated_sheet("After"),
    ]);

    let a = normalize::load_workbook(&only, MixedDimensions::Collate).unwrap();
    let b = normalize::load_workbook(&with_noise, MixedDimensions::Collate).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// row cleaning
// ---------------------------------------------------------------------------

#[test]
fn rows_missing_any_field_are_dropped() {
    let sheet = price_sheet(
        "S",
        vec![
            row(date(2024, 1, 1), 10, "₹100"),
            (CellValue::Empty, 10.into(), "₹100".into()),
            (date(2024, 1, 1).into(), CellValue::Empty, "₹100".into()),
            (date(2024, 1, 1).into(), 10.into(), "call us".into()),
            (date(2024, 1, 1).into(), 10.into(), CellValue::Empty),
        ],
    );
    let dataset = normalize::normalize_sheet(&sheet).unwrap();
    assert_eq!(dataset.records.len(), 1);
    assert_eq!(dataset.dropped_rows, 4);
}

#[test]
fn short_rows_read_as_missing() {
    let mut sheet = Sheet::new("S", columns(&["DATE", "WIDTH", "OLD PRICE"]));
    sheet.push_row(vec![date(2024, 1, 1).into(), 10.into()]);
    let dataset = normalize::normalize_sheet(&sheet).unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.dropped_rows, 1);
}

#[test]
fn text_dates_are_parsed() {
    let sheet = price_sheet(
        "S",
        vec![
            ("2024-01-15".into(), 10.into(), "₹1".into()),
            ("15/02/2024".into(), 10.into(), "₹1".into()),
            ("sometime".into(), 10.into(), "₹1".into()),
        ],
    );
    let dataset = normalize::normalize_sheet(&sheet).unwrap();
    assert_eq!(dataset.records[0].period, Period::from(date(2024, 1, 15)));
    assert_eq!(dataset.records[1].period, Period::from(date(2024, 2, 15)));
    assert_eq!(dataset.records[2].period, Period::Unparsed("sometime".into()));
}

#[test]
fn month_and_us_date_labels_are_parsed() {
    assert_eq!(Period::parse("Jan 2024"), Period::from(date(2024, 1, 1)));
    assert_eq!(Period::parse("January 2024"), Period::from(date(2024, 1, 1)));
    assert_eq!(Period::parse("Mar-2024"), Period::from(date(2024, 3, 1)));
    assert_eq!(Period::parse("2024-01"), Period::from(date(2024, 1, 1)));
    assert_eq!(Period::parse("March 5, 2024"), Period::from(date(2024, 3, 5)));
    assert_eq!(Period::parse("12/31/2023"), Period::from(date(2023, 12, 31)));
    assert_eq!(Period::parse("12-31-2023"), Period::from(date(2023, 12, 31)));
    // day-first wins whenever both readings are valid
    assert_eq!(Period::parse("02/01/2024"), Period::from(date(2024, 1, 2)));
}

#[test]
fn text_datetimes_keep_their_time() {
    let at = date(2024, 1, 15).and_hms_opt(10, 30, 0).unwrap();
    assert_eq!(Period::parse("2024-01-15 10:30:00"), Period::Dated(at));
    assert_eq!(Period::parse("2024-01-15T10:30:00"), Period::Dated(at));
    assert_eq!(Period::parse("2024-01-15 10:30:00").to_string(), "2024-01-15 10:30:00");

    let frac = date(2024, 1, 15).and_hms_milli_opt(10, 30, 0, 250).unwrap();
    assert_eq!(Period::parse("2024-01-15T10:30:00.250"), Period::Dated(frac));
}

#[test]
fn numeric_date_cell_is_unparsed_label() {
    assert_eq!(
        Period::from_cell(&CellValue::Number(45000.0)),
        Some(Period::Unparsed("45000".into()))
    );
    assert_eq!(Period::from_cell(&CellValue::Number(f64::NAN)), None);
    assert_eq!(Period::from_cell(&CellValue::Text("  ".into())), None);
}

#[test]
fn iso_datetime_cells_become_dated_periods() {
    let cell = reader::cell_value(&Data::DateTimeIso("2024-01-15T10:30:00".into()));
    assert_eq!(cell, CellValue::Text("2024-01-15T10:30:00".into()));

    let at = date(2024, 1, 15).and_hms_opt(10, 30, 0).unwrap();
    assert_eq!(Period::from_cell(&cell), Some(Period::Dated(at)));

    assert_eq!(reader::cell_value(&Data::Int(7)), CellValue::Number(7.0));
    assert_eq!(reader::cell_value(&Data::Empty), CellValue::Empty);
}

#[test]
fn dimension_kind_is_preserved() {
    let sheet = price_sheet(
        "S",
        vec![
            (date(2024, 1, 1).into(), 10.into(), "₹1".into()),
            (date(2024, 1, 1).into(), "10".into(), "₹1".into()),
        ],
    );
    let dataset = normalize::normalize_sheet(&sheet).unwrap();
    assert_eq!(dataset.records[0].dimension, Dimension::from(10));
    assert_eq!(dataset.records[1].dimension, Dimension::from("10"));
    assert_ne!(dataset.records[0].dimension, dataset.records[1].dimension);
}

// ---------------------------------------------------------------------------
// load_workbook outcomes
// ---------------------------------------------------------------------------

#[test]
fn no_qualifying_sheet_is_no_data() {
    let wb = Workbook::new(vec![unrelated_sheet("A"), unrelated_sheet("B")]);
    let err = normalize::load_workbook(&wb, MixedDimensions::Collate).unwrap_err();
    assert!(err.is_no_data());
}

#[test]
fn qualifying_sheets_without_clean_rows_is_no_data() {
    let wb = Workbook::new(vec![price_sheet(
        "A",
        vec![(CellValue::Empty, 10.into(), "₹5".into())],
    )]);
    let err = normalize::load_workbook(&wb, MixedDimensions::Collate).unwrap_err();
    assert!(matches!(err, PricePivotError::NoValidData));
}

#[test]
fn mixed_dimensions_rejected_when_configured() {
    let wb = Workbook::new(vec![price_sheet(
        "Mixed",
        vec![
            (date(2024, 1, 1).into(), 10.into(), "₹1".into()),
            (date(2024, 1, 1).into(), "XL".into(), "₹1".into()),
        ],
    )]);

    assert!(normalize::load_workbook(&wb, MixedDimensions::Collate).is_ok());
    match normalize::load_workbook(&wb, MixedDimensions::Reject) {
        Err(PricePivotError::MixedDimensions { sheet }) => assert_eq!(sheet, "Mixed"),
        other => panic!("expected MixedDimensions, got {:?}", other),
    }
}
