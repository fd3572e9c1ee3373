use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DATE_COLUMN: &str = "DATE";
pub const DIMENSION_COLUMN: &str = "WIDTH";
pub const PRICE_COLUMN: &str = "OLD PRICE";

/// Currency glyph stripped from price text before numeric parsing.
pub const CURRENCY_GLYPH: char = '₹';
pub const THOUSANDS_SEPARATOR: char = ',';

pub const TOTAL_SHEET: &str = "TOTAL";
pub const SUMMARY_SHEET: &str = "PERCENTAGE CHANGE SUMMARY";
pub const CHANGE_COLUMN: &str = "% CHANGE";
pub const PREVIOUS_VALUE_COLUMN: &str = "PREVIOUS MONTH VALUE";
pub const PRESENT_VALUE_COLUMN: &str = "PRESENT MONTH VALUE";

/// Sentinel shown in place of a percent change when fewer than two periods exist.
pub const NOT_APPLICABLE: &str = "NA";

/// Excel refuses worksheet names longer than this.
pub const MAX_SHEET_NAME_LEN: usize = 31;

pub const REPORT_FILE_NAME: &str = "Pivot_Report.xlsx";

/// Text formats tried, in order, when a DATE cell holds a string.
///
/// Slash and dash dates are read day-first; the month-first
/// [`US_DATE_FORMATS`] are only tried once these all fail.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

pub const US_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y"];

/// Month-level labels ("Jan 2024", "2024-01"); the period is the first of
/// the month.
pub const MONTH_FORMATS: &[&str] = &["%b %Y", "%B %Y", "%b-%Y", "%B-%Y", "%Y-%m", "%Y/%m"];

pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Largest worksheet Excel accepts.
pub const MAX_SHEET_COLUMNS: u16 = 16_384;
pub const MAX_SHEET_ROWS: u32 = 1_048_576;

pub fn required_columns() -> [&'static str; 3] {
    [DATE_COLUMN, DIMENSION_COLUMN, PRICE_COLUMN]
}

/// Where chart artifacts go when the caller does not pick a directory.
pub fn default_artifact_dir() -> PathBuf {
    std::env::temp_dir().join("price-pivot")
}

/// Placement of period labels that could not be parsed as dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnparsedPeriods {
    /// Before every dated period, so they never become "previous" or "current"
    /// while at least two real dates exist.
    #[default]
    First,
    Last,
}

/// Policy for a WIDTH column holding both numbers and text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MixedDimensions {
    /// Group both kinds together; numbers sort before text.
    #[default]
    Collate,
    Reject,
}
