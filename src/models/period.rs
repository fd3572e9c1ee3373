use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

use super::cell::CellValue;
use crate::config::{self, UnparsedPeriods};

/// One pivot column: a distinct DATE value.
///
/// The derived ordering puts every `Unparsed` label after every date; use
/// [`Period::cmp_with`] to apply the configured placement instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    Dated(NaiveDateTime),
    Unparsed(String),
}

impl Period {
    /// Read a period from a DATE cell, or `None` when the cell is blank.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::Empty => None,
            CellValue::DateTime(dt) => Some(Period::Dated(*dt)),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Period::parse(trimmed))
                }
            }
            CellValue::Number(n) if n.is_nan() => None,
            CellValue::Number(n) => Some(Period::Unparsed(n.to_string())),
            CellValue::Bool(b) => Some(Period::Unparsed(if *b { "TRUE" } else { "FALSE" }.into())),
        }
    }

    /// Parse a label with the accepted date formats, falling back to `Unparsed`.
    ///
    /// Ambiguous slash dates are day-first: "02/01/2024" is 2 January.
    /// "12/31/2023" has no day-first reading and is taken month-first.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        parse_date(label)
            .map(Period::Dated)
            .unwrap_or_else(|| Period::Unparsed(label.to_string()))
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        match self {
            Period::Dated(dt) => Some(*dt),
            Period::Unparsed(_) => None,
        }
    }

    pub fn is_dated(&self) -> bool {
        matches!(self, Period::Dated(_))
    }

    /// Chronological comparison with unparsed labels placed per `placement`.
    pub fn cmp_with(&self, other: &Period, placement: UnparsedPeriods) -> Ordering {
        match (self, other, placement) {
            (Period::Dated(_), Period::Unparsed(_), UnparsedPeriods::First) => Ordering::Greater,
            (Period::Unparsed(_), Period::Dated(_), UnparsedPeriods::First) => Ordering::Less,
            _ => self.cmp(other),
        }
    }
}

fn parse_date(label: &str) -> Option<NaiveDateTime> {
    let datetime = config::DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(label, fmt).ok());
    if datetime.is_some() {
        return datetime;
    }

    let day = config::DATE_FORMATS
        .iter()
        .chain(config::US_DATE_FORMATS)
        .find_map(|fmt| NaiveDate::parse_from_str(label, fmt).ok())
        .or_else(|| {
            // chrono needs a day to build a date; month labels get the 1st
            let padded = format!("01 {}", label);
            config::MONTH_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&padded, &format!("%d {}", fmt)).ok())
        })?;
    Some(day.and_time(NaiveTime::MIN))
}

impl From<NaiveDate> for Period {
    fn from(value: NaiveDate) -> Self {
        Period::Dated(value.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for Period {
    fn from(value: NaiveDateTime) -> Self {
        Period::Dated(value)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Dated(dt) if dt.time() == NaiveTime::MIN => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            Period::Dated(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Period::Unparsed(label) => f.write_str(label),
        }
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
