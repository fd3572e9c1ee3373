use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};

use super::cell::CellValue;

/// A WIDTH value, kept as the kind the source cell provided.
///
/// Numbers compare by value (`10` and `10.0` are the same dimension) and
/// always sort before text; `Number(10)` and `Text("10")` are distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl Dimension {
    /// Read a dimension from a cell, or `None` when the cell is blank.
    ///
    /// Booleans and dates are grouped by their text rendering.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::Empty => None,
            CellValue::Number(n) if n.is_nan() => None,
            CellValue::Number(n) => Some(Dimension::Number(OrderedFloat(*n))),
            CellValue::Text(s) if s.trim().is_empty() => None,
            CellValue::Text(s) => Some(Dimension::Text(s.clone())),
            CellValue::Bool(b) => Some(Dimension::Text(if *b { "TRUE" } else { "FALSE" }.into())),
            CellValue::DateTime(dt) => Some(Dimension::Text(dt.to_string())),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Dimension::Number(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Dimension::Number(v) => Some(v.0),
            Dimension::Text(_) => None,
        }
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Dimension::Number(OrderedFloat(value))
    }
}

impl From<i64> for Dimension {
    fn from(value: i64) -> Self {
        Dimension::Number(OrderedFloat(value as f64))
    }
}

impl From<i32> for Dimension {
    fn from(value: i32) -> Self {
        Dimension::Number(OrderedFloat(f64::from(value)))
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        Dimension::Text(value.to_string())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Number(v) => write!(f, "{}", v.0),
            Dimension::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dimension::Number(v) => serializer.serialize_f64(v.0),
            Dimension::Text(s) => serializer.serialize_str(s),
        }
    }
}
