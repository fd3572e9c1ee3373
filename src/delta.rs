//! Percent change between the two chronologically latest periods.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::config;
use crate::models::{Dimension, Period};
use crate::pivot::PivotTable;

// ---------------------------------------------------------------------------
// PercentChange
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    /// `(current / previous - 1) * 100`, rounded to two decimals.
    Change(f64),
    /// An operand is absent or the previous value is zero.
    Missing,
    /// Fewer than two periods exist.
    NotApplicable,
}

impl PercentChange {
    /// Apply the change formula, degrading to `Missing` instead of dividing
    /// by zero or by an absent value.
    pub fn between(previous: Option<f64>, current: Option<f64>) -> Self {
        match (previous, current) {
            (Some(prev), Some(curr)) if prev != 0.0 => {
                let change = (curr / prev - 1.0) * 100.0;
                if change.is_finite() {
                    PercentChange::Change(round2(change))
                } else {
                    PercentChange::Missing
                }
            }
            _ => PercentChange::Missing,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            PercentChange::Change(v) => Some(*v),
            PercentChange::Missing | PercentChange::NotApplicable => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, PercentChange::Missing)
    }
}

fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // keep "-0.0%" out of reports
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentChange::Change(v) if v.fract() == 0.0 => write!(f, "{:.1}%", v),
            PercentChange::Change(v) => write!(f, "{}%", v),
            PercentChange::Missing => Ok(()),
            PercentChange::NotApplicable => f.write_str(config::NOT_APPLICABLE),
        }
    }
}

impl Serialize for PercentChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PercentChange::Missing => serializer.serialize_none(),
            other => serializer.collect_str(other),
        }
    }
}

// ---------------------------------------------------------------------------
// DeltaReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaEntry {
    pub previous: Option<f64>,
    pub current: Option<f64>,
    pub change: PercentChange,
}

/// Per-dimension change between the last two periods of a pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaReport {
    pub previous_period: Option<Period>,
    pub current_period: Option<Period>,
    pub entries: BTreeMap<Dimension, DeltaEntry>,
}

impl DeltaReport {
    pub fn from_pivot(pivot: &PivotTable) -> Self {
        let Some((previous, current)) = pivot.last_two_periods() else {
            let entries = pivot
                .dimensions()
                .map(|dim| {
                    let entry = DeltaEntry {
                        previous: None,
                        current: None,
                        change: PercentChange::NotApplicable,
                    };
                    (dim.clone(), entry)
                })
                .collect();
            return Self {
                previous_period: None,
                current_period: None,
                entries,
            };
        };

        let entries = pivot
            .dimensions()
            .map(|dim| {
                let prev = pivot.get(dim, previous);
                let curr = pivot.get(dim, current);
                let entry = DeltaEntry {
                    previous: prev,
                    current: curr,
                    change: PercentChange::between(prev, curr),
                };
                (dim.clone(), entry)
            })
            .collect();

        Self {
            previous_period: Some(previous.clone()),
            current_period: Some(current.clone()),
            entries,
        }
    }

    /// True when two periods were available to compare.
    pub fn has_comparison(&self) -> bool {
        self.previous_period.is_some() && self.current_period.is_some()
    }

    pub fn get(&self, dimension: &Dimension) -> Option<&DeltaEntry> {
        self.entries.get(dimension)
    }

    pub fn change(&self, dimension: &Dimension) -> Option<PercentChange> {
        self.entries.get(dimension).map(|e| e.change)
    }
}
