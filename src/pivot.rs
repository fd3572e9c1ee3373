//! Dimension × period mean-price pivots and the multi-sheet merge.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::UnparsedPeriods;
use crate::models::{CleanRecord, CombinedDataset, Dimension, Period, SheetDataset};

// ---------------------------------------------------------------------------
// PivotCell
// ---------------------------------------------------------------------------

/// Mean price of every record sharing one (dimension, period) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotCell {
    pub mean: f64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// PivotTable
// ---------------------------------------------------------------------------

/// Rows are distinct dimensions, columns the distinct periods actually seen.
///
/// A (dimension, period) pair with no records has no cell; it is never
/// filled with zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    rows: BTreeMap<Dimension, BTreeMap<Period, PivotCell>>,
    periods: Vec<Period>,
    placement: UnparsedPeriods,
}

impl PivotTable {
    /// Group `records` by (dimension, period) and average their prices.
    pub fn from_records<'a, I>(records: I, placement: UnparsedPeriods) -> Self
    where
        I: IntoIterator<Item = &'a CleanRecord>,
    {
        let mut sums: BTreeMap<Dimension, BTreeMap<Period, (f64, usize)>> = BTreeMap::new();
        for record in records {
            let slot = sums
                .entry(record.dimension.clone())
                .or_default()
                .entry(record.period.clone())
                .or_insert((0.0, 0));
            slot.0 += record.price;
            slot.1 += 1;
        }

        let mut seen: BTreeSet<Period> = BTreeSet::new();
        let mut rows = BTreeMap::new();
        for (dimension, groups) in sums {
            let mut cells = BTreeMap::new();
            for (period, (sum, count)) in groups {
                seen.insert(period.clone());
                cells.insert(
                    period,
                    PivotCell {
                        mean: sum / count as f64,
                        count,
                    },
                );
            }
            rows.insert(dimension, cells);
        }

        let mut periods: Vec<Period> = seen.into_iter().collect();
        periods.sort_by(|a, b| a.cmp_with(b, placement));

        Self {
            rows,
            periods,
            placement,
        }
    }

    pub fn from_dataset(dataset: &SheetDataset, placement: UnparsedPeriods) -> Self {
        Self::from_records(&dataset.records, placement)
    }

    pub fn from_combined(dataset: &CombinedDataset, placement: UnparsedPeriods) -> Self {
        Self::from_records(&dataset.records, placement)
    }

    /// Mean price for the pair, or `None` when no record had it.
    pub fn get(&self, dimension: &Dimension, period: &Period) -> Option<f64> {
        self.cell(dimension, period).map(|c| c.mean)
    }

    pub fn cell(&self, dimension: &Dimension, period: &Period) -> Option<&PivotCell> {
        self.rows.get(dimension).and_then(|row| row.get(period))
    }

    pub fn row(&self, dimension: &Dimension) -> Option<&BTreeMap<Period, PivotCell>> {
        self.rows.get(dimension)
    }

    /// Dimensions in ascending order.
    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.rows.keys()
    }

    /// Periods in chronological order, unparsed labels placed per config.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Present cells of one period column, in dimension order.
    pub fn column(&self, period: &Period) -> Vec<(&Dimension, f64)> {
        self.rows
            .iter()
            .filter_map(|(dim, row)| row.get(period).map(|c| (dim, c.mean)))
            .collect()
    }

    pub fn latest_period(&self) -> Option<&Period> {
        self.periods.last()
    }

    /// The chronologically last two periods as `(previous, current)`.
    pub fn last_two_periods(&self) -> Option<(&Period, &Period)> {
        match self.periods.as_slice() {
            [.., previous, current] => Some((previous, current)),
            _ => None,
        }
    }

    pub fn placement(&self) -> UnparsedPeriods {
        self.placement
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Concatenate every sheet's records in sheet order, keeping duplicates.
pub fn merge(datasets: &[SheetDataset]) -> CombinedDataset {
    let records = datasets
        .iter()
        .flat_map(|d| d.records.iter().cloned())
        .collect();
    CombinedDataset { records }
}
