use super::dimension::Dimension;
use super::period::Period;

// ---------------------------------------------------------------------------
// CleanRecord — one normalized observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub period: Period,
    pub dimension: Dimension,
    pub price: f64,
}

impl CleanRecord {
    pub fn new(period: impl Into<Period>, dimension: impl Into<Dimension>, price: f64) -> Self {
        Self {
            period: period.into(),
            dimension: dimension.into(),
            price,
        }
    }
}

// ---------------------------------------------------------------------------
// SheetDataset — records cleaned out of one qualifying sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetDataset {
    pub sheet: String,
    pub records: Vec<CleanRecord>,
    /// Rows discarded for a missing DATE, WIDTH or OLD PRICE.
    pub dropped_rows: usize,
}

impl SheetDataset {
    pub fn new(sheet: impl Into<String>, records: Vec<CleanRecord>) -> Self {
        Self {
            sheet: sheet.into(),
            records,
            dropped_rows: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_mixed_dimensions(&self) -> bool {
        has_mixed_dimensions(&self.records)
    }
}

// ---------------------------------------------------------------------------
// CombinedDataset — every sheet's records, in sheet order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedDataset {
    pub records: Vec<CleanRecord>,
}

impl CombinedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_mixed_dimensions(&self) -> bool {
        has_mixed_dimensions(&self.records)
    }
}

fn has_mixed_dimensions(records: &[CleanRecord]) -> bool {
    let numbers = records.iter().any(|r| r.dimension.is_number());
    let text = records.iter().any(|r| !r.dimension.is_number());
    numbers && text
}
