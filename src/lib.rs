//! Pivot reports and period-over-period price changes for multi-sheet price
//! workbooks.
//!
//! Every sheet carrying `DATE`, `WIDTH` and `OLD PRICE` columns is cleaned
//! (currency glyph and thousands separators stripped, incomplete rows
//! dropped), pivoted into mean price per WIDTH per date, merged into a
//! `TOTAL` pivot, and compared across its two latest dates.
//!
//! # Quick start
//!
//! ```no_run
//! use price_pivot::PricePivot;
//!
//! let pivot = PricePivot::builder().build();
//! let analysis = pivot.analyze_path("prices.xlsx").unwrap();
//!
//! // Multi-sheet report workbook
//! analysis.report().save("Pivot_Report.xlsx").unwrap();
//!
//! // Latest-period table
//! let table = analysis.table();
//! println!("{}", table.render_text());
//! ```

pub mod config;
pub mod delta;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pivot;
pub mod reader;
pub mod reports;

pub use config::{MixedDimensions, UnparsedPeriods};
pub use delta::{DeltaEntry, DeltaReport, PercentChange};
pub use error::{PricePivotError, Result};
pub use models::{CellValue, CleanRecord, CombinedDataset, Dimension, Period, Sheet, SheetDataset, Workbook};
pub use pivot::{PivotCell, PivotTable};
pub use reports::{ChartArtifact, ReportWorkbook, TableView, VisualizationResult};

use std::fmt;
use std::path::Path;

use tracing::info;

// ---------------------------------------------------------------------------
// PricePivotBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring a [`PricePivot`] pipeline.
///
/// Use [`PricePivot::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PricePivotBuilder::build).
#[derive(Debug, Clone, Copy, Default)]
pub struct PricePivotBuilder {
    unparsed_periods: UnparsedPeriods,
    mixed_dimensions: MixedDimensions,
}

impl PricePivotBuilder {
    /// Where DATE labels that are not recognizable dates sort among periods.
    ///
    /// Defaults to [`UnparsedPeriods::First`].
    pub fn unparsed_periods(mut self, placement: UnparsedPeriods) -> Self {
        self.unparsed_periods = placement;
        self
    }

    /// Whether numeric and text WIDTH values may share a pivot.
    ///
    /// Defaults to [`MixedDimensions::Collate`].
    pub fn mixed_dimensions(mut self, policy: MixedDimensions) -> Self {
        self.mixed_dimensions = policy;
        self
    }

    pub fn build(self) -> PricePivot {
        PricePivot {
            unparsed_periods: self.unparsed_periods,
            mixed_dimensions: self.mixed_dimensions,
        }
    }
}

// ---------------------------------------------------------------------------
// PricePivot
// ---------------------------------------------------------------------------

/// The configured pipeline. Holds no state between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricePivot {
    unparsed_periods: UnparsedPeriods,
    mixed_dimensions: MixedDimensions,
}

impl PricePivot {
    pub fn builder() -> PricePivotBuilder {
        PricePivotBuilder::default()
    }

    /// Run the whole pipeline over a decoded workbook.
    ///
    /// Returns [`PricePivotError::NoValidData`] when no sheet qualifies or
    /// the qualifying sheets yield no clean rows.
    pub fn analyze(&self, workbook: &Workbook) -> Result<Analysis> {
        let datasets = normalize::load_workbook(workbook, self.mixed_dimensions)?;

        let sheet_pivots = datasets
            .iter()
            .map(|d| (d.sheet.clone(), PivotTable::from_dataset(d, self.unparsed_periods)))
            .collect();

        let combined = pivot::merge(&datasets);
        if self.mixed_dimensions == MixedDimensions::Reject && combined.has_mixed_dimensions() {
            return Err(PricePivotError::MixedDimensions {
                sheet: config::TOTAL_SHEET.to_string(),
            });
        }

        let total = PivotTable::from_combined(&combined, self.unparsed_periods);
        let delta = DeltaReport::from_pivot(&total);

        info!(
            "Pivoted {} record(s): {} WIDTH value(s) over {} period(s)",
            combined.len(),
            total.row_count(),
            total.periods().len()
        );

        Ok(Analysis {
            datasets,
            sheet_pivots,
            combined,
            total,
            delta,
        })
    }

    /// Decode an `.xlsx` file and run the pipeline over it.
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<Analysis> {
        let workbook = reader::read_xlsx(path)?;
        self.analyze(&workbook)
    }

    /// Decode an in-memory `.xlsx` upload and run the pipeline over it.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<Analysis> {
        let workbook = reader::read_xlsx_bytes(bytes)?;
        self.analyze(&workbook)
    }

    pub fn unparsed_periods(&self) -> UnparsedPeriods {
        self.unparsed_periods
    }

    pub fn mixed_dimensions(&self) -> MixedDimensions {
        self.mixed_dimensions
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Everything one pipeline run produced.
///
/// Always holds at least one record, so the total pivot has at least one
/// period and [`Analysis::visualization`] always has a column to project.
#[derive(Debug, Clone)]
pub struct Analysis {
    datasets: Vec<SheetDataset>,
    sheet_pivots: Vec<(String, PivotTable)>,
    combined: CombinedDataset,
    total: PivotTable,
    delta: DeltaReport,
}

impl Analysis {
    /// Cleaned records per qualifying sheet, in sheet order.
    pub fn sheets(&self) -> &[SheetDataset] {
        &self.datasets
    }

    /// Per-sheet pivots keyed by source sheet name, in sheet order.
    pub fn sheet_pivots(&self) -> &[(String, PivotTable)] {
        &self.sheet_pivots
    }

    pub fn sheet_pivot(&self, name: &str) -> Option<&PivotTable> {
        self.sheet_pivots
            .iter()
            .find(|(sheet, _)| sheet == name)
            .map(|(_, p)| p)
    }

    pub fn combined(&self) -> &CombinedDataset {
        &self.combined
    }

    pub fn total(&self) -> &PivotTable {
        &self.total
    }

    pub fn delta(&self) -> &DeltaReport {
        &self.delta
    }

    /// The report workbook: per-sheet pivots, `TOTAL`, and the change summary.
    pub fn report(&self) -> ReportWorkbook {
        ReportWorkbook::build(&self.sheet_pivots, &self.total, &self.delta)
    }

    /// Latest-period mean price per WIDTH.
    pub fn visualization(&self) -> VisualizationResult {
        VisualizationResult::from_pivot(&self.total).unwrap_or_else(|| VisualizationResult {
            period: Period::Unparsed(String::new()),
            values: Vec::new(),
        })
    }

    pub fn table(&self) -> TableView {
        TableView::from(&self.visualization())
    }

    /// Render the latest-period bar chart under a fresh name inside `dir`.
    pub fn render_chart<P: AsRef<Path>>(&self, dir: P) -> Result<ChartArtifact> {
        let result = self.visualization();
        let title = reports::chart::chart_title(&result.period);
        let path = reports::chart::artifact_path(dir.as_ref());
        reports::render_bar_chart(&result.labels(), &result.means(), &title, &path)?;
        Ok(ChartArtifact {
            path,
            title,
            period: result.period,
        })
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sheets: Vec<&str> = self.datasets.iter().map(|d| d.sheet.as_str()).collect();
        write!(
            f,
            "Analysis(sheets=[{}], records={}, widths={}, periods={})",
            sheets.join(", "),
            self.combined.len(),
            self.total.row_count(),
            self.total.periods().len()
        )
    }
}
