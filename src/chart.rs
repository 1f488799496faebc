use crate::data::filter::FilteredSubset;
use crate::data::kpi::{numeric, KpiResult};
use crate::data::model::COL_CHANGE;

// ---------------------------------------------------------------------------
// NFHS 4 vs NFHS 5 comparison
// ---------------------------------------------------------------------------

pub const NFHS4_LABEL: &str = "NFHS 4";
pub const NFHS5_LABEL: &str = "NFHS 5";

/// Two bars, always NFHS 4 first, plus the precision their value labels use.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSeries {
    pub points: [(&'static str, f64); 2],
    /// Decimal places for the text label drawn on each bar.
    pub label_precision: usize,
}

impl ComparisonSeries {
    /// Display text for a bar value.
    pub fn label(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.label_precision)
    }
}

pub fn comparison_series(kpi: &KpiResult) -> ComparisonSeries {
    ComparisonSeries {
        points: [(NFHS4_LABEL, kpi.nfhs4), (NFHS5_LABEL, kpi.nfhs5)],
        label_precision: 2,
    }
}

/// Metric text such as `"48.3%"`; whole numbers keep one decimal (`"40.0%"`).
pub fn percent_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}%")
    } else {
        format!("{value}%")
    }
}

// ---------------------------------------------------------------------------
// Change across every indicator of a category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChangePoint {
    pub indicator: String,
    pub change: f64,
}

/// The change chart for one category. Rows whose `Change` is not a number
/// are left out and their indicators listed in `skipped`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSeries {
    pub points: Vec<ChangePoint>,
    pub skipped: Vec<String>,
}

/// One point per row of `rows`, in row order, carrying the stored `Change`.
pub fn category_change_series(rows: &FilteredSubset<'_>) -> ChangeSeries {
    let mut series = ChangeSeries::default();
    for rec in rows {
        match numeric(COL_CHANGE, &rec.change) {
            Ok(change) => series.points.push(ChangePoint {
                indicator: rec.indicator.clone(),
                change,
            }),
            Err(_) => series.skipped.push(rec.indicator.clone()),
        }
    }
    series
}
