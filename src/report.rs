use crate::chart::{category_change_series, comparison_series, ChangeSeries, ComparisonSeries};
use crate::data::error::DataError;
use crate::data::filter::{category_rows, select, FilterSelection};
use crate::data::kpi::{extract, KpiResult};
use crate::data::model::Dataset;

/// Everything the central panel shows for one complete selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kpi: KpiResult,
    pub comparison: ComparisonSeries,
    pub category_changes: ChangeSeries,
    /// Rows matching the full selection (more than one means duplicate keys).
    pub matched_rows: usize,
}

/// Run select → extract → charts for `selection`.
///
/// `Ok(None)` when the selection is incomplete or matches no row. Only the
/// selected row's values can fail the report; a bad `Change` elsewhere in the
/// category just drops that bar.
pub fn build(
    dataset: &Dataset,
    selection: &FilterSelection,
) -> Result<Option<Report>, DataError> {
    let Some((state, district, category, indicator)) = selection.complete() else {
        return Ok(None);
    };

    let subset = select(dataset, state, district, category, indicator);
    let Some(kpi) = extract(&subset)? else {
        return Ok(None);
    };
    if subset.len() > 1 {
        log::warn!(
            "{} rows share {state}/{district}/{category}/{indicator}; using the first",
            subset.len()
        );
    }

    let category_changes =
        category_change_series(&category_rows(dataset, state, district, category));

    Ok(Some(Report {
        kpi,
        comparison: comparison_series(&kpi),
        category_changes,
        matched_rows: subset.len(),
    }))
}
