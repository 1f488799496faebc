use super::error::DataError;
use super::filter::FilteredSubset;
use super::model::{CellValue, COL_CHANGE, COL_NFHS4, COL_NFHS5};

/// Headline numbers for one (state, district, category, indicator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiResult {
    pub nfhs4: f64,
    pub nfhs5: f64,
    pub change: f64,
}

/// Coerce a stored cell to `f64`, naming the column on failure.
pub fn numeric(column: &str, cell: &CellValue) -> Result<f64, DataError> {
    cell.to_f64().ok_or_else(|| {
        log::warn!("Column '{column}' holds non-numeric value '{cell}'");
        DataError::NumericCoercion {
            column: column.to_string(),
            value: cell.to_string(),
        }
    })
}

/// Read the KPI values from the first row of `subset`.
///
/// `Ok(None)` when the subset is empty. Duplicate keys are not checked: the
/// first row in dataset order wins.
pub fn extract(subset: &FilteredSubset<'_>) -> Result<Option<KpiResult>, DataError> {
    let Some(first) = subset.first() else {
        return Ok(None);
    };
    Ok(Some(KpiResult {
        nfhs4: numeric(COL_NFHS4, &first.nfhs4)?,
        nfhs5: numeric(COL_NFHS5, &first.nfhs5)?,
        change: numeric(COL_CHANGE, &first.change)?,
    }))
}
