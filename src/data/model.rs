use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_STATE: &str = "State";
pub const COL_DISTRICT: &str = "District Name";
pub const COL_CATEGORY: &str = "Category";
pub const COL_INDICATOR: &str = "Indicator";
pub const COL_NFHS4: &str = "NFHS 4";
pub const COL_NFHS5: &str = "NFHS 5";
pub const COL_CHANGE: &str = "Change";

/// Every column the dashboard needs; anything else in the source is ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_STATE,
    COL_DISTRICT,
    COL_CATEGORY,
    COL_INDICATOR,
    COL_NFHS4,
    COL_NFHS5,
    COL_CHANGE,
];

// ---------------------------------------------------------------------------
// CellValue – a numeric cell as it was stored
// ---------------------------------------------------------------------------

/// A loosely-typed cell, the result of permissive type inference at load time.
///
/// Numeric columns are kept in this form and only coerced to `f64` when a
/// value is actually needed (see [`CellValue::to_f64`]).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Infer a cell type from raw text: empty → `Null`, then integer, then
    /// float, otherwise the text is kept verbatim.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(raw.to_string())
    }

    /// Coerce to `f64`. `None` for `Null` and for text that is not a number.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Null => None,
        }
    }

    /// Render a cell that ended up in a key column as plain text.
    pub fn into_text(self) -> String {
        match self {
            CellValue::Text(s) => s,
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the survey table
// ---------------------------------------------------------------------------

/// One row: a (state, district, category, indicator) key plus the two survey
/// rounds and their stored delta.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub state: String,
    pub district: String,
    pub category: String,
    pub indicator: String,
    pub nfhs4: CellValue,
    pub nfhs5: CellValue,
    /// Read as stored; not recomputed from `nfhs5 - nfhs4`.
    pub change: CellValue,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table, in source row order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
