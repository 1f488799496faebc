use std::collections::BTreeSet;
use std::fmt;

use super::model::{
    Dataset, Record, COL_CATEGORY, COL_DISTRICT, COL_INDICATOR, COL_STATE,
};

// ---------------------------------------------------------------------------
// Cascade fields
// ---------------------------------------------------------------------------

/// The four key columns, in the order the user narrows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    State,
    District,
    Category,
    Indicator,
}

impl Field {
    pub const CASCADE: [Field; 4] = [
        Field::State,
        Field::District,
        Field::Category,
        Field::Indicator,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Field::State => COL_STATE,
            Field::District => COL_DISTRICT,
            Field::Category => COL_CATEGORY,
            Field::Indicator => COL_INDICATOR,
        }
    }

    pub fn value(self, record: &Record) -> &str {
        match self {
            Field::State => &record.state,
            Field::District => &record.district,
            Field::Category => &record.category,
            Field::Indicator => &record.indicator,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// FilterSelection – the user's choices so far
// ---------------------------------------------------------------------------

/// A partially or fully chosen (state, district, category, indicator) tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub state: Option<String>,
    pub district: Option<String>,
    pub category: Option<String>,
    pub indicator: Option<String>,
}

impl FilterSelection {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::State => self.state.as_deref(),
            Field::District => self.district.as_deref(),
            Field::Category => self.category.as_deref(),
            Field::Indicator => self.indicator.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::State => &mut self.state,
            Field::District => &mut self.district,
            Field::Category => &mut self.category,
            Field::Indicator => &mut self.indicator,
        };
        *slot = value;
    }

    /// All four values, when every field has been chosen.
    pub fn complete(&self) -> Option<(&str, &str, &str, &str)> {
        Some((
            self.state.as_deref()?,
            self.district.as_deref()?,
            self.category.as_deref()?,
            self.indicator.as_deref()?,
        ))
    }
}

/// Rows matching a prefix of the selection, in dataset order.
pub type FilteredSubset<'a> = Vec<&'a Record>;

// ---------------------------------------------------------------------------
// Narrowing
// ---------------------------------------------------------------------------

/// Rows whose fields equal every `(field, value)` constraint exactly.
pub fn matching<'a>(dataset: &'a Dataset, constraints: &[(Field, &str)]) -> FilteredSubset<'a> {
    dataset
        .records()
        .iter()
        .filter(|rec| constraints.iter().all(|(f, v)| f.value(rec) == *v))
        .collect()
}

/// Sorted distinct values of `field` among the rows matching `constraints`.
/// Empty when nothing matches.
pub fn distinct_values(
    dataset: &Dataset,
    field: Field,
    constraints: &[(Field, &str)],
) -> Vec<String> {
    matching(dataset, constraints)
        .into_iter()
        .map(|rec| field.value(rec))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn states_of(dataset: &Dataset) -> Vec<String> {
    distinct_values(dataset, Field::State, &[])
}

pub fn districts_of(dataset: &Dataset, state: &str) -> Vec<String> {
    distinct_values(dataset, Field::District, &[(Field::State, state)])
}

pub fn categories_of(dataset: &Dataset, state: &str, district: &str) -> Vec<String> {
    distinct_values(
        dataset,
        Field::Category,
        &[(Field::State, state), (Field::District, district)],
    )
}

pub fn indicators_of(
    dataset: &Dataset,
    state: &str,
    district: &str,
    category: &str,
) -> Vec<String> {
    distinct_values(
        dataset,
        Field::Indicator,
        &[
            (Field::State, state),
            (Field::District, district),
            (Field::Category, category),
        ],
    )
}

/// Rows matching all four fields.
pub fn select<'a>(
    dataset: &'a Dataset,
    state: &str,
    district: &str,
    category: &str,
    indicator: &str,
) -> FilteredSubset<'a> {
    matching(
        dataset,
        &[
            (Field::State, state),
            (Field::District, district),
            (Field::Category, category),
            (Field::Indicator, indicator),
        ],
    )
}

/// Every indicator row for a district and category, whatever the indicator.
pub fn category_rows<'a>(
    dataset: &'a Dataset,
    state: &str,
    district: &str,
    category: &str,
) -> FilteredSubset<'a> {
    matching(
        dataset,
        &[
            (Field::State, state),
            (Field::District, district),
            (Field::Category, category),
        ],
    )
}

/// Options for `field` given the selection's earlier fields. A missing
/// earlier choice yields no options.
pub fn options_for(dataset: &Dataset, selection: &FilterSelection, field: Field) -> Vec<String> {
    let state = selection.state.as_deref();
    let district = selection.district.as_deref();
    let category = selection.category.as_deref();

    match field {
        Field::State => states_of(dataset),
        Field::District => match state {
            Some(s) => districts_of(dataset, s),
            None => Vec::new(),
        },
        Field::Category => match (state, district) {
            (Some(s), Some(d)) => categories_of(dataset, s, d),
            _ => Vec::new(),
        },
        Field::Indicator => match (state, district, category) {
            (Some(s), Some(d), Some(c)) => indicators_of(dataset, s, d, c),
            _ => Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn rec(state: &str, district: &str, category: &str, indicator: &str) -> Record {
        Record {
            state: state.into(),
            district: district.into(),
            category: category.into(),
            indicator: indicator.into(),
            nfhs4: CellValue::Float(10.0),
            nfhs5: CellValue::Float(12.0),
            change: CellValue::Float(2.0),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            rec("Kerala", "Wayanad", "Nutrition", "Stunting"),
            rec("Bihar", "Patna", "Nutrition", "Wasting"),
            rec("Bihar", "Patna", "Nutrition", "Stunting"),
            rec("Bihar", "Gaya", "Sanitation", "Improved toilet"),
            rec("Bihar", "Patna", "Health", "Anaemia"),
            rec("Maharashtra", "Aurangabad", "Health", "Anaemia"),
            rec("Bihar", "Aurangabad", "Health", "Anaemia"),
            rec("Bihar", "Patna", "Nutrition", "Wasting"),
        ])
    }

    #[test]
    fn states_are_sorted_and_distinct() {
        assert_eq!(states_of(&sample()), ["Bihar", "Kerala", "Maharashtra"]);
    }

    #[test]
    fn districts_only_come_from_their_state() {
        let ds = sample();
        for state in states_of(&ds) {
            let districts = districts_of(&ds, &state);
            let mut sorted = districts.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(districts, sorted);
            for d in &districts {
                assert!(ds
                    .records()
                    .iter()
                    .any(|r| r.state == state && &r.district == d));
            }
        }
        assert_eq!(districts_of(&ds, "Bihar"), ["Aurangabad", "Gaya", "Patna"]);
        assert_eq!(districts_of(&ds, "Maharashtra"), ["Aurangabad"]);
    }

    #[test]
    fn categories_and_indicators_cascade() {
        let ds = sample();
        assert_eq!(categories_of(&ds, "Bihar", "Patna"), ["Health", "Nutrition"]);
        assert_eq!(
            indicators_of(&ds, "Bihar", "Patna", "Nutrition"),
            ["Stunting", "Wasting"]
        );
    }

    #[test]
    fn indicators_non_empty_iff_some_row_matches() {
        let ds = sample();
        for state in states_of(&ds) {
            for district in districts_of(&ds, &state) {
                for category in ["Nutrition", "Health", "Sanitation", "Water"] {
                    let any_row = ds.records().iter().any(|r| {
                        r.state == state && r.district == district && r.category == category
                    });
                    let indicators = indicators_of(&ds, &state, &district, category);
                    assert_eq!(!indicators.is_empty(), any_row, "{state}/{district}/{category}");
                }
            }
        }
    }

    #[test]
    fn unknown_prior_value_gives_empty_options() {
        let ds = sample();
        assert!(districts_of(&ds, "Goa").is_empty());
        assert!(categories_of(&ds, "Kerala", "Patna").is_empty());
        assert!(states_of(&Dataset::default()).is_empty());
    }

    #[test]
    fn select_matches_all_four_fields_exactly() {
        let ds = sample();
        let subset = select(&ds, "Bihar", "Patna", "Nutrition", "Wasting");
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|r| r.state == "Bihar"
            && r.district == "Patna"
            && r.category == "Nutrition"
            && r.indicator == "Wasting"));

        assert!(select(&ds, "Bihar", "Patna", "Nutrition", "wasting").is_empty());
        assert!(select(&ds, "Bihar", "Pat", "Nutrition", "Wasting").is_empty());
    }

    #[test]
    fn category_rows_ignore_indicator_and_keep_row_order() {
        let ds = sample();
        let rows = category_rows(&ds, "Bihar", "Patna", "Nutrition");
        let names: Vec<_> = rows.iter().map(|r| r.indicator.as_str()).collect();
        assert_eq!(names, ["Wasting", "Stunting", "Wasting"]);
    }

    #[test]
    fn options_for_requires_earlier_fields() {
        let ds = sample();
        let mut sel = FilterSelection::default();
        assert_eq!(options_for(&ds, &sel, Field::State), states_of(&ds));
        assert!(options_for(&ds, &sel, Field::District).is_empty());

        sel.set(Field::State, Some("Bihar".into()));
        sel.set(Field::District, Some("Patna".into()));
        assert_eq!(
            options_for(&ds, &sel, Field::Category),
            categories_of(&ds, "Bihar", "Patna")
        );
        assert!(sel.complete().is_none());
    }
}
