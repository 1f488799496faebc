use crate::data::error::DataError;
use crate::data::filter::{matching, options_for, Field, FilterSelection};
use crate::data::model::Dataset;
use crate::report::{self, Report};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the central panel should show for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Report(Report),
    /// No row for this combination (or nothing left to choose).
    NoData,
    /// A stored value could not be read as a number.
    Warning(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, shared for the process lifetime.
    pub dataset: &'static Dataset,

    /// Current dropdown values.
    pub selection: FilterSelection,

    /// Valid choices per cascade step, in `Field::CASCADE` order.
    pub options: [Vec<String>; 4],

    /// Rows matching the current selection (cached for the status bar).
    pub subset_len: usize,

    pub view: View,
}

impl AppState {
    pub fn new(dataset: &'static Dataset) -> Self {
        let mut state = Self {
            dataset,
            selection: FilterSelection::default(),
            options: Default::default(),
            subset_len: 0,
            view: View::NoData,
        };
        state.refresh();
        state
    }

    pub fn options(&self, field: Field) -> &[String] {
        &self.options[cascade_index(field)]
    }

    /// Change one dropdown and recompute everything downstream of it.
    pub fn choose(&mut self, field: Field, value: String) {
        if self.selection.get(field) == Some(value.as_str()) {
            return;
        }
        log::debug!("{field} -> {value}");
        self.selection.set(field, Some(value));
        self.refresh();
    }

    /// Recompute options step by step, snapping any value that is no longer
    /// valid to the first option, then rebuild the report.
    pub fn refresh(&mut self) {
        for field in Field::CASCADE {
            let options = options_for(self.dataset, &self.selection, field);
            let keep = self
                .selection
                .get(field)
                .is_some_and(|current| options.iter().any(|o| o == current));
            if !keep {
                self.selection.set(field, options.first().cloned());
            }
            self.options[cascade_index(field)] = options;
        }

        let constraints: Vec<(Field, &str)> = Field::CASCADE
            .iter()
            .filter_map(|f| self.selection.get(*f).map(|v| (*f, v)))
            .collect();
        self.subset_len = matching(self.dataset, &constraints).len();

        self.view = match report::build(self.dataset, &self.selection) {
            Ok(Some(report)) => View::Report(report),
            Ok(None) => View::NoData,
            Err(e @ DataError::NumericCoercion { .. }) => View::Warning(e.to_string()),
            Err(e) => {
                log::error!("Unexpected error while building report: {e}");
                View::Warning(e.to_string())
            }
        };
    }
}

fn cascade_index(field: Field) -> usize {
    match field {
        Field::State => 0,
        Field::District => 1,
        Field::Category => 2,
        Field::Indicator => 3,
    }
}
