use serde::{Deserialize, Serialize};

use crate::core::{DatasetStore, PriceRecord, YearRange};
use crate::error::{CategoryField, DashboardError, DashboardResult, ValidationError};

/// How an inverted year range (`min > max`) is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangeOrderPolicy {
    /// Swap the bounds; the effective window never widens.
    #[default]
    Swap,
    /// Reject with [`ValidationError::InvertedRange`].
    Reject,
}

/// Cross-field rules enforced by [`FilterState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRules {
    #[serde(default)]
    pub range_order_policy: RangeOrderPolicy,
    #[serde(default = "default_min_comparison_states")]
    pub min_comparison_states: usize,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            range_order_policy: RangeOrderPolicy::default(),
            min_comparison_states: default_min_comparison_states(),
        }
    }
}

fn default_min_comparison_states() -> usize {
    2
}

/// One user selection change, as dispatched by an input widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterChange {
    Year(String),
    Region(String),
    ComparisonStates(Vec<String>),
    StateA(String),
    StateB(String),
    ComparisonPair { state_a: String, state_b: String },
    YearRange(YearRange),
    /// Several changes applied all-or-nothing.
    Batch(Vec<FilterChange>),
}

impl FilterChange {
    #[must_use]
    pub fn touches_year_range(&self) -> bool {
        match self {
            Self::YearRange(_) => true,
            Self::Batch(changes) => changes.iter().any(Self::touches_year_range),
            _ => false,
        }
    }
}

/// Current selections of one dashboard session.
///
/// Fields are only reachable through [`FilterState::apply`], which validates
/// every change against the dataset before producing the next state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selected_year: String,
    selected_region: String,
    comparison_states: Vec<String>,
    state_a: String,
    state_b: String,
    year_range: YearRange,
}

// Record positions the reference dashboard seeds its dropdowns from.
const DEFAULT_YEAR_REGION_ROW: usize = 1;
const DEFAULT_COMPARISON_ROWS: [usize; 3] = [3, 13, 6];
const DEFAULT_STATE_A_ROW: usize = 3;
const DEFAULT_STATE_B_ROW: usize = 1;

impl FilterState {
    /// Default selections for a fresh session.
    ///
    /// Year and region come from the second record, the comparison states from
    /// records 3, 13 and 6, `state_a` from record 3 and `state_b` from record 1;
    /// positions past the end fall back to the last record. The comparison set
    /// is topped up from the sorted state list until it meets
    /// `rules.min_comparison_states`. The year range spans the whole dataset.
    pub fn initial(store: &DatasetStore, rules: &FilterRules) -> DashboardResult<Self> {
        let at = |position: usize| record_at(store, position);

        let seed = at(DEFAULT_YEAR_REGION_ROW)?;
        let mut comparison_states = Vec::new();
        for position in DEFAULT_COMPARISON_ROWS {
            push_unique(&mut comparison_states, at(position)?.state());
        }
        for state in store.states_available() {
            if comparison_states.len() >= rules.min_comparison_states {
                break;
            }
            push_unique(&mut comparison_states, state);
        }
        if comparison_states.len() < rules.min_comparison_states {
            return Err(DashboardError::InvalidData(format!(
                "dataset has {} states, fewer than the {} required for comparison",
                comparison_states.len(),
                rules.min_comparison_states
            )));
        }

        Ok(Self {
            selected_year: seed.year().to_owned(),
            selected_region: seed.region().to_owned(),
            comparison_states,
            state_a: at(DEFAULT_STATE_A_ROW)?.state().to_owned(),
            state_b: at(DEFAULT_STATE_B_ROW)?.state().to_owned(),
            year_range: store.year_bounds(),
        })
    }

    #[must_use]
    pub fn selected_year(&self) -> &str {
        &self.selected_year
    }

    #[must_use]
    pub fn selected_region(&self) -> &str {
        &self.selected_region
    }

    #[must_use]
    pub fn comparison_states(&self) -> &[String] {
        &self.comparison_states
    }

    #[must_use]
    pub fn state_a(&self) -> &str {
        &self.state_a
    }

    #[must_use]
    pub fn state_b(&self) -> &str {
        &self.state_b
    }

    #[must_use]
    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    pub(crate) fn year_range_mut(&mut self) -> &mut YearRange {
        &mut self.year_range
    }

    /// Validates `change` and returns the resulting state.
    ///
    /// `self` is never modified; on error the caller keeps the prior state.
    pub fn apply(
        &self,
        change: FilterChange,
        store: &DatasetStore,
        rules: &FilterRules,
    ) -> Result<Self, ValidationError> {
        let mut candidate = self.clone();
        candidate.apply_in_place(change, store, rules)?;
        Ok(candidate)
    }

    fn apply_in_place(
        &mut self,
        change: FilterChange,
        store: &DatasetStore,
        rules: &FilterRules,
    ) -> Result<(), ValidationError> {
        match change {
            FilterChange::Year(year) => {
                ensure_known(CategoryField::Year, &year, store.contains_year(&year))?;
                self.selected_year = year;
            }
            FilterChange::Region(region) => {
                ensure_known(CategoryField::Region, &region, store.contains_region(&region))?;
                self.selected_region = region;
            }
            FilterChange::ComparisonStates(states) => {
                let mut unique = Vec::with_capacity(states.len());
                for state in &states {
                    ensure_known(CategoryField::State, state, store.contains_state(state))?;
                    push_unique(&mut unique, state);
                }
                if unique.len() < rules.min_comparison_states {
                    return Err(ValidationError::TooFewStates {
                        required: rules.min_comparison_states,
                        actual: unique.len(),
                    });
                }
                self.comparison_states = unique;
            }
            FilterChange::StateA(state) => {
                ensure_known(CategoryField::State, &state, store.contains_state(&state))?;
                self.state_a = state;
            }
            FilterChange::StateB(state) => {
                ensure_known(CategoryField::State, &state, store.contains_state(&state))?;
                self.state_b = state;
            }
            FilterChange::ComparisonPair { state_a, state_b } => {
                ensure_known(CategoryField::State, &state_a, store.contains_state(&state_a))?;
                ensure_known(CategoryField::State, &state_b, store.contains_state(&state_b))?;
                self.state_a = state_a;
                self.state_b = state_b;
            }
            FilterChange::YearRange(range) => {
                self.year_range = validate_year_range(range, store.year_bounds(), rules)?;
            }
            FilterChange::Batch(changes) => {
                for change in changes {
                    self.apply_in_place(change, store, rules)?;
                }
            }
        }
        Ok(())
    }
}

fn record_at(store: &DatasetStore, position: usize) -> DashboardResult<&PriceRecord> {
    store
        .record(position)
        .or_else(|| store.records().last())
        .ok_or_else(|| DashboardError::InvalidData("dataset is empty".to_owned()))
}

fn ensure_known(field: CategoryField, value: &str, known: bool) -> Result<(), ValidationError> {
    if known {
        Ok(())
    } else {
        Err(ValidationError::UnknownCategory {
            field,
            value: value.to_owned(),
        })
    }
}

fn validate_year_range(
    range: YearRange,
    bounds: YearRange,
    rules: &FilterRules,
) -> Result<YearRange, ValidationError> {
    let range = if range.is_inverted() {
        match rules.range_order_policy {
            RangeOrderPolicy::Swap => range.ordered(),
            RangeOrderPolicy::Reject => {
                return Err(ValidationError::InvertedRange {
                    min: range.min,
                    max: range.max,
                });
            }
        }
    } else {
        range
    };

    if range.min < bounds.min || range.max > bounds.max {
        return Err(ValidationError::YearOutOfBounds {
            min: range.min,
            max: range.max,
            lower: bounds.min,
            upper: bounds.max,
        });
    }
    Ok(range)
}

fn push_unique(states: &mut Vec<String>, state: &str) {
    if !states.iter().any(|existing| existing == state) {
        states.push(state.to_owned());
    }
}
