//! Dense tabular action-value storage.

use super::error::RlError;
use crate::track::Action;

/// Action values indexed by `(state, action)`, stored row-major.
///
/// Rows are track positions; each row holds one value per [`Action`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QTable {
    n_states: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Creates a zero-initialized table with `n_states` rows.
    pub fn new(n_states: usize) -> Self {
        Self {
            n_states,
            values: vec![0.0; n_states * Action::COUNT],
        }
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_actions(&self) -> usize {
        Action::COUNT
    }

    /// Returns the action values at `state`.
    pub fn row(&self, state: usize) -> Result<&[f64], RlError> {
        self.check_state(state)?;
        let start = state * Action::COUNT;
        Ok(&self.values[start..start + Action::COUNT])
    }

    pub fn get(&self, state: usize, action: Action) -> Result<f64, RlError> {
        Ok(self.row(state)?[action.index()])
    }

    pub fn set(&mut self, state: usize, action: Action, value: f64) -> Result<(), RlError> {
        self.check_state(state)?;
        self.values[state * Action::COUNT + action.index()] = value;
        Ok(())
    }

    /// Highest action value at `state`.
    pub fn max_value(&self, state: usize) -> Result<f64, RlError> {
        Ok(self
            .row(state)?
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Highest-valued action at `state`; ties go to the lowest index.
    pub fn greedy_action(&self, state: usize) -> Result<Action, RlError> {
        let row = self.row(state)?;
        let mut best = 0;
        for (i, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = i;
            }
        }
        Ok(Action::from_index(best)?)
    }

    /// Iterates over rows in state order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(Action::COUNT)
    }

    fn check_state(&self, state: usize) -> Result<(), RlError> {
        if state < self.n_states {
            Ok(())
        } else {
            Err(RlError::StateOutOfRange {
                state,
                n_states: self.n_states,
            })
        }
    }
}
