//! Core types for the track simulation.
//!
//! Defines the discrete action set, train identifiers, and positions shared by
//! the environment and the learning agents.

use std::fmt;

use super::error::TrackError;

/// A discrete position on the track, `0..n_states`.
pub type Position = usize;

/// A simulated time step index.
pub type Step = u32;

/// Movement choice for a single train in a single time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Left,
    Stay,
    Right,
}

impl Action {
    /// Number of discrete actions.
    pub const COUNT: usize = 3;

    /// Returns all actions in index order.
    pub fn all() -> [Action; 3] {
        [Action::Left, Action::Stay, Action::Right]
    }

    /// Returns the index of this action (0=Left, 1=Stay, 2=Right).
    pub fn index(&self) -> usize {
        match self {
            Action::Left => 0,
            Action::Stay => 1,
            Action::Right => 2,
        }
    }

    /// Converts a raw action index back into an [`Action`].
    pub fn from_index(index: usize) -> Result<Self, TrackError> {
        match index {
            0 => Ok(Action::Left),
            1 => Ok(Action::Stay),
            2 => Ok(Action::Right),
            other => Err(TrackError::InvalidAction(other)),
        }
    }

    /// Applies this action to `position`, clamped to `[0, n_states - 1]`.
    pub fn apply(&self, position: Position, n_states: usize) -> Position {
        match self {
            Action::Left => position.saturating_sub(1),
            Action::Stay => position,
            Action::Right => (position + 1).min(n_states.saturating_sub(1)),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Left => write!(f, "left"),
            Action::Stay => write!(f, "stay"),
            Action::Right => write!(f, "right"),
        }
    }
}

/// Index of a train in its environment's ordered train list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainId(pub usize);

impl TrainId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "train_{}", self.0)
    }
}
