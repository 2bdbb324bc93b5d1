//! Train records owned by the track environment.

use super::types::{Position, Step};

/// A single train: its fixed schedule plus runtime state.
///
/// Trains carry no behavior of their own. The owning
/// [`TrackEnvironment`](super::TrackEnvironment) is the only component that
/// mutates `position` and the recorded departure/arrival times.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Train {
    /// Position the train occupies after every reset.
    pub start: Position,
    /// Current position.
    pub position: Position,
    /// Destination position.
    pub goal: Position,
    /// First time step at which the train may move.
    pub departure_time: Step,
    /// Scheduled arrival step.
    pub arrival_time: Step,
    /// Step of the first move this episode, if any.
    pub actual_departure_time: Option<Step>,
    /// Step at which the train first reached its goal this episode.
    pub actual_arrival_time: Option<Step>,
}

impl Train {
    /// Creates a train standing at `start`.
    pub fn new(start: Position, goal: Position, departure_time: Step, arrival_time: Step) -> Self {
        Self {
            start,
            position: start,
            goal,
            departure_time,
            arrival_time,
            actual_departure_time: None,
            actual_arrival_time: None,
        }
    }

    /// Returns the train to its start position and clears the recorded times.
    pub fn reset(&mut self) {
        self.position = self.start;
        self.actual_departure_time = None;
        self.actual_arrival_time = None;
    }

    /// True once the train may act at `step`.
    pub fn has_departed_by(&self, step: Step) -> bool {
        step >= self.departure_time
    }

    pub fn at_goal(&self) -> bool {
        self.position == self.goal
    }

    /// Actual minus scheduled arrival, or 0 if the train has not arrived.
    ///
    /// Negative values mean the train arrived early.
    pub fn delay(&self) -> i64 {
        self.actual_arrival_time
            .map(|actual| i64::from(actual) - i64::from(self.arrival_time))
            .unwrap_or(0)
    }
}
