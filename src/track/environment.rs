//! Multi-train track environment.
//!
//! One call to [`TrackEnvironment::step`] moves exactly one train, then runs
//! the collision, goal and delay checks for that train.

use log::trace;

use super::error::TrackError;
use super::layout::TrackLayout;
use super::train::Train;
use super::types::{Action, Position, Step, TrainId};

/// Result of moving a single train.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Positions of all trains after the step, in train order.
    pub positions: Vec<Position>,
    /// Reward for the train that acted.
    pub reward: f64,
    /// Whether the move caused a crash (the environment has been reset).
    pub crashed: bool,
    /// Actual minus scheduled arrival of the acting train, 0 before arrival.
    pub delay: i64,
}

/// The shared 1-D track and the trains running on it.
///
/// # Lifecycle
///
/// 1. Build with [`TrackEnvironment::new`] from a layout and a train list.
/// 2. Call [`TrackEnvironment::reset`] at the start of every episode.
/// 3. Call [`TrackEnvironment::step`] once per acting train per time step.
///    A crash resets the environment before `step` returns.
#[derive(Debug, Clone)]
pub struct TrackEnvironment {
    layout: TrackLayout,
    trains: Vec<Train>,
}

impl TrackEnvironment {
    /// Reward for standing on the goal position.
    pub const GOAL_REWARD: f64 = 100.0;
    /// Reward for the move that caused a crash.
    pub const CRASH_PENALTY: f64 = -100.0;

    /// Creates an environment, checking that every train starts and ends on the track.
    ///
    /// Trains are placed at their start positions.
    pub fn new(layout: TrackLayout, trains: Vec<Train>) -> Result<Self, TrackError> {
        if trains.is_empty() {
            return Err(TrackError::NoTrains);
        }
        for train in &trains {
            layout.check_position(train.start)?;
            layout.check_position(train.goal)?;
        }
        let mut env = Self { layout, trains };
        env.reset();
        Ok(env)
    }

    /// Puts every train back on its start position and clears arrival records.
    ///
    /// Returns the positions of all trains.
    pub fn reset(&mut self) -> Vec<Position> {
        for train in &mut self.trains {
            train.reset();
        }
        self.positions()
    }

    /// Applies `action` to one train at time step `step`.
    ///
    /// # Reward
    ///
    /// - Crash (two or more trains on the same non-station position):
    ///   [`Self::CRASH_PENALTY`], the environment is reset and `delay` is 0.
    /// - Otherwise [`Self::GOAL_REWARD`] when the train stands on its goal,
    ///   minus the arrival delay once the train has arrived late.
    pub fn step(
        &mut self,
        train_id: TrainId,
        action: Action,
        step: Step,
    ) -> Result<StepResult, TrackError> {
        let n_trains = self.trains.len();
        let n_states = self.layout.n_states();
        let train = self
            .trains
            .get_mut(train_id.index())
            .ok_or(TrackError::UnknownTrain {
                id: train_id.index(),
                n_trains,
            })?;

        if train.actual_departure_time.is_none() {
            train.actual_departure_time = Some(step);
        }
        train.position = action.apply(train.position, n_states);
        let position = train.position;

        let occupants = self.trains.iter().filter(|t| t.position == position).count();
        if occupants > 1 && !self.layout.is_station(position) {
            trace!(
                "{} crashed at position {} on step {}",
                train_id,
                position,
                step
            );
            return Ok(StepResult {
                positions: self.reset(),
                reward: Self::CRASH_PENALTY,
                crashed: true,
                delay: 0,
            });
        }

        let train = &mut self.trains[train_id.index()];
        let mut reward = 0.0;
        if train.at_goal() {
            reward = Self::GOAL_REWARD;
            if train.actual_arrival_time.is_none() {
                train.actual_arrival_time = Some(step);
            }
        }

        let delay = train.delay();
        if delay > 0 {
            reward -= delay as f64;
        }

        Ok(StepResult {
            positions: self.positions(),
            reward,
            crashed: false,
            delay,
        })
    }

    /// Current positions of all trains, in train order.
    pub fn positions(&self) -> Vec<Position> {
        self.trains.iter().map(|t| t.position).collect()
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Returns the train with the given id, if it exists.
    pub fn train(&self, id: TrainId) -> Option<&Train> {
        self.trains.get(id.index())
    }

    /// Iterates over the ids of all trains, in train order.
    pub fn train_ids(&self) -> impl Iterator<Item = TrainId> + '_ {
        (0..self.trains.len()).map(TrainId)
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    /// Number of positions on the track.
    pub fn n_states(&self) -> usize {
        self.layout.n_states()
    }

    /// Number of rows each agent's value table needs.
    pub fn total_states(&self) -> usize {
        self.layout.n_states()
    }

    pub fn n_trains(&self) -> usize {
        self.trains.len()
    }
}
