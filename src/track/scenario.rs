//! Built-in three-train scenarios.
//!
//! Both scenarios run on a 9-position track with stations A, B and C at
//! positions 0, 4 and 8:
//!
//! | train | start | goal | departure | arrival |
//! |-------|-------|------|-----------|---------|
//! | 0     | 0     | 4    | 0 (5)     | 5       |
//! | 1     | 0     | 8    | 7         | 18      |
//! | 2     | 8     | 4    | 0         | 5       |
//!
//! The delayed scenario holds train 0 at its origin until step 5.

use super::environment::TrackEnvironment;
use super::error::TrackError;
use super::layout::{Station, TrackLayout};
use super::train::Train;

/// Number of positions on the scenario track.
pub const SCENARIO_TRACK_LENGTH: usize = 9;

/// Departure step of train 0 in the delayed scenario.
pub const DELAYED_DEPARTURE: u32 = 5;

/// The station layout shared by both scenarios.
pub fn station_layout() -> Result<TrackLayout, TrackError> {
    TrackLayout::new(
        SCENARIO_TRACK_LENGTH,
        vec![
            Station::new("A", 0),
            Station::new("B", 4),
            Station::new("C", 8),
        ],
    )
}

/// The timetable every agent is trained on.
pub fn standard_trains() -> Vec<Train> {
    vec![
        Train::new(0, 4, 0, 5),
        Train::new(0, 8, 7, 18),
        Train::new(8, 4, 0, 5),
    ]
}

/// The standard timetable with train 0 departing late.
pub fn delayed_trains() -> Vec<Train> {
    let mut trains = standard_trains();
    trains[0].departure_time = DELAYED_DEPARTURE;
    trains
}

pub fn standard() -> Result<TrackEnvironment, TrackError> {
    TrackEnvironment::new(station_layout()?, standard_trains())
}

pub fn delayed() -> Result<TrackEnvironment, TrackError> {
    TrackEnvironment::new(station_layout()?, delayed_trains())
}
