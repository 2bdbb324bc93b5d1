//! Static track geometry: number of positions and labelled stations.

use super::error::TrackError;
use super::types::Position;

/// A labelled station; trains may share a station position without crashing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub label: String,
    pub position: Position,
}

impl Station {
    pub fn new(label: impl Into<String>, position: Position) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }
}

/// The discrete 1-D track shared by all trains.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackLayout {
    n_states: usize,
    stations: Vec<Station>,
}

impl TrackLayout {
    /// Creates a layout, checking that every station lies on the track.
    pub fn new(n_states: usize, stations: Vec<Station>) -> Result<Self, TrackError> {
        if n_states == 0 {
            return Err(TrackError::EmptyTrack);
        }
        for station in &stations {
            if station.position >= n_states {
                return Err(TrackError::PositionOutOfRange {
                    position: station.position,
                    n_states,
                });
            }
        }
        Ok(Self { n_states, stations })
    }

    /// Number of discrete positions.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Returns true if `position` is a collision-exempt station.
    pub fn is_station(&self, position: Position) -> bool {
        self.stations.iter().any(|s| s.position == position)
    }

    /// Returns the label of the station at `position`, if any.
    pub fn station_at(&self, position: Position) -> Option<&str> {
        self.stations
            .iter()
            .find(|s| s.position == position)
            .map(|s| s.label.as_str())
    }

    pub(crate) fn check_position(&self, position: Position) -> Result<(), TrackError> {
        if position < self.n_states {
            Ok(())
        } else {
            Err(TrackError::PositionOutOfRange {
                position,
                n_states: self.n_states,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> TrackLayout {
        TrackLayout::new(
            9,
            vec![
                Station::new("A", 0),
                Station::new("B", 4),
                Station::new("C", 8),
            ],
        )
        .unwrap()
    }

    #[test]
    fn station_lookup() {
        let layout = abc();
        assert!(layout.is_station(4));
        assert!(!layout.is_station(5));
        assert_eq!(layout.station_at(8), Some("C"));
        assert_eq!(layout.station_at(3), None);
    }

    #[test]
    fn rejects_station_off_track() {
        let err = TrackLayout::new(5, vec![Station::new("Z", 5)]).unwrap_err();
        assert_eq!(
            err,
            TrackError::PositionOutOfRange {
                position: 5,
                n_states: 5
            }
        );
    }

    #[test]
    fn rejects_empty_track() {
        assert_eq!(
            TrackLayout::new(0, Vec::new()).unwrap_err(),
            TrackError::EmptyTrack
        );
    }
}
