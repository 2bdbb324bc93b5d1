use thiserror::Error;

/// Contract violations raised by the track environment.
///
/// Collisions and late arrivals are not errors; they are reported through the
/// reward signal of [`super::StepResult`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("Invalid action index {0} (expected 0, 1 or 2)")]
    InvalidAction(usize),

    #[error("Unknown train id {id} (environment has {n_trains} trains)")]
    UnknownTrain { id: usize, n_trains: usize },

    #[error("Position {position} is outside the track [0, {n_states})")]
    PositionOutOfRange { position: usize, n_states: usize },

    #[error("Cannot build an environment without trains")]
    NoTrains,

    #[error("Track must have at least one position")]
    EmptyTrack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_action_display() {
        let e = TrackError::InvalidAction(7);
        assert_eq!(e.to_string(), "Invalid action index 7 (expected 0, 1 or 2)");
    }

    #[test]
    fn unknown_train_display() {
        let e = TrackError::UnknownTrain { id: 5, n_trains: 3 };
        assert_eq!(
            e.to_string(),
            "Unknown train id 5 (environment has 3 trains)"
        );
    }

    #[test]
    fn position_out_of_range_display() {
        let e = TrackError::PositionOutOfRange {
            position: 12,
            n_states: 9,
        };
        assert!(e.to_string().contains("outside the track"));
    }

    #[test]
    fn error_equality() {
        assert_eq!(TrackError::NoTrains, TrackError::NoTrains);
        assert_ne!(TrackError::NoTrains, TrackError::EmptyTrack);
    }
}
