use thiserror::Error;

use crate::track::TrackError;

/// Errors raised by the learning agents and the training/evaluation loops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RlError {
    #[error(transparent)]
    Track(#[from] TrackError),

    #[error("State {state} is outside the value table ({n_states} states)")]
    StateOutOfRange { state: usize, n_states: usize },

    #[error("{agents} agents cannot drive {trains} trains")]
    AgentCountMismatch { agents: usize, trains: usize },

    #[error("Binding for train {found} sits where train {expected} belongs")]
    BindingOrder { expected: usize, found: usize },

    #[error("Value table has {table_states} states but the track has {track_states}")]
    TableShapeMismatch {
        table_states: usize,
        track_states: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
