//! The simulated railway: trains, track layout, and the stepping environment.

pub mod environment;
pub mod error;
pub mod layout;
pub mod scenario;
pub mod train;
pub mod types;

pub use environment::{StepResult, TrackEnvironment};
pub use error::TrackError;
pub use layout::{Station, TrackLayout};
pub use train::Train;
pub use types::{Action, Position, Step, TrainId};
