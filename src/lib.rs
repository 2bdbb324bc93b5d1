//! rail_dispatch - multi-train scheduling with independent Q-learning agents
//!
//! Trains share a one-dimensional track with collision-exempt stations. Each
//! train is driven by its own tabular Q-learning agent that learns to reach
//! its goal on time without crashing into the others.

pub mod algorithms;
pub mod experiment;
pub mod sinks;
pub mod track;

pub use algorithms::rl::{QLearningAgent, RlError, RunConfig, Trainer};
pub use track::{Action, TrackEnvironment, TrackError, Train, TrainId};
