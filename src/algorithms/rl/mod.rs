//! Independent tabular Q-learning for the multi-train track.
//!
//! Each train is driven by its own [`QLearningAgent`]. Agents never share
//! tables; the other trains are simply part of the dynamics each agent
//! learns from. The [`Trainer`] drives exploratory episodes with value
//! updates, and [`EvaluationMetrics::evaluate`] replays the same control flow
//! greedily with frozen tables, optionally on a different scenario
//! ([`EvaluationMode::Transfer`]).

pub mod agent;
pub mod config;
pub mod episode;
pub mod error;
pub mod metrics;
pub mod q_table;
pub mod training;


pub use agent::{agents_for, check_bindings, AgentBinding, QLearningAgent};
pub use config::{AgentConfig, EvaluationConfig, RunConfig, TrainingConfig};
pub use episode::{EpisodeHistory, EpisodeOutcome};
pub use error::RlError;
pub use metrics::{EvaluationMetrics, EvaluationMode, RunningStats};
pub use q_table::QTable;
pub use training::Trainer;
