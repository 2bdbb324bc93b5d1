//! Output ports: visualization, metrics series, and value-table listings.
//!
//! None of these feed back into the simulation.

pub mod metrics;
pub mod report;
pub mod visualizer;

use thiserror::Error;

pub use metrics::{CsvMetricsSink, MetricsSink, NoopMetricsSink};
pub use report::ValueTableReport;
pub use visualizer::{ConsoleVisualizer, NoopVisualizer, Visualizer};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
