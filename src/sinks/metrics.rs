//! Metrics sinks: consumers of per-episode reward and delay series.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use super::SinkError;
use crate::algorithms::rl::EpisodeHistory;

/// Read-only consumer of one run's episode history.
pub trait MetricsSink {
    /// Renders the history of the run called `run`.
    fn record(&mut self, run: &str, history: &EpisodeHistory) -> Result<(), SinkError>;
}

/// Sink that discards all series.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record(&mut self, _run: &str, _history: &EpisodeHistory) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes `<dir>/<run>.csv` with one `episode,total_reward,total_delay` row
/// per episode, ready for external plotting.
#[derive(Debug, Clone)]
pub struct CsvMetricsSink {
    dir: PathBuf,
}

impl CsvMetricsSink {
    /// Creates the sink, creating `dir` if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file written for `run`.
    pub fn path_for(&self, run: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", run))
    }
}

impl MetricsSink for CsvMetricsSink {
    fn record(&mut self, run: &str, history: &EpisodeHistory) -> Result<(), SinkError> {
        let path = self.path_for(run);
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "episode,total_reward,total_delay")?;
        for (episode, (reward, delay)) in history
            .rewards
            .iter()
            .zip(history.delays.iter())
            .enumerate()
        {
            writeln!(writer, "{},{},{}", episode, reward, delay)?;
        }
        writer.flush()?;
        info!("wrote {} episodes to {}", history.len(), path.display());
        Ok(())
    }
}
