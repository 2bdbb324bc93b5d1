//! Greedy evaluation of trained agents.
//!
//! Runs the training control flow with frozen tables and aggregates the
//! per-episode total reward into a running mean and standard deviation.

use std::fmt;

use log::{debug, info};

use super::agent::{check_bindings, AgentBinding};
use super::config::EvaluationConfig;
use super::episode::{run_episode, EpisodeHistory, Greedy};
use super::error::RlError;
use crate::sinks::NoopVisualizer;
use crate::track::TrackEnvironment;

/// Which scenario the evaluated tables were learned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvaluationMode {
    /// Evaluated on the scenario the agents were trained on.
    SameScenario,
    /// Tables reused, without retraining, on a different scenario.
    Transfer,
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationMode::SameScenario => write!(f, "same scenario"),
            EvaluationMode::Transfer => write!(f, "transfer"),
        }
    }
}

/// Running mean and population standard deviation (Welford).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of all pushed values, 0 when empty.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation, 0 when empty.
    pub fn std_dev(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.m2 / self.count as f64).sqrt()
        }
    }
}

/// Aggregated results of a greedy evaluation run.
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    pub mode: EvaluationMode,
    /// Per-episode total reward and total delay.
    pub history: EpisodeHistory,
    /// Mean per-episode total reward.
    pub mean_reward: f64,
    /// Population standard deviation of per-episode total reward.
    pub std_reward: f64,
    /// Episodes that ended in a crash.
    pub crashes: usize,
    pub n_episodes: usize,
}

impl EvaluationMetrics {
    /// Evaluates frozen agents on `env` with greedy action selection.
    ///
    /// In [`EvaluationMode::Transfer`] the bindings may come from a different
    /// scenario; they only need one table per train, sized for the track.
    pub fn evaluate(
        env: &mut TrackEnvironment,
        bindings: &[AgentBinding],
        config: &EvaluationConfig,
        mode: EvaluationMode,
    ) -> Result<Self, RlError> {
        config.validate()?;
        check_bindings(bindings, env)?;
        info!(
            "evaluating {} agents ({}) for {} episodes",
            bindings.len(),
            mode,
            config.n_episodes
        );

        let mut history = EpisodeHistory::with_capacity(config.n_episodes);
        let mut stats = RunningStats::default();
        let mut crashes = 0;
        for episode in 0..config.n_episodes {
            let outcome = run_episode(
                env,
                &mut Greedy(bindings),
                config.max_steps,
                &mut NoopVisualizer,
            )?;
            if outcome.crashed {
                crashes += 1;
            }
            history.push(&outcome);
            stats.push(outcome.total_reward);
            debug!(
                "evaluation episode {}: reward {:.1}, running mean {:.2} +/- {:.2}",
                episode,
                outcome.total_reward,
                stats.mean(),
                stats.std_dev()
            );
        }

        Ok(Self {
            mode,
            history,
            mean_reward: stats.mean(),
            std_reward: stats.std_dev(),
            crashes,
            n_episodes: config.n_episodes,
        })
    }

    /// Mean per-episode total delay.
    pub fn mean_delay(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.delays.iter().sum::<i64>() as f64 / self.history.len() as f64
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({}, {} episodes) ===",
            self.mode, self.n_episodes
        )?;
        writeln!(
            f,
            "  Mean reward:      {:.2} +/- {:.2}",
            self.mean_reward, self.std_reward
        )?;
        writeln!(f, "  Mean total delay: {:.2}", self.mean_delay())?;
        write!(f, "  Crashed episodes: {}", self.crashes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::rl::agent::agents_for;
    use crate::algorithms::rl::config::AgentConfig;
    use crate::track::scenario;

    #[test]
    fn running_stats_match_population_formulas() {
        let mut stats = RunningStats::default();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.push(v);
        }
        assert_eq!(stats.count(), 8);
        assert!((stats.mean() - 5.0).abs() < 1e-12);
        assert!((stats.std_dev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_stats_are_zero() {
        let stats = RunningStats::default();
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.std_dev(), 0.0);
    }

    #[test]
    fn untrained_agents_are_evaluated_deterministically() {
        let mut env = scenario::standard().unwrap();
        let bindings = agents_for(&env, &AgentConfig::default(), 48);
        let config = EvaluationConfig {
            n_episodes: 4,
            max_steps: 70,
        };
        let metrics =
            EvaluationMetrics::evaluate(&mut env, &bindings, &config, EvaluationMode::SameScenario)
                .unwrap();
        assert_eq!(metrics.n_episodes, 4);
        assert_eq!(metrics.history.len(), 4);
        // greedy on zero tables: every episode is identical
        assert!(metrics.history.rewards.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(metrics.std_reward, 0.0);
    }

    #[test]
    fn display_names_mode() {
        let mut env = scenario::delayed().unwrap();
        let bindings = agents_for(&env, &AgentConfig::default(), 48);
        let config = EvaluationConfig {
            n_episodes: 1,
            max_steps: 5,
        };
        let metrics =
            EvaluationMetrics::evaluate(&mut env, &bindings, &config, EvaluationMode::Transfer)
                .unwrap();
        let text = metrics.to_string();
        assert!(text.starts_with("=== Evaluation Metrics (transfer, 1 episodes) ==="));
    }
}
