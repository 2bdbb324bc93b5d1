//! Episode-driving training loop.

use log::{debug, info};

use super::agent::{check_bindings, AgentBinding};
use super::config::TrainingConfig;
use super::episode::{run_episode, EpisodeHistory, Learning};
use super::error::RlError;
use crate::sinks::{NoopVisualizer, Visualizer};
use crate::track::TrackEnvironment;

/// Trains one Q-learning agent per train.
///
/// Every frame of every episode is passed to the injected [`Visualizer`];
/// [`Trainer::new`] uses [`NoopVisualizer`].
pub struct Trainer<V: Visualizer = NoopVisualizer> {
    config: TrainingConfig,
    visualizer: V,
}

impl Trainer<NoopVisualizer> {
    pub fn new(config: TrainingConfig) -> Self {
        Self::with_visualizer(config, NoopVisualizer)
    }
}

impl<V: Visualizer> Trainer<V> {
    pub fn with_visualizer(config: TrainingConfig, visualizer: V) -> Self {
        Self { config, visualizer }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn into_visualizer(self) -> V {
        self.visualizer
    }

    /// Runs `config.n_episodes` training episodes on `env`.
    ///
    /// Returns the total reward and total delay of every episode. Crashes end
    /// an episode early but never the run.
    pub fn train(
        &mut self,
        env: &mut TrackEnvironment,
        bindings: &mut [AgentBinding],
    ) -> Result<EpisodeHistory, RlError> {
        self.config.validate()?;
        check_bindings(bindings, env)?;

        info!(
            "training {} agents for {} episodes (max {} steps)",
            bindings.len(),
            self.config.n_episodes,
            self.config.max_steps
        );
        self.visualizer.show_layout(env.layout());

        let mut history = EpisodeHistory::with_capacity(self.config.n_episodes);
        let mut crashes = 0usize;
        for episode in 0..self.config.n_episodes {
            let outcome = run_episode(
                env,
                &mut Learning(&mut *bindings),
                self.config.max_steps,
                &mut self.visualizer,
            )?;
            if outcome.crashed {
                crashes += 1;
            }
            debug!(
                "episode {}: reward {:.1}, delay {}, {} steps, crashed: {}",
                episode, outcome.total_reward, outcome.total_delay, outcome.steps, outcome.crashed
            );
            history.push(&outcome);

            if self.config.decay_exploration {
                for binding in bindings.iter_mut() {
                    binding.agent.decay_exploration();
                }
            }

            if self.config.log_every > 0 && (episode + 1) % self.config.log_every == 0 {
                let window = &history.rewards[history.len() - self.config.log_every..];
                let mean = window.iter().sum::<f64>() / window.len() as f64;
                info!(
                    "episode {}/{}: mean reward {:.2} over last {}, {} crashes so far",
                    episode + 1,
                    self.config.n_episodes,
                    mean,
                    window.len(),
                    crashes
                );
            }
        }

        info!(
            "training finished: {} episodes, {} crashes",
            history.len(),
            crashes
        );
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::rl::agent::agents_for;
    use crate::algorithms::rl::config::AgentConfig;
    use crate::track::scenario;

    fn quick_config(n_episodes: usize) -> TrainingConfig {
        TrainingConfig {
            n_episodes,
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn history_has_one_entry_per_episode() {
        let mut env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        let history = Trainer::new(quick_config(25))
            .train(&mut env, &mut bindings)
            .unwrap();
        assert_eq!(history.len(), 25);
        assert_eq!(history.delays.len(), 25);
    }

    #[test]
    fn environment_is_reset_after_training() {
        let mut env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        Trainer::new(quick_config(10))
            .train(&mut env, &mut bindings)
            .unwrap();
        assert_eq!(env.positions(), vec![0, 0, 8]);
    }

    #[test]
    fn training_is_reproducible_for_a_seed() {
        let run = || {
            let mut env = scenario::standard().unwrap();
            let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
            let history = Trainer::new(quick_config(50))
                .train(&mut env, &mut bindings)
                .unwrap();
            (history, bindings[0].agent.q_table().clone())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn exploration_is_constant_by_default() {
        let mut env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        Trainer::new(quick_config(5))
            .train(&mut env, &mut bindings)
            .unwrap();
        assert!(bindings
            .iter()
            .all(|b| (b.agent.exploration_rate() - 0.8).abs() < 1e-12));
    }

    #[test]
    fn opt_in_decay_shrinks_exploration() {
        let mut env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        let config = TrainingConfig {
            decay_exploration: true,
            ..quick_config(2)
        };
        Trainer::new(config).train(&mut env, &mut bindings).unwrap();
        // 0.8 * 0.9 * 0.9
        assert!((bindings[2].agent.exploration_rate() - 0.648).abs() < 1e-12);
    }

    #[test]
    fn rejects_mismatched_bindings() {
        let mut env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        bindings.truncate(1);
        let err = Trainer::new(quick_config(1))
            .train(&mut env, &mut bindings)
            .unwrap_err();
        assert!(matches!(err, RlError::AgentCountMismatch { .. }));
    }

    #[test]
    fn visualizer_sees_layout_and_frames() {
        use crate::sinks::ConsoleVisualizer;
        use std::time::Duration;

        let mut env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        let viz = ConsoleVisualizer::new(Vec::new(), Duration::ZERO);
        let mut trainer = Trainer::with_visualizer(quick_config(1), viz);
        trainer.train(&mut env, &mut bindings).unwrap();
        let text = String::from_utf8(trainer.into_visualizer().into_inner()).unwrap();
        assert!(text.starts_with("     A . . . B . . . C"));
    }
}
