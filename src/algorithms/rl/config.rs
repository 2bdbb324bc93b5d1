//! Configuration for the Q-learning agents and the training/evaluation loops.

use std::time::Duration;

use super::error::RlError;

/// Hyperparameters of a single Q-learning agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Step size α of the temporal-difference update.
    pub learning_rate: f64,
    /// Discount factor γ applied to the best next-state value.
    pub discount_factor: f64,
    /// Probability ε of taking a uniformly random action.
    pub exploration_rate: f64,
    /// Multiplier applied to ε per episode when decay is enabled.
    pub exploration_decay: f64,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), RlError> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(RlError::InvalidConfig(
                "learning_rate must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(RlError::InvalidConfig(
                "discount_factor must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(RlError::InvalidConfig(
                "exploration_rate must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.exploration_decay) {
            return Err(RlError::InvalidConfig(
                "exploration_decay must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.6,
            discount_factor: 0.5,
            exploration_rate: 0.8,
            exploration_decay: 0.9,
        }
    }
}

/// Settings for the training loop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingConfig {
    /// Number of episodes to train for.
    pub n_episodes: usize,
    /// Step budget per episode.
    pub max_steps: u32,
    /// Apply each agent's `exploration_decay` after every episode.
    ///
    /// Off by default: exploration stays constant during training.
    pub decay_exploration: bool,
    /// Emit a progress log line every this many episodes (0 disables).
    pub log_every: usize,
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), RlError> {
        if self.n_episodes == 0 {
            return Err(RlError::InvalidConfig(
                "training.n_episodes must be > 0".into(),
            ));
        }
        if self.max_steps == 0 {
            return Err(RlError::InvalidConfig(
                "training.max_steps must be > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_episodes: 10_000,
            max_steps: 70,
            decay_exploration: false,
            log_every: 1_000,
        }
    }
}

/// Settings for greedy evaluation runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationConfig {
    pub n_episodes: usize,
    pub max_steps: u32,
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), RlError> {
        if self.n_episodes == 0 {
            return Err(RlError::InvalidConfig(
                "evaluation.n_episodes must be > 0".into(),
            ));
        }
        if self.max_steps == 0 {
            return Err(RlError::InvalidConfig(
                "evaluation.max_steps must be > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            n_episodes: 5_000,
            max_steps: 70,
        }
    }
}

/// Everything a full train → evaluate → transfer run needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    pub agent: AgentConfig,
    pub training: TrainingConfig,
    pub evaluation: EvaluationConfig,
    /// Base RNG seed; agent `i` is seeded with `seed + i`.
    pub seed: u64,
    /// Pause between rendered frames when visualization is enabled.
    pub frame_delay: Duration,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), RlError> {
        self.agent.validate()?;
        self.training.validate()?;
        self.evaluation.validate()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            training: TrainingConfig::default(),
            evaluation: EvaluationConfig::default(),
            seed: 48,
            frame_delay: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = RunConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.training.max_steps, 70);
        assert!(!cfg.training.decay_exploration);
    }

    #[test]
    fn rejects_zero_learning_rate() {
        let cfg = AgentConfig {
            learning_rate: 0.0,
            ..AgentConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(RlError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_exploration_above_one() {
        let cfg = AgentConfig {
            exploration_rate: 1.5,
            ..AgentConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_empty_evaluation() {
        let cfg = RunConfig {
            evaluation: EvaluationConfig {
                n_episodes: 0,
                ..EvaluationConfig::default()
            },
            ..RunConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(RlError::InvalidConfig(
                "evaluation.n_episodes must be > 0".into()
            ))
        );
    }
}
