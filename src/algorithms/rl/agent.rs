//! Tabular Q-learning agents and their binding to trains.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::AgentConfig;
use super::error::RlError;
use super::q_table::QTable;
use crate::track::{Action, Position, TrackEnvironment, TrainId};

/// An independent Q-learning agent driving one train.
///
/// The agent only sees its own train's position. Other trains are part of the
/// environment dynamics it learns from.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    learning_rate: f64,
    discount_factor: f64,
    exploration_rate: f64,
    exploration_decay: f64,
    rng: StdRng,
}

impl QLearningAgent {
    /// Creates an agent with a zeroed table of `n_states` rows.
    pub fn new(n_states: usize, config: &AgentConfig, seed: u64) -> Self {
        Self {
            q_table: QTable::new(n_states),
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            exploration_rate: config.exploration_rate,
            exploration_decay: config.exploration_decay,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// ε-greedy selection: a uniformly random action with probability
    /// `exploration_rate`, the greedy action otherwise.
    pub fn choose_action(&mut self, state: Position) -> Result<Action, RlError> {
        if self.rng.gen::<f64>() < self.exploration_rate {
            // still reject states the table cannot hold
            self.q_table.row(state)?;
            let index = self.rng.gen_range(0..Action::COUNT);
            return Ok(Action::from_index(index)?);
        }
        self.q_table.greedy_action(state)
    }

    /// Pure greedy selection, no exploration.
    pub fn choose_action_evaluation(&self, state: Position) -> Result<Action, RlError> {
        self.q_table.greedy_action(state)
    }

    /// One-step Q-learning update:
    ///
    /// ```text
    /// Q(s,a) ← Q(s,a) + α [r + γ max_a' Q(s',a') − Q(s,a)]
    /// ```
    pub fn learn(
        &mut self,
        state: Position,
        action: Action,
        reward: f64,
        next_state: Position,
    ) -> Result<(), RlError> {
        let predict = self.q_table.get(state, action)?;
        let target = reward + self.discount_factor * self.q_table.max_value(next_state)?;
        self.q_table
            .set(state, action, predict + self.learning_rate * (target - predict))
    }

    /// Multiplies the exploration rate by the decay factor.
    pub fn decay_exploration(&mut self) {
        self.exploration_rate *= self.exploration_decay;
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn exploration_decay(&self) -> f64 {
        self.exploration_decay
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }
}

/// Explicit pairing of an agent with the train it drives.
#[derive(Debug, Clone)]
pub struct AgentBinding {
    pub train: TrainId,
    pub agent: QLearningAgent,
}

/// Creates one fresh agent per train of `env`, seeding agent `i` with `seed + i`.
pub fn agents_for(env: &TrackEnvironment, config: &AgentConfig, seed: u64) -> Vec<AgentBinding> {
    env.train_ids()
        .map(|train| AgentBinding {
            train,
            agent: QLearningAgent::new(
                env.total_states(),
                config,
                seed.wrapping_add(train.index() as u64),
            ),
        })
        .collect()
}

/// Checks that `bindings` can drive `env`: one agent per train, in train
/// order, each with a table sized for the track.
///
/// Bindings built for one scenario pass this check for any other scenario
/// with the same train count and track length.
pub fn check_bindings(bindings: &[AgentBinding], env: &TrackEnvironment) -> Result<(), RlError> {
    if bindings.len() != env.n_trains() {
        return Err(RlError::AgentCountMismatch {
            agents: bindings.len(),
            trains: env.n_trains(),
        });
    }
    for (index, binding) in bindings.iter().enumerate() {
        if binding.train.index() != index {
            return Err(RlError::BindingOrder {
                expected: index,
                found: binding.train.index(),
            });
        }
        let table_states = binding.agent.q_table().n_states();
        if table_states != env.total_states() {
            return Err(RlError::TableShapeMismatch {
                table_states,
                track_states: env.total_states(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::scenario;

    fn agent(config: AgentConfig) -> QLearningAgent {
        QLearningAgent::new(9, &config, 7)
    }

    #[test]
    fn greedy_agent_exploits_table() {
        let mut a = agent(AgentConfig {
            exploration_rate: 0.0,
            ..AgentConfig::default()
        });
        a.learn(3, Action::Right, 10.0, 4).unwrap();
        for _ in 0..20 {
            assert_eq!(a.choose_action(3).unwrap(), Action::Right);
        }
    }

    #[test]
    fn exploring_agent_tries_every_action() {
        let mut a = agent(AgentConfig {
            exploration_rate: 1.0,
            ..AgentConfig::default()
        });
        let mut seen = [false; Action::COUNT];
        for _ in 0..200 {
            seen[a.choose_action(0).unwrap().index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn evaluation_choice_is_deterministic() {
        let mut a = agent(AgentConfig::default());
        a.learn(5, Action::Left, 3.0, 4).unwrap();
        let first = a.choose_action_evaluation(5).unwrap();
        for _ in 0..10 {
            assert_eq!(a.choose_action_evaluation(5).unwrap(), first);
        }
        assert_eq!(first, Action::Left);
    }

    #[test]
    fn learn_applies_td_update() {
        let mut a = agent(AgentConfig::default());
        a.learn(4, Action::Stay, 100.0, 4).unwrap();
        // 0 + 0.6 * (100 + 0.5 * 0 - 0)
        assert!((a.q_table().get(4, Action::Stay).unwrap() - 60.0).abs() < 1e-10);
        a.learn(4, Action::Stay, 100.0, 4).unwrap();
        // 60 + 0.6 * (100 + 0.5 * 60 - 60)
        assert!((a.q_table().get(4, Action::Stay).unwrap() - 102.0).abs() < 1e-10);
    }

    #[test]
    fn zero_reward_self_loop_decays_towards_zero() {
        let mut a = agent(AgentConfig::default());
        a.learn(2, Action::Left, 50.0, 3).unwrap();
        let mut previous = a.q_table().get(2, Action::Left).unwrap();
        assert!(previous > 0.0);
        for _ in 0..30 {
            a.learn(2, Action::Left, 0.0, 2).unwrap();
            let current = a.q_table().get(2, Action::Left).unwrap();
            assert!(current.abs() <= previous.abs());
            previous = current;
        }
        assert!(previous.abs() < 1e-3);
    }

    #[test]
    fn learn_rejects_unknown_state() {
        let mut a = agent(AgentConfig::default());
        assert_eq!(
            a.learn(9, Action::Stay, 1.0, 0).unwrap_err(),
            RlError::StateOutOfRange {
                state: 9,
                n_states: 9
            }
        );
    }

    #[test]
    fn decay_is_explicit() {
        let mut a = agent(AgentConfig::default());
        assert!((a.exploration_rate() - 0.8).abs() < 1e-12);
        a.decay_exploration();
        assert!((a.exploration_rate() - 0.72).abs() < 1e-12);
    }

    #[test]
    fn bindings_follow_train_order() {
        let env = scenario::standard().unwrap();
        let bindings = agents_for(&env, &AgentConfig::default(), 48);
        assert_eq!(bindings.len(), 3);
        for (i, b) in bindings.iter().enumerate() {
            assert_eq!(b.train, TrainId(i));
            assert_eq!(b.agent.q_table().n_states(), env.total_states());
        }
        assert!(check_bindings(&bindings, &env).is_ok());
    }

    #[test]
    fn check_bindings_rejects_count_mismatch() {
        let env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        bindings.pop();
        assert_eq!(
            check_bindings(&bindings, &env).unwrap_err(),
            RlError::AgentCountMismatch {
                agents: 2,
                trains: 3
            }
        );
    }

    #[test]
    fn check_bindings_rejects_wrong_table_size() {
        let env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        bindings[1].agent = QLearningAgent::new(5, &AgentConfig::default(), 1);
        assert_eq!(
            check_bindings(&bindings, &env).unwrap_err(),
            RlError::TableShapeMismatch {
                table_states: 5,
                track_states: 9
            }
        );
    }

    #[test]
    fn check_bindings_rejects_out_of_order_bindings() {
        let env = scenario::standard().unwrap();
        let mut bindings = agents_for(&env, &AgentConfig::default(), 48);
        bindings.swap(1, 2);
        assert_eq!(
            check_bindings(&bindings, &env).unwrap_err(),
            RlError::BindingOrder {
                expected: 1,
                found: 2
            }
        );
    }
}
