//! The per-episode control flow shared by training and evaluation.

use log::trace;

use super::agent::AgentBinding;
use super::error::RlError;
use crate::sinks::Visualizer;
use crate::track::{Action, Position, TrackEnvironment, TrackError, TrainId};

/// Per-episode totals, one entry per episode.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeHistory {
    /// Sum of all rewards received by all trains.
    pub rewards: Vec<f64>,
    /// Sum of all delays reported by all trains' steps.
    pub delays: Vec<i64>,
}

impl EpisodeHistory {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            rewards: Vec::with_capacity(n),
            delays: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, outcome: &EpisodeOutcome) {
        self.rewards.push(outcome.total_reward);
        self.delays.push(outcome.total_delay);
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

/// What happened in a single episode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeOutcome {
    pub total_reward: f64,
    pub total_delay: i64,
    /// Time steps executed.
    pub steps: u32,
    /// Whether the episode ended in a crash.
    pub crashed: bool,
    /// Trains that reached their goal.
    pub arrived: usize,
}

/// How agents pick actions and whether they learn during an episode.
pub(crate) trait EpisodePolicy {
    fn act(&mut self, agent: usize, state: Position) -> Result<Action, RlError>;

    fn observe(
        &mut self,
        agent: usize,
        state: Position,
        action: Action,
        reward: f64,
        next_state: Position,
    ) -> Result<(), RlError>;
}

/// ε-greedy selection with a value update after every move.
pub(crate) struct Learning<'a>(pub &'a mut [AgentBinding]);

impl EpisodePolicy for Learning<'_> {
    fn act(&mut self, agent: usize, state: Position) -> Result<Action, RlError> {
        self.0[agent].agent.choose_action(state)
    }

    fn observe(
        &mut self,
        agent: usize,
        state: Position,
        action: Action,
        reward: f64,
        next_state: Position,
    ) -> Result<(), RlError> {
        self.0[agent].agent.learn(state, action, reward, next_state)
    }
}

/// Greedy selection over frozen tables.
pub(crate) struct Greedy<'a>(pub &'a [AgentBinding]);

impl EpisodePolicy for Greedy<'_> {
    fn act(&mut self, agent: usize, state: Position) -> Result<Action, RlError> {
        self.0[agent].agent.choose_action_evaluation(state)
    }

    fn observe(
        &mut self,
        _agent: usize,
        _state: Position,
        _action: Action,
        _reward: f64,
        _next_state: Position,
    ) -> Result<(), RlError> {
        Ok(())
    }
}

/// Runs one episode from reset until every train has arrived, the step
/// budget runs out, or a crash occurs. The environment is reset afterwards.
///
/// Within a time step trains act in index order, so a later train sees the
/// moves of earlier trains. Trains wait at their start until their
/// departure time.
pub(crate) fn run_episode(
    env: &mut TrackEnvironment,
    policy: &mut dyn EpisodePolicy,
    max_steps: u32,
    visualizer: &mut dyn Visualizer,
) -> Result<EpisodeOutcome, RlError> {
    env.reset();
    let train_ids: Vec<TrainId> = env.train_ids().collect();
    let mut done = vec![false; train_ids.len()];
    let mut outcome = EpisodeOutcome::default();

    let mut step = 0;
    while !done.iter().all(|&d| d) && step < max_steps {
        for &train_id in &train_ids {
            let i = train_id.index();
            let train = env.train(train_id).ok_or(TrackError::UnknownTrain {
                id: i,
                n_trains: train_ids.len(),
            })?;
            if done[i] || !train.has_departed_by(step) {
                continue;
            }
            let state = train.position;
            let goal = train.goal;

            let action = policy.act(i, state)?;
            let result = env.step(train_id, action, step)?;
            let next_state = result.positions[i];
            trace!("step {} {} {} -> {}", step, train_id, action, next_state);

            policy.observe(i, state, action, result.reward, next_state)?;
            outcome.total_reward += result.reward;
            outcome.total_delay += result.delay;

            if next_state == goal {
                done[i] = true;
            }
            if result.crashed {
                outcome.crashed = true;
                break;
            }
        }
        visualizer.show_positions(&env.positions());
        step += 1;
        if outcome.crashed {
            break;
        }
    }

    outcome.steps = step;
    outcome.arrived = done.iter().filter(|&&d| d).count();
    env.reset();
    Ok(outcome)
}
