//! The full train → evaluate → transfer-evaluate run on the built-in scenarios.

use log::info;

use crate::algorithms::rl::{
    agents_for, AgentBinding, EpisodeHistory, EvaluationMetrics, EvaluationMode, RlError,
    RunConfig, Trainer,
};
use crate::sinks::Visualizer;
use crate::track::scenario;

/// Everything produced by [`run`].
#[derive(Debug, Clone)]
pub struct ExperimentReport {
    /// Per-episode totals from training on the standard scenario.
    pub training: EpisodeHistory,
    /// Greedy evaluation on the standard scenario.
    pub standard: EvaluationMetrics,
    /// Greedy evaluation of the same tables on the delayed scenario.
    pub transfer: EvaluationMetrics,
    /// The trained agents, in train order.
    pub agents: Vec<AgentBinding>,
}

/// Trains on the standard timetable, evaluates there, then evaluates the same
/// tables on the timetable with train 0 held back.
pub fn run<V: Visualizer>(config: &RunConfig, visualizer: V) -> Result<ExperimentReport, RlError> {
    config.validate()?;

    let mut env = scenario::standard()?;
    let mut agents = agents_for(&env, &config.agent, config.seed);
    let training =
        Trainer::with_visualizer(config.training.clone(), visualizer).train(&mut env, &mut agents)?;

    let standard = EvaluationMetrics::evaluate(
        &mut env,
        &agents,
        &config.evaluation,
        EvaluationMode::SameScenario,
    )?;

    let mut delayed = scenario::delayed()?;
    let transfer = EvaluationMetrics::evaluate(
        &mut delayed,
        &agents,
        &config.evaluation,
        EvaluationMode::Transfer,
    )?;

    info!(
        "mean reward {:.2} +/- {:.2}, delayed {:.2} +/- {:.2}",
        standard.mean_reward, standard.std_reward, transfer.mean_reward, transfer.std_reward
    );

    Ok(ExperimentReport {
        training,
        standard,
        transfer,
        agents,
    })
}
