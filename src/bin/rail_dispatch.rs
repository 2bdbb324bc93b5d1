//! Train the three-train scenario, evaluate it, and evaluate the learned
//! tables on the delayed timetable.
//!
//! ```text
//! cargo run --release --bin rail_dispatch -- --episodes 10000 --metrics-dir out
//! RUST_LOG=debug cargo run --bin rail_dispatch -- --episodes 50 --visualize
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use rail_dispatch::algorithms::rl::RunConfig;
use rail_dispatch::experiment::{self, ExperimentReport};
use rail_dispatch::sinks::{
    ConsoleVisualizer, CsvMetricsSink, MetricsSink, NoopVisualizer, ValueTableReport,
};

#[derive(Parser, Debug)]
#[command(name = "rail_dispatch")]
#[command(about = "Train independent Q-learning agents to dispatch trains on a shared track")]
struct Cli {
    /// Number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Number of evaluation episodes per scenario
    #[arg(long)]
    eval_episodes: Option<usize>,

    /// Step budget per episode (training and evaluation)
    #[arg(long)]
    max_steps: Option<u32>,

    /// Base RNG seed; agent i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the track in the terminal during training
    #[arg(long)]
    visualize: bool,

    /// Pause between drawn frames, in milliseconds
    #[arg(long)]
    frame_delay_ms: Option<u64>,

    /// Write per-episode reward/delay CSV files into this directory
    #[arg(long)]
    metrics_dir: Option<PathBuf>,

    /// Multiply each agent's exploration rate by its decay factor after every episode
    #[arg(long)]
    decay_exploration: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::default();
        if let Some(episodes) = self.episodes {
            config.training.n_episodes = episodes;
        }
        if let Some(episodes) = self.eval_episodes {
            config.evaluation.n_episodes = episodes;
        }
        if let Some(max_steps) = self.max_steps {
            config.training.max_steps = max_steps;
            config.evaluation.max_steps = max_steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ms) = self.frame_delay_ms {
            config.frame_delay = Duration::from_millis(ms);
        }
        config.training.decay_exploration = self.decay_exploration;
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.run_config();
    config.validate().context("invalid run configuration")?;

    let outcome = if cli.visualize {
        experiment::run(&config, ConsoleVisualizer::stdout(config.frame_delay))
    } else {
        experiment::run(&config, NoopVisualizer)
    };
    let report = outcome.context("experiment failed")?;

    print_summary(&report);

    if let Some(dir) = &cli.metrics_dir {
        let mut sink = CsvMetricsSink::create(dir)
            .with_context(|| format!("creating metrics directory {}", dir.display()))?;
        write_metrics(&mut sink, &report).context("writing metrics")?;
        info!("metrics written to {}", sink.dir().display());
    }

    Ok(())
}

fn print_summary(report: &ExperimentReport) {
    println!(
        "Mean reward:           {:.2} +/- {:.2}",
        report.standard.mean_reward, report.standard.std_reward
    );
    println!(
        "Mean reward (delayed): {:.2} +/- {:.2}",
        report.transfer.mean_reward, report.transfer.std_reward
    );
    println!();
    println!("{}", report.standard);
    println!("{}", report.transfer);

    for binding in &report.agents {
        println!();
        println!(
            "{}",
            ValueTableReport::new(binding.train.index(), binding.agent.q_table())
        );
    }
}

fn write_metrics(
    sink: &mut dyn MetricsSink,
    report: &ExperimentReport,
) -> Result<(), rail_dispatch::sinks::SinkError> {
    sink.record("training", &report.training)?;
    sink.record("evaluation", &report.standard.history)?;
    sink.record("evaluation_delayed", &report.transfer.history)
}
