use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rsteiner::api::{
    draw_terminals, solve, Metric, Point, ReplayToken, SolverCfg, Strategy, TerminalCfg,
    TerminalCount,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use io::{read_terminals, write_json, write_terminals_csv, SolveRecord};
use provenance::{write_sidecar, Run};

#[derive(Parser)]
#[command(name = "rsteiner")]
#[command(about = "Rectilinear Steiner-tree runner", version = rsteiner::VERSION)]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run one strategy on a terminal file and write the tree as JSON
    Solve {
        /// greedy | exhaustive | reinforcement
        #[arg(long, default_value = "greedy")]
        algo: Strategy,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        knobs: Knobs,
    },
    /// Run every strategy on the same terminals and write one record each
    Compare {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Skip the exhaustive search (exponential in the grid size)
        #[arg(long)]
        skip_exhaustive: bool,
        #[command(flatten)]
        knobs: Knobs,
    },
    /// Draw a reproducible random terminal set (CSV or JSON by extension)
    Random {
        #[arg(long, default_value_t = 5)]
        count: usize,
        /// Coordinates are drawn from [0, side] on both axes
        #[arg(long, default_value_t = 10.0)]
        side: f64,
        /// Draw real-valued coordinates instead of lattice points
        #[arg(long)]
        continuous: bool,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a provenance JSON block
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Manhattan,
    Euclidean,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Manhattan => Metric::Manhattan,
            MetricArg::Euclidean => Metric::Euclidean,
        }
    }
}

/// Solver knobs shared by `solve` and `compare`; unset flags keep the defaults.
#[derive(Args)]
struct Knobs {
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Pair weighting for the greedy strategy
    #[arg(long, value_enum, default_value = "manhattan")]
    metric: MetricArg,
    #[arg(long)]
    max_edges_per_terminal: Option<usize>,
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long)]
    min_edges: Option<usize>,
    #[arg(long)]
    max_edges: Option<usize>,
    #[arg(long)]
    max_attempts: Option<usize>,
}

impl Knobs {
    fn solver_cfg(&self) -> SolverCfg {
        let mut cfg = SolverCfg::default();
        cfg.greedy.metric = self.metric.into();
        if let Some(v) = self.max_edges_per_terminal {
            cfg.exhaustive.max_edges_per_terminal = v;
        }
        if let Some(v) = self.generations {
            cfg.reinforce.generations = v;
        }
        if let Some(v) = self.trials {
            cfg.reinforce.trials_per_generation = v;
        }
        if let Some(v) = self.max_attempts {
            cfg.reinforce.max_attempts = v;
        }
        cfg.reinforce.min_edges = self.min_edges.or(cfg.reinforce.min_edges);
        cfg.reinforce.max_edges = self.max_edges.or(cfg.reinforce.max_edges);
        cfg
    }

    fn params(&self) -> serde_json::Value {
        let cfg = self.solver_cfg();
        json!({
            "seed": self.seed,
            "metric": format!("{:?}", cfg.greedy.metric),
            "max_edges_per_terminal": cfg.exhaustive.max_edges_per_terminal,
            "generations": cfg.reinforce.generations,
            "trials_per_generation": cfg.reinforce.trials_per_generation,
            "min_edges": cfg.reinforce.min_edges,
            "max_edges": cfg.reinforce.max_edges,
            "max_attempts": cfg.reinforce.max_attempts,
        })
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve {
            algo,
            input,
            out,
            knobs,
        } => solve_cmd(algo, &input, &out, &knobs),
        Action::Compare {
            input,
            out,
            skip_exhaustive,
            knobs,
        } => compare(&input, &out, skip_exhaustive, &knobs),
        Action::Random {
            count,
            side,
            continuous,
            seed,
            index,
            out,
        } => random(count, side, !continuous, ReplayToken { seed, index }, &out),
        Action::Report => report(),
    }
}

fn run_one(strategy: Strategy, terminals: &[Point], knobs: &Knobs) -> Result<SolveRecord> {
    let cfg = knobs.solver_cfg();
    let mut rng = ReplayToken {
        seed: knobs.seed,
        index: 0,
    }
    .to_std_rng();
    let start = Instant::now();
    let tree = solve(strategy, terminals, &cfg, &mut rng)
        .with_context(|| format!("{strategy} failed"))?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    match &tree {
        Some(t) => tracing::info!(
            %strategy,
            cost = t.cost(),
            edges = t.len(),
            elapsed_ms,
            "solved"
        ),
        None => tracing::info!(%strategy, elapsed_ms, "no tree"),
    }
    Ok(SolveRecord::new(strategy, terminals.len(), tree.as_ref(), elapsed_ms))
}

fn solve_cmd(algo: Strategy, input: &Path, out: &Path, knobs: &Knobs) -> Result<()> {
    tracing::info!(%algo, input = %input.display(), out = %out.display(), "solve");
    let terminals = read_terminals(input)?;
    let record = run_one(algo, &terminals, knobs)?;
    write_json(out, &record)?;
    let mut params = knobs.params();
    params["algo"] = json!(algo.as_str());
    params["input"] = json!(input.to_string_lossy());
    write_sidecar(out, &Run::new("solve", params))?;
    Ok(())
}

fn compare(input: &Path, out: &Path, skip_exhaustive: bool, knobs: &Knobs) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), skip_exhaustive, "compare");
    let terminals = read_terminals(input)?;
    let mut records = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        if skip_exhaustive && strategy == Strategy::Exhaustive {
            continue;
        }
        records.push(run_one(strategy, &terminals, knobs)?);
    }
    write_json(out, &records)?;
    let mut params = knobs.params();
    params["input"] = json!(input.to_string_lossy());
    params["skip_exhaustive"] = json!(skip_exhaustive);
    write_sidecar(out, &Run::new("compare", params))?;
    Ok(())
}

fn random(count: usize, side: f64, lattice: bool, tok: ReplayToken, out: &Path) -> Result<()> {
    tracing::info!(count, side, lattice, seed = tok.seed, index = tok.index, "random");
    let cfg = TerminalCfg {
        count: TerminalCount::Fixed(count),
        x_range: (0.0, side),
        y_range: (0.0, side),
        lattice,
    };
    let terminals = draw_terminals(cfg, tok);
    if out.extension().is_some_and(|e| e == "json") {
        let pairs: Vec<(f64, f64)> = terminals.iter().map(|p| (p.x(), p.y())).collect();
        write_json(out, &json!({ "terminals": pairs }))?;
    } else {
        write_terminals_csv(out, &terminals)?;
    }
    let params = json!({
        "count": count,
        "side": side,
        "lattice": lattice,
        "seed": tok.seed,
        "index": tok.index,
    });
    write_sidecar(out, &Run::new("random", params))?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = Run::new("report", json!({})).document(&[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
