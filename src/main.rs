use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use size_order_allocator::reporting::{display_integrity, display_report};
use size_order_allocator::{plan, resolve_scenario, run_integrity_simulation, Overrides};

#[derive(Debug, Parser)]
#[command(name = "size-order-allocator")]
#[command(about = "Distribute an order across variants and sizes using stock and sales history")]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Allocate the order and print the size tables
    Allocate(AllocateArgs),
    /// Run randomized integrity checks against the allocator
    Verify(VerifyArgs),
}

#[derive(Debug, Args, Clone, Default)]
struct ScenarioArgs {
    /// JSON scenario file; the built-in garment scenario is used when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Override the total order quantity
    #[arg(long)]
    total: Option<f64>,
    /// Override the primary variant's share of the order (0..1)
    #[arg(long)]
    share: Option<f64>,
    /// Ignore the secondary variant and order a single product
    #[arg(long)]
    single: bool,
}

impl ScenarioArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            total_order: self.total,
            primary_share: self.share,
            single: self.single,
        }
    }
}

#[derive(Debug, Args, Clone, Default)]
struct AllocateArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
}

#[derive(Debug, Args, Clone)]
struct VerifyArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
    /// Number of randomized runs
    #[arg(long, default_value_t = 500)]
    runs: usize,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Relative standard deviation applied to each size's sales
    #[arg(long, default_value_t = 0.25)]
    noise: f64,
}

fn init_logging(verbose: bool) {
    let fallback_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_allocate(args: &AllocateArgs) -> Result<()> {
    let scenario = resolve_scenario(args.scenario.scenario.as_deref(), &args.scenario.overrides())
        .context("could not prepare scenario")?;
    let report = plan(&scenario);
    info!(
        total = report.total_order,
        allocated = report.total_allocated(),
        "order allocated"
    );
    display_report(&report);
    Ok(())
}

fn run_verify(args: &VerifyArgs) -> Result<()> {
    let scenario = resolve_scenario(args.scenario.scenario.as_deref(), &args.scenario.overrides())
        .context("could not prepare scenario")?;
    info!(runs = args.runs, noise = args.noise, seed = ?args.seed, "starting integrity runs");
    let stats = run_integrity_simulation(&scenario, args.runs, args.noise, args.seed)
        .context("integrity simulation failed")?;
    display_integrity(&stats);
    if stats.failed > 0 {
        anyhow::bail!("{} of {} runs did not allocate their full total", stats.failed, stats.runs);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Allocate(args)) => run_allocate(&args),
        Some(Command::Verify(args)) => run_verify(&args),
        None => run_allocate(&AllocateArgs::default()),
    }
}
