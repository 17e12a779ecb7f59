use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::Level;

use lattice_walk_core_rs::models::InclusiveRange;
use lattice_walk_core_rs::orchestrator::{
    run_matrix, run_simulation, AggregationConfig, Aggregator, RunManifest, SimulationConfig,
};
use lattice_walk_core_rs::rng::{GeneratorKind, LcgGenerator};
use lattice_walk_core_rs::validation::{run_dice_batch, summarize_range, DiceTestConfig};
use lattice_walk_core_rs::{GridBounds, WalkKind};

mod export;
mod report;

#[derive(Parser)]
#[command(name = "lattice-walk")]
#[command(about = "Random walks on a bounded lattice driven by linear congruential generators", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single walk and print its summary
    Walk(WalkArgs),

    /// Mean squared displacement per step count, written as CSV
    Aggregate(AggregateArgs),

    /// Two-dice chi-squared test over a range of seeds
    Dice(DiceArgs),

    /// Min / max / mean of draws over [a, b)
    Range(RangeArgs),
}

#[derive(Args)]
struct GridArgs {
    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,
}

impl GridArgs {
    fn apply(&self, grid: GridBounds) -> Result<GridBounds> {
        let width = self.width.unwrap_or(grid.width);
        let height = self.height.unwrap_or(grid.height);
        Ok(GridBounds::new(width, height)?)
    }
}

#[derive(Args)]
struct BudgetArgs {
    /// Self-avoiding restart budget
    #[arg(long)]
    max_restarts: Option<usize>,

    /// Consecutive rejected candidates before a random or nonreversing walk gives up
    #[arg(long)]
    max_step_retries: Option<usize>,
}

#[derive(Args)]
struct WalkArgs {
    /// JSON file holding a serialized SimulationConfig
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generator: borland | numerical-recipes
    #[arg(long)]
    generator: Option<GeneratorKind>,

    #[arg(long)]
    seed: Option<u64>,

    /// Walk: random | nonreversing | self-avoiding
    #[arg(long)]
    walk: Option<WalkKind>,

    #[arg(long)]
    steps: Option<usize>,

    #[command(flatten)]
    grid: GridArgs,

    #[command(flatten)]
    budget: BudgetArgs,

    /// Print every position of the trajectory
    #[arg(long)]
    trajectory: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AggregateArgs {
    /// JSON file holding a serialized AggregationConfig
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    generator: Option<GeneratorKind>,

    #[arg(long)]
    walk: Option<WalkKind>,

    /// Sweep every generator × walk combination
    #[arg(long)]
    all: bool,

    #[arg(long)]
    first_seed: Option<u64>,

    #[arg(long)]
    last_seed: Option<u64>,

    #[arg(long)]
    first_step: Option<u64>,

    #[arg(long)]
    last_step: Option<u64>,

    #[command(flatten)]
    grid: GridArgs,

    #[command(flatten)]
    budget: BudgetArgs,

    /// Directory receiving `<generator>_<walk>.csv`
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write `<generator>_<walk>.manifest.json`
    #[arg(long)]
    manifest: bool,
}

#[derive(Args)]
struct DiceArgs {
    /// JSON file holding a serialized DiceTestConfig
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    generator: Option<GeneratorKind>,

    #[arg(long)]
    first_seed: Option<u64>,

    #[arg(long)]
    last_seed: Option<u64>,

    /// Dice throws per seed
    #[arg(long)]
    iterations: Option<u64>,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RangeArgs {
    #[arg(long, default_value = "borland")]
    generator: GeneratorKind,

    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Lower bound (inclusive)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    a: f64,

    /// Upper bound (exclusive)
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    b: f64,

    #[arg(long, default_value_t = 100_000)]
    iterations: u64,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
        }
        None => Ok(T::default()),
    }
}

fn range_override(range: InclusiveRange, first: Option<u64>, last: Option<u64>) -> InclusiveRange {
    InclusiveRange::new(first.unwrap_or(range.first), last.unwrap_or(range.last))
}

fn run_walk_command(args: WalkArgs) -> Result<()> {
    let mut config: SimulationConfig = load_config(args.config.as_deref())?;
    if let Some(generator) = args.generator {
        config.generator = generator;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(kind) = args.walk {
        config.walk.kind = kind;
    }
    if let Some(steps) = args.steps {
        config.walk.steps = steps;
    }
    if let Some(max_restarts) = args.budget.max_restarts {
        config.walk.max_restarts = max_restarts;
    }
    if let Some(max_step_retries) = args.budget.max_step_retries {
        config.walk.max_step_retries = max_step_retries;
    }
    config.walk.grid = args.grid.apply(config.walk.grid)?;

    let outcome = run_simulation(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", report::walk_summary(&outcome, args.trajectory));
    }
    Ok(())
}

fn run_aggregate_command(args: AggregateArgs) -> Result<()> {
    let mut config: AggregationConfig = load_config(args.config.as_deref())?;
    if let Some(generator) = args.generator {
        config.generator = generator;
    }
    if let Some(kind) = args.walk {
        config.walk_kind = kind;
    }
    config.seeds = range_override(config.seeds, args.first_seed, args.last_seed);
    config.steps = range_override(config.steps, args.first_step, args.last_step);
    config.grid = args.grid.apply(config.grid)?;
    if let Some(max_restarts) = args.budget.max_restarts {
        config.max_restarts = max_restarts;
    }
    if let Some(max_step_retries) = args.budget.max_step_retries {
        config.max_step_retries = max_step_retries;
    }

    if args.all && (args.generator.is_some() || args.walk.is_some()) {
        bail!("--all sweeps every generator and walk; drop --generator/--walk");
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let reports = if args.all {
        run_matrix(&config)?
    } else {
        vec![Aggregator::new(config.clone())?.run()?]
    };

    for report in &reports {
        let path = export::write_aggregate_csv(&args.out_dir, report)?;
        println!("{} -> {}", report.walk_kind.label(), path.display());

        if args.manifest {
            let run_config = AggregationConfig {
                generator: report.generator,
                walk_kind: report.walk_kind,
                ..config.clone()
            };
            let manifest = RunManifest::new(&run_config, report);
            let path = export::write_manifest(&args.out_dir, &manifest)?;
            println!("manifest -> {}", path.display());
        }
    }
    Ok(())
}

fn run_dice_command(args: DiceArgs) -> Result<()> {
    let mut config: DiceTestConfig = load_config(args.config.as_deref())?;
    if let Some(generator) = args.generator {
        config.generator = generator;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    config.seeds = range_override(config.seeds, args.first_seed, args.last_seed);

    let batch = run_dice_batch(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        for validation in &batch.reports {
            print!("{}", report::dice_report(validation));
        }
        print!("{}", report::dice_batch_footer(&batch));
    }
    Ok(())
}

fn run_range_command(args: RangeArgs) -> Result<()> {
    let mut rng = LcgGenerator::from_kind(args.generator, args.seed)?;
    let summary = summarize_range(&mut rng, args.a, args.b, args.iterations)?;
    print!("{}", report::range_report(&summary));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Walk(args) => run_walk_command(args),
        Commands::Aggregate(args) => run_aggregate_command(args),
        Commands::Dice(args) => run_dice_command(args),
        Commands::Range(args) => run_range_command(args),
    }
}
