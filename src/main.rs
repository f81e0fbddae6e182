use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use u_backhaul::config::{CoveragePolicy, RunConfig};
use u_backhaul::io::{read_instance_file, write_solution_file, SolutionSummary};
use u_backhaul::solver::{solve, DEFAULT_SEED};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Instance name; `<instances-dir>/<INSTANCE>.txt` is read
    instance: String,

    #[arg(long, default_value = "instances")]
    instances_dir: PathBuf,

    /// Where `<INSTANCE>.out` is written
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,

    /// TOML run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random stream (default: derived from the clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// What to do with customers that cannot be placed: fail, warn or exclude
    #[arg(long)]
    coverage: Option<CoveragePolicy>,

    /// Print a JSON run summary to stdout
    #[arg(long)]
    summary_json: bool,

    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    if let Err(err) = run(cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(coverage) = cli.coverage {
        config.coverage = coverage;
    }
    let seed = config.seed.unwrap_or_else(clock_seed);
    config.seed = Some(seed);

    let input = cli.instances_dir.join(format!("{}.txt", cli.instance));
    let instance = read_instance_file(&input)
        .with_context(|| format!("failed to load instance {}", input.display()))?;
    info!(
        instance = %cli.instance,
        customers = instance.num_customers(),
        vehicles = instance.num_vehicles(),
        capacity = instance.capacity(),
        seed,
        "solving"
    );

    let start = Instant::now();
    let report = solve(&instance, &config)?;
    let elapsed = start.elapsed();

    let solution = report.solution();
    let output = cli.output_dir.join(format!("{}.out", cli.instance));
    write_solution_file(&output, solution, &instance, elapsed)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        cost = solution.total_cost(),
        initial_cost = report.initial_cost(),
        served = solution.num_served(),
        unassigned = solution.num_unassigned(),
        seconds = elapsed.as_secs_f64(),
        output = %output.display(),
        "done"
    );

    if cli.summary_json {
        let summary = SolutionSummary::new(
            &cli.instance,
            solution,
            &instance,
            report.initial_cost(),
            report.seed,
            elapsed,
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(DEFAULT_SEED)
}
