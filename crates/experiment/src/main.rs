//! Button Network Sweep
//!
//! Runs the button network model over a parameter sample and writes the
//! recorded series, reporters and aggregates.
//!
//! Examples:
//!   cargo run -p experiment --bin button_sweep
//!   cargo run -p experiment --bin button_sweep -- --config sweep.toml --iterations 10

use clap::Parser;
use experiment::{
    default_config_toml, format_sample_series, format_summary_table, Experiment, ExperimentConfig,
};
use sim_core::ButtonModel;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the sweep
#[derive(Parser, Debug)]
#[command(name = "button_sweep")]
#[command(about = "Parameter sweeps over the button network model")]
struct Args {
    /// Experiment configuration (TOML); defaults to the classic sweep
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of iterations per parameter set
    #[arg(long)]
    iterations: Option<usize>,

    /// Override the experiment seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run everything on the current thread
    #[arg(long)]
    sequential: bool,

    /// Directory for result files
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Do not write result files
    #[arg(long)]
    no_save: bool,

    /// Print the mean series of every parameter set
    #[arg(long)]
    show_series: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_file(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(iterations) = args.iterations {
        config.experiment.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.experiment.seed = seed;
    }
    if args.sequential {
        config.experiment.parallel = false;
    }

    let experiment = Experiment::<ButtonModel>::from_config(&config, config.button_options())?;

    println!("Button Network Sweep");
    println!("====================");
    println!("Parameter sets: {}", experiment.sample().len());
    println!("Iterations: {}", experiment.iterations());
    println!("Runs: {}", experiment.run_count());
    println!("Seed: {}", config.experiment.seed);
    println!("Sampling: {:?}", config.model.sampling);
    println!();

    let results = experiment.run()?;

    print!("{}", format_summary_table(&results));
    if args.show_series {
        for sample_id in 0..results.sample.len() {
            println!();
            print!("{}", format_sample_series(&results, sample_id));
        }
    }
    println!();
    println!(
        "Completed {} runs in {} ms.",
        results.info.total_runs, results.info.elapsed_ms
    );

    if !args.no_save {
        results.save(&args.output_dir)?;
        println!("Wrote results to {}", args.output_dir.display());
    }

    Ok(())
}
