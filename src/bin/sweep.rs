use std::path::PathBuf;

use clap::Parser;

use sandwich_order_rs::catalog::load_or_builtin;
use sandwich_order_rs::logging::init_logging;
use sandwich_order_rs::models::SandwichKind;
use sandwich_order_rs::sweep::{SweepConfig, print_topk, run_sweep, write_best_json, write_csv};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Rank catalog product combinations by cost per sandwich")]
struct Args {
    /// Sandwich type: deli or pbj
    #[arg(long, default_value = "deli")]
    kind: SandwichKind,

    /// Sandwich counts to price every combination at (comma-separated)
    #[arg(long, default_value = "50,100,200,400")]
    targets: String,

    /// Most combinations to evaluate; larger spaces are sampled
    #[arg(long, default_value = "500")]
    iters: usize,

    /// Random seed for reproducible sampling
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Path to a catalog JSON file (built-in prices if missing)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output CSV file for all results
    #[arg(long, default_value = "sweep_results.csv")]
    csv: PathBuf,

    /// Output JSON file for the best result
    #[arg(long, default_value = "sweep_best.json")]
    json: PathBuf,

    /// Number of top results to display
    #[arg(long, default_value = "10")]
    topk: usize,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_targets(s: &str) -> Vec<u32> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .filter(|&t| t > 0)
        .collect()
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = match load_or_builtin(args.catalog.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            std::process::exit(1);
        }
    };
    println!("Loaded {} products", catalog.len());

    let targets = parse_targets(&args.targets);
    if targets.is_empty() {
        eprintln!("Error: no valid targets provided");
        std::process::exit(1);
    }
    println!("Pricing {} orders at: {:?}", args.kind.label(), targets);

    let config = SweepConfig {
        kind: args.kind,
        targets,
        iterations: args.iters,
        seed: args.seed,
        topk: args.topk,
    };

    let sweep = match run_sweep(&config, &catalog) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Evaluated {} of {} combinations ({})",
        sweep.results.len(),
        sweep.space,
        if sweep.exhaustive { "exhaustive" } else { "sampled" }
    );

    print_topk(&sweep.results, config.topk);

    let Some(best) = sweep.results.first() else {
        eprintln!("Error: no combination could be priced");
        std::process::exit(1);
    };

    if let Err(e) = write_csv(&sweep.results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all results to {:?}", args.csv);
    }

    if let Err(e) = write_best_json(best, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote best result to {:?}", args.json);
    }
}
