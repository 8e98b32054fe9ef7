//! Command-line runner: solves every instance in a file or directory and
//! prints one CSV row per accepted solution.

use clap::{Parser, ValueEnum};
use log::{info, warn};
use pmedian::config::Config;
use pmedian::grasp::Grasp;
use pmedian::gvns::Gvns;
use pmedian::kmeans::KMeans;
use pmedian::local_search::DescentStrategy;
use pmedian::problem::Problem;
use pmedian::utils::{default_facility_count, format_duration, write_csv_header, write_trace};
use pmedian::{make_rng, Error};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Grasp,
    Gvns,
    Kmeans,
}

#[derive(Debug, Parser)]
#[command(name = "pmedian", about = "Heuristic solvers for the p-median problem")]
struct Cli {
    /// Instance file, or directory of instance files
    path: PathBuf,

    #[arg(short, long, value_enum, default_value = "gvns")]
    algorithm: Algorithm,

    /// Number of facilities (defaults to max(2, n / 10))
    #[arg(short)]
    k: Option<usize>,

    /// Restricted candidate list size for GRASP
    #[arg(long, default_value_t = 3)]
    rcl_size: usize,

    /// Randomize the neighborhood order of the local search
    #[arg(long)]
    rvnd: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with solver parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write results here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.rvnd {
        config = config.with_descent(DescentStrategy::Randomized);
    }

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    write_csv_header(&mut out)?;
    let mut rng = make_rng(config.seed);

    for path in instance_paths(&cli.path)? {
        let problem = match Problem::from_file(&path) {
            Ok(problem) => problem,
            Err(err) => {
                warn!("skipping {}: {}", path.display(), err);
                continue;
            }
        };
        let k = cli.k.unwrap_or_else(|| default_facility_count(problem.size()));

        let start = Instant::now();
        let result = match cli.algorithm {
            Algorithm::Grasp => Grasp::new(config.clone()).solve(&problem, k, cli.rcl_size, &mut rng),
            Algorithm::Gvns => Gvns::new(config.clone()).solve(&problem, k, &mut rng),
            Algorithm::Kmeans => KMeans::new(config.clone()).solve(&problem, k, &mut rng),
        };
        let trace = match result {
            Ok(trace) => trace,
            Err(err) => {
                warn!("skipping {}: {}", problem.name, err);
                continue;
            }
        };
        let elapsed = start.elapsed();

        info!(
            "{}: {:?} finished in {} with {} solutions",
            problem.name,
            cli.algorithm,
            format_duration(elapsed),
            trace.len()
        );
        write_trace(&mut out, &problem, &trace, elapsed)?;
    }

    out.flush()?;
    Ok(())
}

/// A single file, or the sorted files of a directory.
fn instance_paths(path: &Path) -> Result<Vec<PathBuf>, Error> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut paths = fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.retain(|p| p.is_file());
    paths.sort();
    Ok(paths)
}
