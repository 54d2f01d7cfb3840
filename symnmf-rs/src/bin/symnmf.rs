//! SymNMF CLI
//!
//! Computes one analysis goal for a file of comma-separated points and prints
//! the resulting matrix, one `%.4f`-formatted row per line.
//!
//! # Goals
//!
//! - `sym`: similarity matrix
//! - `ddg`: diagonal degree matrix
//! - `norm`: normalized similarity matrix
//! - `symnmf`: cluster membership factor H (requires `-k`)
//!
//! Any failure prints `An Error Has Occurred` and exits with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use symnmf_rs::{
    read_data, run_goal, write_matrix, ClusterParams, Goal, Matrix, NmfConfig, Result,
    DEFAULT_SEED, ERROR_MESSAGE,
};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

/// SymNMF - symmetric non-negative matrix factorization clustering
#[derive(Parser)]
#[command(name = "symnmf")]
#[command(version)]
#[command(about = "Compute SymNMF similarity matrices or cluster memberships")]
struct Cli {
    /// Goal to compute: symnmf, sym, ddg or norm
    goal: Goal,

    /// Input file of comma-separated points, one per line
    file: PathBuf,

    /// Number of clusters (symnmf goal only)
    #[arg(short, long)]
    k: Option<usize>,

    /// Seed for the initial factor
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Iteration cap for the factorization
    #[arg(long, default_value_t = NmfConfig::default().max_iter)]
    max_iter: usize,

    /// Convergence threshold on the squared Frobenius norm of each step
    #[arg(long, default_value_t = NmfConfig::default().eps)]
    eps: f64,

    /// Damping factor of the multiplicative update
    #[arg(long, default_value_t = NmfConfig::default().beta)]
    beta: f64,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn cluster_params(&self) -> Option<ClusterParams> {
        self.k.map(|k| ClusterParams {
            k,
            seed: self.seed,
            config: NmfConfig {
                max_iter: self.max_iter,
                eps: self.eps,
                beta: self.beta,
            },
        })
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<Matrix> {
    let x = read_data(&cli.file)?;
    run_goal(cli.goal, &x, cli.cluster_params().as_ref())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{}", ERROR_MESSAGE);
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.verbose);

    let result = run(&cli).and_then(|m| {
        let stdout = std::io::stdout();
        write_matrix(&mut stdout.lock(), &m)?;
        Ok(())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, goal = %cli.goal, file = %cli.file.display(), "run failed");
            println!("{}", ERROR_MESSAGE);
            ExitCode::FAILURE
        }
    }
}
