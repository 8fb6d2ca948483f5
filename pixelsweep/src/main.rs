//! Sweep the `pixelsort` tool over its interval and sorting algorithms.
//!
//! Writes one image per combination under
//! `output_images/<image>_<YYYYMMDD>/<interval>/`.

use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Local;
use clap::Parser;
use tracing::warn;

use pixelsweep::exit_codes;
use pixelsweep::io::config::resolve_config;
use pixelsweep::io::process::SubprocessRunner;
use pixelsweep::logging;
use pixelsweep::sampler::RandSampler;
use pixelsweep::sweep::{SweepOptions, run_sweep};

#[derive(Parser, Debug)]
#[command(
    name = "pixelsweep",
    version,
    about = "Run pixelsort across a sweep of interval and sorting algorithms"
)]
struct Cli {
    /// Image file to process.
    input: PathBuf,

    /// TOML config file (defaults to `pixelsweep.toml` in the working directory, if present).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for parameter draws; the same seed reproduces the same file names.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() {
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not errors.
            let code = if err.use_stderr() {
                exit_codes::FAILURE
            } else {
                exit_codes::OK
            };
            if let Err(print_err) = err.print() {
                warn!(err = %print_err, "failed to print usage");
            }
            std::process::exit(code);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILURE);
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.input.is_file() {
        bail!("Error: File '{}' not found.", cli.input.display());
    }

    let cwd = std::env::current_dir()?;
    let config = resolve_config(cli.config.as_deref(), &cwd)?;

    let mut sampler = match cli.seed {
        Some(seed) => RandSampler::seeded(seed),
        None => RandSampler::from_entropy(),
    };
    let runner = SubprocessRunner::new(config.timeout());
    let options = SweepOptions {
        input: &cli.input,
        date: Local::now().date_naive(),
        config: &config,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_sweep(&options, &mut sampler, &runner, &mut out)?;
    Ok(())
}
