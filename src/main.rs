use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use datacompat::error::{DataCompatError, Result};
use datacompat::processor::Processor;
use datacompat::settings::Settings;

/// datacompat - generate immutable entities and builders from `#[data_compat]` declarations
#[derive(Parser)]
#[command(name = "datacompat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source files holding the declarations
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Settings file (default: datacompat.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory, overrides the configured one
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print generated code instead of writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "datacompat failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(out) = cli.out {
        settings.output_dir = out;
    }
    let processor = Processor::new(settings);

    let mut rejected = 0;
    let mut failed = 0;
    for input in &cli.inputs {
        // a broken input is reported and the remaining ones still run
        if let Err(e) = process_input(&processor, input, cli.dry_run, &mut rejected) {
            error!(input = %input.display(), error = %e, "input failed");
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(DataCompatError::Failed { count: failed });
    }
    if rejected > 0 {
        return Err(DataCompatError::Rejected { count: rejected });
    }
    Ok(())
}

fn process_input(processor: &Processor, input: &Path, dry_run: bool, rejected: &mut usize) -> Result<()> {
    let outcome = processor.process_file(input)?;
    for rejection in &outcome.rejected {
        warn!(input = %input.display(), declaration = %rejection.target, "{}", rejection.violation);
    }
    *rejected += outcome.rejected.len();
    if dry_run {
        for file in &outcome.generated {
            println!("// ---- {} ----\n{}", file.file_name, file.contents);
        }
    } else {
        let written = outcome.write_to(&processor.settings().output_dir)?;
        info!(input = %input.display(), files = written.len(), "generated");
    }
    Ok(())
}
