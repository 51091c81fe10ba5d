use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ls8_cpu::machine::{Ls8Config, Ls8Machine};
use tracing_flame::FlameLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// Runs an LS-8 program until it halts. PRN output goes to stdout, logs to
/// stderr.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Program file with one binary byte literal per line. Runs a built-in
    /// program that prints 8 when omitted.
    program: Option<PathBuf>,

    /// Log machine state before every instruction.
    #[arg(long)]
    trace: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write folded span timings to PATH for flamegraph tooling.
    #[arg(long, value_name = "PATH")]
    flame: Option<PathBuf>,
}

fn level_filter(args: &Args) -> LevelFilter {
    if args.trace {
        return LevelFilter::TRACE;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let stderr_format = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(level_filter(&args));
    let (flame_layer, _flame_guard) = match &args.flame {
        Some(path) => {
            let (layer, guard) = FlameLayer::with_file(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_format)
        .with(flame_layer)
        .init();

    let config = Ls8Config { trace: args.trace };
    let mut machine = Ls8Machine::new(config, io::stdout().lock());
    match &args.program {
        Some(path) => machine.load_file(path)?,
        None => machine.load_default()?,
    }

    let summary = machine.run()?;
    tracing::debug!("run summary: {:?}", summary);
    Ok(())
}
