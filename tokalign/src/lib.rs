use std::{ffi::OsString, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use lib_tokalign::token_aligner::cost_table::CostTable;
use log::{LevelFilter, debug, info};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

pub mod align;
pub mod port;

#[derive(Parser)]
#[command(version, about)]
enum Cli {
    Align(align::Cli),
    Port(port::Cli),
}

/// Runs the command line `args`, where the first argument is the program name.
///
/// Returns the exit code of the process: 0 on success or after printing help,
/// 1 on usage errors and on errors while running the command.
pub fn run<Arg: Into<OsString> + Clone>(args: impl IntoIterator<Item = Arg>) -> u8 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            if let Err(print_error) = error.print() {
                eprintln!("Unable to print usage: {print_error}");
            }
            return if error.use_stderr() { 1 } else { 0 };
        }
    };

    let result = match cli {
        Cli::Align(cli) => align::cli(cli),
        Cli::Port(cli) => port::cli(cli),
    };

    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Error: {error:?}");
            1
        }
    }
}

/// Initialises terminal logging, unless a logger is already set.
fn init_logging(log_level: LevelFilter) {
    if TermLogger::init(
        log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        debug!("Logger was already initialised");
    }
}

fn read_costs(path: Option<&Path>) -> Result<CostTable> {
    let Some(path) = path else {
        return Ok(CostTable::default());
    };

    info!("Loading cost table {path:?}");
    let file = File::open(path).with_context(|| format!("Unable to open cost table {path:?}"))?;
    CostTable::read_toml(BufReader::new(file))
        .with_context(|| format!("Unable to read cost table {path:?}"))
}
