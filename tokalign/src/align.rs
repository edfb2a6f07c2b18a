use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use generic_a_star::observer::LogObserver;
use lib_tokalign::{
    U64Cost,
    token_aligner::{AlignmentConfig, align_with_config, align_with_observer, edge::Edge},
};
use log::{LevelFilter, info};

use crate::{init_logging, read_costs};

/// Align two whitespace-tokenised files.
///
/// Prints one line per edge with the source and target token index, separated by a tab.
/// A skipped token has `-` in place of its missing counterpart.
#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The file with the source tokens.
    source: PathBuf,

    /// The file with the target tokens.
    target: PathBuf,

    /// A toml file with the costs of the edit operations.
    #[clap(long, short = 'c')]
    costs: Option<PathBuf>,

    /// Give up once all remaining alignments cost more than this.
    #[clap(long)]
    cost_limit: Option<U64Cost>,

    /// The file to store the alignment and its statistics in toml format.
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,

    /// Log every step of the search at trace level.
    #[clap(long)]
    trace_search: bool,
}

pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let config = AlignmentConfig {
        costs: read_costs(cli.costs.as_deref())?,
        cost_limit: cli.cost_limit,
    };

    info!("Loading source file {:?}", cli.source);
    let source = fs::read_to_string(&cli.source)
        .with_context(|| format!("Unable to read source file {:?}", cli.source))?;
    info!("Loading target file {:?}", cli.target);
    let target = fs::read_to_string(&cli.target)
        .with_context(|| format!("Unable to read target file {:?}", cli.target))?;
    let source: Vec<_> = source.split_whitespace().collect();
    let target: Vec<_> = target.split_whitespace().collect();

    let result = if cli.trace_search {
        align_with_observer(&source, &target, &config, LogObserver)
    } else {
        align_with_config(&source, &target, &config)
    };
    info!("{result}");

    if let Some(output) = &cli.output {
        info!("Writing alignment to {output:?}");
        let mut output = BufWriter::new(
            File::create(output).with_context(|| format!("Unable to create {output:?}"))?,
        );
        write!(output, "{}", toml::to_string(&result)?)?;
        output.flush()?;
    }

    let edges = result
        .edges()
        .ok_or_else(|| anyhow!("No alignment found: {}", result.statistics().result))?;
    let mut stdout = std::io::stdout().lock();
    for edge in edges {
        writeln!(stdout, "{}", format_edge(edge))?;
    }

    Ok(())
}

fn format_edge(edge: &Edge) -> String {
    let format_index = |index: Option<usize>| {
        index
            .map(|index| index.to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "{}\t{}",
        format_index(edge.source_index()),
        format_index(edge.target_index())
    )
}
