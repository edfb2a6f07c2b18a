use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lib_tokalign::{U64Cost, mmax::port_annotations, token_aligner::AlignmentConfig};
use log::LevelFilter;

use crate::{init_logging, read_costs};

/// Port the markables of an MMAX bundle to a retokenised copy of it.
///
/// The converted annotation levels are written into the `markables` directory of the target bundle.
/// Markables that touch a token without counterpart in the target are dropped.
#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The bundle with the annotations.
    source_bundle: PathBuf,

    /// The retokenised bundle that receives the annotations.
    target_bundle: PathBuf,

    /// A toml file with the costs of the edit operations.
    #[clap(long, short = 'c')]
    costs: Option<PathBuf>,

    /// Give up on a document once all remaining alignments cost more than this.
    #[clap(long)]
    cost_limit: Option<U64Cost>,
}

pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let config = AlignmentConfig {
        costs: read_costs(cli.costs.as_deref())?,
        cost_limit: cli.cost_limit,
    };

    port_annotations(&cli.source_bundle, &cli.target_bundle, &config).with_context(|| {
        format!(
            "Unable to port annotations from {:?} to {:?}",
            cli.source_bundle, cli.target_bundle
        )
    })?;

    Ok(())
}
