use std::{fs, path::Path};

use anyhow::Result;
use clap::Parser;
use tokalign::{align, port};

/// Runs a command line like `align SOURCE TARGET`, with `{dir}` replaced by `directory`.
pub fn run_in_directory(directory: &Path, args: &str) -> Result<()> {
    let args: Vec<_> = args
        .split_whitespace()
        .map(|arg| arg.replace("{dir}", &directory.to_string_lossy()))
        .collect();

    match args.first().map(String::as_str) {
        Some("align") => align::cli(align::Cli::try_parse_from(&args)?),
        Some("port") => port::cli(port::Cli::try_parse_from(&args)?),
        _ => panic!("unknown subcommand in {args:?}"),
    }
}

pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Writes a document with the given tokens into an MMAX bundle.
pub fn write_document(
    bundle: &Path,
    document: &str,
    id_prefix: &str,
    tokens: &[&str],
) -> Result<()> {
    let mut words = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<words>\n");
    for (index, token) in tokens.iter().enumerate() {
        words.push_str(&format!(
            "<word id=\"{id_prefix}_{}\">{token}</word>\n",
            index + 1
        ));
    }
    words.push_str("</words>\n");

    write_file(&bundle.join(format!("{document}.mmax")), "<mmax_project/>\n")?;
    write_file(
        &bundle.join("Basedata").join(format!("{document}_words.xml")),
        &words,
    )
}
