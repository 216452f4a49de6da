//! Plumbing shared by the subcommands.

use std::path::Path;

use anyhow::Result;
use clap::{ArgMatches, arg};
use indicatif::{ProgressBar, ProgressStyle};

use vargraph_store::MemoryGraph;

use crate::config::VargraphConfig;

pub fn store_arg() -> clap::Arg {
    arg!(-s --store <store> "Graph store snapshot (.json or .json.gz); overrides the config file")
}

pub fn config_arg() -> clap::Arg {
    arg!(-c --config <config> "TOML config file")
}

pub fn load_config(matches: &ArgMatches) -> Result<VargraphConfig> {
    let path = matches.get_one::<String>("config").map(Path::new);
    Ok(VargraphConfig::load(path)?)
}

/// Open the store at `path`, or start a new one, with the configured schema declared.
pub fn open_store(config: &VargraphConfig, path: &Path) -> Result<MemoryGraph> {
    let mut graph = MemoryGraph::open_or_create(path)?;
    config.apply_schema(&mut graph)?;
    Ok(graph)
}

pub fn record_spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}] {spinner} {pos} records {msg}",
    )?);
    Ok(pb)
}
