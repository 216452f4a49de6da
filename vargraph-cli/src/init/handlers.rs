use anyhow::Result;
use clap::ArgMatches;
use log::info;

use crate::session::{load_config, open_store};

pub fn run_init(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let store_path = config.store_path(matches.get_one::<String>("store"))?;

    let graph = open_store(&config, &store_path)?;
    graph.save(&store_path)?;

    info!("{}", graph);

    Ok(())
}
