use clap::Command;

use crate::session::{config_arg, store_arg};

pub const INIT_CMD: &str = "init";

pub fn create_init_cli() -> Command {
    Command::new(INIT_CMD)
        .about("Create an empty graph store, or declare the configured constraints on an existing one.")
        .arg(store_arg())
        .arg(config_arg())
}
