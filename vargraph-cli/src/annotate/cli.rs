use clap::{Command, arg};

use crate::session::{config_arg, store_arg};

pub const ANNOTATE_CMD: &str = "import-annotations";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .about("Attach transcript annotations, population frequencies and conservation scores to imported variants.")
        .arg(store_arg())
        .arg(arg!(--vcf <vcf> "Annotated call file, e.g. the import listing run through VEP").required(true))
        .arg(config_arg())
}
