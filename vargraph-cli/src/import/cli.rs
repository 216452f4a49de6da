use clap::{Command, arg};

use crate::session::{config_arg, store_arg};

pub const IMPORT_CMD: &str = "import-variants";

pub fn create_import_cli() -> Command {
    Command::new(IMPORT_CMD)
        .about("Import the runs and genotype calls of a VCF file, creating each new variant once.")
        .arg(store_arg())
        .arg(arg!(--vcf <vcf> "Genotype call file (.vcf or .vcf.gz)").required(true))
        .arg(arg!(-o --out <out> "Where to list the variants created by this import"))
        .arg(config_arg())
}
