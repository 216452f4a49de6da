mod annotate;
mod config;
mod import;
mod init;
mod session;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "vargraph";
    pub const BIN_NAME: &str = "vargraph";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Import genotype calls and their transcript annotations into a deduplicated variant graph.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more (-v debug, -vv trace). RUST_LOG is used otherwise"),
        )
        .subcommand(init::cli::create_init_cli())
        .subcommand(import::cli::create_import_cli())
        .subcommand(annotate::cli::create_annotate_cli())
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).format_target(false).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        //
        // INIT
        //
        Some((init::cli::INIT_CMD, matches)) => {
            init::handlers::run_init(matches)?;
        }

        //
        // GENOTYPES
        //
        Some((import::cli::IMPORT_CMD, matches)) => {
            import::handlers::run_import_variants(matches)?;
        }

        //
        // ANNOTATIONS
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_import_annotations(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
