use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ArgMatches;
use log::info;

use vargraph_import::VariantImporter;
use vargraph_vcf::{VcfReader, write_variants_to_path};

use crate::session::{load_config, open_store, record_spinner};

pub fn run_import_variants(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let store_path = config.store_path(matches.get_one::<String>("store"))?;

    let vcf = matches
        .get_one::<String>("vcf")
        .expect("A path to a call file is required.");
    let out = matches
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.imported_variants.clone());

    let mut graph = open_store(&config, &store_path)?;
    let reader = VcfReader::from_path(Path::new(vcf))?;

    let pb = record_spinner()?;
    let mut importer = VariantImporter::new(&mut graph);
    let runs = importer.add_run_info(reader.header())?;
    info!("Registered {} runs", runs);

    importer.import_records(reader.inspect(|_| pb.inc(1)))?;
    let outcome = importer.finish();
    pb.finish_and_clear();

    graph.save(&store_path)?;

    write_variants_to_path(&out, &outcome.created)?;
    info!(
        "Wrote {} new variants to {}",
        outcome.created.len(),
        out.display()
    );

    Ok(())
}
