use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use vargraph_import::AnnotationImporter;
use vargraph_vcf::VcfReader;

use crate::session::{load_config, open_store, record_spinner};

pub fn run_import_annotations(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let store_path = config.store_path(matches.get_one::<String>("store"))?;

    let vcf = matches
        .get_one::<String>("vcf")
        .expect("A path to an annotated call file is required.");

    let mut graph = open_store(&config, &store_path)?;
    let reader = VcfReader::from_path(Path::new(vcf))?;

    let pb = record_spinner()?;
    let mut importer = AnnotationImporter::new(&mut graph, reader.header(), config.import_settings());
    importer.import_records(reader.inspect(|_| pb.inc(1)))?;
    pb.finish_and_clear();

    graph.save(&store_path)?;

    Ok(())
}
