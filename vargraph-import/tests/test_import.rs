use std::io::Cursor;
use std::path::{Path, PathBuf};

use fxhash::FxHashMap as HashMap;
use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::tempdir;

use vargraph_core::GenomeVariant;
use vargraph_import::consts::*;
use vargraph_import::{
    AnnotationImporter, ImportError, ImportOutcome, ImportSettings, VariantImporter,
};
use vargraph_store::{
    GraphStore, MemoryGraph, Node, NodeId, Properties, PropertyValue, RelationshipId,
};
use vargraph_vcf::{VcfReader, write_variants_to_path};

///
/// Delegates to a [`MemoryGraph`] and counts node creations per first label.
///
struct CountingStore {
    inner: MemoryGraph,
    created: HashMap<String, usize>,
}

impl CountingStore {
    fn new(inner: MemoryGraph) -> Self {
        CountingStore {
            inner,
            created: HashMap::default(),
        }
    }

    fn created(&self, label: &str) -> usize {
        self.created.get(label).copied().unwrap_or(0)
    }
}

impl GraphStore for CountingStore {
    fn create_node(
        &mut self,
        labels: &[&str],
        properties: Properties,
    ) -> vargraph_store::Result<NodeId> {
        let id = self.inner.create_node(labels, properties)?;
        if let Some(label) = labels.first() {
            *self.created.entry(label.to_string()).or_default() += 1;
        }
        Ok(id)
    }

    fn add_label(&mut self, node: NodeId, label: &str) -> vargraph_store::Result<()> {
        self.inner.add_label(node, label)
    }

    fn set_properties(
        &mut self,
        node: NodeId,
        properties: Properties,
    ) -> vargraph_store::Result<()> {
        self.inner.set_properties(node, properties)
    }

    fn create_relationship(
        &mut self,
        from: NodeId,
        to: NodeId,
        rel_type: &str,
        properties: Properties,
    ) -> vargraph_store::Result<RelationshipId> {
        self.inner.create_relationship(from, to, rel_type, properties)
    }

    fn find_nodes(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> vargraph_store::Result<Vec<NodeId>> {
        self.inner.find_nodes(label, key, value)
    }
}

fn data_path(file_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(file_name)
}

fn reader_from_str(text: &str) -> VcfReader {
    VcfReader::new(Box::new(Cursor::new(text.as_bytes().to_vec()))).unwrap()
}

fn constrained_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    for (label, key) in [
        (SAMPLE_LABEL, SAMPLE_ID),
        (RUN_INFO_LABEL, ANALYSIS_ID),
        (VARIANT_LABEL, VARIANT_ID),
        (FEATURE_LABEL, FEATURE_ID),
        (SYMBOL_LABEL, SYMBOL_ID),
    ] {
        graph.add_unique_constraint(label, key).unwrap();
    }
    graph
}

fn import_calls<S: GraphStore>(store: &mut S, reader: VcfReader) -> Result<ImportOutcome, ImportError> {
    let mut importer = VariantImporter::new(store);
    importer.add_run_info(reader.header())?;
    importer.import_records(reader)?;
    Ok(importer.finish())
}

fn variant_node<'a>(graph: &'a MemoryGraph, id: &str) -> &'a Node {
    let node = graph
        .find_node(VARIANT_LABEL, VARIANT_ID, &PropertyValue::from(id))
        .unwrap()
        .unwrap_or_else(|| panic!("no variant {}", id));
    graph.node(node).unwrap()
}

fn run_node(graph: &MemoryGraph, analysis_id: &str) -> NodeId {
    graph
        .find_node(RUN_INFO_LABEL, ANALYSIS_ID, &PropertyValue::from(analysis_id))
        .unwrap()
        .unwrap()
}

/// `(rel_type, target VariantId, Quality)` for every edge leaving `node`.
fn genotype_edges(graph: &MemoryGraph, node: NodeId) -> Vec<(String, String, Option<i64>)> {
    let mut edges: Vec<(String, String, Option<i64>)> = graph
        .relationships_from(node)
        .filter(|r| r.rel_type != HAS_ANALYSIS)
        .map(|r| {
            let target = graph.node(r.to).unwrap();
            (
                r.rel_type.clone(),
                target.properties[VARIANT_ID].to_string(),
                r.properties.get(QUALITY).and_then(|q| q.as_int()),
            )
        })
        .collect();
    edges.sort();
    edges
}

#[fixture]
fn imported() -> (MemoryGraph, ImportOutcome) {
    let mut graph = constrained_graph();
    let reader = VcfReader::from_path(&data_path("calls.vcf")).unwrap();
    let outcome = import_calls(&mut graph, reader).unwrap();
    (graph, outcome)
}

#[rstest]
fn test_summary_counts(imported: (MemoryGraph, ImportOutcome)) {
    let (_, outcome) = imported;
    let summary = outcome.summary;

    assert_eq!(summary.records, 6);
    assert_eq!(summary.records_skipped, 1);
    assert_eq!(summary.genotypes, 10);
    assert_eq!(summary.skipped_no_call, 1);
    assert_eq!(summary.skipped_hom_ref, 1);
    assert_eq!(summary.skipped_mixed, 1);
    assert_eq!(summary.skipped_spanning_deletion, 1);
    assert_eq!(summary.created, 6);
    assert_eq!(summary.session_hits, 1);
    assert_eq!(summary.store_hits, 0);
}

#[rstest]
fn test_created_variants_are_sorted(imported: (MemoryGraph, ImportOutcome)) {
    let (_, outcome) = imported;
    let ids: Vec<String> = outcome
        .created
        .iter()
        .map(GenomeVariant::concatenated_id)
        .collect();

    assert_eq!(
        ids,
        vec![
            "1:100G>A",
            "1:100G>C",
            "1:101T>",
            "2:500T>G",
            "MT:600A>G",
            "X:401A>T"
        ]
    );
}

#[rstest]
fn test_het_non_ref_gives_two_het_edges(imported: (MemoryGraph, ImportOutcome)) {
    let (graph, _) = imported;
    let run = run_node(&graph, "W1_S1_Q1");

    assert_eq!(
        genotype_edges(&graph, run),
        vec![
            ("HAS_HET_VARIANT".to_string(), "1:100G>A".to_string(), Some(60)),
            ("HAS_HET_VARIANT".to_string(), "1:100G>C".to_string(), Some(60)),
            ("HAS_HOM_VARIANT".to_string(), "1:101T>".to_string(), Some(99)),
        ]
    );
}

#[rstest]
fn test_second_sample_shares_variant_node(imported: (MemoryGraph, ImportOutcome)) {
    let (graph, _) = imported;
    let run = run_node(&graph, "W1_S2_Q1");

    assert_eq!(
        genotype_edges(&graph, run),
        vec![
            ("HAS_HET_VARIANT".to_string(), "1:100G>A".to_string(), Some(40)),
            ("HAS_HET_VARIANT".to_string(), "2:500T>G".to_string(), Some(45)),
            ("HAS_HET_VARIANT".to_string(), "X:401A>T".to_string(), Some(70)),
            ("HAS_HOM_VARIANT".to_string(), "MT:600A>G".to_string(), Some(88)),
        ]
    );
    assert_eq!(graph.nodes_with_label(VARIANT_LABEL).count(), 6);
}

#[rstest]
#[case("1:101T>", Some("AutoChromosome"))]
#[case("X:401A>T", Some("XChromosome"))]
#[case("MT:600A>G", Some("MtChromosome"))]
fn test_variant_chromosome_label(
    imported: (MemoryGraph, ImportOutcome),
    #[case] variant_id: &str,
    #[case] category: Option<&str>,
) {
    let (graph, _) = imported;
    let node = variant_node(&graph, variant_id);

    let mut expected = vec![VARIANT_LABEL.to_string()];
    expected.extend(category.map(|c| c.to_string()));
    expected.sort();
    assert_eq!(node.labels.iter().cloned().collect::<Vec<_>>(), expected);
}

#[rstest]
fn test_run_info_nodes(imported: (MemoryGraph, ImportOutcome)) {
    let (graph, _) = imported;

    let sample = graph
        .find_node(SAMPLE_LABEL, SAMPLE_ID, &PropertyValue::from("S1"))
        .unwrap()
        .unwrap();
    assert_eq!(
        graph.node(sample).unwrap().properties["Tissue"],
        PropertyValue::from("Blood")
    );

    let run = run_node(&graph, "W1_S1_Q1");
    let properties = &graph.node(run).unwrap().properties;
    assert_eq!(properties["PipelineVersion"], PropertyValue::Int(2));
    assert_eq!(properties["Assay"], PropertyValue::from("Panel"));

    let analyses: Vec<NodeId> = graph
        .relationships_from(sample)
        .filter(|r| r.rel_type == HAS_ANALYSIS)
        .map(|r| r.to)
        .collect();
    assert_eq!(analyses, vec![run]);
}

#[rstest]
fn test_creations_match_distinct_new_variants() {
    let mut store = CountingStore::new(constrained_graph());
    let reader = VcfReader::from_path(&data_path("calls.vcf")).unwrap();
    let outcome = import_calls(&mut store, reader).unwrap();

    assert_eq!(store.created(VARIANT_LABEL), outcome.created.len());
    assert_eq!(store.created(RUN_INFO_LABEL), 2);
}

#[rstest]
#[case("graph.json")]
#[case("graph.json.gz")]
fn test_reimport_creates_no_variants(#[case] file_name: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(file_name);

    let mut graph = constrained_graph();
    let first = import_calls(
        &mut graph,
        VcfReader::from_path(&data_path("calls.vcf")).unwrap(),
    )
    .unwrap();
    graph.save(&path).unwrap();

    let mut store = CountingStore::new(MemoryGraph::open(&path).unwrap());
    let second = import_calls(
        &mut store,
        VcfReader::from_path(&data_path("calls.vcf")).unwrap(),
    )
    .unwrap();

    assert_eq!(store.created(VARIANT_LABEL), 0);
    assert_eq!(store.created(RUN_INFO_LABEL), 0);
    assert!(second.created.is_empty());
    assert_eq!(second.summary.created, 0);
    assert_eq!(
        second.summary.store_hits,
        first.summary.created + first.summary.session_hits
    );

    let runs = store.inner.nodes_with_label(RUN_INFO_LABEL).count();
    let analyses = store
        .inner
        .relationships()
        .iter()
        .filter(|r| r.rel_type == HAS_ANALYSIS)
        .count();
    assert_eq!((runs, analyses), (2, 2));
}

const HEADER: &str = "##fileformat=VCFv4.1\n\
    ##SAMPLE=<ID=S1,WorklistId=W1,SeqId=Q1>\n\
    #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n";

#[rstest]
fn test_deletion_is_canonicalized() {
    let vcf = format!("{}1\t200\t.\tAT\tA\t.\tPASS\t.\tGT\t1/1\n", HEADER);
    let mut graph = constrained_graph();
    let outcome = import_calls(&mut graph, reader_from_str(&vcf)).unwrap();

    assert_eq!(outcome.created, vec![GenomeVariant::new("1", 201, "T", "")]);
}

#[rstest]
fn test_call_without_gq_stores_missing_quality() {
    let vcf = format!("{}1\t200\t.\tAT\tA\t.\tPASS\t.\tGT\t1/1\n", HEADER);
    let mut graph = constrained_graph();
    import_calls(&mut graph, reader_from_str(&vcf)).unwrap();
    let run = run_node(&graph, "W1_S1_Q1");

    assert_eq!(
        genotype_edges(&graph, run),
        vec![(
            "HAS_HOM_VARIANT".to_string(),
            "1:201T>".to_string(),
            Some(MISSING_QUALITY)
        )]
    );
}

#[rstest]
fn test_multibyte_alleles_are_trimmed_on_characters() {
    let vcf = format!("{}1\t100\t.\tGé\tGè\t.\tPASS\t.\tGT\t0/1\n", HEADER);
    let mut graph = constrained_graph();
    let outcome = import_calls(&mut graph, reader_from_str(&vcf)).unwrap();

    assert_eq!(outcome.created, vec![GenomeVariant::new("1", 101, "é", "è")]);
    variant_node(&graph, "1:101é>è");
}

#[rstest]
fn test_partial_overlap_creates_only_new_variants(imported: (MemoryGraph, ImportOutcome)) {
    let (graph, _) = imported;
    let vcf = format!(
        "{}1\t100\t.\tG\tA\t.\tPASS\t.\tGT:GQ\t0/1:50\n\
         3\t50\t.\tC\tT\t.\tPASS\t.\tGT:GQ\t1/1:70\n\
         1\t200\t.\tAT\tA\t.\tPASS\t.\tGT:GQ\t0/1:20\n",
        HEADER
    );

    let mut store = CountingStore::new(graph);
    let outcome = import_calls(&mut store, reader_from_str(&vcf)).unwrap();
    let summary = &outcome.summary;

    assert_eq!(outcome.created, vec![GenomeVariant::new("3", 50, "C", "T")]);
    assert_eq!(store.created(VARIANT_LABEL), 1);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.store_hits, 2);
    assert_eq!(summary.session_hits, 0);
    assert_eq!(summary.genotypes, 3);
    assert_eq!(
        summary.store_hits + summary.session_hits + summary.created,
        summary.genotypes
    );
    assert_eq!(store.inner.nodes_with_label(VARIANT_LABEL).count(), 7);
}

#[rstest]
fn test_triploid_genotype_aborts_run() {
    let vcf = format!(
        "{}1\t100\t.\tG\tA\t.\tPASS\t.\tGT\t0/1/1\n2\t100\t.\tG\tA\t.\tPASS\t.\tGT\t0/1\n",
        HEADER
    );
    let mut graph = constrained_graph();
    let reader = reader_from_str(&vcf);

    let mut importer = VariantImporter::new(&mut graph);
    importer.add_run_info(reader.header()).unwrap();
    let result = importer.import_records(reader);

    assert!(matches!(result, Err(ImportError::MalformedGenotype { .. })));
    assert_eq!(importer.summary().records, 1);
    assert_eq!(importer.summary().created, 0);
}

#[rstest]
fn test_duplicate_alternates_are_unknown_inheritance() {
    let vcf = format!("{}1\t100\t.\tG\tA,A\t.\tPASS\t.\tGT\t1/2\n", HEADER);
    let mut graph = constrained_graph();
    let result = import_calls(&mut graph, reader_from_str(&vcf));

    assert!(matches!(result, Err(ImportError::UnknownInheritance { .. })));
}

#[rstest]
fn test_sample_without_run_info() {
    let vcf = "##fileformat=VCFv4.1\n\
        #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS9\n\
        1\t100\t.\tG\tA\t.\tPASS\t.\tGT\t0/1\n";
    let mut graph = constrained_graph();
    let result = import_calls(&mut graph, reader_from_str(vcf));

    assert!(matches!(result, Err(ImportError::UnknownSample { ref sample, .. }) if sample == "S9"));
}

#[rstest]
fn test_import_annotations(imported: (MemoryGraph, ImportOutcome)) {
    let (mut graph, _) = imported;
    let reader = VcfReader::from_path(&data_path("annotated.vcf")).unwrap();

    let mut importer = AnnotationImporter::new(&mut graph, reader.header(), ImportSettings::default());
    importer.import_records(reader).unwrap();
    let summary = importer.summary().clone();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.annotations, 2);
    assert_eq!(summary.symbols, 1);

    let variant = variant_node(&graph, "1:100G>A");
    assert_eq!(variant.properties["dbSNPId"], PropertyValue::from("rs123"));
    assert_eq!(variant.properties["GERP"], PropertyValue::Float(4.5));
    assert_eq!(variant.properties["onekGPhase3_EUR_AF"], PropertyValue::Float(0.1));
    assert_eq!(variant.properties["ExAC_NFE_AF"], PropertyValue::Float(0.03));

    let mut rel_types: Vec<&str> = graph
        .relationships_from(variant.id)
        .map(|r| r.rel_type.as_str())
        .collect();
    rel_types.sort();
    assert_eq!(
        rel_types,
        vec![
            "HAS_INTRON_VARIANT_CONSEQUENCE",
            "HAS_IN_SYMBOL",
            "HAS_MISSENSE_VARIANT_CONSEQUENCE"
        ]
    );

    let canonical = graph
        .find_node(FEATURE_LABEL, FEATURE_ID, &PropertyValue::from("ENST01"))
        .unwrap()
        .unwrap();
    let canonical = graph.node(canonical).unwrap();
    assert!(canonical.has_label(CANONICAL_LABEL));
    assert_eq!(canonical.properties["Strand"], PropertyValue::Bool(true));
    assert_eq!(canonical.properties["TotalExons"], PropertyValue::Int(5));
    assert_eq!(canonical.properties["CCDSId"], PropertyValue::from("CCDS1"));

    let other = graph
        .find_node(FEATURE_LABEL, FEATURE_ID, &PropertyValue::from("ENST02"))
        .unwrap()
        .unwrap();
    let other = graph.node(other).unwrap();
    assert!(!other.has_label(CANONICAL_LABEL));
    assert_eq!(other.properties["Strand"], PropertyValue::Bool(false));
    assert!(
        graph
            .find_node(FEATURE_LABEL, FEATURE_ID, &PropertyValue::from("ENST03"))
            .unwrap()
            .is_none()
    );

    let symbol = graph
        .find_node(SYMBOL_LABEL, SYMBOL_ID, &PropertyValue::from("GENE1"))
        .unwrap()
        .unwrap();
    assert_eq!(
        graph.node(symbol).unwrap().properties["GeneId"],
        PropertyValue::from("ENSG01")
    );
    let biotypes = graph
        .relationships_from(symbol)
        .filter(|r| r.rel_type == "HAS_PROTEIN_CODING_BIOTYPE")
        .count();
    assert_eq!(biotypes, 2);

    let missense = graph
        .relationships_from(variant.id)
        .find(|r| r.rel_type == "HAS_MISSENSE_VARIANT_CONSEQUENCE")
        .unwrap();
    let annotation = graph.node(missense.to).unwrap();
    assert_eq!(annotation.properties["Exon"], PropertyValue::Int(2));
    assert_eq!(annotation.properties["HGVSp"], PropertyValue::from("ENSP01:p.Val4Ile"));
    assert_eq!(
        annotation.properties["prosite"],
        PropertyValue::StrList(vec!["PS00002".to_string(), "PS50001".to_string()])
    );
    assert_eq!(
        annotation.properties["Pfam_domain"],
        PropertyValue::StrList(vec!["PF001".to_string()])
    );

    let deletion = variant_node(&graph, "1:101T>");
    assert_eq!(deletion.properties["phyloP"], PropertyValue::Float(1.25));
}

#[rstest]
fn test_annotation_without_variant() {
    let vcf = "##fileformat=VCFv4.1\n\
        #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
        3\t1\t.\tA\tG\t.\t.\t.\n";
    let mut graph = constrained_graph();
    let reader = reader_from_str(vcf);

    let mut importer = AnnotationImporter::new(&mut graph, reader.header(), ImportSettings::default());
    let result = importer.import_records(reader);

    assert!(matches!(result, Err(ImportError::MissingAnnotationTarget(ref id)) if id == "3:1A>G"));
}

#[rstest]
fn test_imported_variants_file_can_be_annotated(imported: (MemoryGraph, ImportOutcome)) {
    let (mut graph, outcome) = imported;
    let dir = tempdir().unwrap();
    let path = dir.path().join("imported.vcf");
    write_variants_to_path(&path, &outcome.created).unwrap();

    let reader = VcfReader::from_path(&path).unwrap();
    let mut importer = AnnotationImporter::new(&mut graph, reader.header(), ImportSettings::default());
    importer.import_records(reader).unwrap();

    assert_eq!(importer.summary().records, outcome.created.len());
    assert_eq!(importer.summary().annotations, 0);
}
