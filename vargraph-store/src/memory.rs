//! In-memory reference implementation of [`GraphStore`].

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::fmt::{self, Display, Formatter};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::Utc;
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use fxhash::FxHashMap as HashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::graph::{Node, NodeId, PropertyKey, Relationship, RelationshipId};
use crate::traits::GraphStore;
use crate::value::{Properties, PropertyValue};

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a [`MemoryGraph`].
#[derive(Serialize, Deserialize, Debug)]
struct GraphSnapshot {
    version: u32,
    saved_at: String,
    constraints: BTreeSet<PropertyKey>,
    indexes: BTreeSet<PropertyKey>,
    next_node_id: u64,
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
}

/// value key -> nodes holding it, for one tracked `(label, key)` pair
type ValueLookup = HashMap<String, Vec<NodeId>>;

///
/// A whole graph held in memory.
///
/// Unique constraints and property indexes are declared per `(label, key)` pair.
/// Both are backed by the same value lookup, so `find_nodes` on a tracked pair does
/// not scan; untracked pairs fall back to a scan over all nodes.
///
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: BTreeMap<NodeId, Node>,
    relationships: Vec<Relationship>,
    constraints: BTreeSet<PropertyKey>,
    indexes: BTreeSet<PropertyKey>,
    lookup: HashMap<PropertyKey, ValueLookup>,
    next_node_id: u64,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Require `key` to be unique among nodes labelled `label`.
    ///
    /// Fails with [`StoreError::ConstraintNotSatisfied`] if the graph already holds
    /// two such nodes with the same value; the constraint is not added in that case.
    ///
    pub fn add_unique_constraint(&mut self, label: &str, key: &str) -> Result<()> {
        let pk = PropertyKey::new(label, key);
        self.track(&pk);

        if let Some(values) = self.lookup.get(&pk) {
            if let Some(ids) = values.values().find(|ids| ids.len() > 1) {
                let value = self
                    .nodes
                    .get(&ids[0])
                    .and_then(|n| n.properties.get(key))
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let err = StoreError::ConstraintNotSatisfied {
                    label: label.to_string(),
                    key: key.to_string(),
                    value,
                    count: ids.len(),
                };
                if !self.indexes.contains(&pk) {
                    self.lookup.remove(&pk);
                }
                return Err(err);
            }
        }

        self.constraints.insert(pk);
        Ok(())
    }

    /// Index `key` on nodes labelled `label` without requiring uniqueness.
    pub fn add_index(&mut self, label: &str, key: &str) {
        let pk = PropertyKey::new(label, key);
        self.track(&pk);
        self.indexes.insert(pk);
    }

    pub fn constraints(&self) -> impl Iterator<Item = &PropertyKey> {
        self.constraints.iter()
    }

    pub fn indexes(&self) -> impl Iterator<Item = &PropertyKey> {
        self.indexes.iter()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.values().filter(move |n| n.has_label(label))
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Outgoing relationships of `node`, in creation order.
    pub fn relationships_from(&self, node: NodeId) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(move |r| r.from == node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    ///
    /// Load a graph from a JSON snapshot written by [`MemoryGraph::save`].
    /// Paths ending in `.gz` are read as gzip.
    ///
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader: Box<dyn Read> = if path.extension() == Some(OsStr::new("gz")) {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let snapshot: GraphSnapshot = serde_json::from_reader(BufReader::new(reader))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion(snapshot.version));
        }

        let mut graph = MemoryGraph {
            nodes: snapshot.nodes.into_iter().map(|n| (n.id, n)).collect(),
            relationships: snapshot.relationships,
            constraints: snapshot.constraints,
            indexes: snapshot.indexes,
            lookup: HashMap::default(),
            next_node_id: snapshot.next_node_id,
        };

        let tracked: Vec<PropertyKey> = graph
            .constraints
            .iter()
            .chain(graph.indexes.iter())
            .cloned()
            .collect();
        for pk in tracked {
            graph.track(&pk);
        }

        info!(
            "Opened graph store {} ({} nodes, {} relationships)",
            path.display(),
            graph.node_count(),
            graph.relationship_count()
        );

        Ok(graph)
    }

    /// Open the snapshot at `path`, or start an empty graph if there is none yet.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::open(path)
        } else {
            info!("No graph store at {}, starting a new one", path.display());
            Ok(Self::new())
        }
    }

    ///
    /// Write the graph as a JSON snapshot. Paths ending in `.gz` are gzip-compressed.
    ///
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let snapshot = GraphSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            constraints: self.constraints.clone(),
            indexes: self.indexes.clone(),
            next_node_id: self.next_node_id,
            nodes: self.nodes.values().cloned().collect(),
            relationships: self.relationships.clone(),
        };

        let file = File::create(path)?;
        if path.extension() == Some(OsStr::new("gz")) {
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
            serde_json::to_writer(&mut encoder, &snapshot)?;
            encoder.finish()?.flush()?;
        } else {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &snapshot)?;
            writer.flush()?;
        }

        info!(
            "Saved graph store {} ({} nodes, {} relationships)",
            path.display(),
            self.node_count(),
            self.relationship_count()
        );

        Ok(())
    }

    /// Start tracking values of `pk`, building its lookup from the current nodes.
    fn track(&mut self, pk: &PropertyKey) {
        if self.lookup.contains_key(pk) {
            return;
        }
        let mut values = ValueLookup::default();
        for node in self.nodes.values().filter(|n| n.has_label(&pk.label)) {
            if let Some(value) = node.properties.get(&pk.key).and_then(|v| v.index_key()) {
                values.entry(value).or_default().push(node.id);
            }
        }
        self.lookup.insert(pk.clone(), values);
    }

    fn check_unique(
        &self,
        labels: &BTreeSet<String>,
        properties: &Properties,
        node: Option<NodeId>,
    ) -> Result<()> {
        for pk in self.constraints.iter().filter(|pk| labels.contains(&pk.label)) {
            let Some(value) = properties.get(&pk.key) else {
                continue;
            };
            let Some(value_key) = value.index_key() else {
                continue;
            };
            let taken = self
                .lookup
                .get(pk)
                .and_then(|values| values.get(&value_key))
                .is_some_and(|ids| ids.iter().any(|id| Some(*id) != node));
            if taken {
                return Err(StoreError::ConstraintViolation {
                    label: pk.label.clone(),
                    key: pk.key.clone(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    fn index_node(&mut self, node: &Node) {
        for (pk, values) in self.lookup.iter_mut() {
            if !node.has_label(&pk.label) {
                continue;
            }
            if let Some(value) = node.properties.get(&pk.key).and_then(|v| v.index_key()) {
                values.entry(value).or_default().push(node.id);
            }
        }
    }

    fn unindex_node(&mut self, node: &Node) {
        for (pk, values) in self.lookup.iter_mut() {
            if let Some(value) = node.properties.get(&pk.key).and_then(|v| v.index_key()) {
                if let Some(ids) = values.get_mut(&value) {
                    ids.retain(|id| *id != node.id);
                    if ids.is_empty() {
                        values.remove(&value);
                    }
                }
            }
        }
    }

    /// Replace a stored node after validating its new labels and properties.
    fn update_node(&mut self, updated: Node) -> Result<()> {
        self.check_unique(&updated.labels, &updated.properties, Some(updated.id))?;
        let previous = self
            .nodes
            .get(&updated.id)
            .cloned()
            .ok_or(StoreError::NodeNotFound(updated.id))?;
        self.unindex_node(&previous);
        self.index_node(&updated);
        self.nodes.insert(updated.id, updated);
        Ok(())
    }
}

impl GraphStore for MemoryGraph {
    fn create_node(&mut self, labels: &[&str], properties: Properties) -> Result<NodeId> {
        let labels: BTreeSet<String> = labels.iter().map(|l| l.to_string()).collect();
        self.check_unique(&labels, &properties, None)?;

        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;

        let node = Node {
            id,
            labels,
            properties,
        };
        self.index_node(&node);
        self.nodes.insert(id, node);

        Ok(id)
    }

    fn add_label(&mut self, node: NodeId, label: &str) -> Result<()> {
        let mut updated = self
            .nodes
            .get(&node)
            .cloned()
            .ok_or(StoreError::NodeNotFound(node))?;
        if !updated.labels.insert(label.to_string()) {
            return Ok(());
        }
        self.update_node(updated)
    }

    fn set_properties(&mut self, node: NodeId, properties: Properties) -> Result<()> {
        if properties.is_empty() {
            return Ok(());
        }
        let mut updated = self
            .nodes
            .get(&node)
            .cloned()
            .ok_or(StoreError::NodeNotFound(node))?;
        updated.properties.extend(properties);
        self.update_node(updated)
    }

    fn create_relationship(
        &mut self,
        from: NodeId,
        to: NodeId,
        rel_type: &str,
        properties: Properties,
    ) -> Result<RelationshipId> {
        for id in [from, to] {
            if !self.nodes.contains_key(&id) {
                return Err(StoreError::NodeNotFound(id));
            }
        }

        let id = RelationshipId(self.relationships.len() as u64);
        self.relationships.push(Relationship {
            id,
            from,
            to,
            rel_type: rel_type.to_string(),
            properties,
        });

        Ok(id)
    }

    fn find_nodes(&self, label: &str, key: &str, value: &PropertyValue) -> Result<Vec<NodeId>> {
        let pk = PropertyKey::new(label, key);

        if let (Some(values), Some(value_key)) = (self.lookup.get(&pk), value.index_key()) {
            let mut ids = values.get(&value_key).cloned().unwrap_or_default();
            ids.sort();
            return Ok(ids);
        }

        Ok(self
            .nodes
            .values()
            .filter(|n| n.has_label(label) && n.properties.get(key) == Some(value))
            .map(|n| n.id)
            .collect())
    }
}

impl Display for MemoryGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "MemoryGraph object:")?;
        writeln!(f, ">Nodes (n={})", self.nodes.len())?;
        writeln!(f, ">Relationships (n={})", self.relationships.len())?;

        let mut label_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for node in self.nodes.values() {
            for label in &node.labels {
                *label_counts.entry(label.as_str()).or_default() += 1;
            }
        }
        for (label, count) in label_counts {
            writeln!(f, "  - {}: {}", label, count)?;
        }

        let constraints: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();
        write!(f, ">Unique constraints: {}", constraints.join(", "))
    }
}
