use crate::error::Result;
use crate::graph::{NodeId, RelationshipId};
use crate::value::{Properties, PropertyValue};

///
/// The capabilities the importers need from a graph database.
///
/// Implementations must reject a node whose identity duplicates an existing one
/// under a unique constraint with [`crate::StoreError::ConstraintViolation`], and
/// must return matches from [`GraphStore::find_nodes`] in a stable order.
///
pub trait GraphStore {
    fn create_node(&mut self, labels: &[&str], properties: Properties) -> Result<NodeId>;

    fn add_label(&mut self, node: NodeId, label: &str) -> Result<()>;

    /// Merge `properties` into the node, overwriting existing keys.
    fn set_properties(&mut self, node: NodeId, properties: Properties) -> Result<()>;

    fn create_relationship(
        &mut self,
        from: NodeId,
        to: NodeId,
        rel_type: &str,
        properties: Properties,
    ) -> Result<RelationshipId>;

    /// All nodes carrying `label` whose `key` property equals `value`. Empty if none.
    fn find_nodes(&self, label: &str, key: &str, value: &PropertyValue) -> Result<Vec<NodeId>>;

    /// First node matching `find_nodes`, if any.
    fn find_node(&self, label: &str, key: &str, value: &PropertyValue) -> Result<Option<NodeId>> {
        Ok(self.find_nodes(label, key, value)?.into_iter().next())
    }

    ///
    /// Return the node identified by `(label, key, value)`, creating it with just
    /// that property when absent.
    ///
    fn match_or_create_unique(&mut self, label: &str, key: &str, value: &str) -> Result<NodeId> {
        let value = PropertyValue::from(value);
        if let Some(node) = self.find_node(label, key, &value)? {
            return Ok(node);
        }
        let mut properties = Properties::new();
        properties.insert(key.to_string(), value);
        self.create_node(&[label], properties)
    }
}
