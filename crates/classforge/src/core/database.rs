//! Core database trait for diagram data storage
//!
//! This trait defines the interface for storing and managing diagram data.
//! Each diagram type implements this with its own node and edge data types.

use anyhow::Result;

/// Core trait for diagram databases
///
/// A database owns the nodes of one diagram. Edges are not stored: they are
/// applied to the nodes they connect as soon as they are added, which is why
/// every endpoint must already be known when an edge arrives.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node to the database
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Apply an edge to the nodes it connects
    ///
    /// Returns `false` if an endpoint is unknown and the edge was dropped.
    fn apply_edge(&mut self, edge: Self::Edge) -> bool;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;
}
