//! # Flat Graph
//!
//! [`flatten`] turns a document tree into a [`FlatGraph`]: one entry per
//! mapping key and per sequence element, keyed by canonical path text.
//! Intermediate containers get entries too, not only leaves, so a lookup of
//! `spec.template` yields the whole template subtree.
//!
//! Entries keep traversal order. The fallback keyword scan depends on it:
//! "first match" means first in document order.

use crate::model::Node;
use crate::path::Path;
use std::collections::HashMap;
use tracing::{trace, warn};

/// One flattened location: its typed path and the node found there.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEntry {
    pub path: Path,
    pub node: Node,
}

#[derive(Debug, Clone, Default)]
pub struct FlatGraph {
    entries: Vec<(String, GraphEntry)>,
    positions: HashMap<String, usize>,
    collisions: usize,
}

impl FlatGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `node` at `path`. A repeated path text overwrites the earlier
    /// value but keeps its original position.
    pub fn insert(&mut self, path: Path, node: Node) {
        let key = path.to_string();
        let entry = GraphEntry { path, node };
        match self.positions.get(&key) {
            Some(&pos) => {
                // keys holding '.' or '[' can spell another location's path
                warn!(path = %key, "two locations share one path text; keeping the later value");
                self.collisions += 1;
                self.entries[pos].1 = entry;
            }
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, entry));
            }
        }
    }

    /// How many inserts replaced an entry with the same path text.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn get(&self, path: &str) -> Option<&Node> {
        self.entry(path).map(|e| &e.node)
    }

    pub fn entry(&self, path: &str) -> Option<&GraphEntry> {
        self.positions.get(path).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.positions.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(path text, entry)` in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GraphEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries whose node is a scalar.
    pub fn leaves(&self) -> impl Iterator<Item = (&str, &GraphEntry)> {
        self.iter().filter(|(_, e)| e.node.is_scalar())
    }
}

/// Flattens `tree` into a path-addressable graph.
///
/// A scalar root has no addressable children and yields an empty graph.
pub fn flatten(tree: &Node) -> FlatGraph {
    let mut graph = FlatGraph::new();
    walk(tree, &Path::root(), &mut graph);
    trace!(entries = graph.len(), "flattened document");
    graph
}

fn walk(node: &Node, at: &Path, graph: &mut FlatGraph) {
    match node {
        Node::Mapping(entries) => {
            for (key, child) in entries {
                let child_path = at.clone().key(key.clone());
                graph.insert(child_path.clone(), child.clone());
                walk(child, &child_path, graph);
            }
        }
        Node::Sequence(items) => {
            for (i, child) in items.iter().enumerate() {
                let child_path = at.clone().index(i);
                graph.insert(child_path.clone(), child.clone());
                walk(child, &child_path, graph);
            }
        }
        Node::Scalar(_) => {}
    }
}
