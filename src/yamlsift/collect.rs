//! # Match Collection
//!
//! Runs the resolver for every keyword the schema lists under the document's
//! kind. The kind is read from the top-level `kind` field; a document without
//! one, or with a kind the schema does not know, produces an empty
//! [`MatchSet`]. Neither case is an error.
//!
//! Matches keep schema order. Two keywords that resolve to the same path both
//! stay in the set.

use crate::graph::{flatten, FlatGraph};
use crate::model::{Node, Scalar};
use crate::path::Path;
use crate::resolve::{resolve, IndexStripping, Match};
use crate::schema::SchemaIndex;
use tracing::{debug, warn};

/// Matches grouped by kind, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet {
    groups: Vec<(String, Vec<Match>)>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: &str, found: Match) {
        match self.groups.iter_mut().find(|(k, _)| k == kind) {
            Some((_, list)) => list.push(found),
            None => self.groups.push((kind.to_string(), vec![found])),
        }
    }

    /// Matches for `kind`; empty when the kind produced none.
    pub fn for_kind(&self, kind: &str) -> &[Match] {
        self.groups
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Match])> {
        self.groups.iter().map(|(k, list)| (k.as_str(), list.as_slice()))
    }

    /// Every match across kinds, in order.
    pub fn all(&self) -> impl Iterator<Item = &Match> {
        self.groups.iter().flat_map(|(_, list)| list.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the document kind from a flattened graph.
///
/// Any non-null scalar counts; an empty string does not.
pub fn document_kind(graph: &FlatGraph) -> Option<String> {
    match graph.get("kind")? {
        Node::Scalar(Scalar::Null) => None,
        Node::Scalar(s) => Some(s.to_string()).filter(|k| !k.is_empty()),
        _ => None,
    }
}

/// Flattens `tree` and collects matches with the default index stripping.
pub fn find_keywords(tree: &Node, schema: &SchemaIndex) -> MatchSet {
    collect_matches(&flatten(tree), schema, IndexStripping::default())
}

/// Like [`find_keywords`], with an explicit index stripping policy.
pub fn find_keywords_with(tree: &Node, schema: &SchemaIndex, stripping: IndexStripping) -> MatchSet {
    collect_matches(&flatten(tree), schema, stripping)
}

/// Collects matches from an already flattened document.
pub fn collect_matches(graph: &FlatGraph, schema: &SchemaIndex, stripping: IndexStripping) -> MatchSet {
    let mut matches = MatchSet::new();

    let Some(kind) = document_kind(graph) else {
        debug!("document has no kind; nothing to search");
        return matches;
    };
    debug!(kind = %kind, entries = graph.len(), "identified resource kind");

    let Some(entry) = schema.get(&kind) else {
        warn!(kind = %kind, "no keywords defined for resource kind");
        return matches;
    };

    for (section, keyword) in entry.keywords() {
        let start = match section {
            Some(section) => Path::root().key(kind.clone()).key(section),
            None => Path::root().key(kind.clone()),
        };
        if let Some(found) = resolve(graph, keyword, &start, stripping) {
            matches.push(&kind, found);
        }
    }

    debug!(kind = %kind, matches = matches.len(), "keyword search finished");
    matches
}
