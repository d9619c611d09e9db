//! # Tree Rebuilding
//!
//! [`rebuild`] assembles a minimal document from a [`MatchSet`]:
//!
//! 1. `apiVersion` and `kind` are copied from the source as-is.
//! 2. `metadata` receives whichever of [`METADATA_FIELDS`] the source has.
//! 3. `spec` is copied whole as a baseline.
//! 4. Every match is written at its path, de-quoted, in match order.
//!
//! Writes create missing containers as they walk (a mapping before a key, a
//! sequence before an index) and pad sequences with empty mappings up to the
//! addressed index. Walking into a location that already holds the other
//! container kind, or a scalar, is a [`SiftError::StructuralConflict`];
//! nothing is overwritten to make room.
//!
//! Match paths come from the source graph, so rebuild pads freely.
//! [`set_path`] takes caller-supplied paths and refuses to pad more than
//! [`MAX_SEQUENCE_GAP`] placeholders in one write.

use crate::collect::MatchSet;
use crate::error::{Result, SiftError};
use crate::graph::FlatGraph;
use crate::model::Node;
use crate::path::{Path, PathSegment};
use tracing::debug;

/// Metadata fields carried into rebuilt output, in output order.
pub const METADATA_FIELDS: [&str; 6] = [
    "apiVersion",
    "kind",
    "name",
    "namespace",
    "labels",
    "annotations",
];

/// Most empty placeholders a single [`set_path`] write may add before the
/// addressed index.
pub const MAX_SEQUENCE_GAP: usize = 1024;

pub fn rebuild(matches: &MatchSet, graph: &FlatGraph) -> Result<Node> {
    let mut output = Node::empty_mapping();

    for key in ["apiVersion", "kind"] {
        if let Some(value) = graph.get(key) {
            output.insert(key, value.clone());
        }
    }

    let mut metadata = Node::empty_mapping();
    let mut has_metadata = false;
    for name in METADATA_FIELDS {
        if let Some(value) = graph.get(&format!("metadata.{}", name)) {
            metadata.insert(name, value.clone());
            has_metadata = true;
        }
    }
    if has_metadata {
        output.insert("metadata", metadata);
    }

    if let Some(spec) = graph.get("spec") {
        output.insert("spec", spec.clone());
    }

    for found in matches.all() {
        write_path(&mut output, &found.path, found.value.clone().dequoted(), None)?;
    }

    debug!(written = matches.len(), "rebuilt document");
    Ok(output)
}

/// Writes `value` at `path` inside `root`, creating containers on the way.
///
/// An index more than [`MAX_SEQUENCE_GAP`] past the end of an existing
/// sequence is [`SiftError::InvalidPath`].
pub fn set_path(root: &mut Node, path: &Path, value: Node) -> Result<()> {
    write_path(root, path, value, Some(MAX_SEQUENCE_GAP))
}

fn write_path(root: &mut Node, path: &Path, value: Node, max_gap: Option<usize>) -> Result<()> {
    let segments = path.segments();
    let Some((last, parents)) = segments.split_last() else {
        return Err(SiftError::InvalidPath(
            "cannot assign to the document root".to_string(),
        ));
    };

    let mut current = root;
    for (pos, segment) in parents.iter().enumerate() {
        current = descend(current, segment, &segments[pos + 1], path, pos, max_gap)?;
    }
    assign(current, last, value, path, segments.len() - 1, max_gap)
}

/// Empty container suited to hold `next`.
fn container_for(next: &PathSegment) -> Node {
    match next {
        PathSegment::Key(_) => Node::empty_mapping(),
        PathSegment::Index(_) => Node::Sequence(Vec::new()),
    }
}

fn conflict(path: &Path, pos: usize, expected: &'static str, found: &Node) -> SiftError {
    SiftError::StructuralConflict {
        path: path.prefix(pos).to_string(),
        expected,
        found: found.kind_name(),
    }
}

/// Pads `items` with empty mappings until `index` is the next free slot.
fn pad_to(items: &mut Vec<Node>, index: usize, max_gap: Option<usize>, path: &Path) -> Result<()> {
    let gap = index.saturating_sub(items.len());
    if let Some(limit) = max_gap {
        if gap > limit {
            return Err(SiftError::InvalidPath(format!(
                "index {} in '{}' is more than {} past the end of a sequence of {}",
                index,
                path,
                limit,
                items.len()
            )));
        }
    }
    while items.len() < index {
        items.push(Node::empty_mapping());
    }
    Ok(())
}

fn descend<'a>(
    node: &'a mut Node,
    segment: &PathSegment,
    next: &PathSegment,
    path: &Path,
    pos: usize,
    max_gap: Option<usize>,
) -> Result<&'a mut Node> {
    match (segment, node) {
        (PathSegment::Key(name), Node::Mapping(entries)) => {
            let slot = match entries.iter().position(|(k, _)| k == name) {
                Some(slot) => slot,
                None => {
                    entries.push((name.clone(), container_for(next)));
                    entries.len() - 1
                }
            };
            Ok(&mut entries[slot].1)
        }
        (PathSegment::Index(i), Node::Sequence(items)) => {
            if items.len() <= *i {
                pad_to(items, *i, max_gap, path)?;
                items.push(container_for(next));
            }
            Ok(&mut items[*i])
        }
        (PathSegment::Key(_), other) => Err(conflict(path, pos, "mapping", other)),
        (PathSegment::Index(_), other) => Err(conflict(path, pos, "sequence", other)),
    }
}

fn assign(
    node: &mut Node,
    segment: &PathSegment,
    value: Node,
    path: &Path,
    pos: usize,
    max_gap: Option<usize>,
) -> Result<()> {
    match (segment, node) {
        (PathSegment::Key(name), mapping @ Node::Mapping(_)) => {
            mapping.insert(name.clone(), value);
            Ok(())
        }
        (PathSegment::Index(i), Node::Sequence(items)) => {
            if items.len() > *i {
                items[*i] = value;
            } else {
                pad_to(items, *i, max_gap, path)?;
                items.push(value);
            }
            Ok(())
        }
        (PathSegment::Key(_), other) => Err(conflict(path, pos, "mapping", other)),
        (PathSegment::Index(_), other) => Err(conflict(path, pos, "sequence", other)),
    }
}
