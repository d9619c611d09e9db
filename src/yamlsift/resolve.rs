//! # Keyword Resolution
//!
//! Finds one location in a [`FlatGraph`] for a schema keyword. Two strategies
//! run in order and the first hit wins:
//!
//! 1. [`probe_subtree`]: bounded. Starting at a given path, accept the path
//!    itself if its text contains the keyword, otherwise descend through
//!    mapping children in key order. Sequences and scalars end the probe.
//! 2. [`scan_fallback`]: unbounded. Walk every graph path in document order,
//!    normalize away list indexes per [`IndexStripping`], and take the first
//!    path whose text contains the keyword.
//!
//! A keyword that neither strategy finds is simply absent from the result.

use crate::graph::FlatGraph;
use crate::model::Node;
use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, trace};

/// A resolved keyword: where it was found and what is stored there.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub keyword: String,
    pub path: Path,
    pub value: Node,
}

impl Match {
    pub fn new(keyword: impl Into<String>, path: Path, value: Node) -> Self {
        Self {
            keyword: keyword.into(),
            path,
            value,
        }
    }
}

/// How list indexes are removed from path text before the fallback scan
/// compares it against a keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexStripping {
    /// Remove only the literal `[0]` and `[1]` substrings.
    #[default]
    Legacy,
    /// Remove every `[<digits>]` group.
    AllIndices,
}

impl IndexStripping {
    pub fn strip<'a>(&self, path: &'a str) -> Cow<'a, str> {
        if !path.contains('[') {
            return Cow::Borrowed(path);
        }
        match self {
            IndexStripping::Legacy => Cow::Owned(path.replace("[0]", "").replace("[1]", "")),
            IndexStripping::AllIndices => Cow::Owned(strip_all_indices(path)),
        }
    }
}

impl fmt::Display for IndexStripping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexStripping::Legacy => write!(f, "legacy"),
            IndexStripping::AllIndices => write!(f, "all-indices"),
        }
    }
}

impl std::str::FromStr for IndexStripping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(IndexStripping::Legacy),
            "all-indices" => Ok(IndexStripping::AllIndices),
            other => Err(format!(
                "Invalid index stripping '{}': expected 'legacy' or 'all-indices'",
                other
            )),
        }
    }
}

fn strip_all_indices(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(close)
                if close > 0 && after[..close].bytes().all(|b| b.is_ascii_digit()) =>
            {
                rest = &after[close + 1..];
            }
            _ => {
                out.push('[');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Bounded search below `start`.
///
/// Returns `None` when `start` is not in the graph, or when nothing under
/// it matches before the walk runs into sequences and scalars.
pub fn probe_subtree(graph: &FlatGraph, keyword: &str, start: &Path) -> Option<Match> {
    let text = start.to_string();
    let entry = graph.entry(&text)?;
    if text.contains(keyword) {
        trace!(keyword, path = %text, "probe hit on path name");
        return Some(Match::new(keyword, entry.path.clone(), entry.node.clone()));
    }
    match &entry.node {
        Node::Mapping(children) => children
            .iter()
            .find_map(|(child, _)| probe_subtree(graph, keyword, &start.clone().key(child.clone()))),
        Node::Sequence(_) | Node::Scalar(_) => None,
    }
}

/// Whole-graph search in document order.
pub fn scan_fallback(graph: &FlatGraph, keyword: &str, stripping: IndexStripping) -> Option<Match> {
    graph
        .iter()
        .find(|(text, _)| stripping.strip(text).contains(keyword))
        .map(|(_, entry)| Match::new(keyword, entry.path.clone(), entry.node.clone()))
}

/// Resolves `keyword` by probing from `start`, falling back to a full scan.
pub fn resolve(
    graph: &FlatGraph,
    keyword: &str,
    start: &Path,
    stripping: IndexStripping,
) -> Option<Match> {
    if let Some(found) = probe_subtree(graph, keyword, start) {
        debug!(keyword, start = %start, path = %found.path, "resolved by subtree probe");
        return Some(found);
    }
    match scan_fallback(graph, keyword, stripping) {
        Some(found) => {
            debug!(keyword, start = %start, path = %found.path, "resolved by fallback scan");
            Some(found)
        }
        None => {
            debug!(keyword, start = %start, "no match");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::flatten;

    fn graph(text: &str) -> FlatGraph {
        flatten(&Node::from_yaml_str(text).unwrap())
    }

    const NESTED: &str = "\
Deployment:
  template:
    metadata:
      labels:
        app: web
    spec:
      image: nginx
";

    #[test]
    fn probe_matches_start_path_name_first() {
        let g = graph(NESTED);
        let start: Path = "Deployment.template".parse().unwrap();
        let found = probe_subtree(&g, "templ", &start).unwrap();
        assert_eq!(found.path.to_string(), "Deployment.template");
        assert!(found.value.is_mapping());
    }

    #[test]
    fn probe_descends_mapping_children_in_order() {
        let g = graph(NESTED);
        let start: Path = "Deployment.template".parse().unwrap();
        let found = probe_subtree(&g, "image", &start).unwrap();
        assert_eq!(found.path.to_string(), "Deployment.template.spec.image");
        assert_eq!(found.value, Node::string("nginx"));

        // depth first: labels under metadata is reached before spec
        let found = probe_subtree(&g, "s", &start).unwrap();
        assert_eq!(found.path.to_string(), "Deployment.template.metadata.labels");
    }

    #[test]
    fn probe_fails_for_missing_start() {
        let g = graph(NESTED);
        let start: Path = "Pod.template".parse().unwrap();
        assert!(probe_subtree(&g, "image", &start).is_none());
    }

    #[test]
    fn probe_stops_at_sequences() {
        let g = graph("root:\n  items:\n  - image: x\n");
        let start: Path = "root".parse().unwrap();
        assert!(probe_subtree(&g, "image", &start).is_none());
    }

    #[test]
    fn scan_returns_first_in_document_order() {
        let g = graph("metadata:\n  name: web\nspec:\n  name: other\n");
        let found = scan_fallback(&g, "name", IndexStripping::Legacy).unwrap();
        assert_eq!(found.path.to_string(), "metadata.name");
        assert_eq!(found.value, Node::string("web"));
    }

    #[test]
    fn legacy_stripping_only_removes_zero_and_one() {
        assert_eq!(IndexStripping::Legacy.strip("a[0].b[1].c[2]"), "a.b.c[2]");
        assert_eq!(IndexStripping::Legacy.strip("plain.path"), "plain.path");
    }

    #[test]
    fn all_indices_stripping() {
        assert_eq!(IndexStripping::AllIndices.strip("a[0].b[12].c[2]"), "a.b.c");
        assert_eq!(IndexStripping::AllIndices.strip("a[x].b[]"), "a[x].b[]");
    }

    #[test]
    fn stripping_decides_bracket_spanning_keywords() {
        let g = graph("ports:\n- 80\n- 81\n- 82\n");
        // "ports" alone always matches the container entry first
        assert_eq!(
            scan_fallback(&g, "ports", IndexStripping::Legacy)
                .unwrap()
                .path
                .to_string(),
            "ports"
        );
        // "s[2]" only survives when [2] is kept
        assert_eq!(
            scan_fallback(&g, "s[2]", IndexStripping::Legacy)
                .unwrap()
                .path
                .to_string(),
            "ports[2]"
        );
        assert!(scan_fallback(&g, "s[2]", IndexStripping::AllIndices).is_none());
    }

    #[test]
    fn resolve_prefers_probe_over_scan() {
        let g = graph("spec:\n  image: early\nDeployment:\n  template:\n    image: probed\n");
        let start: Path = "Deployment.template".parse().unwrap();
        let found = resolve(&g, "image", &start, IndexStripping::Legacy).unwrap();
        assert_eq!(found.value, Node::string("probed"));
    }

    #[test]
    fn resolve_falls_back_to_scan() {
        let g = graph("spec:\n  containers:\n  - image: nginx\n");
        let start: Path = "Deployment.template".parse().unwrap();
        let found = resolve(&g, "image", &start, IndexStripping::Legacy).unwrap();
        assert_eq!(found.path.to_string(), "spec.containers[0].image");
        assert_eq!(found.keyword, "image");
    }

    #[test]
    fn resolve_miss_is_none() {
        let g = graph("spec:\n  replicas: 2\n");
        let start: Path = "Deployment".parse().unwrap();
        assert!(resolve(&g, "nodePort", &start, IndexStripping::Legacy).is_none());
    }

    #[test]
    fn stripping_parses_from_config_text() {
        assert_eq!(
            "legacy".parse::<IndexStripping>(),
            Ok(IndexStripping::Legacy)
        );
        assert_eq!(
            "all-indices".parse::<IndexStripping>(),
            Ok(IndexStripping::AllIndices)
        );
        assert!("some".parse::<IndexStripping>().is_err());
        assert_eq!(IndexStripping::AllIndices.to_string(), "all-indices");
    }
}
