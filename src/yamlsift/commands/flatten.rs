use crate::commands::{parse_document, CmdResult};
use crate::error::Result;
use crate::graph::{flatten, GraphEntry};
use serde::Serialize;

/// One row of a flattened document listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry {
    pub path: String,
    pub kind: &'static str,
    pub value: String,
}

impl FlatEntry {
    fn new(path: &str, entry: &GraphEntry) -> Self {
        Self {
            path: path.to_string(),
            kind: entry.node.kind_name(),
            value: entry.node.display_inline(),
        }
    }
}

/// Every `(path, value)` in document order; `leaves_only` keeps scalars.
pub fn run(source: &str, leaves_only: bool) -> Result<CmdResult> {
    let graph = flatten(&parse_document(source)?);
    let entries: Vec<FlatEntry> = if leaves_only {
        graph.leaves().map(|(p, e)| FlatEntry::new(p, e)).collect()
    } else {
        graph.iter().map(|(p, e)| FlatEntry::new(p, e)).collect()
    };
    Ok(CmdResult::default().with_entries(entries))
}
