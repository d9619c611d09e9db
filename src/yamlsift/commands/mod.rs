//! # Command Layer
//!
//! One module per operation. Commands take source text and already-loaded
//! inputs (schema, config), run the core pipeline, and return a [`CmdResult`].
//! They never print; anything the user should see goes into
//! [`CmdResult::messages`] or the typed result fields.

use crate::collect::MatchSet;
use crate::config::{OutputFormat, SiftConfig};
use crate::error::Result;
use crate::model::Node;

pub mod config;
pub mod extract;
pub mod fields;
pub mod flatten;
pub mod kinds;
pub mod matches;
pub mod set;

use fields::FormField;
use flatten::FlatEntry;
use kinds::KindInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Rendered output document (yaml or json)
    pub document: Option<String>,
    pub matches: MatchSet,
    pub fields: Vec<FormField>,
    pub entries: Vec<FlatEntry>,
    pub kinds: Vec<KindInfo>,
    pub config: Option<SiftConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_document(mut self, document: String) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_matches(mut self, matches: MatchSet) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_fields(mut self, fields: Vec<FormField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_entries(mut self, entries: Vec<FlatEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_kinds(mut self, kinds: Vec<KindInfo>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_config(mut self, config: SiftConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// Parses source text into a tree. Empty input is a null document.
pub(crate) fn parse_document(source: &str) -> Result<Node> {
    if source.trim().is_empty() {
        return Ok(Node::null());
    }
    Node::from_yaml_str(source)
}

pub(crate) fn render_document(node: &Node, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => node.to_yaml_string(),
        OutputFormat::Json => {
            let mut text = node.to_json_string()?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Explains an empty match set. `None` when matches were found.
pub(crate) fn empty_match_notice(
    graph: &crate::graph::FlatGraph,
    schema: &crate::schema::SchemaIndex,
    matches: &MatchSet,
) -> Option<CmdMessage> {
    if !matches.is_empty() {
        return None;
    }
    match crate::collect::document_kind(graph) {
        None => Some(CmdMessage::warning("Document has no kind; nothing to match")),
        Some(kind) if !schema.contains(&kind) => Some(CmdMessage::warning(format!(
            "No keywords defined for kind '{}'",
            kind
        ))),
        Some(kind) => Some(CmdMessage::info(format!(
            "No schema keywords found in this {}",
            kind
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_errors_only_for_error_level() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning("careful"));
        assert!(!result.has_errors());
        result.add_message(CmdMessage::error("broken"));
        assert!(result.has_errors());
    }

    #[test]
    fn json_rendering_ends_with_newline() {
        let node = Node::from_yaml_str("a: 1\n").unwrap();
        let text = render_document(&node, OutputFormat::Json).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn empty_source_is_null_document() {
        assert_eq!(parse_document("").unwrap(), Node::null());
    }
}
