use crate::commands::{parse_document, render_document, CmdMessage, CmdResult};
use crate::config::OutputFormat;
use crate::error::{Result, SiftError};
use crate::model::Node;
use crate::path::Path;
use crate::rebuild::set_path;
use tracing::debug;

/// A parsed `path=value` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub path: Path,
    pub value: Node,
}

impl std::str::FromStr for Assignment {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        let (path, value) = s.split_once('=').ok_or_else(|| {
            SiftError::InvalidPath(format!("'{}' is not a <path>=<value> assignment", s))
        })?;
        Ok(Self {
            path: path.trim().parse()?,
            value: scalar_value(value),
        })
    }
}

/// Reads `text` as a YAML scalar: numbers, booleans and null keep their
/// type, anything else (including YAML collections) stays a string.
pub fn scalar_value(text: &str) -> Node {
    if text.is_empty() {
        return Node::string("");
    }
    match serde_yaml::from_str::<serde_yaml::Value>(text) {
        Ok(value @ (serde_yaml::Value::Null
        | serde_yaml::Value::Bool(_)
        | serde_yaml::Value::Number(_)
        | serde_yaml::Value::String(_))) => Node::from(value),
        _ => Node::string(text),
    }
}

/// Applies every assignment in order and renders the updated document.
pub fn run<I: AsRef<str>>(source: &str, assignments: &[I], format: OutputFormat) -> Result<CmdResult> {
    let parsed = assignments
        .iter()
        .map(|a| a.as_ref().parse::<Assignment>())
        .collect::<Result<Vec<_>>>()?;

    let mut tree = parse_document(source)?;
    if matches!(tree, Node::Scalar(crate::model::Scalar::Null)) {
        tree = Node::empty_mapping();
    }
    for assignment in &parsed {
        debug!(path = %assignment.path, "applying assignment");
        set_path(&mut tree, &assignment.path, assignment.value.clone())?;
    }

    let mut result = CmdResult::default().with_document(render_document(&tree, format)?);
    result.add_message(CmdMessage::success(format!(
        "Applied {} update{}",
        parsed.len(),
        if parsed.len() == 1 { "" } else { "s" }
    )));
    Ok(result)
}
