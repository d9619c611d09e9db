//! Editable field descriptors for a document.
//!
//! Every match becomes one [`FormField`] named by its path, so a form built
//! from them can be posted back as `path=value` assignments (see
//! [`set`](super::set)).

use crate::collect::{collect_matches, MatchSet};
use crate::commands::{empty_match_notice, parse_document, CmdResult};
use crate::error::Result;
use crate::graph::flatten;
use crate::resolve::{IndexStripping, Match};
use crate::schema::SchemaIndex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input_type: String,
    pub current: String,
    pub placeholder: String,
}

impl FormField {
    pub fn from_match(found: &Match) -> Self {
        let path = found.path.to_string();
        let current = found.value.clone().dequoted().display_inline();
        Self {
            placeholder: format!("Enter {} (current: {})", path, current),
            name: path.clone(),
            label: path,
            input_type: "text".to_string(),
            current,
        }
    }
}

pub fn form_fields(matches: &MatchSet) -> Vec<FormField> {
    matches.all().map(FormField::from_match).collect()
}

pub fn run(schema: &SchemaIndex, stripping: IndexStripping, source: &str) -> Result<CmdResult> {
    let graph = flatten(&parse_document(source)?);
    let matches = collect_matches(&graph, schema, stripping);
    let fields = form_fields(&matches);

    let mut result = CmdResult::default();
    if let Some(notice) = empty_match_notice(&graph, schema, &matches) {
        result.add_message(notice);
    }
    Ok(result.with_fields(fields).with_matches(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use crate::path::Path;

    #[test]
    fn scalar_field() {
        let m = Match::new(
            "replicas",
            Path::root().key("spec").key("replicas"),
            Node::int(3),
        );
        let field = FormField::from_match(&m);
        assert_eq!(field.name, "spec.replicas");
        assert_eq!(field.label, "spec.replicas");
        assert_eq!(field.input_type, "text");
        assert_eq!(field.current, "3");
        assert_eq!(field.placeholder, "Enter spec.replicas (current: 3)");
    }

    #[test]
    fn nested_value_is_inline() {
        let m = Match::new(
            "selector",
            Path::root().key("spec").key("selector"),
            Node::from_yaml_str("app: web\ntier: front\n").unwrap(),
        );
        let field = FormField::from_match(&m);
        assert_eq!(field.current, r#"{"app":"web","tier":"front"}"#);
    }

    #[test]
    fn quoted_value_shows_bare() {
        let m = Match::new("data", Path::root().key("data"), Node::string("\"prod\""));
        assert_eq!(FormField::from_match(&m).current, "prod");
    }

    #[test]
    fn fields_follow_match_order() {
        let source = "kind: ConfigMap\ndata:\n  mode: fast\n";
        let result = run(&SchemaIndex::builtin().unwrap(), IndexStripping::Legacy, source).unwrap();
        let names: Vec<&str> = result.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["data"]);
        assert_eq!(result.fields[0].current, r#"{"mode":"fast"}"#);
    }
}
