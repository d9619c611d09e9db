use crate::collect::collect_matches;
use crate::commands::{empty_match_notice, parse_document, CmdResult};
use crate::error::Result;
use crate::graph::flatten;
use crate::resolve::IndexStripping;
use crate::schema::SchemaIndex;

/// Lists the keyword matches of `source` without rebuilding it.
pub fn run(schema: &SchemaIndex, stripping: IndexStripping, source: &str) -> Result<CmdResult> {
    let graph = flatten(&parse_document(source)?);
    let matches = collect_matches(&graph, schema, stripping);

    let mut result = CmdResult::default();
    if let Some(notice) = empty_match_notice(&graph, schema, &matches) {
        result.add_message(notice);
    }
    Ok(result.with_matches(matches))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_matches_in_schema_order() {
        let source = "\
kind: Service
spec:
  type: NodePort
  selector:
    app: web
  ports:
  - port: 80
    targetPort: 8080
    nodePort: 30080
";
        let result = run(&SchemaIndex::builtin().unwrap(), IndexStripping::Legacy, source).unwrap();
        let found: Vec<(&str, String)> = result
            .matches
            .for_kind("Service")
            .iter()
            .map(|m| (m.keyword.as_str(), m.path.to_string()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("type", "spec.type".to_string()),
                ("ports", "spec.ports".to_string()),
                ("port", "spec.ports".to_string()),
                ("targetPort", "spec.ports[0].targetPort".to_string()),
                ("nodePort", "spec.ports[0].nodePort".to_string()),
                ("selector", "spec.selector".to_string()),
            ]
        );
    }

    #[test]
    fn empty_document_warns() {
        let result = run(&SchemaIndex::builtin().unwrap(), IndexStripping::Legacy, "").unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
