use crate::collect::collect_matches;
use crate::commands::{empty_match_notice, parse_document, render_document, CmdResult};
use crate::config::SiftConfig;
use crate::error::Result;
use crate::graph::flatten;
use crate::rebuild::rebuild;
use crate::schema::SchemaIndex;
use tracing::debug;

/// Parse, match, rebuild and render `source` in one pass.
pub fn run(schema: &SchemaIndex, config: &SiftConfig, source: &str) -> Result<CmdResult> {
    let tree = parse_document(source)?;
    let graph = flatten(&tree);
    debug!(entries = graph.len(), "flattened source document");

    let matches = collect_matches(&graph, schema, config.index_stripping);
    let rebuilt = rebuild(&matches, &graph)?;
    let document = render_document(&rebuilt, config.output_format)?;

    let mut result = CmdResult::default();
    if let Some(notice) = empty_match_notice(&graph, schema, &matches) {
        result.add_message(notice);
    }
    Ok(result.with_document(document).with_matches(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::OutputFormat;

    const DEPLOYMENT: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  uid: 1234
spec:
  replicas: 3
  template:
    spec:
      containers:
      - name: web
        image: nginx:1.21
status:
  readyReplicas: 3
";

    fn builtin() -> SchemaIndex {
        SchemaIndex::builtin().unwrap()
    }

    #[test]
    fn extracts_deployment() {
        let result = run(&builtin(), &SiftConfig::default(), DEPLOYMENT).unwrap();
        let doc = result.document.unwrap();
        assert!(doc.starts_with("apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\n"));
        assert!(doc.contains("replicas: 3"));
        assert!(doc.contains("image: nginx:1.21"));
        assert!(!doc.contains("status"));
        assert!(!doc.contains("uid"));
        assert!(!result.matches.is_empty());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn json_output() {
        let config = SiftConfig {
            output_format: OutputFormat::Json,
            ..SiftConfig::default()
        };
        let result = run(&builtin(), &config, DEPLOYMENT).unwrap();
        let doc = result.document.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(parsed["spec"]["replicas"], 3);
        assert_eq!(parsed["kind"], "Deployment");
    }

    #[test]
    fn no_kind_warns_and_passes_through() {
        let result = run(
            &builtin(),
            &SiftConfig::default(),
            "metadata:\n  name: x\nspec:\n  a: 1\nextra: true\n",
        )
        .unwrap();
        assert_eq!(
            result.document.as_deref(),
            Some("metadata:\n  name: x\nspec:\n  a: 1\n")
        );
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn unknown_kind_warns() {
        let result = run(&builtin(), &SiftConfig::default(), "kind: Widget\n").unwrap();
        assert!(result.messages[0].content.contains("Widget"));
    }

    #[test]
    fn invalid_yaml_is_error() {
        assert!(run(&builtin(), &SiftConfig::default(), "a: [1, 2\n").is_err());
    }
}
