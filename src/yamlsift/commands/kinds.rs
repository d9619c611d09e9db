use crate::commands::CmdResult;
use crate::error::Result;
use crate::schema::{SchemaEntry, SchemaIndex};
use serde::Serialize;

/// A schema kind and its keyword layout. Flat kinds have a single section
/// named `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindInfo {
    pub name: String,
    pub sections: Vec<(Option<String>, Vec<String>)>,
}

impl KindInfo {
    fn new(name: &str, entry: &SchemaEntry) -> Self {
        let sections = match entry {
            SchemaEntry::Flat(keywords) => vec![(None, keywords.clone())],
            SchemaEntry::Sectioned(sections) => sections
                .iter()
                .map(|(section, keywords)| (Some(section.clone()), keywords.clone()))
                .collect(),
        };
        Self {
            name: name.to_string(),
            sections,
        }
    }

    pub fn keyword_count(&self) -> usize {
        self.sections.iter().map(|(_, k)| k.len()).sum()
    }
}

pub fn run(schema: &SchemaIndex) -> Result<CmdResult> {
    let kinds = schema
        .kinds()
        .map(|(name, entry)| KindInfo::new(name, entry))
        .collect();
    Ok(CmdResult::default().with_kinds(kinds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_in_schema_order() {
        let schema = SchemaIndex::from_yaml_str(
            "kinds:\n  B: [x, y]\n  A:\n    s1: [z]\n    s2: []\n",
        )
        .unwrap();
        let result = run(&schema).unwrap();
        assert_eq!(
            result.kinds,
            vec![
                KindInfo {
                    name: "B".into(),
                    sections: vec![(None, vec!["x".into(), "y".into()])],
                },
                KindInfo {
                    name: "A".into(),
                    sections: vec![
                        (Some("s1".into()), vec!["z".into()]),
                        (Some("s2".into()), vec!["s2".into()]),
                    ],
                },
            ]
        );
        assert_eq!(result.kinds[1].keyword_count(), 2);
    }

    #[test]
    fn builtin_kinds() {
        let result = run(&SchemaIndex::builtin().unwrap()).unwrap();
        assert_eq!(result.kinds.len(), 14);
        assert_eq!(result.kinds[0].name, "Pod");
    }
}
