//! # Keyword Schema
//!
//! The [`SchemaIndex`] decides which fields are searched for a document. It
//! maps a resource kind (the document's `kind` value) to a [`SchemaEntry`]:
//!
//! - [`SchemaEntry::Flat`]: one keyword list, probed from the kind itself.
//! - [`SchemaEntry::Sectioned`]: named sections, each with a keyword list,
//!   probed from `<kind>.<section>`.
//!
//! The index is built once (from the embedded `schema.yaml`, or a user file)
//! and then only read. Callers pass it to
//! [`find_keywords`](crate::collect::find_keywords) explicitly; there is no
//! global copy.
//!
//! ## File format
//!
//! ```yaml
//! kinds:
//!   Service: [type, ports, selector]       # flat
//!   Deployment:                            # sectioned
//!     replicas: []                         # keyword is "replicas"
//!     selector: [matchLabels]
//! ```
//!
//! Keyword lists behave as sets: a repeated keyword is kept once, at its first
//! position.

use crate::error::{Result, SiftError};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

const BUILTIN_SCHEMA: &str = include_str!("schema.yaml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaEntry {
    Flat(Vec<String>),
    Sectioned(Vec<(String, Vec<String>)>),
}

impl SchemaEntry {
    /// Every `(section, keyword)` pair in search order. Flat entries have no
    /// section.
    pub fn keywords(&self) -> Vec<(Option<&str>, &str)> {
        match self {
            SchemaEntry::Flat(keywords) => keywords.iter().map(|k| (None, k.as_str())).collect(),
            SchemaEntry::Sectioned(sections) => sections
                .iter()
                .flat_map(|(section, keywords)| {
                    keywords.iter().map(move |k| (Some(section.as_str()), k.as_str()))
                })
                .collect(),
        }
    }

    pub fn keyword_count(&self) -> usize {
        match self {
            SchemaEntry::Flat(keywords) => keywords.len(),
            SchemaEntry::Sectioned(sections) => sections.iter().map(|(_, k)| k.len()).sum(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex {
    kinds: Vec<(String, SchemaEntry)>,
}

#[derive(Deserialize)]
struct SchemaFile {
    #[serde(default)]
    kinds: Mapping,
}

impl SchemaIndex {
    /// The schema shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_SCHEMA)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(SiftError::Io)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: SchemaFile = serde_yaml::from_str(text)?;
        let mut kinds = Vec::with_capacity(file.kinds.len());
        for (kind, body) in file.kinds {
            let kind = text_of(&kind)
                .ok_or_else(|| SiftError::Schema(format!("kind name must be text: {:?}", kind)))?;
            let entry = parse_entry(&kind, body)?;
            kinds.push((kind, entry));
        }
        Ok(Self { kinds })
    }

    pub fn get(&self, kind: &str) -> Option<&SchemaEntry> {
        self.kinds.iter().find(|(k, _)| k == kind).map(|(_, e)| e)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.get(kind).is_some()
    }

    pub fn kinds(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.kinds.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

fn parse_entry(kind: &str, body: Value) -> Result<SchemaEntry> {
    match body {
        Value::Sequence(items) => Ok(SchemaEntry::Flat(keyword_set(kind, items)?)),
        Value::Mapping(sections) => {
            let mut parsed = Vec::with_capacity(sections.len());
            for (section, keywords) in sections {
                let section = text_of(&section).ok_or_else(|| {
                    SiftError::Schema(format!("section names of '{}' must be text", kind))
                })?;
                let keywords = match keywords {
                    Value::Null => vec![section.clone()],
                    Value::Sequence(items) if items.is_empty() => vec![section.clone()],
                    Value::Sequence(items) => keyword_set(kind, items)?,
                    _ => {
                        return Err(SiftError::Schema(format!(
                            "section '{}' of '{}' must be a list of keywords",
                            section, kind
                        )))
                    }
                };
                parsed.push((section, keywords));
            }
            Ok(SchemaEntry::Sectioned(parsed))
        }
        _ => Err(SiftError::Schema(format!(
            "'{}' must map to a keyword list or to sections",
            kind
        ))),
    }
}

fn keyword_set(kind: &str, items: Vec<Value>) -> Result<Vec<String>> {
    let mut keywords: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let keyword = text_of(&item)
            .ok_or_else(|| SiftError::Schema(format!("keywords of '{}' must be text", kind)))?;
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }
    Ok(keywords)
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
