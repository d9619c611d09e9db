//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for yamlsift operations, whichever UI drives them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the loaded [`SchemaIndex`] and [`SiftConfig`]
//! - **Dispatches** to the matching `commands::*::run`
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs` and the core modules
//! - **Terminal I/O**: sources arrive as text, documents leave as text
//! - **Presentation**: colours and layout are the CLI's business
//!
//! ## Overrides
//!
//! Per-invocation settings (a schema file given on the command line, forced
//! JSON output) are applied with the `with_*` builders after [`SiftApi::open`]
//! and never written back to `config.json`.

use crate::commands;
use crate::config::{OutputFormat, SiftConfig};
use crate::error::Result;
use crate::resolve::IndexStripping;
use crate::schema::SchemaIndex;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct SiftApi {
    schema: SchemaIndex,
    config: SiftConfig,
    config_dir: PathBuf,
}

impl SiftApi {
    pub fn new(schema: SchemaIndex, config: SiftConfig, config_dir: PathBuf) -> Self {
        Self {
            schema,
            config,
            config_dir,
        }
    }

    /// Loads `config.json` from `config_dir` and the schema it names (or the
    /// built-in one).
    pub fn open(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        let config = SiftConfig::load(&config_dir)?;
        let schema = load_schema(config.schema_path.as_deref())?;
        Ok(Self::new(schema, config, config_dir))
    }

    pub fn with_schema(mut self, schema: SchemaIndex) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_index_stripping(mut self, stripping: IndexStripping) -> Self {
        self.config.index_stripping = stripping;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    pub fn extract(&self, source: &str) -> Result<commands::CmdResult> {
        commands::extract::run(&self.schema, &self.config, source)
    }

    pub fn matches(&self, source: &str) -> Result<commands::CmdResult> {
        commands::matches::run(&self.schema, self.config.index_stripping, source)
    }

    pub fn fields(&self, source: &str) -> Result<commands::CmdResult> {
        commands::fields::run(&self.schema, self.config.index_stripping, source)
    }

    pub fn flatten(&self, source: &str, leaves_only: bool) -> Result<commands::CmdResult> {
        commands::flatten::run(source, leaves_only)
    }

    pub fn set<I: AsRef<str>>(&self, source: &str, assignments: &[I]) -> Result<commands::CmdResult> {
        commands::set::run(source, assignments, self.config.output_format)
    }

    pub fn kinds(&self) -> Result<commands::CmdResult> {
        commands::kinds::run(&self.schema)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn schema(&self) -> &SchemaIndex {
        &self.schema
    }

    pub fn settings(&self) -> &SiftConfig {
        &self.config
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// The schema at `path`, or the built-in one.
pub fn load_schema(path: Option<&Path>) -> Result<SchemaIndex> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading schema file");
            SchemaIndex::load(path)
        }
        None => SchemaIndex::builtin(),
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::fields::FormField;
pub use commands::flatten::FlatEntry;
pub use commands::kinds::KindInfo;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiftError;
    use std::fs;
    use tempfile::tempdir;

    const POD: &str = "kind: Pod\nspec:\n  restartPolicy: Always\n";

    #[test]
    fn open_without_config_uses_builtin_schema() {
        let dir = tempdir().unwrap();
        let api = SiftApi::open(dir.path()).unwrap();
        assert_eq!(api.schema(), &SchemaIndex::builtin().unwrap());
        assert_eq!(api.settings(), &SiftConfig::default());
    }

    #[test]
    fn open_reads_schema_path_from_config() {
        let dir = tempdir().unwrap();
        let schema_file = dir.path().join("custom.yaml");
        fs::write(&schema_file, "kinds:\n  Pod: [restartPolicy]\n").unwrap();
        let mut config = SiftConfig::default();
        config.schema_path = Some(schema_file);
        config.save(dir.path()).unwrap();

        let api = SiftApi::open(dir.path()).unwrap();
        assert_eq!(api.schema().len(), 1);
        let result = api.matches(POD).unwrap();
        assert_eq!(result.matches.len(), 1);
    }

    #[test]
    fn open_fails_on_missing_schema_file() {
        let dir = tempdir().unwrap();
        let mut config = SiftConfig::default();
        config.schema_path = Some(dir.path().join("absent.yaml"));
        config.save(dir.path()).unwrap();
        assert!(matches!(SiftApi::open(dir.path()), Err(SiftError::Io(_))));
    }

    #[test]
    fn output_override_is_not_persisted() {
        let dir = tempdir().unwrap();
        let api = SiftApi::open(dir.path())
            .unwrap()
            .with_output_format(OutputFormat::Json);
        let doc = api.extract(POD).unwrap().document.unwrap();
        assert!(doc.starts_with('{'));
        assert_eq!(
            SiftConfig::load(dir.path()).unwrap().output_format,
            OutputFormat::Yaml
        );
    }

    #[test]
    fn dispatches_each_operation() {
        let dir = tempdir().unwrap();
        let api = SiftApi::open(dir.path()).unwrap();
        assert_eq!(api.fields(POD).unwrap().fields.len(), 1);
        assert_eq!(api.flatten(POD, true).unwrap().entries.len(), 2);
        assert!(api.set(POD, &["spec.restartPolicy=Never"]).unwrap().document.is_some());
        assert_eq!(api.kinds().unwrap().kinds.len(), 14);
        assert!(api.config(ConfigAction::ShowAll).unwrap().config.is_some());
    }
}
