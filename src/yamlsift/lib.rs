//! # yamlsift Architecture
//!
//! yamlsift reads a YAML resource manifest, finds the fields a keyword schema
//! cares about, and writes back a trimmed manifest holding only those fields
//! plus the standard passthrough sections. It is a library first; the
//! `yamlsift` binary is one client of it.
//!
//! ## The Pipeline
//!
//! ```text
//!   source text
//!        │  Node::from_yaml_str
//!        ▼
//!   Node tree ──flatten──▶ FlatGraph ──collect_matches──▶ MatchSet
//!                              │                              │
//!                              └──────────rebuild─────────────┘
//!                                            │
//!                                            ▼
//!                                     trimmed Node tree
//! ```
//!
//! - [`graph::flatten`] gives every mapping key and sequence element a
//!   canonical path (`spec.template.spec.containers[0].image`).
//! - [`collect::collect_matches`] reads the document `kind`, looks it up in
//!   the [`schema::SchemaIndex`] and resolves each keyword with
//!   [`resolve::resolve`]: a bounded subtree probe, then a document-order scan.
//! - [`rebuild::rebuild`] copies `apiVersion`, `kind`, selected `metadata`
//!   fields and `spec`, then writes every match back at its path.
//!
//! None of these steps keep state between calls. The schema is loaded once
//! and passed in explicitly.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, reads files/stdin, prints output       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns schema and config, dispatches to commands           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation each, returns CmdResult                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (model, path, graph, schema, resolve, collect,        │
//! │        rebuild)                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; installing a subscriber is
//! left to the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`model`]: Ordered document tree (`Node`, `Scalar`)
//! - [`path`]: Typed paths and their canonical text form
//! - [`graph`]: Flattening into a path-addressable graph
//! - [`schema`]: Per-kind keyword schema
//! - [`resolve`]: Keyword resolution strategies
//! - [`collect`]: Per-document match collection
//! - [`rebuild`]: Output tree assembly and the shared path writer
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod collect;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod path;
pub mod rebuild;
pub mod resolve;
pub mod schema;

pub use collect::{find_keywords, MatchSet};
pub use graph::{flatten, FlatGraph};
pub use model::Node;
pub use rebuild::rebuild;
pub use schema::SchemaIndex;
