//! # yamlsift CLI
//!
//! The binary is intentionally thin: `main.rs` only invokes [`run`] and
//! turns an error into exit code 1. Everything here is UI; the work happens
//! in the library behind `yamlsift::api::SiftApi`.
//!
//! ## Behavior
//!
//! - Every document command takes a FILE; `-` reads stdin.
//! - Documents (`extract`, `set`) go to stdout unless `-o` names a file.
//! - Listings (`matches`, `fields`, `flatten`, `kinds`) are aligned text, or
//!   JSON with `--json` (or `output_format = json` in the config).
//! - Warnings and status lines go to stderr, so
//!   `yamlsift extract deploy.yaml > slim.yaml` stays clean.
//! - `yamlsift` with no command prints the grouped help.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print output
//! - `render`: Output formatting (alignment, colours, messages)
//! - `setup`: Argument parsing via clap, help text

mod commands;
mod render;
pub mod setup;

pub use commands::run;
