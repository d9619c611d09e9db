//! # CLI Layer
//!
//! This module is **one possible UI client** for yamlsift; it is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` from config, flags and environment
//!   (`config` runs before it, straight against the config directory)
//! - `handle_*()`: Per-command handlers that call the API and print results
//!
//! Documents go to stdout (or `-o`), status messages to stderr.

use super::render::{
    matches_to_json, print_messages, render_config, render_entries, render_fields, render_kinds,
    render_matches,
};
use super::setup::{print_grouped_help, print_subcommand_help, Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yamlsift::api::{load_schema, CmdMessage, CmdResult, ConfigAction, MessageLevel, SiftApi};
use yamlsift::commands;
use yamlsift::config::OutputFormat;
use yamlsift::error::{Result, SiftError};
use yamlsift::resolve::IndexStripping;

/// Overrides the platform config directory.
const HOME_ENV: &str = "YAMLSIFT_HOME";

struct AppContext {
    api: SiftApi,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help || cli.command.is_none() {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_tracing(cli.verbose);

    // Config editing must work even when the configured schema is broken.
    if let Some(Commands::Config { key, value }) = cli.command {
        return handle_config(&config_dir()?, key, value);
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Extract { file, output }) => handle_extract(&ctx, &file, output),
        Some(Commands::Matches { file }) => handle_matches(&ctx, &file),
        Some(Commands::Fields { file }) => handle_fields(&ctx, &file),
        Some(Commands::Flatten { file, leaves }) => handle_flatten(&ctx, &file, leaves),
        Some(Commands::Set {
            file,
            assignments,
            output,
        }) => handle_set(&ctx, &file, &assignments, output),
        Some(Commands::Kinds) => handle_kinds(&ctx),
        Some(Commands::Config { .. }) | None => Ok(()),
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug, default warn.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "yamlsift", "yamlsift")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            SiftError::Api(format!(
                "Could not determine a config directory; set {}",
                HOME_ENV
            ))
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = config_dir()?;
    debug!(config_dir = %dir.display(), "loading configuration");

    let mut api = SiftApi::open(dir)?;
    if let Some(schema) = &cli.schema {
        api = api.with_schema(load_schema(Some(schema.as_path()))?);
    }
    if cli.strip_all_indices {
        api = api.with_index_stripping(IndexStripping::AllIndices);
    }
    let json = cli.json || api.settings().output_format == OutputFormat::Json;
    if json {
        api = api.with_output_format(OutputFormat::Json);
    }

    Ok(AppContext { api, json })
}

fn read_source(file: &str) -> Result<String> {
    if file == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(SiftError::Io)?;
        return Ok(buffer);
    }
    fs::read_to_string(file).map_err(SiftError::Io)
}

/// Writes `result.document` to `output` or stdout.
fn emit_document(result: &mut CmdResult, output: Option<&Path>) -> Result<()> {
    let document = result.document.take().unwrap_or_default();
    match output {
        Some(path) => {
            fs::write(path, document).map_err(SiftError::Io)?;
            result.add_message(CmdMessage::success(format!("Wrote {}", path.display())));
        }
        None => print!("{}", document),
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_extract(ctx: &AppContext, file: &str, output: Option<PathBuf>) -> Result<()> {
    let source = read_source(file)?;
    let mut result = ctx.api.extract(&source)?;
    emit_document(&mut result, output.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_matches(ctx: &AppContext, file: &str) -> Result<()> {
    let result = ctx.api.matches(&read_source(file)?)?;
    if ctx.json {
        print_json(&matches_to_json(&result.matches))?;
    } else {
        print!("{}", render_matches(&result.matches));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_fields(ctx: &AppContext, file: &str) -> Result<()> {
    let result = ctx.api.fields(&read_source(file)?)?;
    if ctx.json {
        print_json(&result.fields)?;
    } else {
        print!("{}", render_fields(&result.fields));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_flatten(ctx: &AppContext, file: &str, leaves: bool) -> Result<()> {
    let result = ctx.api.flatten(&read_source(file)?, leaves)?;
    if ctx.json {
        print_json(&result.entries)?;
    } else {
        print!("{}", render_entries(&result.entries));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(
    ctx: &AppContext,
    file: &str,
    assignments: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let source = read_source(file)?;
    let mut result = ctx.api.set(&source, assignments)?;
    emit_document(&mut result, output.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_kinds(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.kinds()?;
    if ctx.json {
        print_json(&result.kinds)?;
    } else {
        print!("{}", render_kinds(&result.kinds));
    }
    Ok(())
}

fn handle_config(dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = commands::config::run(dir, action)?;
    if key.is_none() {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }

    let mut status = Vec::new();
    for message in result.messages {
        match message.level {
            // a single looked-up value is the command's output
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Error => return Err(SiftError::Api(message.content)),
            _ => status.push(message),
        }
    }
    print_messages(&status);
    Ok(())
}
