use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "yamlsift",
    bin_name = "yamlsift",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Schema-guided field extraction for YAML manifests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Strip every [N] index in the fallback scan, not only [0] and [1]
    #[arg(long, global = true, help_heading = "Options")]
    pub strip_all_indices: bool,

    /// Keyword schema file replacing the configured one
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub schema: Option<PathBuf>,

    /// Emit JSON instead of YAML
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Document,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Document => "Document Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "extract" | "matches" | "fields" | "flatten" | "set" => Some(CommandGroup::Document),
            "kinds" | "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Document, CommandGroup::Misc]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("yamlsift {version}\n"));
    output.push_str("Schema-guided field extraction for YAML manifests\n");
    output.push('\n');
    output.push_str("Usage: yamlsift [OPTIONS] <COMMAND>\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose            Verbose output (debug logging on stderr)\n");
    output.push_str("      --strip-all-indices  Strip every [N] index in the fallback scan\n");
    output.push_str("      --schema <FILE>      Keyword schema file replacing the configured one\n");
    output.push_str("      --json               Emit JSON instead of YAML\n");
    output.push_str("  -h, --help               Print help\n");
    output.push_str("  -V, --version            Print version\n");
    output.push('\n');
    output.push_str("FILE arguments accept '-' for stdin.\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints clap's help for the subcommand in `command`, or the grouped help.
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(c) => c.name(),
        None => {
            print_grouped_help();
            return;
        }
    };

    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep only schema fields and passthrough sections
    #[command(alias = "x", display_order = 1)]
    Extract {
        /// Manifest to read ('-' for stdin)
        file: String,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// List keyword matches with their paths and values
    #[command(alias = "m", display_order = 2)]
    Matches {
        /// Manifest to read ('-' for stdin)
        file: String,
    },

    /// Describe editable form fields for the matches
    #[command(display_order = 3)]
    Fields {
        /// Manifest to read ('-' for stdin)
        file: String,
    },

    /// List every path in the document
    #[command(display_order = 4)]
    Flatten {
        /// Manifest to read ('-' for stdin)
        file: String,

        /// Only scalar values
        #[arg(long)]
        leaves: bool,
    },

    /// Apply path=value updates to a document
    #[command(display_order = 5)]
    Set {
        /// Manifest to read ('-' for stdin)
        file: String,

        /// Assignments such as spec.replicas=3
        #[arg(required = true, num_args = 1.., value_name = "PATH=VALUE")]
        assignments: Vec<String>,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// List kinds known to the schema
    #[command(display_order = 10)]
    Kinds,

    /// Get or set configuration
    #[command(display_order = 11)]
    Config {
        /// Configuration key (index_stripping, schema_path, output_format)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Extract { .. } => "extract",
            Commands::Matches { .. } => "matches",
            Commands::Fields { .. } => "fields",
            Commands::Flatten { .. } => "flatten",
            Commands::Set { .. } => "set",
            Commands::Kinds => "kinds",
            Commands::Config { .. } => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("yamlsift").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["extract", "-", "--json", "--strip-all-indices", "-v"]);
        assert!(cli.json && cli.strip_all_indices && cli.verbose);
        match cli.command {
            Some(Commands::Extract { file, output }) => {
                assert_eq!(file, "-");
                assert!(output.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn set_takes_many_assignments() {
        let cli = parse(&["set", "a.yaml", "a=1", "b.c=2", "-o", "out.yaml"]);
        match cli.command {
            Some(Commands::Set {
                assignments,
                output,
                ..
            }) => {
                assert_eq!(assignments, vec!["a=1", "b.c=2"]);
                assert_eq!(output, Some(PathBuf::from("out.yaml")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn set_requires_an_assignment() {
        assert!(Cli::try_parse_from(["yamlsift", "set", "a.yaml"]).is_err());
    }

    #[test]
    fn grouped_help_lists_every_command() {
        let help = get_grouped_help();
        for name in ["extract", "matches", "fields", "flatten", "set", "kinds", "config"] {
            assert!(help.contains(name), "missing {}", name);
        }
    }
}
