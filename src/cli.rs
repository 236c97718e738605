//! Command-line interface for fcst.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::config::DumpFormat;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to inspect
    pub inputs: Vec<PathBuf>,

    /// Output format
    pub format: Option<DumpFormat>,

    /// Spaces per depth level in the tree dump
    pub tree_indent: Option<usize>,

    /// Hide the previous significant kind in the nodes dump
    pub no_prev_kind: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom Fortran file extensions (in addition to defaults)
    pub fortran_extensions: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (no diagnostics)
    pub silent: bool,
}

impl CliArgs {
    /// True when input comes from stdin: no inputs, or a single `-`
    #[must_use]
    pub fn use_stdin(&self) -> bool {
        self.inputs.is_empty() || (self.inputs.len() == 1 && self.inputs[0].as_os_str() == "-")
    }
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("fcst")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect how Fortran source is tokenized, classified and nested")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to inspect (none or '-' reads stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .short('F')
                .long("format")
                .help("What to print: tokens, lines, nodes or tree [default: nodes]")
                .value_name("FORMAT")
                .value_parser(|s: &str| s.parse::<DumpFormat>().map_err(|e| e.to_string())),
        )
        .arg(
            Arg::new("tree-indent")
                .long("tree-indent")
                .help("Spaces per depth level in the tree dump [default: 2]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("no-prev-kind")
                .long("no-prev-kind")
                .help("Don't print the previous significant kind in the nodes dump")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively inspect directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("fortran")
                .short('f')
                .long("fortran")
                .help("Additional Fortran file extension (can be repeated, e.g., -f inc -f INC)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug logging (config discovery, stage counts, dropped block ends)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no diagnostics on stderr)")
                .action(ArgAction::SetTrue)
                .conflicts_with("debug"),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    let strings = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default()
    };

    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        format: matches.get_one::<DumpFormat>("format").copied(),
        tree_indent: matches.get_one::<usize>("tree-indent").copied(),
        no_prev_kind: matches.get_flag("no-prev-kind"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: strings("exclude"),
        fortran_extensions: strings("fortran"),
        jobs: matches.get_one::<usize>("jobs").copied(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
    }
}
