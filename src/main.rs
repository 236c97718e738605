//! fcst - Inspect the formatter front-end's view of Fortran source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use fcst::process::inspect_file;
use fcst::{build_cli, parse_args, CliArgs, Config, Result};
use glob::Pattern;
use rayon::prelude::*;
use tracing::{debug, error, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use walkdir::WalkDir;

/// Fortran file extensions to process
const FORTRAN_EXTENSIONS: &[&str] = &[
    "f90", "f95", "f03", "f08", "f18", "f", "for", "ftn", "fpp", "F90", "F95", "F03", "F08", "F18",
    "F", "FOR", "FTN", "FPP",
];

fn main() -> Result<()> {
    let args = parse_args();
    init_logging(&args);

    if args.use_stdin() {
        // Nothing piped in and nothing named: show usage instead of blocking
        if args.inputs.is_empty() && io::stdin().is_terminal() {
            build_cli().print_help()?;
            return Ok(());
        }
        let config = build_config(&args, None)?;
        return process_stdin(&config);
    }

    // With an explicit config file every input shares it; otherwise each
    // file discovers its own
    let base_config = build_config(&args, None)?;
    let shared_config = args.config.is_some().then_some(&base_config);

    if let Some(jobs) = args.jobs.filter(|&jobs| jobs > 0) {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            warn!("failed to configure thread pool: {e}");
        }
    }

    let files = collect_files(&args, &base_config);
    if files.is_empty() {
        warn!("no Fortran files found to inspect");
        return Ok(());
    }

    let run = |path: &PathBuf| -> Result<Option<Vec<u8>>> {
        match shared_config {
            Some(config) => process_single_file(path, config),
            None => process_single_file(path, &build_config(&args, Some(path.as_path()))?),
        }
    };

    // Collecting keeps input order regardless of which worker finished first
    let results: Vec<Result<Option<Vec<u8>>>> = if args.jobs == Some(1) {
        files.iter().map(run).collect()
    } else {
        files.par_iter().map(run).collect()
    };

    let failures = write_results(&files, results)?;
    if failures > 0 {
        bail!("{failures} of {} files could not be inspected", files.len());
    }

    Ok(())
}

/// Install the stderr log subscriber
///
/// `--debug` and `--silent` pin the level; otherwise `RUST_LOG` is honoured,
/// falling back to warnings only.
fn init_logging(args: &CliArgs) {
    let filter = if args.silent {
        EnvFilter::new("off")
    } else if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("fcst: failed to install logger: {e}");
    }
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        debug!("using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        let discovered = Config::discover_config_files(&start);
        if discovered.is_empty() {
            debug!("no config files discovered for {}", start.display());
        }
        for file in &discovered {
            debug!("discovered config file {}", file.display());
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(tree_indent) = args.tree_indent {
        config.tree_indent = tree_indent;
    }
    if args.no_prev_kind {
        config.show_prev_kind = false;
    }
    config.exclude.extend(args.exclude.iter().cloned());
    config
        .fortran_extensions
        .extend(args.fortran_extensions.iter().cloned());

    debug!(?config, "effective configuration");

    if let Some(error) = config.validate() {
        bail!("invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
///
/// Named files are kept even without a Fortran extension; a path that does
/// not exist is kept too, so reading it reports the error.
fn collect_files(args: &CliArgs, config: &Config) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = config
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();
    let custom_extensions = &config.fortran_extensions;
    let wanted = |path: &Path| {
        path.is_file()
            && is_fortran_file(path, custom_extensions)
            && !is_excluded(path, &exclude_patterns)
    };

    let mut files = Vec::new();

    for input in &args.inputs {
        if !input.is_dir() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if args.recursive {
            // follow_links detects loops and reports them as errors, which are skipped
            for entry in WalkDir::new(input)
                .follow_links(true)
                .max_depth(256)
                .sort_by_file_name()
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                if wanted(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            match std::fs::read_dir(input) {
                Ok(entries) => {
                    let mut children: Vec<PathBuf> = entries
                        .filter_map(std::result::Result::ok)
                        .map(|entry| entry.path())
                        .filter(|path| wanted(path))
                        .collect();
                    children.sort();
                    files.extend(children);
                }
                Err(e) => warn!("cannot read directory {}: {e}", input.display()),
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        // Full path, then file name, then any single directory component
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
            || path.components().any(|component| match component {
                std::path::Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

/// Check if a file has a Fortran extension
/// Checks against both default extensions and any custom extensions provided
fn is_fortran_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FORTRAN_EXTENSIONS.contains(&ext)
                || custom_extensions
                    .iter()
                    .any(|custom| custom.strip_prefix('.').unwrap_or(custom) == ext)
        })
}

/// Print each file's dump in input order and count the failures
fn write_results(files: &[PathBuf], results: Vec<Result<Option<Vec<u8>>>>) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let with_headers = files.len() > 1;
    let mut failures = 0;
    let mut printed = 0;

    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(Some(dump)) => {
                if with_headers {
                    if printed > 0 {
                        writeln!(out)?;
                    }
                    writeln!(out, "==> {} <==", path.display())?;
                }
                out.write_all(&dump)?;
                printed += 1;
            }
            Ok(None) => {}
            Err(e) => {
                failures += 1;
                error!("{}: {e:#}", path.display());
            }
        }
    }

    out.flush()?;
    Ok(failures)
}

/// Inspect a single file, returning its dump or `None` when it is skipped
fn process_single_file(path: &Path, config: &Config) -> Result<Option<Vec<u8>>> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata =
        std::fs::metadata(path).with_context(|| format!("failed to read {}", path.display()))?;
    if metadata.len() > config.max_file_size {
        warn!(
            "skipping {} ({} bytes exceeds limit of {})",
            path.display(),
            metadata.len(),
            config.max_file_size
        );
        return Ok(None);
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut output = Vec::new();
    inspect_file(
        BufReader::new(file),
        &mut output,
        config,
        &path.display().to_string(),
    )?;
    debug!("inspected {}", path.display());

    Ok(Some(output))
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config) -> Result<()> {
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > config.max_file_size {
        bail!(
            "stdin input too large ({stdin_size} bytes exceeds limit of {})",
            config.max_file_size
        );
    }

    let mut output = Vec::new();
    inspect_file(
        BufReader::new(Cursor::new(stdin_contents)),
        &mut output,
        config,
        "<stdin>",
    )?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}
