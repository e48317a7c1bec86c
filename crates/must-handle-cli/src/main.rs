//! must-handle CLI - runs the explicit-handling checker over resolved trees

mod config;
mod error;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use must_handle_ast::SyntaxTree;
use must_handle_checker::{Analyzer, Diagnostic, DiagnosticKind, DiagnosticRecord};

use crate::config::Config;
use crate::error::CliError;
use crate::report::print_text;

#[derive(Parser)]
#[command(name = "must-handle")]
#[command(
    about = "Checks that must-handle callables are awaited and called inside try",
    long_about = None
)]
struct Cli {
    /// Log analysis progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check resolved tree files (JSON) or directories of them
    Check {
        /// Tree files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Config file (default: nearest must-handle.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the diagnostics this checker can report
    Rules {
        /// Show one diagnostic, by name or code
        name: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct FileReport {
    file: String,
    diagnostics: Vec<DiagnosticRecord>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { paths, format, config } => cmd_check(&paths, format, config.as_deref()),
        Commands::Rules { name } => cmd_rules(name.as_deref()),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<Config, CliError> {
    if let Some(path) = explicit {
        info!(config = %path.display(), "using config");
        return Config::load(path);
    }
    let cwd = std::env::current_dir().map_err(|source| CliError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    match Config::discover(&cwd)? {
        Some((path, config)) => {
            info!(config = %path.display(), "using config");
            Ok(config)
        }
        None => {
            debug!("no config found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Expand directories into the `.json` files beneath them, sorted
fn collect_tree_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|source| CliError::Walk {
                    path: path.clone(),
                    source,
                })?;
                let is_json = entry.path().extension().and_then(|e| e.to_str()) == Some("json");
                if entry.file_type().is_file() && is_json {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.retain(|file| {
        let excluded = config.is_excluded(file);
        if excluded {
            debug!(file = %file.display(), "excluded by config");
        }
        !excluded
    });
    Ok(files)
}

fn load_tree(path: &Path) -> Result<SyntaxTree, CliError> {
    let json = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SyntaxTree::from_json(&json).map_err(|source| CliError::Tree {
        path: path.to_path_buf(),
        source,
    })
}

fn cmd_check(paths: &[PathBuf], format: Format, config: Option<&Path>) -> Result<bool, CliError> {
    let config = load_config(config)?;
    let analyzer = Analyzer::new(config.analysis_options());
    if !analyzer.options().enabled {
        info!("explicit-handling disabled by config");
    }
    let files = collect_tree_files(paths, &config)?;

    let mut all_ok = true;
    let mut reports = Vec::new();

    for file in &files {
        let tree = match load_tree(file) {
            Ok(tree) => tree,
            Err(e) => {
                warn!(file = %file.display(), "skipping unreadable tree");
                eprintln!("✗ {}", e);
                all_ok = false;
                continue;
            }
        };

        let diagnostics = analyzer.analyze(&tree);
        if !diagnostics.is_empty() {
            all_ok = false;
        }

        match format {
            Format::Text => print_text(file, &tree, &diagnostics),
            Format::Json => reports.push(FileReport {
                file: file.display().to_string(),
                diagnostics: diagnostics.iter().map(Diagnostic::to_record).collect(),
            }),
        }
    }

    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(all_ok)
}

fn cmd_rules(name: Option<&str>) -> Result<bool, CliError> {
    let kinds = match name {
        Some(name) => {
            let kind = DiagnosticKind::from_name(name)
                .ok_or_else(|| CliError::UnknownRule(name.to_string()))?;
            vec![kind]
        }
        None => DiagnosticKind::ALL.to_vec(),
    };
    for kind in kinds {
        println!("{} {:<24} {}", kind.code(), kind.name(), kind.description());
    }
    Ok(true)
}
