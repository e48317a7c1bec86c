//! CLI errors

use std::path::PathBuf;

use must_handle_ast::TreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid tree {}: {} {source}", path.display(), source.code())]
    Tree {
        path: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("unknown diagnostic `{0}` (see `must-handle rules`)")]
    UnknownRule(String),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}
