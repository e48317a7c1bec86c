//! Errors raised while loading or linking a resolved tree

use thiserror::Error;
use crate::{DeclId, NodeId};

#[derive(Debug, Error)]
pub enum TreeError {
    /// E-TREE-001
    #[error("root node {root:?} is out of range")]
    InvalidRoot { root: NodeId },

    /// E-TREE-002
    #[error("node {referrer:?} refers to missing node {node:?}")]
    InvalidNode { node: NodeId, referrer: NodeId },

    /// E-TREE-003
    #[error("node {referrer:?} refers to missing declaration {decl:?}")]
    InvalidDeclaration { decl: DeclId, referrer: NodeId },

    /// E-TREE-004
    #[error("node {child:?} has two parents: {first:?} and {second:?}")]
    SharedChild {
        child: NodeId,
        first: NodeId,
        second: NodeId,
    },

    /// E-TREE-005
    #[error("node {node:?} is its own ancestor")]
    Cycle { node: NodeId },

    /// E-TREE-006
    #[error("malformed tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// E-TREE-007
    #[error("callable {owner:?} has body {body:?}: expected function body, found {found}")]
    InvalidBody {
        owner: NodeId,
        body: NodeId,
        found: &'static str,
    },
}

impl TreeError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            TreeError::InvalidRoot { .. } => "E-TREE-001",
            TreeError::InvalidNode { .. } => "E-TREE-002",
            TreeError::InvalidDeclaration { .. } => "E-TREE-003",
            TreeError::SharedChild { .. } => "E-TREE-004",
            TreeError::Cycle { .. } => "E-TREE-005",
            TreeError::Json(_) => "E-TREE-006",
            TreeError::InvalidBody { .. } => "E-TREE-007",
        }
    }
}
