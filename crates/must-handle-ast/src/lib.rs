//! must-handle AST - Resolved syntax tree consumed by the checker
//!
//! The tree is produced by a host front end that has already resolved
//! declarations and static types. This crate only models it: node arenas,
//! parent links, declarations with their metadata, and resolved types.

mod span;
mod types;
mod decl;
mod node;
mod tree;
mod builder;
mod error;

pub use span::*;
pub use types::*;
pub use decl::*;
pub use node::*;
pub use tree::*;
pub use builder::*;
pub use error::*;
