//! must-handle - explicit-handling checker for resolved syntax trees
//!
//! This is the root workspace crate that hosts end-to-end tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use must_handle_ast as ast;
pub use must_handle_checker as checker;
