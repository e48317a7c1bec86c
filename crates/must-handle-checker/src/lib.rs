//! must-handle checker
//!
//! Enforces the explicit-handling contract on call sites. A callable
//! annotated with the must-handle marker may only be called inside the
//! body of a try statement; if it is asynchronous, its result must also be
//! awaited directly, and that `await` must sit inside the try body.
//!
//! The checker works on a tree that is already resolved. Anything it cannot
//! resolve (call targets, metadata, result types) is silently skipped
//! rather than reported.

mod marker;
mod classify;
mod containment;
mod await_link;
mod call;
mod rule;
mod host;
mod diagnostics;

pub use marker::*;
pub use classify::*;
pub use containment::*;
pub use await_link::*;
pub use call::*;
pub use rule::*;
pub use host::*;
pub use diagnostics::*;

use must_handle_ast::SyntaxTree;

/// Check a tree with default options and return its diagnostics
pub fn check(tree: &SyntaxTree) -> Vec<Diagnostic> {
    Analyzer::default().analyze(tree)
}
