//! Whether a node sits inside the protected clause of a try statement

use must_handle_ast::{NodeId, NodeKind, SyntaxTree};

/// Walk outward from `node` to the first enclosing try statement and report
/// whether `node` lies in its body (not a catch clause or finally block).
///
/// The walk stops at the innermost callable body: a try in an enclosing
/// function never protects a call made inside a closure or local function.
/// Only the first try found counts, so a handled call in a try nested inside
/// another try's catch clause is still handled.
pub fn is_in_protected_clause(tree: &SyntaxTree, node: NodeId) -> bool {
    enclosing_try(tree, node).is_some_and(|body| tree.is_within(node, body))
}

/// Body of the first try statement enclosing `node` within its callable
fn enclosing_try(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    for ancestor in tree.ancestors(node) {
        match tree.kind(ancestor)? {
            NodeKind::TryStatement { body, .. } => return Some(*body),
            kind if kind.is_callable_body() => return None,
            _ => {}
        }
    }
    None
}
