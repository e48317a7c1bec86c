//! Whether a call is the direct operand of an `await`

use must_handle_ast::{NodeId, NodeKind, SyntaxTree};

/// Find the `await` that directly consumes `node`.
///
/// The walk climbs through expressions and argument positions and gives up
/// at the first statement, variable binding or callable body. A future
/// stored in a variable and awaited later is therefore not considered
/// awaited at its call site.
pub fn find_enclosing_await(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    for ancestor in tree.ancestors(node) {
        let kind = tree.kind(ancestor)?;
        if let NodeKind::Await { .. } = kind {
            return Some(ancestor);
        }
        if kind.is_statement() || kind.is_callable_body() || kind.is_variable_binding() {
            return None;
        }
        if !(kind.is_expression() || kind.is_argument_position()) {
            return None;
        }
    }
    None
}
