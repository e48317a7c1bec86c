//! The explicit-handling rule: verdict dispatch per call expression

use must_handle_ast::{NodeId, NodeKind, SyntaxTree, TypeRef};
use tracing::{debug, trace};

use crate::{
    classify, find_enclosing_await, has_required_marker, is_in_protected_clause, CallExpr,
    CallShape, CallableKind, Diagnostic, DiagnosticKind, FixSuggestion, NodeRegistry, Rule,
};

/// Outcome of judging one call expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Unresolved target or unmarked callable; nothing to judge
    Skipped,
    Clean,
    Violation {
        kind: DiagnosticKind,
        /// Node whose enclosing statement a fix would wrap or edit:
        /// the call itself, or the `await` consuming it
        anchor: NodeId,
    },
}

/// Judge a single call expression
pub fn evaluate(tree: &SyntaxTree, call: &CallExpr<'_>) -> Verdict {
    let Some(decl) = call.target(tree) else {
        return Verdict::Skipped;
    };
    if !has_required_marker(decl) {
        return Verdict::Skipped;
    }

    let node = call.node();
    match classify(decl) {
        CallableKind::Synchronous => {
            if is_in_protected_clause(tree, node) {
                Verdict::Clean
            } else {
                Verdict::Violation {
                    kind: DiagnosticKind::SyncUnhandled,
                    anchor: node,
                }
            }
        }
        CallableKind::Asynchronous => match find_enclosing_await(tree, node) {
            None => Verdict::Violation {
                kind: DiagnosticKind::AsyncNotAwaited,
                anchor: node,
            },
            Some(awaiter) if !is_in_protected_clause(tree, awaiter) => Verdict::Violation {
                kind: DiagnosticKind::AsyncAwaitedUnhandled,
                anchor: awaiter,
            },
            Some(_) => Verdict::Clean,
        },
    }
}

/// Statement containing `node`, without leaving its callable body
pub fn enclosing_statement(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    for ancestor in tree.ancestors(node) {
        let kind = tree.kind(ancestor)?;
        if kind.is_callable_body() {
            return None;
        }
        if kind.is_statement() {
            return Some(ancestor);
        }
    }
    None
}

/// Marked callables must be called inside a try body, and asynchronous ones
/// must also be awaited directly there.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExplicitHandlingRule;

impl ExplicitHandlingRule {
    pub const NAME: &'static str = "explicit-handling";

    fn suggestion(
        tree: &SyntaxTree,
        kind: DiagnosticKind,
        call: NodeId,
        anchor: NodeId,
    ) -> Option<FixSuggestion> {
        match kind {
            DiagnosticKind::AsyncNotAwaited => Some(FixSuggestion::InsertAwait {
                offset: tree.span(call)?.start,
            }),
            DiagnosticKind::SyncUnhandled | DiagnosticKind::AsyncAwaitedUnhandled => {
                let statement = enclosing_statement(tree, anchor)?;
                Some(FixSuggestion::WrapInTry {
                    statement: tree.span(statement)?,
                })
            }
        }
    }
}

impl Rule for ExplicitHandlingRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register(&self, registry: &mut NodeRegistry) {
        registry.add(CallShape::MethodInvocation);
        registry.add(CallShape::FunctionInvocation);
    }

    fn check_call(&self, tree: &SyntaxTree, call: CallExpr<'_>) -> Option<Diagnostic> {
        let name = call.display_name(tree);
        if let Some(decl) = call.target(tree) {
            let returns = decl.return_type.as_ref().map(TypeRef::display);
            trace!(
                call = %name,
                module = %decl.module,
                returns = returns.as_deref().unwrap_or("<unresolved>"),
                "resolved target"
            );
        }
        match evaluate(tree, &call) {
            Verdict::Skipped => {
                trace!(call = %name, "not a marked callable");
                None
            }
            Verdict::Clean => {
                debug!(call = %name, "handled");
                None
            }
            Verdict::Violation { kind, anchor } => {
                let anchor_kind = tree.kind(anchor).map(NodeKind::label).unwrap_or("<missing>");
                debug!(
                    call = %name,
                    violation = kind.name(),
                    anchor = anchor_kind,
                    "unhandled call"
                );
                let mut diagnostic = Diagnostic::new(kind, call.span(tree), name);
                if let Some(fix) = Self::suggestion(tree, kind, call.node(), anchor) {
                    diagnostic = diagnostic.with_suggestion(fix);
                }
                Some(diagnostic)
            }
        }
    }
}
