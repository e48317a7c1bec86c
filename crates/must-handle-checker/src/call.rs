//! The two call-expression shapes and their shared target resolution

use must_handle_ast::{DeclId, Declaration, NodeId, NodeKind, Span, SyntaxTree};

/// Node kinds a rule can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    /// `f()`, `obj.m()`
    MethodInvocation,
    /// `callback()`, `(pick())()`
    FunctionInvocation,
}

impl CallShape {
    pub fn of(kind: &NodeKind) -> Option<Self> {
        match kind {
            NodeKind::MethodInvocation { .. } => Some(CallShape::MethodInvocation),
            NodeKind::FunctionInvocation { .. } => Some(CallShape::FunctionInvocation),
            _ => None,
        }
    }
}

/// A view of one call expression in a tree
#[derive(Debug, Clone, Copy)]
pub enum CallExpr<'t> {
    Method {
        node: NodeId,
        name: &'t str,
        callee: Option<DeclId>,
    },
    Function {
        node: NodeId,
        function: NodeId,
        callee: Option<DeclId>,
    },
}

impl<'t> CallExpr<'t> {
    pub fn from_node(tree: &'t SyntaxTree, node: NodeId) -> Option<Self> {
        match tree.kind(node)? {
            NodeKind::MethodInvocation { method, callee, .. } => Some(CallExpr::Method {
                node,
                name: method.as_str(),
                callee: *callee,
            }),
            NodeKind::FunctionInvocation { function, callee, .. } => Some(CallExpr::Function {
                node,
                function: *function,
                callee: *callee,
            }),
            _ => None,
        }
    }

    pub fn node(&self) -> NodeId {
        match self {
            CallExpr::Method { node, .. } | CallExpr::Function { node, .. } => *node,
        }
    }

    pub fn shape(&self) -> CallShape {
        match self {
            CallExpr::Method { .. } => CallShape::MethodInvocation,
            CallExpr::Function { .. } => CallShape::FunctionInvocation,
        }
    }

    /// The resolved declaration this call targets, if any
    pub fn target(&self, tree: &'t SyntaxTree) -> Option<&'t Declaration> {
        let callee = match self {
            CallExpr::Method { callee, .. } | CallExpr::Function { callee, .. } => (*callee)?,
        };
        tree.declaration(callee)
    }

    pub fn span(&self, tree: &SyntaxTree) -> Span {
        tree.span(self.node()).unwrap_or_default()
    }

    /// Name shown to the user: the method name, or for a callable expression
    /// the identifier being invoked, then its source text, then the target's name
    pub fn display_name(&self, tree: &'t SyntaxTree) -> String {
        match self {
            CallExpr::Method { name, .. } => name.to_string(),
            CallExpr::Function { function, .. } => match tree.kind(*function) {
                Some(NodeKind::Identifier { name, .. }) => name.clone(),
                _ => tree
                    .text_of(*function)
                    .map(str::to_string)
                    .or_else(|| self.target(tree).map(|d| d.name.clone()))
                    .unwrap_or_else(|| "<callable>".to_string()),
            },
        }
    }
}
