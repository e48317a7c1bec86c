//! Programmatic construction of resolved trees
//!
//! Nodes are built bottom-up: children first, then the node that owns them.
//! Leaves receive fresh synthetic spans and composite nodes cover the spans
//! of their children, so every node ends up with a distinct, properly nested
//! span. Parent links are computed once by [`TreeBuilder::finish`].

use crate::{DeclId, Declaration, Node, NodeId, NodeKind, Span, SyntaxTree, TreeError};

#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    declarations: Vec<Declaration>,
    cursor: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration that calls can resolve to
    pub fn declare(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.declarations.len() as u32);
        self.declarations.push(decl);
        id
    }

    pub fn literal(&mut self, text: &str) -> NodeId {
        let span = self.fresh(text.len());
        self.push(NodeKind::Literal { text: text.to_string() }, span)
    }

    pub fn ident(&mut self, name: &str, binding: Option<DeclId>) -> NodeId {
        let span = self.fresh(name.len());
        self.push(
            NodeKind::Identifier {
                name: name.to_string(),
                binding,
            },
            span,
        )
    }

    pub fn args(&mut self, args: Vec<NodeId>) -> NodeId {
        let span = self.cover(&args);
        self.push(NodeKind::ArgumentList { args }, span)
    }

    pub fn named_arg(&mut self, name: &str, value: NodeId) -> NodeId {
        let span = self.cover(&[value]);
        self.push(
            NodeKind::NamedArgument {
                name: name.to_string(),
                value,
            },
            span,
        )
    }

    /// Unqualified named call: `method(args)`
    pub fn call(&mut self, method: &str, callee: Option<DeclId>, args: Vec<NodeId>) -> NodeId {
        let args = self.args(args);
        let name = self.fresh(method.len());
        let span = self.cover(&[args]).merge(name);
        self.push(
            NodeKind::MethodInvocation {
                target: None,
                method: method.to_string(),
                args,
                callee,
            },
            span,
        )
    }

    /// Qualified named call: `target.method(args)`
    pub fn method_call(
        &mut self,
        target: NodeId,
        method: &str,
        callee: Option<DeclId>,
        args: Vec<NodeId>,
    ) -> NodeId {
        let args = self.args(args);
        let name = self.fresh(method.len());
        let span = self.cover(&[target, args]).merge(name);
        self.push(
            NodeKind::MethodInvocation {
                target: Some(target),
                method: method.to_string(),
                args,
                callee,
            },
            span,
        )
    }

    /// Invocation of a callable expression: `function(args)`
    pub fn invoke(
        &mut self,
        function: NodeId,
        callee: Option<DeclId>,
        args: Vec<NodeId>,
    ) -> NodeId {
        let args = self.args(args);
        let span = self.cover(&[function, args]);
        self.push(NodeKind::FunctionInvocation { function, args, callee }, span)
    }

    pub fn await_expr(&mut self, operand: NodeId) -> NodeId {
        let span = self.cover(&[operand]);
        self.push(NodeKind::Await { operand }, span)
    }

    pub fn paren(&mut self, inner: NodeId) -> NodeId {
        let span = self.cover(&[inner]);
        self.push(NodeKind::Parenthesized { inner }, span)
    }

    pub fn binary(&mut self, op: &str, left: NodeId, right: NodeId) -> NodeId {
        let span = self.cover(&[left, right]);
        self.push(
            NodeKind::Binary {
                op: op.to_string(),
                left,
                right,
            },
            span,
        )
    }

    pub fn assign(&mut self, target: NodeId, value: NodeId) -> NodeId {
        let span = self.cover(&[target, value]);
        self.push(NodeKind::Assignment { target, value }, span)
    }

    pub fn conditional(
        &mut self,
        condition: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
    ) -> NodeId {
        let span = self.cover(&[condition, then_expr, else_expr]);
        self.push(
            NodeKind::Conditional {
                condition,
                then_expr,
                else_expr,
            },
            span,
        )
    }

    pub fn cast(&mut self, expr: NodeId, type_name: &str) -> NodeId {
        let span = self.cover(&[expr]);
        self.push(
            NodeKind::Cast {
                expr,
                type_name: type_name.to_string(),
            },
            span,
        )
    }

    pub fn non_null(&mut self, expr: NodeId) -> NodeId {
        let span = self.cover(&[expr]);
        self.push(NodeKind::NonNullAssert { expr }, span)
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        let span = self.cover(&[expr]);
        self.push(NodeKind::ExpressionStatement { expr }, span)
    }

    /// `var name = initializer;` as a statement holding a single binding
    pub fn let_stmt(&mut self, name: &str, initializer: Option<NodeId>) -> NodeId {
        let span = match initializer {
            Some(init) => self.cover(&[init]),
            None => self.fresh(name.len()),
        };
        let variable = self.push(
            NodeKind::VariableDeclaration {
                name: name.to_string(),
                initializer,
            },
            span,
        );
        let span = self.cover(&[variable]);
        self.push(
            NodeKind::VariableDeclarationStatement {
                variables: vec![variable],
            },
            span,
        )
    }

    pub fn return_stmt(&mut self, value: Option<NodeId>) -> NodeId {
        let span = match value {
            Some(value) => self.cover(&[value]),
            None => self.fresh("return".len()),
        };
        self.push(NodeKind::ReturnStatement { value }, span)
    }

    pub fn if_stmt(
        &mut self,
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    ) -> NodeId {
        let mut parts = vec![condition, then_branch];
        parts.extend(else_branch);
        let span = self.cover(&parts);
        self.push(
            NodeKind::IfStatement {
                condition,
                then_branch,
                else_branch,
            },
            span,
        )
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        let span = self.cover(&statements);
        self.push(NodeKind::Block { statements }, span)
    }

    pub fn catch_clause(&mut self, exception: Option<&str>, body: NodeId) -> NodeId {
        let span = self.cover(&[body]);
        self.push(
            NodeKind::CatchClause {
                exception: exception.map(str::to_string),
                body,
            },
            span,
        )
    }

    pub fn try_stmt(
        &mut self,
        body: NodeId,
        catch_clauses: Vec<NodeId>,
        finally_block: Option<NodeId>,
    ) -> NodeId {
        let mut parts = vec![body];
        parts.extend(catch_clauses.iter().copied());
        parts.extend(finally_block);
        let span = self.cover(&parts);
        self.push(
            NodeKind::TryStatement {
                body,
                catch_clauses,
                finally_block,
            },
            span,
        )
    }

    /// `try { statements } catch (_) {}`
    pub fn try_catch_all(&mut self, statements: Vec<NodeId>) -> NodeId {
        let body = self.block(statements);
        let recovery = self.block(vec![]);
        let clause = self.catch_clause(Some("_"), recovery);
        self.try_stmt(body, vec![clause], None)
    }

    pub fn function_body(&mut self, body: NodeId, is_async: bool) -> NodeId {
        let span = self.cover(&[body]);
        self.push(NodeKind::FunctionBody { is_async, body }, span)
    }

    /// Closure over a block of statements
    pub fn closure(&mut self, statements: Vec<NodeId>, is_async: bool) -> NodeId {
        let block = self.block(statements);
        let body = self.function_body(block, is_async);
        let span = self.cover(&[body]);
        self.push(NodeKind::FunctionExpression { body }, span)
    }

    /// Arrow closure: `() => expr`
    pub fn arrow_closure(&mut self, expr: NodeId, is_async: bool) -> NodeId {
        let body = self.function_body(expr, is_async);
        let span = self.cover(&[body]);
        self.push(NodeKind::FunctionExpression { body }, span)
    }

    /// Function declaration over a block of statements
    pub fn function(
        &mut self,
        name: &str,
        decl: Option<DeclId>,
        statements: Vec<NodeId>,
        is_async: bool,
    ) -> NodeId {
        let block = self.block(statements);
        let body = self.function_body(block, is_async);
        let span = self.cover(&[body]);
        self.push(
            NodeKind::FunctionDeclaration {
                name: name.to_string(),
                decl,
                body,
            },
            span,
        )
    }

    pub fn unit(&mut self, items: Vec<NodeId>) -> NodeId {
        let span = self.cover(&items);
        self.push(NodeKind::CompilationUnit { items }, span)
    }

    /// Link the tree rooted at `root`
    pub fn finish(self, root: NodeId) -> Result<SyntaxTree, TreeError> {
        SyntaxTree::new(root, self.nodes, self.declarations)
    }

    fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    fn fresh(&mut self, width: usize) -> Span {
        let start = self.cursor + 1;
        self.cursor = start + width.max(1);
        Span::new(start, self.cursor)
    }

    /// Span covering all `parts` with one byte of margin on each side
    fn cover(&mut self, parts: &[NodeId]) -> Span {
        let merged = parts
            .iter()
            .filter_map(|id| self.nodes.get(id.index()).map(|n| n.span))
            .reduce(Span::merge);
        match merged {
            Some(span) => {
                let span = Span::new(span.start.saturating_sub(1), span.end + 1);
                self.cursor = self.cursor.max(span.end);
                span
            }
            None => self.fresh(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeclKind;

    #[test]
    fn spans_nest_inside_parents() {
        let mut b = TreeBuilder::new();
        let f = b.declare(Declaration::new("f", DeclKind::Function));
        let call = b.call("f", Some(f), vec![]);
        let stmt = b.expr_stmt(call);
        let func = b.function("main", None, vec![stmt], false);
        let root = b.unit(vec![func]);
        let tree = b.finish(root).expect("builder output links");

        for id in tree.descendants() {
            if let Some(parent) = tree.parent(id) {
                let outer = tree.span(parent).unwrap();
                assert!(outer.contains(tree.span(id).unwrap()), "{:?} escapes its parent", id);
            }
        }
        assert!(tree.is_within(call, root));
    }

    #[test]
    fn let_stmt_wraps_a_variable_declaration() {
        let mut b = TreeBuilder::new();
        let init = b.literal("1");
        let stmt = b.let_stmt("x", Some(init));
        let tree = b.finish(stmt).unwrap();

        let var = tree.parent(init).unwrap();
        assert!(tree.kind(var).unwrap().is_variable_binding());
        assert_eq!(tree.parent(var), Some(stmt));
    }
}
