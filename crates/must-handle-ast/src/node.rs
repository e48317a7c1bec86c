//! Syntax nodes of the resolved tree

use serde::{Deserialize, Serialize};
use crate::{DeclId, Span};

/// Handle of a node inside a [`crate::SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A syntax node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub span: Span,
    /// Computed by [`crate::SyntaxTree::link`], never read from input
    #[serde(skip)]
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of a source file
    CompilationUnit { items: Vec<NodeId> },

    /// Top-level function or method: `void run() { ... }`
    FunctionDeclaration {
        name: String,
        #[serde(default)]
        decl: Option<DeclId>,
        body: NodeId,
    },

    /// Body of any callable; wraps either a block or an arrow expression
    FunctionBody {
        #[serde(default)]
        is_async: bool,
        body: NodeId,
    },

    /// Closure: `() async { ... }`
    FunctionExpression { body: NodeId },

    /// `{ stmt; stmt; }`
    Block { statements: Vec<NodeId> },

    /// `f();`
    ExpressionStatement { expr: NodeId },

    /// `var a = f(), b;`
    VariableDeclarationStatement { variables: Vec<NodeId> },

    /// A single binding inside a variable declaration statement
    VariableDeclaration {
        name: String,
        #[serde(default)]
        initializer: Option<NodeId>,
    },

    /// `return f();`
    ReturnStatement {
        #[serde(default)]
        value: Option<NodeId>,
    },

    /// `if (c) { ... } else { ... }`
    IfStatement {
        condition: NodeId,
        then_branch: NodeId,
        #[serde(default)]
        else_branch: Option<NodeId>,
    },

    /// `try { ... } catch (e) { ... } finally { ... }`
    TryStatement {
        body: NodeId,
        #[serde(default)]
        catch_clauses: Vec<NodeId>,
        #[serde(default)]
        finally_block: Option<NodeId>,
    },

    /// `on E catch (e) { ... }`
    CatchClause {
        #[serde(default)]
        exception: Option<String>,
        body: NodeId,
    },

    /// `await expr`
    Await { operand: NodeId },

    /// `(expr)`
    Parenthesized { inner: NodeId },

    /// `(a, b, name: c)`
    ArgumentList { args: Vec<NodeId> },

    /// `name: expr` inside an argument list
    NamedArgument { name: String, value: NodeId },

    /// Named method call: `f(x)`, `obj.m(x)`
    MethodInvocation {
        #[serde(default)]
        target: Option<NodeId>,
        method: String,
        args: NodeId,
        /// Resolved target declaration; `None` when unresolved
        #[serde(default)]
        callee: Option<DeclId>,
    },

    /// Invocation of an arbitrary callable expression: `handler(x)`, `(getFn())()`
    FunctionInvocation {
        function: NodeId,
        args: NodeId,
        #[serde(default)]
        callee: Option<DeclId>,
    },

    Identifier {
        name: String,
        #[serde(default)]
        binding: Option<DeclId>,
    },

    Literal { text: String },

    Binary {
        op: String,
        left: NodeId,
        right: NodeId,
    },

    /// `target = value`
    Assignment { target: NodeId, value: NodeId },

    /// `c ? a : b`
    Conditional {
        condition: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
    },

    /// `expr as T`
    Cast { expr: NodeId, type_name: String },

    /// `expr!`
    NonNullAssert { expr: NodeId },
}

impl NodeKind {
    /// Direct children in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::CompilationUnit { items } => items.clone(),
            NodeKind::FunctionDeclaration { body, .. } => vec![*body],
            NodeKind::FunctionBody { body, .. } => vec![*body],
            NodeKind::FunctionExpression { body } => vec![*body],
            NodeKind::Block { statements } => statements.clone(),
            NodeKind::ExpressionStatement { expr } => vec![*expr],
            NodeKind::VariableDeclarationStatement { variables } => variables.clone(),
            NodeKind::VariableDeclaration { initializer, .. } => {
                initializer.iter().copied().collect()
            }
            NodeKind::ReturnStatement { value } => value.iter().copied().collect(),
            NodeKind::IfStatement { condition, then_branch, else_branch } => {
                let mut out = vec![*condition, *then_branch];
                out.extend(else_branch.iter().copied());
                out
            }
            NodeKind::TryStatement { body, catch_clauses, finally_block } => {
                let mut out = vec![*body];
                out.extend(catch_clauses.iter().copied());
                out.extend(finally_block.iter().copied());
                out
            }
            NodeKind::CatchClause { body, .. } => vec![*body],
            NodeKind::Await { operand } => vec![*operand],
            NodeKind::Parenthesized { inner } => vec![*inner],
            NodeKind::ArgumentList { args } => args.clone(),
            NodeKind::NamedArgument { value, .. } => vec![*value],
            NodeKind::MethodInvocation { target, args, .. } => {
                let mut out: Vec<NodeId> = target.iter().copied().collect();
                out.push(*args);
                out
            }
            NodeKind::FunctionInvocation { function, args, .. } => vec![*function, *args],
            NodeKind::Identifier { .. } | NodeKind::Literal { .. } => vec![],
            NodeKind::Binary { left, right, .. } => vec![*left, *right],
            NodeKind::Assignment { target, value } => vec![*target, *value],
            NodeKind::Conditional { condition, then_expr, else_expr } => {
                vec![*condition, *then_expr, *else_expr]
            }
            NodeKind::Cast { expr, .. } | NodeKind::NonNullAssert { expr } => vec![*expr],
        }
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::Block { .. }
                | NodeKind::ExpressionStatement { .. }
                | NodeKind::VariableDeclarationStatement { .. }
                | NodeKind::ReturnStatement { .. }
                | NodeKind::IfStatement { .. }
                | NodeKind::TryStatement { .. }
        )
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionExpression { .. }
                | NodeKind::Await { .. }
                | NodeKind::Parenthesized { .. }
                | NodeKind::NamedArgument { .. }
                | NodeKind::MethodInvocation { .. }
                | NodeKind::FunctionInvocation { .. }
                | NodeKind::Identifier { .. }
                | NodeKind::Literal { .. }
                | NodeKind::Binary { .. }
                | NodeKind::Assignment { .. }
                | NodeKind::Conditional { .. }
                | NodeKind::Cast { .. }
                | NodeKind::NonNullAssert { .. }
        )
    }

    pub fn is_callable_body(&self) -> bool {
        matches!(self, NodeKind::FunctionBody { .. })
    }

    pub fn is_variable_binding(&self) -> bool {
        matches!(self, NodeKind::VariableDeclaration { .. })
    }

    /// Argument list or a named slot inside one
    pub fn is_argument_position(&self) -> bool {
        matches!(self, NodeKind::ArgumentList { .. } | NodeKind::NamedArgument { .. })
    }

    /// Short lowercase label, used in logs and error messages
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::CompilationUnit { .. } => "compilation unit",
            NodeKind::FunctionDeclaration { .. } => "function declaration",
            NodeKind::FunctionBody { .. } => "function body",
            NodeKind::FunctionExpression { .. } => "function expression",
            NodeKind::Block { .. } => "block",
            NodeKind::ExpressionStatement { .. } => "expression statement",
            NodeKind::VariableDeclarationStatement { .. } => "variable declaration statement",
            NodeKind::VariableDeclaration { .. } => "variable declaration",
            NodeKind::ReturnStatement { .. } => "return statement",
            NodeKind::IfStatement { .. } => "if statement",
            NodeKind::TryStatement { .. } => "try statement",
            NodeKind::CatchClause { .. } => "catch clause",
            NodeKind::Await { .. } => "await",
            NodeKind::Parenthesized { .. } => "parenthesized expression",
            NodeKind::ArgumentList { .. } => "argument list",
            NodeKind::NamedArgument { .. } => "named argument",
            NodeKind::MethodInvocation { .. } => "method invocation",
            NodeKind::FunctionInvocation { .. } => "function invocation",
            NodeKind::Identifier { .. } => "identifier",
            NodeKind::Literal { .. } => "literal",
            NodeKind::Binary { .. } => "binary expression",
            NodeKind::Assignment { .. } => "assignment",
            NodeKind::Conditional { .. } => "conditional expression",
            NodeKind::Cast { .. } => "cast",
            NodeKind::NonNullAssert { .. } => "non-null assertion",
        }
    }
}
