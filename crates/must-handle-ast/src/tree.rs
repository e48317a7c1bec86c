//! The resolved syntax tree and its parent index

use serde::{Deserialize, Serialize};
use crate::{DeclId, Declaration, Node, NodeId, NodeKind, Span, TreeError};

/// Source text the tree was built from, kept for rendering reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceText {
    pub path: String,
    pub text: String,
}

/// A resolved syntax tree for one source file.
///
/// Nodes and declarations live in flat arenas and refer to each other by
/// handle. Parent links are derived from child lists by [`SyntaxTree::link`];
/// whatever parent information the input carried is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxTree {
    #[serde(default)]
    pub source: Option<SourceText>,
    pub root: NodeId,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl SyntaxTree {
    /// Assemble and link a tree
    pub fn new(
        root: NodeId,
        nodes: Vec<Node>,
        declarations: Vec<Declaration>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self {
            source: None,
            root,
            nodes,
            declarations,
        };
        tree.link()?;
        Ok(tree)
    }

    /// Decode a tree from its JSON form and link it
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let mut tree: SyntaxTree = serde_json::from_str(json)?;
        tree.link()?;
        Ok(tree)
    }

    pub fn to_json_pretty(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_source(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.source = Some(SourceText {
            path: path.into(),
            text: text.into(),
        });
        self
    }

    /// Recompute parent links from the root, validating every handle.
    ///
    /// Nodes unreachable from the root keep no parent and are never visited
    /// by [`SyntaxTree::descendants`].
    pub fn link(&mut self) -> Result<(), TreeError> {
        if self.root.index() >= self.nodes.len() {
            return Err(TreeError::InvalidRoot { root: self.root });
        }
        for node in &mut self.nodes {
            node.parent = None;
        }

        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let (decl, children) = {
                let kind = &self.nodes[id.index()].kind;
                (declaration_ref(kind), kind.children())
            };
            if let Some(decl) = decl {
                if decl.0 as usize >= self.declarations.len() {
                    return Err(TreeError::InvalidDeclaration { decl, referrer: id });
                }
            }

            for child in children {
                if child.index() >= self.nodes.len() {
                    return Err(TreeError::InvalidNode { node: child, referrer: id });
                }
                // Any other back edge lands on a node that already has a parent.
                if child == self.root || child == id {
                    return Err(TreeError::Cycle { node: child });
                }
                if let Some(first) = self.nodes[child.index()].parent {
                    return Err(TreeError::SharedChild { child, first, second: id });
                }
                self.nodes[child.index()].parent = Some(id);
                stack.push(child);
            }
            self.check_callable_body(id)?;
        }
        Ok(())
    }

    /// Function declarations and closures must hold their body in a
    /// `function_body` node, which is where callable boundaries are drawn.
    fn check_callable_body(&self, id: NodeId) -> Result<(), TreeError> {
        let body = match &self.nodes[id.index()].kind {
            NodeKind::FunctionDeclaration { body, .. } | NodeKind::FunctionExpression { body } => {
                *body
            }
            _ => return Ok(()),
        };
        let kind = &self.nodes[body.index()].kind;
        if kind.is_callable_body() {
            Ok(())
        } else {
            Err(TreeError::InvalidBody {
                owner: id,
                body,
                found: kind.label(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.node(id).map(|n| n.span)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn declaration(&self, id: DeclId) -> Option<&Declaration> {
        self.declarations.get(id.0 as usize)
    }

    /// Strict ancestors of `id`, innermost first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
            remaining: self.nodes.len(),
        }
    }

    /// Whether `node` is `region` or lies somewhere beneath it
    pub fn is_within(&self, node: NodeId, region: NodeId) -> bool {
        node == region || self.ancestors(node).any(|a| a == region)
    }

    /// All nodes reachable from the root, in pre-order (source order)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Source text covered by a node, when the tree embeds its source
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        let span = self.span(id)?;
        self.source.as_ref()?.text.get(span.start..span.end)
    }
}

fn declaration_ref(kind: &NodeKind) -> Option<DeclId> {
    match kind {
        NodeKind::FunctionDeclaration { decl, .. } => *decl,
        NodeKind::MethodInvocation { callee, .. } | NodeKind::FunctionInvocation { callee, .. } => {
            *callee
        }
        NodeKind::Identifier { binding, .. } => *binding,
        _ => None,
    }
}

/// Iterator over the ancestors of a node
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
    /// Step budget; a tree mutated after linking may contain a cycle
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over the nodes reachable from the root
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let tree = self.tree;
        loop {
            let id = self.stack.pop()?;
            let Some(node) = tree.node(id) else {
                continue;
            };
            // Only follow edges confirmed by linking.
            self.stack.extend(
                node.kind
                    .children()
                    .into_iter()
                    .rev()
                    .filter(|c| tree.parent(*c) == Some(id)),
            );
            return Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(text: &str, start: usize) -> Node {
        Node {
            kind: NodeKind::Literal { text: text.to_string() },
            span: Span::new(start, start + text.len()),
            parent: None,
        }
    }

    fn block(statements: Vec<NodeId>) -> Node {
        Node {
            kind: NodeKind::Block { statements },
            span: Span::dummy(),
            parent: None,
        }
    }

    #[test]
    fn link_assigns_parents() {
        let tree = SyntaxTree::new(
            NodeId(2),
            vec![leaf("a", 0), leaf("b", 2), block(vec![NodeId(0), NodeId(1)])],
            vec![],
        )
        .expect("valid tree");

        assert_eq!(tree.parent(NodeId(0)), Some(NodeId(2)));
        assert_eq!(tree.parent(NodeId(2)), None);
        assert!(tree.is_within(NodeId(1), NodeId(2)));
        assert!(!tree.is_within(NodeId(2), NodeId(1)));
        assert_eq!(tree.descendants().collect::<Vec<_>>(), vec![NodeId(2), NodeId(0), NodeId(1)]);
    }

    #[test]
    fn link_rejects_dangling_child() {
        let err = SyntaxTree::new(NodeId(0), vec![block(vec![NodeId(7)])], vec![]).unwrap_err();
        assert!(matches!(err, TreeError::InvalidNode { node: NodeId(7), .. }));
        assert_eq!(err.code(), "E-TREE-002");
    }

    #[test]
    fn link_rejects_shared_child() {
        let err = SyntaxTree::new(
            NodeId(3),
            vec![
                leaf("a", 0),
                block(vec![NodeId(0)]),
                block(vec![NodeId(0)]),
                block(vec![NodeId(1), NodeId(2)]),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, TreeError::SharedChild { child: NodeId(0), .. }));
    }

    #[test]
    fn link_rejects_cycle() {
        let err = SyntaxTree::new(
            NodeId(0),
            vec![block(vec![NodeId(1)]), block(vec![NodeId(0)])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, TreeError::Cycle { node: NodeId(0) }));
    }

    #[test]
    fn link_rejects_cycle_below_root() {
        let err = SyntaxTree::new(
            NodeId(0),
            vec![block(vec![NodeId(1)]), block(vec![NodeId(2)]), block(vec![NodeId(1)])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, TreeError::SharedChild { child: NodeId(1), .. }));
    }

    #[test]
    fn link_rejects_closure_without_function_body() {
        let closure = Node {
            kind: NodeKind::FunctionExpression { body: NodeId(1) },
            span: Span::new(0, 10),
            parent: None,
        };
        let err = SyntaxTree::new(NodeId(0), vec![closure, block(vec![])], vec![]).unwrap_err();
        assert!(matches!(
            err,
            TreeError::InvalidBody { owner: NodeId(0), body: NodeId(1), found: "block" }
        ));
        assert_eq!(err.code(), "E-TREE-007");
        assert!(err.to_string().contains("found block"));
    }

    #[test]
    fn link_rejects_missing_declaration() {
        let call = Node {
            kind: NodeKind::Identifier {
                name: "f".into(),
                binding: Some(DeclId(3)),
            },
            span: Span::new(0, 1),
            parent: None,
        };
        let err = SyntaxTree::new(NodeId(0), vec![call], vec![]).unwrap_err();
        assert!(matches!(err, TreeError::InvalidDeclaration { decl: DeclId(3), .. }));
    }

    #[test]
    fn json_input_parents_are_ignored() {
        let json = r#"{
            "root": 1,
            "nodes": [
                { "kind": "literal", "text": "1", "span": { "start": 0, "end": 1 } },
                { "kind": "block", "statements": [0], "span": { "start": 0, "end": 3 } }
            ]
        }"#;
        let tree = SyntaxTree::from_json(json).expect("valid json tree");
        assert_eq!(tree.parent(NodeId(0)), Some(NodeId(1)));
        assert!(tree.declarations.is_empty());
    }

    #[test]
    fn text_of_reads_embedded_source() {
        let tree = SyntaxTree::new(NodeId(0), vec![leaf("abc", 2)], vec![])
            .unwrap()
            .with_source("a.src", "xxabcxx");
        assert_eq!(tree.text_of(NodeId(0)), Some("abc"));
    }
}
