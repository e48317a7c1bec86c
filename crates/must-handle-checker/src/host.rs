//! Host integration: node subscriptions and the per-tree analysis walk

use std::collections::HashSet;

use must_handle_ast::SyntaxTree;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::{CallExpr, CallShape, Diagnostic, ExplicitHandlingRule};

/// A rule that inspects call expressions
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Subscribe to the call shapes this rule wants to see
    fn register(&self, registry: &mut NodeRegistry);

    /// Judge one call; at most one diagnostic per call
    fn check_call(&self, tree: &SyntaxTree, call: CallExpr<'_>) -> Option<Diagnostic>;
}

/// Call shapes a rule subscribed to
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    shapes: HashSet<CallShape>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: CallShape) {
        self.shapes.insert(shape);
    }

    pub fn wants(&self, shape: CallShape) -> bool {
        self.shapes.contains(&shape)
    }
}

/// Per-project switches owned by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Run the explicit-handling rule at all
    pub enabled: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Runs registered rules over resolved trees
pub struct Analyzer {
    rules: Vec<(Box<dyn Rule>, NodeRegistry)>,
    options: AnalysisOptions,
}

impl Analyzer {
    /// Analyzer with the explicit-handling rule registered
    pub fn new(options: AnalysisOptions) -> Self {
        let mut analyzer = Self::empty(options);
        analyzer.register(Box::new(ExplicitHandlingRule));
        analyzer
    }

    pub fn empty(options: AnalysisOptions) -> Self {
        Self {
            rules: Vec::new(),
            options,
        }
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let mut registry = NodeRegistry::new();
        rule.register(&mut registry);
        self.rules.push((rule, registry));
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze one tree. Diagnostics come back ordered by position.
    pub fn analyze(&self, tree: &SyntaxTree) -> Vec<Diagnostic> {
        let file = tree.source.as_ref().map(|s| s.path.as_str()).unwrap_or("<tree>");
        let _span = debug_span!("analyze", file).entered();

        if !self.options.enabled {
            debug!("explicit-handling disabled, skipping");
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for id in tree.descendants() {
            let Some(shape) = tree.kind(id).and_then(CallShape::of) else {
                continue;
            };
            let Some(call) = CallExpr::from_node(tree, id) else {
                continue;
            };
            for (rule, registry) in &self.rules {
                if !registry.wants(shape) {
                    continue;
                }
                if let Some(diagnostic) = rule.check_call(tree, call) {
                    debug!(rule = rule.name(), code = diagnostic.code(), "reported");
                    diagnostics.push(diagnostic);
                }
            }
        }

        diagnostics.sort_by(|a, b| {
            (a.span.start, a.span.end, a.kind).cmp(&(b.span.start, b.span.end, b.kind))
        });
        debug!(count = diagnostics.len(), "analysis finished");
        diagnostics
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisOptions::default())
    }
}
