use must_handle::ast::SyntaxTree;
use must_handle::checker::{Diagnostic, DiagnosticKind};

/// Assert the diagnostics have exactly these kinds, in position order
pub fn assert_kinds(diagnostics: &[Diagnostic], expected: &[DiagnosticKind]) {
    let found: Vec<DiagnosticKind> = diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(found, expected, "unexpected diagnostics: {:#?}", diagnostics);
}

/// Source text a diagnostic points at
pub fn flagged_text<'a>(tree: &'a SyntaxTree, diagnostic: &Diagnostic) -> &'a str {
    let source = tree.source.as_ref().expect("fixture embeds its source");
    &source.text[diagnostic.span.start..diagnostic.span.end]
}
