//! Human-readable rendering of diagnostics

use std::ops::Range;
use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};
use must_handle_ast::{Span, SyntaxTree};
use must_handle_checker::Diagnostic;
use tracing::warn;

pub fn print_text(file: &Path, tree: &SyntaxTree, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("✓ {}", file.display());
        return;
    }

    let noun = if diagnostics.len() == 1 { "error" } else { "errors" };
    eprintln!("✗ {} - {} {}:", file.display(), diagnostics.len(), noun);
    for diagnostic in diagnostics {
        match &tree.source {
            Some(source) => report_diagnostic(&source.path, &source.text, diagnostic),
            None => eprint!("  {}", diagnostic.format_simple()),
        }
    }
}

/// Convert a byte span into the character range ariadne expects.
///
/// `None` when the span does not fall on character boundaries of `source`.
pub fn char_range(source: &str, span: Span) -> Option<Range<usize>> {
    let start = source.get(..span.start)?.chars().count();
    let len = source.get(span.start..span.end)?.chars().count();
    Some(start..start + len)
}

/// Note lines for a diagnostic's fixes, with the replacement text when it applies
pub fn fix_notes(source: &str, diagnostic: &Diagnostic) -> Vec<String> {
    diagnostic
        .suggestions
        .iter()
        .map(|fix| match fix.edit(source) {
            Some(edit) => format!("{}:\n{}", fix.description(), edit.replacement),
            None => fix.description(),
        })
        .collect()
}

fn report_diagnostic(path: &str, source: &str, diagnostic: &Diagnostic) {
    let Some(range) = char_range(source, diagnostic.span) else {
        warn!(path, span = ?diagnostic.span, "span outside source text");
        eprint!("  {}", diagnostic.format_simple());
        return;
    };

    let mut report = Report::build(ReportKind::Error, path.to_string(), range.start)
        .with_code(diagnostic.code())
        .with_message(diagnostic.message())
        .with_label(
            Label::new((path.to_string(), range))
                .with_message(diagnostic.kind.name())
                .with_color(Color::Red),
        )
        .with_help(diagnostic.correction());
    for note in fix_notes(source, diagnostic) {
        report = report.with_note(note);
    }
    if let Err(e) = report.finish().eprint((path.to_string(), Source::from(source))) {
        warn!(error = %e, "failed to render report");
        eprint!("  {}", diagnostic.format_simple());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use must_handle_checker::{DiagnosticKind, FixSuggestion};

    #[test]
    fn ascii_spans_are_unchanged() {
        assert_eq!(char_range("void main() {}", Span::new(5, 11)), Some(5..11));
    }

    #[test]
    fn multibyte_text_before_the_span_shifts_it() {
        let source = "éé main() {\n  readConfig();\n}";
        let start = source.find("readConfig").unwrap();
        let span = Span::new(start, start + "readConfig()".len());

        let range = char_range(source, span).unwrap();
        assert_eq!(range, start - 2..start - 2 + "readConfig()".len());
        let chars: String = source.chars().skip(range.start).take(range.len()).collect();
        assert_eq!(chars, "readConfig()");
    }

    #[test]
    fn spans_past_the_end_or_inside_a_character_are_rejected() {
        assert_eq!(char_range("short", Span::new(400, 420)), None);
        assert_eq!(char_range("é", Span::new(1, 2)), None);
    }

    #[test]
    fn fix_notes_include_the_replacement() {
        let source = "  load();\n";
        let diagnostic = Diagnostic::new(DiagnosticKind::SyncUnhandled, Span::new(2, 8), "load")
            .with_suggestion(FixSuggestion::WrapInTry {
                statement: Span::new(2, 9),
            });
        let notes = fix_notes(source, &diagnostic);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("try {"));
        assert!(notes[0].contains("load();"));

        let notes = fix_notes("", &diagnostic);
        assert_eq!(notes, vec![diagnostic.suggestions[0].description()]);
    }
}
