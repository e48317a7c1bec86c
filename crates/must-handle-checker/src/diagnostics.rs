//! Diagnostics and fix suggestions for the explicit-handling rule

use serde::Serialize;
use must_handle_ast::Span;

/// The three ways a call to a marked callable can be mishandled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Synchronous callable invoked outside any try body
    SyncUnhandled,
    /// Asynchronous callable whose future is not awaited directly
    AsyncNotAwaited,
    /// Asynchronous callable awaited outside any try body
    AsyncAwaitedUnhandled,
}

impl DiagnosticKind {
    pub const ALL: [DiagnosticKind; 3] = [
        DiagnosticKind::SyncUnhandled,
        DiagnosticKind::AsyncNotAwaited,
        DiagnosticKind::AsyncAwaitedUnhandled,
    ];

    /// Stable lint name
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::SyncUnhandled => "sync-unhandled",
            DiagnosticKind::AsyncNotAwaited => "async-not-awaited",
            DiagnosticKind::AsyncAwaitedUnhandled => "async-awaited-unhandled",
        }
    }

    /// Error code (e.g., "E-HANDLE-001")
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::SyncUnhandled => "E-HANDLE-001",
            DiagnosticKind::AsyncNotAwaited => "E-HANDLE-002",
            DiagnosticKind::AsyncAwaitedUnhandled => "E-HANDLE-003",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DiagnosticKind::SyncUnhandled => {
                "A synchronous callable marked as must-handle is called outside the body of a try statement."
            }
            DiagnosticKind::AsyncNotAwaited => {
                "An asynchronous callable marked as must-handle is called without directly awaiting its result."
            }
            DiagnosticKind::AsyncAwaitedUnhandled => {
                "An asynchronous callable marked as must-handle is awaited outside the body of a try statement."
            }
        }
    }

    /// Look a kind up by lint name or error code
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name || k.code() == name)
    }
}

/// Severity level of a diagnostic; every explicit-handling finding is an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// A suggested fix for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "fix", rename_all = "kebab-case")]
pub enum FixSuggestion {
    /// Wrap a statement in `try { ... } catch (error) { ... }`
    WrapInTry {
        /// The statement to wrap
        statement: Span,
    },
    /// Insert `await ` in front of a call
    InsertAwait { offset: usize },
}

/// A single textual replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub span: Span,
    pub replacement: String,
}

impl FixSuggestion {
    /// Get a human-readable description of this suggestion
    pub fn description(&self) -> String {
        match self {
            FixSuggestion::WrapInTry { statement } => format!(
                "Wrap the statement at {}..{} in a try/catch block",
                statement.start, statement.end
            ),
            FixSuggestion::InsertAwait { offset } => format!("Insert `await` at offset {}", offset),
        }
    }

    /// The edit this fix performs on `source`, if the spans fit it
    pub fn edit(&self, source: &str) -> Option<TextEdit> {
        match self {
            FixSuggestion::WrapInTry { statement } => {
                let text = source.get(statement.start..statement.end)?;
                Some(TextEdit {
                    span: *statement,
                    replacement: format!("try {{\n  {}\n}} catch (error) {{\n}}", text),
                })
            }
            FixSuggestion::InsertAwait { offset } => {
                source.get(..*offset)?;
                Some(TextEdit {
                    span: Span::new(*offset, *offset),
                    replacement: "await ".to_string(),
                })
            }
        }
    }
}

/// One finding of the explicit-handling rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Span of the offending call expression
    pub span: Span,
    /// Display name of the called callable
    pub name: String,
    pub severity: Severity,
    pub suggestions: Vec<FixSuggestion>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, name: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            name: name.into(),
            severity: Severity::Error,
            suggestions: Vec::new(),
        }
    }

    /// Add a fix suggestion
    pub fn with_suggestion(mut self, suggestion: FixSuggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn offset(&self) -> usize {
        self.span.start
    }

    pub fn length(&self) -> usize {
        self.span.len()
    }

    /// Get the primary message for this diagnostic
    pub fn message(&self) -> String {
        match self.kind {
            DiagnosticKind::SyncUnhandled => format!(
                "`{}` can fail and must be called inside the body of a try statement",
                self.name
            ),
            DiagnosticKind::AsyncNotAwaited => format!(
                "the future returned by `{}` must be awaited directly so its failure can be handled",
                self.name
            ),
            DiagnosticKind::AsyncAwaitedUnhandled => format!(
                "`{}` is awaited outside the body of a try statement, so its failure is unhandled",
                self.name
            ),
        }
    }

    pub fn correction(&self) -> String {
        match self.kind {
            DiagnosticKind::SyncUnhandled => {
                format!("Wrap the call to `{}` in a try/catch block.", self.name)
            }
            DiagnosticKind::AsyncNotAwaited => format!(
                "Write `await {}(...)` inside the body of a try/catch block.",
                self.name
            ),
            DiagnosticKind::AsyncAwaitedUnhandled => format!(
                "Move `await {}(...)` into the body of a try/catch block.",
                self.name
            ),
        }
    }

    /// Format the diagnostic as a simple string
    pub fn format_simple(&self) -> String {
        let mut output = format!(
            "{} [{}]: {} (at {}..{})\n",
            self.code(),
            self.kind.name(),
            self.message(),
            self.span.start,
            self.span.end
        );
        output.push_str(&format!("  help: {}\n", self.correction()));
        for suggestion in &self.suggestions {
            output.push_str(&format!("  fix: {}\n", suggestion.description()));
        }
        output
    }

    pub fn to_record(&self) -> DiagnosticRecord {
        DiagnosticRecord {
            kind: self.kind,
            code: self.code(),
            severity: self.severity,
            offset: self.offset(),
            length: self.length(),
            message: self.message(),
            correction: self.correction(),
            suggestions: self.suggestions.clone(),
        }
    }
}

/// Flat serializable form handed to hosts and JSON output
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticRecord {
    pub kind: DiagnosticKind,
    pub code: &'static str,
    pub severity: Severity,
    pub offset: usize,
    pub length: usize,
    pub message: String,
    pub correction: String,
    pub suggestions: Vec<FixSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::new(DiagnosticKind::SyncUnhandled, Span::new(10, 20), "readConfig");

        assert_eq!(diag.code(), "E-HANDLE-001");
        assert_eq!(diag.offset(), 10);
        assert_eq!(diag.length(), 10);
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.message().contains("readConfig"));
        assert!(diag.correction().contains("readConfig"));
    }

    #[test]
    fn every_kind_has_distinct_name_and_code() {
        let names: HashSet<_> = DiagnosticKind::ALL.iter().map(|k| k.name()).collect();
        let codes: HashSet<_> = DiagnosticKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(names.len(), 3);
        assert_eq!(codes.len(), 3);
        assert_eq!(
            DiagnosticKind::from_name("async-not-awaited"),
            Some(DiagnosticKind::AsyncNotAwaited)
        );
        assert_eq!(
            DiagnosticKind::from_name("E-HANDLE-003"),
            Some(DiagnosticKind::AsyncAwaitedUnhandled)
        );
        assert_eq!(DiagnosticKind::from_name("nope"), None);
    }

    #[test]
    fn insert_await_edit() {
        let fix = FixSuggestion::InsertAwait { offset: 4 };
        let edit = fix.edit("    fetch();").unwrap();
        assert_eq!(edit.span, Span::new(4, 4));
        assert_eq!(edit.replacement, "await ");
        assert!(fix.edit("ab").is_none());
    }

    #[test]
    fn wrap_in_try_edit() {
        let fix = FixSuggestion::WrapInTry { statement: Span::new(2, 8) };
        let edit = fix.edit("  load();\n").unwrap();
        assert!(edit.replacement.starts_with("try {\n  load();"));
        assert!(edit.replacement.contains("catch (error)"));
    }

    #[test]
    fn record_serializes_kebab_case() {
        let diag = Diagnostic::new(DiagnosticKind::AsyncNotAwaited, Span::new(3, 9), "fetch")
            .with_suggestion(FixSuggestion::InsertAwait { offset: 3 });
        let json = serde_json::to_value(diag.to_record()).unwrap();
        assert_eq!(json["kind"], "async-not-awaited");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["length"], 6);
        assert_eq!(json["suggestions"][0]["fix"], "insert-await");
    }
}
