//! End-to-end tests over serialized resolved trees in fixtures/

mod common;

use common::assertions::{assert_kinds, flagged_text};
use common::fixtures::{fixture_names, load_tree};
use must_handle::checker::{check, AnalysisOptions, Analyzer, DiagnosticKind, FixSuggestion};

#[test]
fn all_fixtures_load() {
    let names = fixture_names();
    assert!(!names.is_empty(), "No fixtures found! Check fixtures/ directory.");

    for name in &names {
        let tree = load_tree(name);
        assert!(tree.descendants().count() > 0, "{} has no reachable nodes", name);
    }
}

#[test]
fn sync_unhandled_fixture() {
    let tree = load_tree("sync_unhandled");
    let diagnostics = check(&tree);

    assert_kinds(&diagnostics, &[DiagnosticKind::SyncUnhandled]);
    assert_eq!(flagged_text(&tree, &diagnostics[0]), "readConfig()");
    assert_eq!(diagnostics[0].name, "readConfig");
    assert_eq!(diagnostics[0].offset(), 16);
    assert_eq!(diagnostics[0].length(), 12);

    let source = &tree.source.as_ref().unwrap().text;
    let edit = diagnostics[0].suggestions[0].edit(source).expect("fix applies");
    assert!(edit.replacement.contains("try {\n  readConfig();"));
}

#[test]
fn async_scenarios_fixture() {
    let tree = load_tree("async_scenarios");
    let diagnostics = check(&tree);

    assert_kinds(
        &diagnostics,
        &[
            DiagnosticKind::AsyncNotAwaited,
            DiagnosticKind::AsyncAwaitedUnhandled,
            DiagnosticKind::AsyncNotAwaited,
        ],
    );
    for diagnostic in &diagnostics {
        assert_eq!(flagged_text(&tree, diagnostic), "fetchUser()");
    }

    // The unawaited call inside the try body still gets the await fix.
    assert!(matches!(
        diagnostics[2].suggestions.as_slice(),
        [FixSuggestion::InsertAwait { .. }]
    ));
    let source = &tree.source.as_ref().unwrap().text;
    let edit = diagnostics[0].suggestions[0].edit(source).unwrap();
    assert_eq!(edit.replacement, "await ");
    assert_eq!(edit.span.start, diagnostics[0].span.start);
}

#[test]
fn all_handled_fixture_is_clean() {
    let tree = load_tree("all_handled");
    let diagnostics = check(&tree);

    assert!(diagnostics.is_empty(), "Expected no diagnostics, got {:#?}", diagnostics);
}

#[test]
fn disabled_rule_reports_nothing_for_any_fixture() {
    let analyzer = Analyzer::new(AnalysisOptions { enabled: false });
    for name in fixture_names() {
        assert!(analyzer.analyze(&load_tree(&name)).is_empty(), "{} reported while disabled", name);
    }
}

#[test]
fn json_round_trip_preserves_verdicts() {
    let tree = load_tree("async_scenarios");
    let json = tree.to_json_pretty().unwrap();
    let reloaded = must_handle::ast::SyntaxTree::from_json(&json).unwrap();

    assert_eq!(check(&reloaded), check(&tree));
}

#[test]
fn records_serialize_for_hosts() {
    let tree = load_tree("sync_unhandled");
    let records: Vec<_> = check(&tree).iter().map(|d| d.to_record()).collect();
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json[0]["kind"], "sync-unhandled");
    assert_eq!(json[0]["code"], "E-HANDLE-001");
    assert_eq!(json[0]["offset"], 16);
    assert_eq!(json[0]["length"], 12);
    assert!(json[0]["message"].as_str().unwrap().contains("readConfig"));
}
