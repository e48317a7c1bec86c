use std::fs;
use std::path::{Path, PathBuf};

use must_handle::ast::SyntaxTree;

/// Get path to a tree fixture in fixtures/
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(format!("{}.json", name))
}

/// Load and link a tree fixture
pub fn load_tree(name: &str) -> SyntaxTree {
    let path = fixture_path(name);
    let json = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e));
    SyntaxTree::from_json(&json)
        .unwrap_or_else(|e| panic!("Fixture {} is not a valid tree: {}", name, e))
}

/// Discover all fixture names
pub fn fixture_names() -> Vec<String> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let mut names: Vec<String> = fs::read_dir(&dir)
        .expect("Failed to read fixtures directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .collect();
    names.sort();
    names
}
