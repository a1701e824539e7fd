//! Tests for the common test infrastructure
//! This file runs these tests only once instead of duplicating them in every test binary

mod common;

use common::TestWorkspace;

#[test]
fn test_workspace_creation() {
    let mut workspace = TestWorkspace::new();
    let path = workspace.create_file("nested/test.html", "<ul><li>a</li></ul>");

    assert!(path.exists());
    assert!(path.starts_with(workspace.root_path()));
    assert_eq!(workspace.path("nested/test.html"), path.as_path());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "<ul><li>a</li></ul>");
}
