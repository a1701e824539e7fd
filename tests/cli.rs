//! End-to-end runs of the importer binary

mod common;

use std::process::Command;

use common::TestWorkspace;
use serde_json::Value;

fn importer() -> Command {
    Command::new(env!("CARGO_BIN_EXE_adflist-html-importer"))
}

#[test]
fn test_single_file_to_output() {
    let mut workspace = TestWorkspace::new();
    let input = workspace.create_file(
        "note.html",
        r#"<ul><li>plain</li><li data-task="x"><input type="checkbox" checked>done</li></ul>"#,
    );
    let output = workspace.root_path().join("note.json");
    let report = workspace.root_path().join("report.txt");

    let status = importer()
        .arg("-f")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--report")
        .arg(&report)
        .args(["--report-format", "text"])
        .status()
        .unwrap();
    assert!(status.success());

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc["content"][0]["type"], "bulletList");
    assert_eq!(doc["content"][1]["type"], "taskList");
    assert_eq!(doc["content"][1]["content"][0]["attrs"]["state"], "DONE");

    let report = std::fs::read_to_string(&report).unwrap();
    assert!(report.contains("HTML List Import Report"));
    assert!(report.contains("[mixed_list]"));
}

#[test]
fn test_batch_conversion() {
    let mut workspace = TestWorkspace::new();
    workspace.create_file("in/a.html", "<ol><li>one</li></ol>");
    workspace.create_file("in/b.html", "<ul><li><input type=\"checkbox\">two</li></ul>");
    workspace.create_file("in/skip.txt", "not html");
    let input_dir = workspace.root_path().join("in");
    let output_dir = workspace.root_path().join("out");
    let report = workspace.root_path().join("batch.json");

    let status = importer()
        .arg("-d")
        .arg(&input_dir)
        .arg("-o")
        .arg(&output_dir)
        .arg("--report")
        .arg(&report)
        .arg("--compact")
        .status()
        .unwrap();
    assert!(status.success());

    let a = std::fs::read_to_string(output_dir.join("a.json")).unwrap();
    assert!(a.contains("\"type\":\"orderedList\""));
    let b = std::fs::read_to_string(output_dir.join("b.json")).unwrap();
    assert!(b.contains("\"type\":\"taskList\""));
    assert!(!output_dir.join("skip.json").exists());

    let report: Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["files_processed"], 2);
    assert_eq!(report["files_failed"], 0);
}

#[test]
fn test_batch_continues_past_unwritable_output_directory() {
    let mut workspace = TestWorkspace::new();
    workspace.create_file("in/a.html", "<ol><li>one</li></ol>");
    workspace.create_file("in/sub/b.html", "<ul><li>two</li></ul>");
    // a plain file where the output subdirectory should go
    workspace.create_file("out/sub", "not a directory");
    let output_dir = workspace.root_path().join("out");
    let report = workspace.root_path().join("batch.json");

    let status = importer()
        .arg("-d")
        .arg(workspace.root_path().join("in"))
        .arg("-o")
        .arg(&output_dir)
        .args(["--pattern", "**/*.html"])
        .arg("--report")
        .arg(&report)
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(output_dir.join("a.json").exists());

    let report: Value = serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["files_processed"], 2);
    assert_eq!(report["files_succeeded"], 1);
    assert_eq!(report["files_failed"], 1);
}

#[test]
fn test_batch_requires_output_directory() {
    let mut workspace = TestWorkspace::new();
    workspace.create_file("in/a.html", "<ol><li>one</li></ol>");

    let status = importer()
        .arg("-d")
        .arg(workspace.root_path().join("in"))
        .status()
        .unwrap();
    assert!(!status.success());
}
