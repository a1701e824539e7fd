//! Integration tests for HTML list import

use adflist::adf::{AdfBuilder, AdfNode, ListKind};
use adflist::importer::{HtmlImporter, ImportOptions, WarningKind};
use serde_json::{json, Value};

fn import(html: &str) -> AdfNode {
    let importer = HtmlImporter::new(ImportOptions::default());
    importer.import(html, "test.html", "test.json").unwrap().doc
}

fn import_json(html: &str) -> Value {
    let importer = HtmlImporter::new(ImportOptions::default());
    let result = importer.import(html, "test.html", "test.json").unwrap();
    serde_json::from_str(&result.json).unwrap()
}

fn kinds(doc: &AdfNode) -> Vec<ListKind> {
    doc.content().iter().filter_map(AdfNode::list_kind).collect()
}

#[test]
fn test_two_plain_items() {
    let json = import_json("<ul><li>A</li><li>B</li></ul>");
    assert_eq!(
        json,
        json!({
            "type": "doc",
            "version": 1,
            "content": [{
                "type": "bulletList",
                "content": [
                    { "type": "listItem", "content": [
                        { "type": "paragraph", "content": [{ "type": "text", "text": "A" }] }
                    ]},
                    { "type": "listItem", "content": [
                        { "type": "paragraph", "content": [{ "type": "text", "text": "B" }] }
                    ]}
                ]
            }]
        })
    );
}

#[test]
fn test_checkbox_items_with_second_checked() {
    let doc = import(
        r#"<ul class="contains-task-list">
<li class="task-list-item"><input type="checkbox" disabled> write tests</li>
<li class="task-list-item"><input type="checkbox" checked disabled> run tests</li>
<li class="task-list-item"><input type="checkbox" disabled> ship</li>
</ul>"#,
    );
    assert_eq!(kinds(&doc), vec![ListKind::Task]);
    let flags: Vec<_> = doc.content()[0]
        .content()
        .iter()
        .filter_map(AdfNode::is_checked)
        .collect();
    assert_eq!(flags, vec![false, true, false]);
    let ids: Vec<_> = doc.content()[0]
        .content()
        .iter()
        .filter_map(AdfNode::local_id)
        .collect();
    assert_eq!(ids, vec!["write tests", "run tests", "ship"]);
}

#[test]
fn test_mixed_list_keeps_order() {
    let doc = import(
        r#"<ul><li>A</li><li data-task="x" class="task-list-item"><input type="checkbox" checked>B</li><li>C</li></ul>"#,
    );
    assert_eq!(
        kinds(&doc),
        vec![ListKind::Bullet, ListKind::Task, ListKind::Bullet]
    );
    let texts: Vec<_> = doc.content().iter().map(AdfNode::plain_text).collect();
    assert_eq!(texts, vec!["A", "B", "C"]);
}

#[test]
fn test_ordered_item_with_nested_bullet_list() {
    let doc = import("<ol><li>parent text<ul><li>sub</li></ul></li></ol>");
    assert_eq!(
        doc.content(),
        &[AdfBuilder::ordered_list_item(vec![AdfBuilder::list_item(vec![
            AdfBuilder::paragraph_item("parent text"),
            AdfBuilder::bullet_list_item(vec![AdfBuilder::list_item(vec![
                AdfBuilder::paragraph_item("sub")
            ])]),
        ])])]
    );
}

#[test]
fn test_checkbox_only_task() {
    let json = import_json(r#"<ul><li><input type="checkbox"></li></ul>"#);
    let task = &json["content"][0]["content"][0];
    assert_eq!(task["type"], "taskItem");
    assert_eq!(task["attrs"]["localId"], "task-item");
    assert_eq!(task["attrs"]["state"], "TODO");
    assert_eq!(task["content"], json!([{ "type": "text", "text": "task-item" }]));
}

#[test]
fn test_uppercase_data_task_is_checked() {
    let doc = import(r#"<ul><li data-task="X">done</li></ul>"#);
    assert_eq!(doc.content()[0].content()[0].is_checked(), Some(true));
}

#[test]
fn test_obsidian_rendered_checklist() {
    let html = r#"<ul class="contains-task-list has-list-bullet">
<li data-line="0" data-task=" " class="task-list-item"><input data-line="0" type="checkbox" class="task-list-item-checkbox">Buy <strong>milk</strong></li>
<li data-line="1" data-task="x" class="task-list-item is-checked"><input data-line="1" type="checkbox" class="task-list-item-checkbox" checked="">Call <a href="https://example.com/bob">Bob</a></li>
</ul>"#;
    let json = import_json(html);
    let tasks = &json["content"][0]["content"];
    assert_eq!(json["content"][0]["type"], "taskList");
    assert_eq!(tasks[0]["attrs"]["state"], "TODO");
    assert_eq!(tasks[0]["attrs"]["localId"], "Buy milk");
    assert_eq!(
        tasks[0]["content"][1],
        json!({ "type": "text", "text": "milk", "marks": [{ "type": "strong" }] })
    );
    assert_eq!(tasks[1]["attrs"]["state"], "DONE");
    assert_eq!(
        tasks[1]["content"][1]["marks"][0],
        json!({ "type": "link", "attrs": { "href": "https://example.com/bob" } })
    );
}

#[test]
fn test_deep_nesting() {
    let doc = import(
        "<ul><li>Level 1<ul><li>Level 2<ul><li>Level 3<ul><li>Level 4</li></ul></li></ul></li></ul></li></ul>",
    );
    let mut node = &doc.content()[0];
    for level in 1..=4 {
        assert_eq!(node.list_kind(), Some(ListKind::Bullet));
        let item = &node.content()[0];
        assert_eq!(item.content()[0], AdfBuilder::paragraph_item(&format!("Level {}", level)));
        if level < 4 {
            node = &item.content()[1];
        } else {
            assert_eq!(item.content().len(), 1);
        }
    }
}

#[test]
fn test_checklist_nested_under_bullet() {
    let doc = import(
        r#"<ul><li>groceries<ul><li data-task=" "><input type="checkbox">eggs</li><li data-task="x"><input type="checkbox" checked>flour</li></ul></li></ul>"#,
    );
    assert_eq!(kinds(&doc), vec![ListKind::Bullet]);
    let item = &doc.content()[0].content()[0];
    assert_eq!(item.content()[1].list_kind(), Some(ListKind::Task));
    assert_eq!(item.content()[1].local_id(), Some("list-eggs"));
}

#[test]
fn test_relative_links_resolved_against_file_context() {
    let importer = HtmlImporter::new(
        ImportOptions::new().with_file_context("https://wiki.example.com/space/page"),
    );
    let result = importer
        .import(r#"<ul><li><a href="child">child page</a></li></ul>"#, "in.html", "out.json")
        .unwrap();
    let json: Value = serde_json::from_str(&result.json).unwrap();
    assert_eq!(
        json["content"][0]["content"][0]["content"][0]["content"][0]["marks"][0]["attrs"]["href"],
        "https://wiki.example.com/space/child"
    );
}

#[test]
fn test_report_statistics() {
    let importer = HtmlImporter::new(ImportOptions::default());
    let html = r#"
<ul><li>a</li><li data-task="x">b</li></ul>
<ol><li>c<ol><li>d</li></ol></li></ol>
"#;
    let result = importer.import(html, "test.html", "test.json").unwrap();
    let stats = &result.report.statistics;

    assert_eq!(stats.lists, 3);
    assert_eq!(stats.feature("bulletList"), 1);
    assert_eq!(stats.feature("taskList"), 1);
    assert_eq!(stats.feature("orderedList"), 2);
    assert_eq!(stats.feature("listItem"), 3);
    assert_eq!(stats.feature("taskItem"), 1);
    assert_eq!(stats.checked_tasks, 1);
    assert_eq!(result.report.warnings.len(), 1);
    assert_eq!(result.report.warnings[0].kind, WarningKind::MixedList);
}

#[test]
fn test_report_json_serialization() {
    let importer = HtmlImporter::new(ImportOptions::default());
    let result = importer
        .import("<ul><li>x</li></ul>", "test.html", "test.json")
        .unwrap();
    let json = result.report.to_json().unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["input_file"], "test.html");
    assert_eq!(parsed["statistics"]["feature_counts"]["bulletList"], 1);
}
