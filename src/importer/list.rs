//! HTML list to ADF list block conversion
//!
//! Every `<li>` is classified on its own as a task or a standard item.
//! Consecutive items of the same kind share one list block, so a list that
//! interleaves checklist entries with plain bullets becomes several sibling
//! blocks in source order (`bulletList`, `taskList`, `bulletList`, ...).

use super::error::ImportError;
use super::paragraph::ParagraphConverter;
use crate::adf::{AdfBuilder, AdfNode};
use crate::html::{HtmlElement, HtmlNode, ListMarker};

/// Attribute carrying the task state rendered by markdown task-list plugins
pub const TASK_ATTRIBUTE: &str = "data-task";

/// Last resort text and identifier of a task without any text
pub const FALLBACK_TASK_TEXT: &str = "task-item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Task { checked: bool },
    Standard,
}

impl ItemKind {
    pub fn is_task(&self) -> bool {
        matches!(self, ItemKind::Task { .. })
    }
}

/// Classifies a single list item.
///
/// An explicit `data-task` marker wins over checkbox detection. Checkboxes
/// inside nested lists belong to the nested items and are ignored here.
pub fn classify(item: &HtmlElement) -> ItemKind {
    if let Some(marker) = item.attr(TASK_ATTRIBUTE).filter(|value| !value.is_empty()) {
        return ItemKind::Task {
            checked: marker.trim().eq_ignore_ascii_case("x"),
        };
    }

    match item.find_descendant(HtmlElement::is_checkbox, HtmlElement::is_list) {
        Some(checkbox) => ItemKind::Task {
            checked: checkbox.has_attr("checked"),
        },
        None => ItemKind::Standard,
    }
}

/// Bookkeeping collected while converting, for reporting
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListStats {
    /// Source lists visited, nested ones included
    pub lists: usize,
    /// Source lists that were split into more than one block
    pub mixed_lists: usize,
    /// Texts of task items whose content fell back to extracted text
    pub fallback_items: Vec<String>,
}

pub struct ListConverter<'a, P: ParagraphConverter + ?Sized> {
    paragraphs: &'a P,
    inline: bool,
}

/// Run of consecutive items of one kind
struct Run {
    task: bool,
    items: Vec<AdfNode>,
}

impl Run {
    fn close(self, marker: ListMarker) -> AdfNode {
        if self.task {
            AdfBuilder::task_list_item(self.items)
        } else {
            match marker {
                ListMarker::Ordered => AdfBuilder::ordered_list_item(self.items),
                ListMarker::Unordered => AdfBuilder::bullet_list_item(self.items),
            }
        }
    }
}

impl<'a, P: ParagraphConverter + ?Sized> ListConverter<'a, P> {
    pub fn new(paragraphs: &'a P) -> Self {
        Self {
            paragraphs,
            inline: true,
        }
    }

    /// Whether item content is handed to the paragraph converter in inline mode
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Appends every block converted from `list` to `builder`.
    pub fn add_list(
        &self,
        list: &HtmlElement,
        file_context: &str,
        builder: &mut AdfBuilder,
    ) -> Result<(), ImportError> {
        for block in self.convert(list, file_context)? {
            builder.add_item(block);
        }
        Ok(())
    }

    /// Converts a `<ul>`/`<ol>` into one or more list blocks.
    pub fn convert(
        &self,
        list: &HtmlElement,
        file_context: &str,
    ) -> Result<Vec<AdfNode>, ImportError> {
        let mut stats = ListStats::default();
        self.convert_tracked(list, file_context, &mut stats)
    }

    pub fn convert_tracked(
        &self,
        list: &HtmlElement,
        file_context: &str,
        stats: &mut ListStats,
    ) -> Result<Vec<AdfNode>, ImportError> {
        let marker = list.list_marker().unwrap_or(ListMarker::Unordered);
        let mut blocks = Vec::new();
        let mut run: Option<Run> = None;
        stats.lists += 1;

        for item in list.child_elements() {
            let kind = classify(item);
            log::trace!("<{}> item classified as {:?}", list.name, kind);

            let converted = match kind {
                ItemKind::Task { checked } => {
                    self.convert_task_item(item, checked, file_context, stats)?
                }
                ItemKind::Standard => self.convert_standard_item(item, file_context, stats)?,
            };

            match run {
                Some(ref mut current) if current.task == kind.is_task() => {
                    current.items.push(converted);
                }
                _ => {
                    let next = Run {
                        task: kind.is_task(),
                        items: vec![converted],
                    };
                    if let Some(finished) = run.replace(next) {
                        blocks.push(finished.close(marker));
                    }
                }
            }
        }
        if let Some(finished) = run.take() {
            blocks.push(finished.close(marker));
        }

        if blocks.len() > 1 {
            stats.mixed_lists += 1;
        }
        for block in &blocks {
            if let Some(kind) = block.list_kind() {
                log::debug!("emitted {} with {} item(s)", kind, block.content().len());
            }
        }
        Ok(blocks)
    }

    fn convert_standard_item(
        &self,
        item: &HtmlElement,
        file_context: &str,
        stats: &mut ListStats,
    ) -> Result<AdfNode, ImportError> {
        let mut paragraph = HtmlElement::paragraph();
        let mut sub_blocks = Vec::new();

        for child in &item.children {
            match child {
                HtmlNode::Element(element) if element.is_list() => {
                    sub_blocks.extend(self.convert_tracked(element, file_context, stats)?);
                }
                HtmlNode::Text(text) if text == "\n" => {}
                HtmlNode::Element(element) if element.is_paragraph() => {
                    adopt_paragraph(&mut paragraph, element.clone());
                }
                other => paragraph.append(other.clone()),
            }
        }

        let mut out = AdfBuilder::new();
        self.paragraphs
            .add_items(&paragraph, file_context, self.inline, &mut out)?;

        let mut content = lead_with_paragraph(out.build());
        content.extend(sub_blocks);
        Ok(AdfBuilder::list_item(content))
    }

    fn convert_task_item(
        &self,
        item: &HtmlElement,
        checked: bool,
        file_context: &str,
        stats: &mut ListStats,
    ) -> Result<AdfNode, ImportError> {
        let mut paragraph = HtmlElement::paragraph();
        let mut sub_blocks = Vec::new();

        for child in &item.children {
            match child {
                HtmlNode::Element(element) if element.is_list() => {
                    sub_blocks.extend(self.convert_tracked(element, file_context, stats)?);
                }
                HtmlNode::Element(element) if element.is_checkbox() => {}
                HtmlNode::Text(text) if text == "\n" => {}
                HtmlNode::Element(element) => {
                    let mut cloned = element.clone();
                    cloned.remove_descendants(HtmlElement::is_checkbox);
                    if cloned.is_paragraph() {
                        adopt_paragraph(&mut paragraph, cloned);
                    } else {
                        paragraph.append(cloned);
                    }
                }
                HtmlNode::Text(_) => paragraph.append(child.clone()),
            }
        }

        let mut out = AdfBuilder::new();
        self.paragraphs
            .add_items(&paragraph, file_context, self.inline, &mut out)?;

        let resolved = out
            .build()
            .into_iter()
            .find(AdfNode::is_paragraph)
            .filter(has_text);
        let task_paragraph = match resolved {
            Some(p) => p,
            None => {
                let text = fallback_text(&paragraph, item);
                log::debug!("task item without inline content, falling back to {:?}", text);
                stats.fallback_items.push(text.clone());
                AdfBuilder::paragraph_item(&text)
            }
        };

        let local_id = task_local_id(item, &task_paragraph);
        let mut content = vec![task_paragraph];
        content.extend(sub_blocks);
        Ok(AdfBuilder::task_item_from_content(content, checked, &local_id))
    }
}

/// A paragraph made only of breaks carries no task text
fn has_text(paragraph: &AdfNode) -> bool {
    paragraph
        .content()
        .iter()
        .any(|node| matches!(node, AdfNode::Text { .. }))
}

/// A `<p>` child becomes the scratch paragraph unless inline content was
/// already gathered, in which case it is kept as a child so nothing is lost.
fn adopt_paragraph(scratch: &mut HtmlElement, paragraph: HtmlElement) {
    if scratch.text_content().trim().is_empty() && scratch.child_elements().next().is_none() {
        *scratch = paragraph;
    } else {
        scratch.append(paragraph);
    }
}

/// Moves the first paragraph to the front, keeping every other node in order.
fn lead_with_paragraph(mut nodes: Vec<AdfNode>) -> Vec<AdfNode> {
    match nodes.iter().position(AdfNode::is_paragraph) {
        Some(0) => {}
        Some(index) => {
            let paragraph = nodes.remove(index);
            nodes.insert(0, paragraph);
        }
        None => nodes.insert(0, AdfBuilder::paragraph(Vec::new())),
    }
    nodes
}

fn fallback_text(paragraph: &HtmlElement, item: &HtmlElement) -> String {
    let scratch = paragraph.text_content();
    if !scratch.trim().is_empty() {
        return scratch.trim().to_string();
    }
    let full = item.text_content();
    if !full.trim().is_empty() {
        return full.trim().to_string();
    }
    FALLBACK_TASK_TEXT.to_string()
}

fn task_local_id(item: &HtmlElement, paragraph: &AdfNode) -> String {
    let content_text = paragraph.inline_text();
    if !content_text.trim().is_empty() {
        return content_text.trim().to_string();
    }
    let full = item.text_content();
    if !full.trim().is_empty() {
        return full.trim().to_string();
    }
    FALLBACK_TASK_TEXT.to_string()
}
