//! Paragraph conversion: inline HTML content to ADF paragraphs

use super::error::ImportError;
use crate::adf::{AdfBuilder, AdfNode, LinkAttrs, Mark};
use crate::html::{HtmlElement, HtmlNode};
use crate::utils::{collapse_whitespace, resolve_href};

/// Converts a paragraph-like element into ADF nodes appended to `out`.
///
/// `file_context` identifies the document the HTML was rendered from and is
/// used to resolve relative references. In `inline` mode exactly one
/// paragraph must be produced and no block-level nodes may be emitted.
pub trait ParagraphConverter {
    fn add_items(
        &self,
        paragraph: &HtmlElement,
        file_context: &str,
        inline: bool,
        out: &mut AdfBuilder,
    ) -> Result<(), ImportError>;
}

/// Default paragraph converter handling text, basic marks, links and breaks.
///
/// In inline mode, block-level elements nested in the paragraph (a loose
/// list item's `<p>`s, for instance) are separated by a `hardBreak`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineParagraphConverter;

/// Collected inline content, before normalization
enum Piece {
    Node(AdfNode),
    /// Edge of a block-level element
    Boundary,
}

const BLOCK_ELEMENTS: &[&str] = &["p", "div", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6"];
const SKIPPED_ELEMENTS: &[&str] = &["input", "script", "style", "template"];

impl ParagraphConverter for InlineParagraphConverter {
    fn add_items(
        &self,
        paragraph: &HtmlElement,
        file_context: &str,
        inline: bool,
        out: &mut AdfBuilder,
    ) -> Result<(), ImportError> {
        if inline {
            let mut nodes = Vec::new();
            for child in &paragraph.children {
                collect_inline(child, &[], file_context, &mut nodes);
            }
            out.add_item(AdfBuilder::paragraph(normalize(nodes)));
            return Ok(());
        }

        let mut pending = Vec::new();
        for child in &paragraph.children {
            match child {
                HtmlNode::Element(element) if is_block(element) => {
                    flush(&mut pending, out);
                    self.add_items(element, file_context, false, out)?;
                }
                _ => collect_inline(child, &[], file_context, &mut pending),
            }
        }
        flush(&mut pending, out);
        Ok(())
    }
}

fn is_block(element: &HtmlElement) -> bool {
    BLOCK_ELEMENTS.contains(&element.name.as_str())
}

fn flush(pending: &mut Vec<Piece>, out: &mut AdfBuilder) {
    let nodes = normalize(std::mem::take(pending));
    if !nodes.is_empty() {
        out.add_item(AdfBuilder::paragraph(nodes));
    }
}

fn collect_inline(node: &HtmlNode, marks: &[Mark], file_context: &str, out: &mut Vec<Piece>) {
    let element = match node {
        HtmlNode::Text(text) => {
            out.push(Piece::Node(AdfBuilder::marked_text(
                &collapse_whitespace(text),
                marks.to_vec(),
            )));
            return;
        }
        HtmlNode::Element(element) => element,
    };

    let name = element.name.as_str();
    if name == "br" {
        out.push(Piece::Node(AdfNode::HardBreak));
        return;
    }
    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }

    let mark = match name {
        "strong" | "b" => Some(Mark::Strong),
        "em" | "i" => Some(Mark::Em),
        "code" => Some(Mark::Code),
        "s" | "del" | "strike" => Some(Mark::Strike),
        "u" | "ins" => Some(Mark::Underline),
        "a" => element.attr("href").map(|href| Mark::Link {
            attrs: LinkAttrs {
                href: resolve_href(file_context, href),
            },
        }),
        _ => None,
    };

    let mut child_marks = marks.to_vec();
    if let Some(mark) = mark {
        if !child_marks.contains(&mark) {
            child_marks.push(mark);
        }
    }
    let block = is_block(element);
    if block {
        out.push(Piece::Boundary);
    }
    for child in &element.children {
        collect_inline(child, &child_marks, file_context, out);
    }
    if block {
        out.push(Piece::Boundary);
    }
}

/// Merges adjacent equally-marked text and drops whitespace a browser would
/// not render: at the start and end of a line and repeated across elements.
/// Block boundaries between two runs of content become a single `hardBreak`.
fn normalize(pieces: Vec<Piece>) -> Vec<AdfNode> {
    let mut out: Vec<AdfNode> = Vec::with_capacity(pieces.len());
    let mut at_line_start = true;
    let mut boundary = false;

    for piece in pieces {
        let node = match piece {
            Piece::Boundary => {
                boundary |= !out.is_empty();
                continue;
            }
            Piece::Node(node) => node,
        };
        match node {
            AdfNode::Text { text, marks } => {
                let after_space = matches!(out.last(), Some(AdfNode::Text { text, .. }) if text.ends_with(' '));
                let text = if at_line_start || boundary || after_space {
                    text.trim_start_matches(' ').to_string()
                } else {
                    text
                };
                if text.is_empty() {
                    continue;
                }
                if boundary {
                    break_line(&mut out);
                    boundary = false;
                }
                at_line_start = false;
                if let Some(AdfNode::Text {
                    text: previous,
                    marks: previous_marks,
                }) = out.last_mut()
                {
                    if *previous_marks == marks {
                        previous.push_str(&text);
                        continue;
                    }
                }
                out.push(AdfNode::Text { text, marks });
            }
            AdfNode::HardBreak => {
                boundary = false;
                trim_trailing(&mut out);
                out.push(AdfNode::HardBreak);
                at_line_start = true;
            }
            other => {
                if boundary {
                    break_line(&mut out);
                    boundary = false;
                }
                at_line_start = false;
                out.push(other);
            }
        }
    }
    trim_trailing(&mut out);
    out
}

fn break_line(out: &mut Vec<AdfNode>) {
    trim_trailing(out);
    if !matches!(out.last(), None | Some(AdfNode::HardBreak)) {
        out.push(AdfNode::HardBreak);
    }
}

fn trim_trailing(out: &mut Vec<AdfNode>) {
    while let Some(AdfNode::Text { text, .. }) = out.last_mut() {
        let trimmed = text.trim_end_matches(' ').len();
        text.truncate(trimmed);
        if !text.is_empty() {
            break;
        }
        out.pop();
    }
}
