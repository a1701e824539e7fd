//! Owned HTML tree consumed by the list converter.
//!
//! The converter never works on a live DOM. Rendered HTML is parsed once with
//! html5ever and copied into [`HtmlNode`]s, which can be cloned, queried and
//! rearranged freely without any iteration-during-mutation hazards.

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Marker of the source list element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `<ol>`
    Ordered,
    /// `<ul>`
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element(HtmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    /// Lowercase tag name
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

impl HtmlNode {
    pub fn text(text: &str) -> Self {
        HtmlNode::Text(text.to_string())
    }

    pub fn as_element(&self) -> Option<&HtmlElement> {
        match self {
            HtmlNode::Element(element) => Some(element),
            HtmlNode::Text(_) => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            HtmlNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            HtmlNode::Text(text) => out.push_str(text),
        }
    }
}

impl From<HtmlElement> for HtmlNode {
    fn from(element: HtmlElement) -> Self {
        HtmlNode::Element(element)
    }
}

impl HtmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Empty `<p>` used as the scratch container for inline content
    pub fn paragraph() -> Self {
        Self::new("p")
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: impl Into<HtmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_child(HtmlNode::text(text))
    }

    pub fn append(&mut self, child: impl Into<HtmlNode>) {
        self.children.push(child.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_list(&self) -> bool {
        self.list_marker().is_some()
    }

    pub fn is_paragraph(&self) -> bool {
        self.is("p")
    }

    pub fn is_checkbox(&self) -> bool {
        self.is("input")
            && self
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("checkbox"))
    }

    pub fn list_marker(&self) -> Option<ListMarker> {
        match self.name.as_str() {
            "ol" => Some(ListMarker::Ordered),
            "ul" => Some(ListMarker::Unordered),
            _ => None,
        }
    }

    /// Element children only, in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &HtmlElement> {
        self.children.iter().filter_map(HtmlNode::as_element)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// First descendant (depth first, document order) matching `pred`.
    ///
    /// Subtrees whose root matches `prune` are not entered.
    pub fn find_descendant<F, G>(&self, pred: F, prune: G) -> Option<&HtmlElement>
    where
        F: Fn(&HtmlElement) -> bool + Copy,
        G: Fn(&HtmlElement) -> bool + Copy,
    {
        for child in self.child_elements() {
            if pred(child) {
                return Some(child);
            }
            if prune(child) {
                continue;
            }
            if let Some(found) = child.find_descendant(pred, prune) {
                return Some(found);
            }
        }
        None
    }

    /// Removes every descendant element matching `pred`, at any depth.
    pub fn remove_descendants<F>(&mut self, pred: F)
    where
        F: Fn(&HtmlElement) -> bool + Copy,
    {
        self.children.retain(|child| match child {
            HtmlNode::Element(element) => !pred(element),
            HtmlNode::Text(_) => true,
        });
        for child in self.children.iter_mut() {
            if let HtmlNode::Element(element) = child {
                element.remove_descendants(pred);
            }
        }
    }

    /// Outermost `ul`/`ol` elements below this one, in document order.
    pub fn lists(&self) -> Vec<&HtmlElement> {
        let mut found = Vec::new();
        self.collect_lists(&mut found);
        found
    }

    fn collect_lists<'a>(&'a self, found: &mut Vec<&'a HtmlElement>) {
        for child in self.child_elements() {
            if child.is_list() {
                found.push(child);
            } else {
                child.collect_lists(found);
            }
        }
    }
}

/// Parses an HTML document or fragment.
///
/// The returned element is a synthetic `body` holding the parsed body content.
pub fn parse_fragment(html: &str) -> HtmlElement {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts).one(html);

    let mut root = HtmlElement::new("body");
    match find_body(&dom.document) {
        Some(body) => copy_children(&body, &mut root),
        None => copy_children(&dom.document, &mut root),
    }
    root
}

fn find_body(handle: &Handle) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { ref name, .. } = child.data {
            if &*name.local == "body" {
                return Some(child.clone());
            }
        }
        if let Some(body) = find_body(child) {
            return Some(body);
        }
    }
    None
}

fn copy_children(handle: &Handle, parent: &mut HtmlElement) {
    for child in handle.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => {
                parent.append(HtmlNode::Text(contents.borrow().to_string()));
            }
            NodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                let mut element = HtmlElement::new(&name.local);
                for attr in attrs.borrow().iter() {
                    element
                        .attrs
                        .push((attr.name.local.to_string(), attr.value.to_string()));
                }
                copy_children(child, &mut element);
                parent.append(element);
            }
            _ => {}
        }
    }
}
