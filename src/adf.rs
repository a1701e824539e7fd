//! ADF (Atlassian Document Format) output nodes and their builder.

use serde::{Deserialize, Serialize};

/// Inline formatting applied to a text node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Strike,
    Underline,
    Link { attrs: LinkAttrs },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    Todo,
    Done,
}

impl From<bool> for TaskState {
    fn from(checked: bool) -> Self {
        if checked {
            TaskState::Done
        } else {
            TaskState::Todo
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItemAttrs {
    pub local_id: String,
    pub state: TaskState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListAttrs {
    pub local_id: String,
}

/// Variant of a list block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bullet,
    Ordered,
    Task,
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListKind::Bullet => write!(f, "bulletList"),
            ListKind::Ordered => write!(f, "orderedList"),
            ListKind::Task => write!(f, "taskList"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdfNode {
    Doc {
        version: u32,
        content: Vec<AdfNode>,
    },
    Paragraph {
        #[serde(default)]
        content: Vec<AdfNode>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
    BulletList {
        content: Vec<AdfNode>,
    },
    OrderedList {
        content: Vec<AdfNode>,
    },
    TaskList {
        attrs: TaskListAttrs,
        content: Vec<AdfNode>,
    },
    ListItem {
        content: Vec<AdfNode>,
    },
    TaskItem {
        attrs: TaskItemAttrs,
        content: Vec<AdfNode>,
    },
}

impl AdfNode {
    pub fn content(&self) -> &[AdfNode] {
        match self {
            AdfNode::Doc { content, .. }
            | AdfNode::Paragraph { content }
            | AdfNode::BulletList { content }
            | AdfNode::OrderedList { content }
            | AdfNode::TaskList { content, .. }
            | AdfNode::ListItem { content }
            | AdfNode::TaskItem { content, .. } => content,
            AdfNode::Text { .. } | AdfNode::HardBreak => &[],
        }
    }

    /// `Some` for the three list block variants
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            AdfNode::BulletList { .. } => Some(ListKind::Bullet),
            AdfNode::OrderedList { .. } => Some(ListKind::Ordered),
            AdfNode::TaskList { .. } => Some(ListKind::Task),
            _ => None,
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, AdfNode::Paragraph { .. })
    }

    /// Text of the direct text-bearing children, without recursing.
    /// A hard break reads as a space.
    pub fn inline_text(&self) -> String {
        self.content()
            .iter()
            .map(|node| match node {
                AdfNode::Text { text, .. } => text.as_str(),
                AdfNode::HardBreak => " ",
                _ => "",
            })
            .collect()
    }

    /// Concatenated text of every text node below this one
    pub fn plain_text(&self) -> String {
        match self {
            AdfNode::Text { text, .. } => text.clone(),
            _ => self.content().iter().map(AdfNode::plain_text).collect(),
        }
    }

    /// `checked` flag of a task item
    pub fn is_checked(&self) -> Option<bool> {
        match self {
            AdfNode::TaskItem { attrs, .. } => Some(attrs.state == TaskState::Done),
            _ => None,
        }
    }

    pub fn local_id(&self) -> Option<&str> {
        match self {
            AdfNode::TaskItem { attrs, .. } => Some(&attrs.local_id),
            AdfNode::TaskList { attrs, .. } => Some(&attrs.local_id),
            _ => None,
        }
    }
}

/// Node factory and output accumulator.
///
/// The associated constructors are pure. An `AdfBuilder` value collects the
/// nodes a paragraph converter produces for one list item.
#[derive(Debug, Default)]
pub struct AdfBuilder {
    items: Vec<AdfNode>,
}

impl AdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: AdfNode) {
        self.items.push(item);
    }

    pub fn build(self) -> Vec<AdfNode> {
        self.items
    }

    pub fn doc(content: Vec<AdfNode>) -> AdfNode {
        AdfNode::Doc {
            version: 1,
            content,
        }
    }

    pub fn bullet_list_item(content: Vec<AdfNode>) -> AdfNode {
        AdfNode::BulletList { content }
    }

    pub fn ordered_list_item(content: Vec<AdfNode>) -> AdfNode {
        AdfNode::OrderedList { content }
    }

    /// The list id is derived from the first task so that it is stable
    /// across conversions of the same source.
    pub fn task_list_item(content: Vec<AdfNode>) -> AdfNode {
        let first = content
            .iter()
            .find_map(AdfNode::local_id)
            .unwrap_or("task-item");
        AdfNode::TaskList {
            attrs: TaskListAttrs {
                local_id: format!("list-{}", first),
            },
            content,
        }
    }

    pub fn list_item(content: Vec<AdfNode>) -> AdfNode {
        AdfNode::ListItem { content }
    }

    /// Builds a task item from `[paragraph, nested blocks...]`.
    ///
    /// ADF task items carry inline content directly, so a leading paragraph
    /// is unwrapped into its inline nodes.
    pub fn task_item_from_content(content: Vec<AdfNode>, checked: bool, local_id: &str) -> AdfNode {
        let mut flattened = Vec::with_capacity(content.len());
        let mut nodes = content.into_iter();
        match nodes.next() {
            Some(AdfNode::Paragraph { content }) => flattened.extend(content),
            Some(other) => flattened.push(other),
            None => {}
        }
        flattened.extend(nodes);

        AdfNode::TaskItem {
            attrs: TaskItemAttrs {
                local_id: local_id.to_string(),
                state: TaskState::from(checked),
            },
            content: flattened,
        }
    }

    pub fn paragraph(content: Vec<AdfNode>) -> AdfNode {
        AdfNode::Paragraph { content }
    }

    pub fn paragraph_item(text: &str) -> AdfNode {
        AdfNode::Paragraph {
            content: vec![Self::text(text)],
        }
    }

    pub fn text(text: &str) -> AdfNode {
        AdfNode::Text {
            text: text.to_string(),
            marks: Vec::new(),
        }
    }

    pub fn marked_text(text: &str, marks: Vec<Mark>) -> AdfNode {
        AdfNode::Text {
            text: text.to_string(),
            marks,
        }
    }
}
