use serde::{Deserialize, Serialize};

use super::mark::{Mark, MarkSet};
use super::span::utf16_len;

/// An element of the document tree.
///
/// Each variant consumes positions differently:
/// - `Block`: an opening and a closing boundary token around its content
/// - `Atom`: a single position (hard breaks, images, mentions)
/// - `Text`: one position per UTF-16 code unit of its text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Block(Block),
    Atom(Atom),
    Text(TextRun),
}

/// Structural container (paragraph, heading, list item, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: String,
    #[serde(default)]
    pub content: Vec<Node>,
}

/// Leaf node without text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    pub kind: String,
}

/// Inline run of text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "MarkSet::is_empty")]
    pub marks: MarkSet,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: MarkSet::new(),
        }
    }

    /// Text length in UTF-16 code units.
    pub fn len(&self) -> usize {
        utf16_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Block {
    /// Number of positions covered by the block's children.
    pub fn content_size(&self) -> usize {
        self.content.iter().map(Node::size).sum()
    }
}

impl Node {
    pub fn block(kind: impl Into<String>, content: Vec<Node>) -> Self {
        Node::Block(Block {
            kind: kind.into(),
            content,
        })
    }

    pub fn atom(kind: impl Into<String>) -> Self {
        Node::Atom(Atom { kind: kind.into() })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextRun::new(text))
    }

    pub fn marked_text(text: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        Node::Text(TextRun {
            text: text.into(),
            marks: marks.into_iter().collect(),
        })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Text length in UTF-16 code units; zero for non-text nodes.
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text(run) => run.len(),
            _ => 0,
        }
    }

    /// Marks on this node; always empty for non-text nodes.
    pub fn marks(&self) -> &[Mark] {
        match self {
            Node::Text(run) => run.marks.as_slice(),
            _ => &[],
        }
    }

    /// Number of positions this node occupies in its parent.
    pub fn size(&self) -> usize {
        match self {
            Node::Block(block) => block.content_size() + 2,
            Node::Atom(_) => 1,
            Node::Text(run) => run.len(),
        }
    }
}
