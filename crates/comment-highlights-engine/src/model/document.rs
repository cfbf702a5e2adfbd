use serde::{Deserialize, Serialize};

use super::node::{Node, TextRun};
use super::span::{Span, utf16_to_byte};

/// Root of a rich-text document tree.
///
/// A `Document` is immutable per version: the editor host replaces it as a
/// whole when a transaction is committed, stamping the new version. The root
/// itself has no boundary tokens, so its first child sits at position 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub(crate) content: Vec<Node>,
    /// Version stamped by the editor host (not part of the serialized form)
    #[serde(skip)]
    pub(crate) version: u64,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            content,
            version: 0,
        }
    }

    pub fn content(&self) -> &[Node] {
        &self.content
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Total number of positions in the document.
    pub fn size(&self) -> usize {
        self.content.iter().map(Node::size).sum()
    }

    /// Depth-first traversal calling `visit(node, pos)` for every node.
    ///
    /// `pos` is the position directly before the node. Children of a block
    /// start one position after the block itself, and a block ends one
    /// position after its last child.
    pub fn descendants<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node, usize),
    {
        visit_nodes(&self.content, 0, &mut visit);
    }

    /// Text content between two positions, with `separator` between blocks.
    pub fn text_between(&self, from: usize, to: usize, separator: &str) -> String {
        let mut out = String::new();
        let mut separate = false;
        self.descendants(|node, pos| match node {
            Node::Text(run) => {
                let span = Span::new(pos, pos + run.len());
                if !span.overlaps(Span::new(from, to)) {
                    return;
                }
                let start = utf16_to_byte(&run.text, from.saturating_sub(pos));
                let end = utf16_to_byte(&run.text, to.min(span.end) - pos);
                if separate && !out.is_empty() {
                    out.push_str(separator);
                }
                separate = false;
                out.push_str(&run.text[start..end]);
            }
            Node::Block(_) => separate = true,
            Node::Atom(_) => {}
        });
        out
    }
}

fn visit_nodes<'a, F>(nodes: &'a [Node], mut pos: usize, visit: &mut F) -> usize
where
    F: FnMut(&'a Node, usize),
{
    for node in nodes {
        visit(node, pos);
        pos = match node {
            Node::Block(block) => visit_nodes(&block.content, pos + 1, visit) + 1,
            other => pos + other.size(),
        };
    }
    pos
}

/// Restores the canonical shape of a node list in place.
///
/// Empty text runs are dropped and adjacent text runs carrying identical mark
/// sets are merged. Neither changes any position outside the merged runs.
pub(crate) fn normalize(nodes: &mut Vec<Node>) {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        match &mut node {
            Node::Text(run) if run.is_empty() => continue,
            Node::Text(run) => {
                if let Some(Node::Text(prev)) = out.last_mut()
                    && prev.marks == run.marks
                {
                    prev.text.push_str(&run.text);
                    continue;
                }
            }
            Node::Block(block) => normalize(&mut block.content),
            Node::Atom(_) => {}
        }
        out.push(node);
    }
    *nodes = out;
}

/// Splits `run` at UTF-16 offsets `a <= b` into up to three pieces.
pub(crate) fn split_run(run: TextRun, a: usize, b: usize) -> (TextRun, TextRun, TextRun) {
    let byte_a = utf16_to_byte(&run.text, a);
    let byte_b = utf16_to_byte(&run.text, b).max(byte_a);
    let piece = |text: &str| TextRun {
        text: text.to_string(),
        marks: run.marks.clone(),
    };
    (
        piece(&run.text[..byte_a]),
        piece(&run.text[byte_a..byte_b]),
        piece(&run.text[byte_b..]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mark;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        Document::new(vec![
            Node::block("heading", vec![Node::text("Title")]),
            Node::block(
                "paragraph",
                vec![
                    Node::text("hello "),
                    Node::marked_text("world", [Mark::new("bold")]),
                    Node::atom("hard_break"),
                    Node::text("again"),
                ],
            ),
        ])
    }

    #[test]
    fn descendants_reports_positions_depth_first() {
        let doc = sample();
        let mut seen = Vec::new();
        doc.descendants(|node, pos| {
            let label = match node {
                Node::Block(b) => b.kind.clone(),
                Node::Atom(a) => a.kind.clone(),
                Node::Text(t) => t.text.clone(),
            };
            seen.push((label, pos));
        });

        assert_eq!(
            seen,
            vec![
                ("heading".to_string(), 0),
                ("Title".to_string(), 1),
                ("paragraph".to_string(), 7),
                ("hello ".to_string(), 8),
                ("world".to_string(), 14),
                ("hard_break".to_string(), 19),
                ("again".to_string(), 20),
            ]
        );
        assert_eq!(doc.size(), 26);
    }

    #[test]
    fn descendants_of_empty_document_visits_nothing() {
        let doc = Document::default();
        let mut count = 0;
        doc.descendants(|_, _| count += 1);
        assert_eq!(count, 0);
        assert_eq!(doc.size(), 0);
    }

    #[test]
    fn text_between_spans_runs_and_blocks() {
        let doc = sample();
        assert_eq!(doc.text_between(0, doc.size(), "\n"), "Title\nhello worldagain");
        assert_eq!(doc.text_between(10, 17, "\n"), "llo wor");
        assert_eq!(doc.text_between(14, 19, "\n"), "world");
    }

    #[test]
    fn normalize_merges_equal_runs_and_drops_empty_ones() {
        let bold = Mark::new("bold");
        let mut nodes = vec![Node::block(
            "paragraph",
            vec![
                Node::text("a"),
                Node::text(""),
                Node::text("b"),
                Node::marked_text("c", [bold.clone()]),
                Node::marked_text("d", [bold.clone()]),
                Node::atom("hard_break"),
                Node::text("e"),
            ],
        )];
        normalize(&mut nodes);

        assert_eq!(
            nodes,
            vec![Node::block(
                "paragraph",
                vec![
                    Node::text("ab"),
                    Node::marked_text("cd", [bold]),
                    Node::atom("hard_break"),
                    Node::text("e"),
                ],
            )]
        );
    }

    #[test]
    fn split_run_respects_utf16_offsets() {
        let run = TextRun::new("a😀bc");
        let (before, mid, after) = split_run(run, 1, 3);
        assert_eq!(before.text, "a");
        assert_eq!(mid.text, "😀");
        assert_eq!(after.text, "bc");
    }

    #[test]
    fn deserializes_tagged_json() {
        let json = r#"{"content":[{"type":"block","kind":"paragraph","content":[
            {"type":"text","text":"hi","marks":[{"type":"highlight","attrs":{"highlightId":"x"}}]}
        ]}]}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(
            doc,
            Document::new(vec![Node::block(
                "paragraph",
                vec![Node::marked_text(
                    "hi",
                    [Mark::new("highlight").with_attr("highlightId", "x")]
                )]
            )])
        );
    }
}
