use crate::highlights::HighlightSchema;
use crate::model::{Document, Mark, Node, Span, TextRun};

/// One occurrence of a highlight: the mark, the text run holding it, and the
/// run's absolute span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightMatch<'a> {
    pub mark: &'a Mark,
    pub node: &'a TextRun,
    pub span: Span,
}

impl HighlightSchema {
    /// Visit every occurrence of `highlight_id` in document order.
    ///
    /// The traversal always covers the whole document; a highlight split
    /// across several runs yields one match per run.
    pub fn for_each_match<'a>(
        &self,
        doc: &'a Document,
        highlight_id: &str,
        mut f: impl FnMut(HighlightMatch<'a>),
    ) {
        doc.descendants(|node, pos| {
            let Node::Text(run) = node else {
                return;
            };
            for mark in &run.marks {
                if self.is_highlight(mark, highlight_id) {
                    f(HighlightMatch {
                        mark,
                        node: run,
                        span: Span::new(pos, pos + run.len()),
                    });
                }
            }
        });
    }

    /// All occurrences of `highlight_id`, in document order.
    pub fn find_all<'a>(&self, doc: &'a Document, highlight_id: &str) -> Vec<HighlightMatch<'a>> {
        let mut matches = Vec::new();
        self.for_each_match(doc, highlight_id, |m| matches.push(m));
        matches
    }

    /// The last occurrence of `highlight_id` in document order.
    pub fn locate<'a>(&self, doc: &'a Document, highlight_id: &str) -> Option<HighlightMatch<'a>> {
        let mut last = None;
        self.for_each_match(doc, highlight_id, |m| last = Some(m));
        last
    }

    pub fn exists(&self, doc: &Document, highlight_id: &str) -> bool {
        let mut found = false;
        self.for_each_match(doc, highlight_id, |_| found = true);
        found
    }

    /// Distinct highlight ids in order of first appearance.
    pub fn highlight_ids(&self, doc: &Document) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        doc.descendants(|node, _| {
            for mark in node.marks() {
                if let Some(id) = self.highlight_id(mark)
                    && !ids.iter().any(|seen| seen == id)
                {
                    ids.push(id.to_string());
                }
            }
        });
        ids
    }
}

/// [`HighlightSchema::locate`] with the default schema.
pub fn locate<'a>(doc: &'a Document, highlight_id: &str) -> Option<HighlightMatch<'a>> {
    HighlightSchema::DEFAULT.locate(doc, highlight_id)
}

/// [`HighlightSchema::exists`] with the default schema.
pub fn exists(doc: &Document, highlight_id: &str) -> bool {
    HighlightSchema::DEFAULT.exists(doc, highlight_id)
}

/// [`HighlightSchema::find_all`] with the default schema.
pub fn find_all<'a>(doc: &'a Document, highlight_id: &str) -> Vec<HighlightMatch<'a>> {
    HighlightSchema::DEFAULT.find_all(doc, highlight_id)
}

/// [`HighlightSchema::highlight_ids`] with the default schema.
pub fn highlight_ids(doc: &Document) -> Vec<String> {
    HighlightSchema::DEFAULT.highlight_ids(doc)
}
