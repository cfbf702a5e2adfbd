use comment_highlights_engine::{
    Document, Editor, EditorHost, Mark, Node, Patch, Span, Transaction, TransactionError, exists,
    find_all, highlight_ids, locate, remove_highlight,
};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

fn hl(id: &str) -> Mark {
    Mark::new("highlight").with_attr("highlightId", id)
}

/// Wraps an [`Editor`] and records every dispatched transaction.
struct RecordingHost {
    editor: Editor,
    dispatched: Vec<Transaction>,
}

impl RecordingHost {
    fn new(doc: Document) -> Self {
        Self {
            editor: Editor::new(doc),
            dispatched: Vec::new(),
        }
    }
}

impl EditorHost for RecordingHost {
    fn document(&self) -> &Document {
        self.editor.document()
    }

    fn dispatch(&mut self, tr: Transaction) -> Result<Patch, TransactionError> {
        self.dispatched.push(tr.clone());
        self.editor.dispatch(tr)
    }
}

#[fixture]
fn article() -> Document {
    Document::new(vec![
        Node::block("heading", vec![Node::marked_text("Intro", [hl("title")])]),
        Node::block(
            "paragraph",
            vec![
                Node::text("The "),
                Node::marked_text("quick ", [hl("y")]),
                Node::marked_text("brown", [hl("y"), Mark::new("bold")]),
                Node::text(" fox"),
                Node::atom("hard_break"),
                Node::marked_text("jumps", [hl("z")]),
            ],
        ),
        Node::block(
            "blockquote",
            vec![Node::block(
                "paragraph",
                vec![Node::text("over the "), Node::marked_text("lazy dog", [hl("y")])],
            )],
        ),
    ])
}

/// Every highlight mark in the tree as `(id, run text)`.
fn highlight_runs(doc: &Document) -> Vec<(String, String)> {
    let mut runs = Vec::new();
    doc.descendants(|node, _| {
        if let Node::Text(run) = node {
            for mark in &run.marks {
                if let Some(id) = mark.attr_str("highlightId") {
                    runs.push((id.to_string(), run.text.clone()));
                }
            }
        }
    });
    runs
}

#[rstest]
#[case::single_run("title")]
#[case::split_across_blocks("y")]
#[case::after_atom("z")]
#[case::absent("missing")]
fn removal_clears_every_occurrence(article: Document, #[case] id: &str) {
    let mut editor = Editor::new(article);
    remove_highlight(&mut editor, id);
    assert!(!exists(editor.document(), id));
    assert!(find_all(editor.document(), id).is_empty());
}

#[rstest]
fn removal_of_unknown_id_submits_nothing(article: Document) {
    let mut host = RecordingHost::new(article.clone());

    assert!(!remove_highlight(&mut host, "missing"));

    assert!(host.dispatched.is_empty());
    assert_eq!(host.document(), &article);
    assert_eq!(host.document().version(), 0);
}

#[rstest]
fn second_removal_returns_false(article: Document) {
    let mut editor = Editor::new(article);
    assert!(remove_highlight(&mut editor, "y"));
    assert!(!remove_highlight(&mut editor, "y"));
}

#[test]
fn hello_world_span_and_removal() {
    let doc = Document::new(vec![Node::block(
        "paragraph",
        vec![Node::marked_text("hello world", [hl("x")])],
    )]);
    // Text starts right after the paragraph's opening token
    let p = 1;

    let found = locate(&doc, "x").unwrap();
    assert_eq!(found.span, Span::new(p, p + 11));
    assert_eq!(found.node.text, "hello world");

    let mut editor = Editor::new(doc);
    assert!(remove_highlight(&mut editor, "x"));
    assert!(highlight_runs(editor.document()).is_empty());
    assert_eq!(
        editor.document().content(),
        &[Node::block("paragraph", vec![Node::text("hello world")])]
    );
}

#[test]
fn disjoint_runs_removed_in_one_transaction() {
    let doc = Document::new(vec![
        Node::block("paragraph", vec![Node::marked_text("first", [hl("y")])]),
        Node::block(
            "paragraph",
            vec![Node::text("gap "), Node::marked_text("second", [hl("y")])],
        ),
    ]);
    let mut host = RecordingHost::new(doc);

    assert!(remove_highlight(&mut host, "y"));

    assert_eq!(host.dispatched.len(), 1);
    assert_eq!(host.dispatched[0].steps().len(), 2);
    assert_eq!(host.document().version(), 1);
    assert_eq!(
        host.document().content(),
        &[
            Node::block("paragraph", vec![Node::text("first")]),
            Node::block("paragraph", vec![Node::text("gap second")]),
        ]
    );
}

#[rstest]
fn removal_leaves_other_highlights_and_marks(article: Document) {
    let mut editor = Editor::new(article);
    assert!(remove_highlight(&mut editor, "y"));

    assert_eq!(
        highlight_runs(editor.document()),
        vec![
            ("title".to_string(), "Intro".to_string()),
            ("z".to_string(), "jumps".to_string()),
        ]
    );
    assert_eq!(highlight_ids(editor.document()), vec!["title", "z"]);

    // Formatting marks on the formerly highlighted text survive
    let mut bold_runs = Vec::new();
    editor.document().descendants(|node, _| {
        if node.marks().iter().any(|m| m.is_type("bold")) {
            bold_runs.push(node.clone());
        }
    });
    assert_eq!(bold_runs, vec![Node::marked_text("brown", [Mark::new("bold")])]);
}

#[rstest]
fn removal_is_one_undo_step(article: Document) {
    let mut editor = Editor::new(article.clone());
    assert!(remove_highlight(&mut editor, "y"));
    assert_eq!(editor.history_len(), 1);

    assert!(editor.undo());
    assert_eq!(editor.document().content(), article.content());
    assert_eq!(find_all(editor.document(), "y").len(), 3);
}

#[rstest]
fn replaced_document_is_re_read(article: Document) {
    let mut editor = Editor::new(article);
    editor.replace_document(Document::new(vec![Node::block(
        "paragraph",
        vec![Node::marked_text("fresh", [hl("y")])],
    )]));

    assert!(remove_highlight(&mut editor, "y"));
    assert!(!exists(editor.document(), "y"));
}
