use std::collections::VecDeque;

use crate::editing::transaction::apply_step;
use crate::editing::{Patch, Transaction, TransactionError};
use crate::model::Document;

/// Default number of undo steps kept by [`Editor`].
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// The document/transaction surface the highlight core consumes.
///
/// Implemented by [`Editor`]; hosts embedding a different editor engine
/// implement it over their own document storage.
pub trait EditorHost {
    /// The current document version.
    fn document(&self) -> &Document;

    /// Start an empty transaction against the current version.
    fn transaction(&self) -> Transaction {
        Transaction::new(self.document().version())
    }

    /// Commit a transaction as one document version, or reject it whole.
    fn dispatch(&mut self, tr: Transaction) -> Result<Patch, TransactionError>;
}

/// Minimal single-writer editor host.
///
/// Owns the current [`Document`], applies transactions atomically against a
/// working copy, and keeps one undo entry per committed transaction.
#[derive(Debug, Clone)]
pub struct Editor {
    doc: Document,
    undo_stack: VecDeque<Document>,
    history_limit: usize,
}

impl Editor {
    pub fn new(doc: Document) -> Self {
        Self::with_history_limit(doc, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(doc: Document, history_limit: usize) -> Self {
        Self {
            doc,
            undo_stack: VecDeque::new(),
            history_limit,
        }
    }

    /// Swap in a new document, e.g. after a reload or a remote replace.
    ///
    /// The version still advances, so transactions built against the old
    /// document are rejected as stale. Undo history is discarded.
    pub fn replace_document(&mut self, mut doc: Document) {
        doc.version = self.doc.version + 1;
        self.doc = doc;
        self.undo_stack.clear();
    }

    /// Revert the most recent committed transaction.
    ///
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(mut previous) = self.undo_stack.pop_back() else {
            return false;
        };
        previous.version = self.doc.version + 1;
        self.doc = previous;
        log::debug!("undo: document now at version {}", self.doc.version);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    fn push_history(&mut self, doc: Document) {
        if self.history_limit == 0 {
            return;
        }
        self.undo_stack.push_back(doc);
        while self.undo_stack.len() > self.history_limit {
            self.undo_stack.pop_front();
        }
    }
}

impl EditorHost for Editor {
    fn document(&self) -> &Document {
        &self.doc
    }

    /// Empty transactions are accepted without creating a new version.
    fn dispatch(&mut self, tr: Transaction) -> Result<Patch, TransactionError> {
        if tr.base_version() != self.doc.version {
            return Err(TransactionError::StaleVersion {
                expected: tr.base_version(),
                actual: self.doc.version,
            });
        }
        if tr.is_empty() {
            return Ok(Patch {
                changed: Vec::new(),
                version: self.doc.version,
            });
        }

        // Steps run on a copy so a rejected step leaves the document untouched
        let mut content = self.doc.content.clone();
        let mut changed = Vec::new();
        for step in tr.steps() {
            if let Some(span) = apply_step(&mut content, step)? {
                changed.push(span);
            }
        }

        let version = self.doc.version + 1;
        let previous = std::mem::replace(&mut self.doc, Document { content, version });
        self.push_history(previous);
        log::debug!(
            "committed {} step(s) as version {version}, {} range(s) changed",
            tr.steps().len(),
            changed.len()
        );

        Ok(Patch { changed, version })
    }
}
