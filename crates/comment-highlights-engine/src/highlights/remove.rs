use crate::editing::{EditorHost, MarkTarget};
use crate::highlights::HighlightSchema;
use crate::model::{Mark, Span};

impl HighlightSchema {
    /// Remove every occurrence of `highlight_id` in a single transaction.
    ///
    /// Returns true iff a transaction was committed. Returns false when the
    /// highlight is already gone (nothing is dispatched) or when the host
    /// rejects the transaction; no retry is attempted.
    pub fn remove<H: EditorHost + ?Sized>(&self, host: &mut H, highlight_id: &str) -> bool {
        // Collect first: committing invalidates positions of later matches
        let mut removals: Vec<(Span, Mark)> = Vec::new();
        self.for_each_match(host.document(), highlight_id, |m| {
            removals.push((m.span, m.mark.clone()));
        });

        if removals.is_empty() {
            log::debug!("highlight {highlight_id:?} not found, nothing to remove");
            return false;
        }

        let mut tr = host.transaction();
        for (span, mark) in removals {
            tr.remove_mark(span.start, span.end, MarkTarget::Exact(mark));
        }

        match host.dispatch(tr) {
            Ok(patch) => {
                log::debug!(
                    "removed highlight {highlight_id:?} from {} range(s), document version {}",
                    patch.changed.len(),
                    patch.version
                );
                true
            }
            Err(err) => {
                log::warn!("failed to remove highlight {highlight_id:?}: {err}");
                false
            }
        }
    }
}

/// [`HighlightSchema::remove`] with the default schema.
pub fn remove_highlight<H: EditorHost + ?Sized>(host: &mut H, highlight_id: &str) -> bool {
    HighlightSchema::DEFAULT.remove(host, highlight_id)
}
