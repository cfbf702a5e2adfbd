use crate::model::Span;

/// Result of committing a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Ranges whose marks changed, in step order
    pub changed: Vec<Span>,
    pub version: u64,
}

impl Patch {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
