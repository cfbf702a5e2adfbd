pub mod activation;
pub mod editing;
pub mod highlights;
pub mod io;
pub mod model;

// Re-export key types for easier usage
pub use activation::{
    ActivationChannel, HIGHLIGHT_EVENT_NAME, HighlightEvent, SubscriberId, Subscription,
};
pub use editing::{Editor, EditorHost, MarkTarget, Patch, Step, Transaction, TransactionError};
pub use highlights::{
    HighlightMatch, HighlightSchema, exists, find_all, highlight_ids, locate, remove_highlight,
};
pub use io::*;
pub use model::{Atom, Block, Document, Mark, MarkSet, Node, Span, TextRun};
