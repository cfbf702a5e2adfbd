//! # Comment Highlights
//!
//! A comment highlight is a mark (type `highlight` by default) whose
//! `highlightId` attribute links a range of text to a comment thread. One id
//! may sit on many text runs, for instance when the highlighted text crosses
//! a formatting boundary; together those runs form one logical highlight.
//!
//! - **`schema`**: which mark type and attribute identify a highlight
//! - **`locate`**: traversal that finds every run carrying a given id
//! - **`remove`**: clears all of a highlight's runs in one transaction
//!
//! Absence is a normal outcome everywhere: looking up or removing an id that
//! is not in the document yields `None`/`false`, never an error.

pub mod locate;
pub mod remove;
pub mod schema;

pub use locate::{HighlightMatch, exists, find_all, highlight_ids, locate};
pub use remove::remove_highlight;
pub use schema::{HIGHLIGHT_ID_ATTR, HIGHLIGHT_MARK, HighlightSchema};
