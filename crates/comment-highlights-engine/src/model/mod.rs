//! # Document Model
//!
//! An immutable-per-version tree of nodes. Text runs carry an ordered
//! [`MarkSet`]; blocks and atoms carry none.
//!
//! ## Position addressing
//!
//! Every node occupies positions in a flattened depth-first linearization:
//!
//! ```text
//! <paragraph> h e l l o </paragraph> <paragraph> w o r l d </paragraph>
//! 0           1 2 3 4 5 6            7           8 ...     13
//! ```
//!
//! A text run of length `L` at position `pos` covers `[pos, pos + L)`, with
//! lengths counted in UTF-16 code units. Everything that computes ranges
//! (locating highlights, applying transactions) goes through
//! [`Document::descendants`] so there is a single addressing rule.

pub mod document;
pub mod mark;
pub mod node;
pub mod span;

pub use document::Document;
pub use mark::{Attrs, Mark, MarkSet};
pub use node::{Atom, Block, Node, TextRun};
pub use span::Span;
