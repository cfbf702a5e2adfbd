/*!
 * # Editing Core Module
 *
 * Documents are never mutated in place. Every change is expressed as a
 * [`Transaction`] of [`Step`]s that the [`EditorHost`] validates and commits
 * as one new document version.
 *
 * ## Edit Pipeline
 *
 * 1. **Build**: `host.transaction()` starts a transaction stamped with the
 *    current document version
 * 2. **Queue**: steps such as `remove_mark(from, to, target)` are appended;
 *    all positions refer to the document the transaction was started from
 * 3. **Dispatch**: the host rejects stale transactions, applies every step to
 *    a working copy, normalizes text runs, and swaps the copy in
 * 4. **Patch**: the caller gets the changed ranges and the new version
 *
 * Because a transaction either applies completely or not at all, callers that
 * need several ranges changed together (e.g. a highlight spanning runs) fold
 * them into one transaction: one version step, one undo entry.
 *
 * ## Module Structure
 *
 * - **`transaction`**: `Transaction`, `Step`, `MarkTarget` and step application
 * - **`editor`**: the `EditorHost` trait and the in-memory `Editor` host
 * - **`patch`**: commit result metadata
 */

pub mod editor;
pub mod patch;
pub mod transaction;

pub use editor::{DEFAULT_HISTORY_LIMIT, Editor, EditorHost};
pub use patch::Patch;
pub use transaction::{MarkTarget, Step, Transaction, TransactionError};
