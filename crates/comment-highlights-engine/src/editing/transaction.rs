use crate::model::document::{normalize, split_run};
use crate::model::{Mark, Node, Span};

/// Which marks a [`Step::RemoveMark`] strips from a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkTarget {
    /// Every mark of this type, whatever its attributes
    Type(String),
    /// Only marks structurally equal to this one
    Exact(Mark),
}

impl MarkTarget {
    pub fn matches(&self, mark: &Mark) -> bool {
        match self {
            MarkTarget::Type(mark_type) => mark.is_type(mark_type),
            MarkTarget::Exact(target) => target == mark,
        }
    }
}

impl From<Mark> for MarkTarget {
    fn from(mark: Mark) -> Self {
        MarkTarget::Exact(mark)
    }
}

impl From<&str> for MarkTarget {
    fn from(mark_type: &str) -> Self {
        MarkTarget::Type(mark_type.to_string())
    }
}

/// A single document mutation inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    RemoveMark {
        from: usize,
        to: usize,
        target: MarkTarget,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction built against version {expected} but document is at version {actual}")]
    StaleVersion { expected: u64, actual: u64 },
    #[error("range {from}..{to} is outside the document (size {size})")]
    OutOfRange { from: usize, to: usize, size: usize },
}

/// A batch of steps committed atomically as one document version.
///
/// All step positions refer to the document the transaction was created
/// from. Mark removal never changes node sizes, so later steps stay valid
/// after earlier ones are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    base_version: u64,
    steps: Vec<Step>,
}

impl Transaction {
    pub fn new(base_version: u64) -> Self {
        Self {
            base_version,
            steps: Vec::new(),
        }
    }

    /// Queue removal of marks matching `target` over `[from, to)`.
    pub fn remove_mark(
        &mut self,
        from: usize,
        to: usize,
        target: impl Into<MarkTarget>,
    ) -> &mut Self {
        self.steps.push(Step::RemoveMark {
            from,
            to,
            target: target.into(),
        });
        self
    }

    pub fn base_version(&self) -> u64 {
        self.base_version
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Apply one step to a working copy of the document content.
///
/// Returns the span the step changed, or `None` if it matched nothing.
pub(crate) fn apply_step(
    content: &mut Vec<Node>,
    step: &Step,
) -> Result<Option<Span>, TransactionError> {
    match step {
        Step::RemoveMark { from, to, target } => {
            let size: usize = content.iter().map(Node::size).sum();
            if from > to || *to > size {
                return Err(TransactionError::OutOfRange {
                    from: *from,
                    to: *to,
                    size,
                });
            }
            let range = Span::new(*from, *to);
            let removed = remove_mark_in(content, 0, range, target);
            normalize(content);
            Ok((removed > 0).then_some(range))
        }
    }
}

/// Strip marks matching `target` from every text run overlapping `range`,
/// splitting runs at the range edges. Returns the number of marks removed.
fn remove_mark_in(nodes: &mut Vec<Node>, start: usize, range: Span, target: &MarkTarget) -> usize {
    let mut removed = 0;
    let mut pos = start;
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes.drain(..) {
        let size = node.size();
        match node {
            Node::Block(mut block) => {
                if Span::new(pos, pos + size).overlaps(range) {
                    removed += remove_mark_in(&mut block.content, pos + 1, range, target);
                }
                out.push(Node::Block(block));
            }
            Node::Text(run) => {
                let span = Span::new(pos, pos + size);
                if !span.overlaps(range) || !run.marks.iter().any(|m| target.matches(m)) {
                    out.push(Node::Text(run));
                } else {
                    let cut_from = range.start.max(pos) - pos;
                    let cut_to = range.end.min(span.end) - pos;
                    let (before, mut inside, after) = split_run(run, cut_from, cut_to);
                    removed += inside.marks.remove_where(|m| target.matches(m));
                    out.extend([before, inside, after].into_iter().map(Node::Text));
                }
            }
            atom @ Node::Atom(_) => out.push(atom),
        }
        pos += size;
    }

    *nodes = out;
    removed
}
