use std::fmt;

/// Lifecycle of a single traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalState {
    /// Queue non-empty and the visit cap not yet reached
    Running,

    /// Queue drained or cap reached; the document can be built
    Done,
}

impl TraversalState {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TraversalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Done => write!(f, "done"),
        }
    }
}
