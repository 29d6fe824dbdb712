//! Character coordinates in logical and wrapped text.

use serde::{Deserialize, Serialize};

/// A character position in `\n`-delimited (unwrapped) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogicalPosition {
    /// Logical line index
    pub line: usize,
    /// Character index within the logical line
    pub ch: usize,
}

impl LogicalPosition {
    /// Create a logical position.
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// A character position in renderer-wrapped lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WrappedPosition {
    /// Wrapped line index
    pub line: usize,
    /// Character index within the wrapped line
    pub ch: usize,
}

impl WrappedPosition {
    /// Create a wrapped position.
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}
