//! Source line numbers.

use std::fmt;

/// Zero-based source line of a node.
///
/// Stored zero-based as the parser counts lines; `Display` renders the
/// one-based form used in diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Line(pub u32);

impl Line {
    /// Line for synthesized nodes with no source position.
    pub const DUMMY: Line = Line(0);

    #[inline]
    pub const fn new(zero_based: u32) -> Self {
        Line(zero_based)
    }

    /// One-based line number.
    #[inline]
    pub const fn one_based(self) -> u64 {
        self.0 as u64 + 1
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.one_based())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

impl From<u32> for Line {
    fn from(zero_based: u32) -> Self {
        Line(zero_based)
    }
}
