//! Binary-fold operators.
//!
//! An operator node applies one `OperatorKind` across an ordered operand
//! list as a left fold, so `a + b + c` arrives as a single node with three
//! operands rather than a nested tree.

use std::fmt;

/// The eighteen fold operators, in the parser's numbering order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatorKind {
    // Logical
    And,
    Or,

    // Membership
    In,
    NotIn,

    // Comparison
    Le,
    Ge,
    Lt,
    Gt,
    Ne,
    Eq,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Mod,
    FloorDiv,
    Div,
    Root,
    Pow,
}

impl OperatorKind {
    /// Every operator, indexed by its parser code.
    pub const ALL: [OperatorKind; 18] = [
        Self::And,
        Self::Or,
        Self::In,
        Self::NotIn,
        Self::Le,
        Self::Ge,
        Self::Lt,
        Self::Gt,
        Self::Ne,
        Self::Eq,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Mod,
        Self::FloorDiv,
        Self::Div,
        Self::Root,
        Self::Pow,
    ];

    /// Map a parser operator code to its kind.
    ///
    /// Returns `None` for codes outside `0..18`.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The parser code for this operator (inverse of [`from_code`](Self::from_code)).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Source-level spelling, for error messages and tree dumps.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Ne => "!=",
            Self::Eq => "==",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Mod => "%",
            Self::FloorDiv => "//",
            Self::Div => "/",
            Self::Root => "√",
            Self::Pow => "^",
        }
    }

    /// Whether the fold may stop before consuming every operand.
    pub const fn short_circuits(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Whether both sides are coerced to numbers before combining.
    ///
    /// `Add` is excluded: it concatenates when either side is a string.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Le
                | Self::Ge
                | Self::Lt
                | Self::Gt
                | Self::Sub
                | Self::Mul
                | Self::Mod
                | Self::FloorDiv
                | Self::Div
                | Self::Root
                | Self::Pow
        )
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for (i, kind) in OperatorKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.code()), i);
            assert_eq!(OperatorKind::from_code(kind.code()), Some(*kind));
        }
    }

    #[test]
    fn parser_numbering_matches() {
        assert_eq!(OperatorKind::from_code(0), Some(OperatorKind::And));
        assert_eq!(OperatorKind::from_code(10), Some(OperatorKind::Add));
        assert_eq!(OperatorKind::from_code(13), Some(OperatorKind::Mod));
        assert_eq!(OperatorKind::from_code(14), Some(OperatorKind::FloorDiv));
        assert_eq!(OperatorKind::from_code(17), Some(OperatorKind::Pow));
        assert_eq!(OperatorKind::from_code(18), None);
    }

    #[test]
    fn add_is_not_numeric() {
        assert!(!OperatorKind::Add.is_numeric());
        assert!(!OperatorKind::Eq.is_numeric());
        assert!(OperatorKind::Root.is_numeric());
    }

    #[test]
    fn only_logical_short_circuit() {
        let short: Vec<_> = OperatorKind::ALL
            .iter()
            .filter(|k| k.short_circuits())
            .collect();
        assert_eq!(short, [&OperatorKind::And, &OperatorKind::Or]);
    }
}
