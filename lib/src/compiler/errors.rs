use thiserror::Error;

use crate::compiler::Operator;

/// Errors returned while compiling a pattern.
///
/// Every error includes the offset within the pattern where the problem
/// was detected.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A `)` that doesn't close any `(`.
    #[error("missing left parenthesis '(' for ')' at position {position}")]
    MissingLeftParen {
        /// Position of the `)`.
        position: usize,
    },

    /// A `(` that is never closed.
    #[error("missing right parenthesis ')' for '(' at position {position}")]
    MissingRightParen {
        /// Position of the `(`.
        position: usize,
    },

    /// An operator without enough operands, like in `*a` or `a|`.
    #[error("missing operand for {operator} at position {position}")]
    MissingOperand {
        /// Operator that lacks an operand.
        operator: Operator,
        /// Position of the operator, or the position of the token that
        /// follows an implicit concatenation.
        position: usize,
    },

    /// The pattern contains the byte reserved for epsilon rules.
    #[error("reserved byte 0x00 used as literal at position {position}")]
    ReservedSymbol {
        /// Position of the reserved byte.
        position: usize,
    },
}
