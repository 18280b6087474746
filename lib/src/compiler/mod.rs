/*! Compiles patterns into deterministic finite automata.

The compiler scans the pattern once, from left to right, using the classic
operator-precedence technique with two stacks: one for operators and another
one for operands, which are automata. Every time an operator is applied
(folded), its operands are popped from the operand stack and the automaton
produced by the corresponding combinator is pushed in their place.

The supported syntax is minimal:

- Any byte other than `(`, `)`, `|`, `*` and `0x00` is a literal.
- Adjacent terms are concatenated.
- `a|b` is the alternation of `a` and `b`.
- `a*` is zero or more repetitions of `a`.
- `(a)` groups `a`, `()` is the empty string.

From highest to lowest, the precedence is: star, concatenation,
alternation. There is no escaping mechanism, so metacharacters can't be
used as literals.
 */

use std::fmt::{Display, Formatter};

use log::debug;

use crate::automaton::{Automaton, EPSILON};

pub use errors::*;

mod errors;


/// Operators recognized by the compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    /// Postfix `*`.
    KleeneStar,
    /// Implicit operator between adjacent terms.
    Concatenation,
    /// Infix `|`.
    Alternation,
    /// `(`, which opens a new scope in the operator stack.
    LeftParen,
}

impl Operator {
    /// Operators with higher precedence bind tighter. Left parenthesis has
    /// the lowest one, so nothing is folded past it.
    fn precedence(&self) -> u8 {
        match self {
            Operator::KleeneStar => 3,
            Operator::Concatenation => 2,
            Operator::Alternation => 1,
            Operator::LeftParen => 0,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::KleeneStar => write!(f, "operator '*'"),
            Operator::Concatenation => write!(f, "concatenation"),
            Operator::Alternation => write!(f, "operator '|'"),
            Operator::LeftParen => write!(f, "'('"),
        }
    }
}

/// Compiles a pattern into an [`Automaton`].
///
/// A compiler is consumed by [`Compiler::compile`], use a new one for each
/// pattern.
///
/// ```
/// # use regex_dfa::Compiler;
/// let automaton = Compiler::new().compile(b"b(a|b)*b").unwrap();
///
/// assert!(automaton.is_match("bab"));
/// assert!(!automaton.is_match("ba"));
/// ```
#[derive(Default)]
pub struct Compiler {
    /// Pending operators, with their positions in the pattern.
    operators: Vec<(Operator, usize)>,
    /// Automata produced so far.
    operands: Vec<Automaton>,
    /// True if the last token produced an operand. This is how implicit
    /// concatenations are detected.
    last_was_operand: bool,
}

impl Compiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `pattern`, returning the resulting automaton.
    pub fn compile(mut self, pattern: &[u8]) -> Result<Automaton, Error> {
        let mut prev = None;

        for (position, &byte) in pattern.iter().enumerate() {
            match byte {
                b'(' => {
                    if self.last_was_operand {
                        self.push_binary(Operator::Concatenation, position)?;
                    }
                    self.operators.push((Operator::LeftParen, position));
                    self.last_was_operand = false;
                }
                b')' => {
                    if prev == Some(b'(') {
                        self.operands.push(Automaton::empty());
                    } else if !self.last_was_operand {
                        self.check_dangling_operator()?;
                    }
                    self.fold_group(position)?;
                    self.last_was_operand = true;
                }
                b'|' => {
                    if !self.last_was_operand {
                        return Err(Error::MissingOperand {
                            operator: Operator::Alternation,
                            position,
                        });
                    }
                    self.push_binary(Operator::Alternation, position)?;
                    self.last_was_operand = false;
                }
                b'*' => {
                    if !self.last_was_operand {
                        return Err(Error::MissingOperand {
                            operator: Operator::KleeneStar,
                            position,
                        });
                    }
                    // Star is postfix and has the highest precedence, it
                    // will be folded by the next operator, or at the end.
                    self.operators.push((Operator::KleeneStar, position));
                }
                EPSILON => return Err(Error::ReservedSymbol { position }),
                literal => {
                    if self.last_was_operand {
                        self.push_binary(Operator::Concatenation, position)?;
                    }
                    self.operands.push(Automaton::literal(literal));
                    self.last_was_operand = true;
                }
            }
            prev = Some(byte);
        }

        if !self.last_was_operand {
            self.check_dangling_operator()?;
        }

        while let Some((operator, position)) = self.operators.pop() {
            if operator == Operator::LeftParen {
                return Err(Error::MissingRightParen { position });
            }
            self.apply(operator, position)?;
        }

        // Only the empty pattern leaves the operand stack empty.
        let automaton = self.operands.pop().unwrap_or_else(Automaton::empty);

        debug!(
            "compiled pattern {:?} into {} states and {} rules",
            String::from_utf8_lossy(pattern),
            automaton.num_states(),
            automaton.rules().len()
        );

        Ok(automaton)
    }

    /// Folds the operators that bind at least as tight as `operator`, and
    /// then pushes `operator`.
    fn push_binary(
        &mut self,
        operator: Operator,
        position: usize,
    ) -> Result<(), Error> {
        while let Some(&(top, top_position)) = self.operators.last() {
            if top.precedence() < operator.precedence() {
                break;
            }
            self.operators.pop();
            self.apply(top, top_position)?;
        }
        self.operators.push((operator, position));
        Ok(())
    }

    /// Folds the operators until the matching `(` is found, which is
    /// removed from the stack.
    fn fold_group(&mut self, position: usize) -> Result<(), Error> {
        loop {
            match self.operators.pop() {
                None => return Err(Error::MissingLeftParen { position }),
                Some((Operator::LeftParen, _)) => return Ok(()),
                Some((operator, position)) => self.apply(operator, position)?,
            }
        }
    }

    /// Called when a group or the pattern ends right after an operator,
    /// like in `(a|)`. The binary operator at the top of the stack doesn't
    /// have a right operand.
    fn check_dangling_operator(&self) -> Result<(), Error> {
        match self.operators.last() {
            Some(&(operator, position)) if operator != Operator::LeftParen => {
                Err(Error::MissingOperand { operator, position })
            }
            _ => Ok(()),
        }
    }

    /// Applies `operator` to the operands at the top of the stack.
    fn apply(
        &mut self,
        operator: Operator,
        position: usize,
    ) -> Result<(), Error> {
        let missing_operand = Error::MissingOperand { operator, position };

        let result = match operator {
            Operator::KleeneStar => {
                self.operands.pop().ok_or(missing_operand)?.kleene_star()
            }
            Operator::Concatenation | Operator::Alternation => {
                if self.operands.len() < 2 {
                    return Err(missing_operand);
                }
                // The right operand is the one on top.
                let rhs = self.operands.pop().ok_or(missing_operand.clone())?;
                let lhs = self.operands.pop().ok_or(missing_operand)?;
                if operator == Operator::Concatenation {
                    lhs.concatenate(&rhs)
                } else {
                    lhs.alternate(&rhs)
                }
            }
            Operator::LeftParen => {
                return Err(Error::MissingRightParen { position });
            }
        };

        self.operands.push(result);
        Ok(())
    }
}
