use crate::automaton::{Automaton, Symbol};
use crate::stateset::StateId;

/// Runs an [`Automaton`] over some input.
///
/// The matcher keeps track of the current state, and whether the automaton
/// reached the dead state, which happens when the current state doesn't
/// have a rule for the symbol being read. Once dead, the matcher remains
/// dead until it's reset.
///
/// Matches are anchored at both ends, the whole input must be accepted.
///
/// ```
/// # use regex_dfa::compile;
/// let automaton = compile("ab*").unwrap();
/// let mut matcher = automaton.matcher();
///
/// assert!(matcher.matches(b"abbb"));
/// assert!(!matcher.matches(b"abba"));
/// ```
pub struct Matcher<'a> {
    automaton: &'a Automaton,
    state: StateId,
    dead: bool,
}

impl<'a> Matcher<'a> {
    /// Creates a matcher positioned at the start state of `automaton`.
    pub fn new(automaton: &'a Automaton) -> Self {
        Self { automaton, state: automaton.start(), dead: false }
    }

    /// Moves back to the start state.
    pub fn reset(&mut self) {
        self.state = self.automaton.start();
        self.dead = false;
    }

    /// Reads a symbol, moving to the next state.
    pub fn advance(&mut self, symbol: Symbol) {
        if self.dead {
            return;
        }
        match self.automaton.transition(self.state, symbol) {
            Some(next) => self.state = next,
            None => self.dead = true,
        }
    }

    /// Current state.
    ///
    /// When the matcher is dead this is the last state visited before
    /// dying.
    #[inline]
    pub fn state(&self) -> StateId {
        self.state
    }

    /// Returns true if the matcher reached the dead state.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Returns true if the input read so far is accepted.
    #[inline]
    pub fn is_accepting(&self) -> bool {
        !self.dead && self.automaton.is_accepting(self.state)
    }

    /// Returns true if the automaton accepts the whole `input`.
    ///
    /// The matcher is reset before reading the input, and it stops reading
    /// as soon as the dead state is reached.
    pub fn matches(&mut self, input: &[u8]) -> bool {
        self.reset();
        for &symbol in input {
            self.advance(symbol);
            if self.dead {
                return false;
            }
        }
        self.is_accepting()
    }
}
