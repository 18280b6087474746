/*! Finite automata and the algorithms that build them.

Automata go through two phases. While they are being assembled they are
represented by [`Nfa`], which accepts epsilon rules and can have more than
one rule for the same state and symbol. Once assembled, an [`Nfa`] is turned
into an [`Automaton`] by the [subset construction][1], the result is
deterministic and free of epsilon rules, so it can be executed directly.

Regular expression operators are implemented as combinators on [`Automaton`]
(see [`Automaton::kleene_star`], [`Automaton::concatenate`] and
[`Automaton::alternate`]). Each combinator converts its operands back into
NFA form, wires them together with epsilon rules following [Thompson's
construction][2], and determinizes the result again.

[1]: https://en.wikipedia.org/wiki/Powerset_construction
[2]: https://en.wikipedia.org/wiki/Thompson%27s_construction
 */

use std::fmt::{Display, Formatter};
use std::hash::BuildHasherDefault;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHasher};

use crate::matcher::Matcher;
use crate::stateset::{StateId, StateSet};

pub use closure::epsilon_closure;

mod closure;
mod ops;
mod subset;


type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Input symbol consumed by a transition.
pub type Symbol = u8;

/// Symbol that identifies epsilon rules, which don't consume any input.
///
/// As this byte is reserved, it can't be used as a literal in patterns, and
/// inputs containing it never match.
pub const EPSILON: Symbol = 0;

/// A transition from one state to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionRule {
    /// State where the transition starts.
    pub source: StateId,
    /// Symbol consumed by the transition, [`EPSILON`] if none.
    pub symbol: Symbol,
    /// State where the transition ends.
    pub target: StateId,
}

impl TransitionRule {
    /// Creates a rule that goes from `source` to `target` when `symbol` is
    /// read.
    pub fn new(source: StateId, symbol: Symbol, target: StateId) -> Self {
        Self { source, symbol, target }
    }

    /// Creates an epsilon rule from `source` to `target`.
    pub fn epsilon(source: StateId, target: StateId) -> Self {
        Self::new(source, EPSILON, target)
    }

    /// Returns true if this is an epsilon rule.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.symbol == EPSILON
    }
}

/// A transition between two groups of states, used only while the subset
/// construction is in progress.
#[derive(Debug)]
pub(crate) struct TransitionRuleSet {
    pub source: StateSet,
    pub symbol: Symbol,
    pub target: StateSet,
}

/// A non-deterministic finite automaton with epsilon rules.
///
/// This is the raw form of an automaton: it's easy to build and combine,
/// but it must be converted into an [`Automaton`] with [`Nfa::determinize`]
/// before matching anything with it.
///
/// States are allocated with [`Nfa::add_state`], which hands out dense
/// identifiers, so the number of states is always known without having to
/// look at the rules.
#[derive(Clone, Debug)]
pub struct Nfa {
    start: StateId,
    accepting: StateSet,
    rules: Vec<TransitionRule>,
    num_states: u32,
}

impl Nfa {
    /// Creates an NFA from its start state, accepting states and rules.
    ///
    /// The states are assumed to be `0..=max`, where `max` is the highest
    /// state mentioned by any of the arguments.
    pub fn new(
        start: StateId,
        accepting: StateSet,
        rules: Vec<TransitionRule>,
    ) -> Self {
        let max = rules
            .iter()
            .flat_map(|rule| [rule.source, rule.target])
            .chain(accepting.iter())
            .fold(start, StateId::max);

        Self { start, accepting, rules, num_states: max + 1 }
    }

    /// Creates an NFA that accepts the single-symbol string `symbol`.
    ///
    /// `symbol` shouldn't be [`EPSILON`], otherwise the resulting NFA
    /// accepts the empty string.
    pub fn literal(symbol: Symbol) -> Self {
        let rules = vec![TransitionRule::new(0, symbol, 1)];
        Self::new(0, StateSet::singleton(1), rules)
    }

    /// Creates an NFA that only accepts the empty string.
    pub fn empty() -> Self {
        Self::new(0, StateSet::singleton(0), vec![])
    }

    /// Returns the start state.
    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Returns the set of accepting states.
    #[inline]
    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    /// Returns the transition rules.
    #[inline]
    pub fn rules(&self) -> &[TransitionRule] {
        self.rules.as_slice()
    }

    /// Returns the number of states.
    #[inline]
    pub fn num_states(&self) -> u32 {
        self.num_states
    }

    /// Allocates a new state and returns its identifier.
    pub fn add_state(&mut self) -> StateId {
        let state = self.num_states;
        self.num_states += 1;
        state
    }

    /// Changes the start state.
    pub fn set_start(&mut self, state: StateId) {
        self.reserve(state);
        self.start = state;
    }

    /// Makes `state` an accepting state.
    pub fn add_accepting(&mut self, state: StateId) {
        self.reserve(state);
        self.accepting.insert(state);
    }

    /// Replaces the set of accepting states.
    pub fn set_accepting(&mut self, accepting: StateSet) {
        if let Some(max) = accepting.iter().last() {
            self.reserve(max);
        }
        self.accepting = accepting;
    }

    /// Adds a transition rule.
    pub fn add_rule(&mut self, rule: TransitionRule) {
        self.reserve(rule.source.max(rule.target));
        self.rules.push(rule);
    }

    /// Adds an epsilon rule from `source` to `target`.
    pub fn add_epsilon(&mut self, source: StateId, target: StateId) {
        self.add_rule(TransitionRule::epsilon(source, target))
    }

    /// Returns a copy of this NFA where `offset` was added to every state.
    pub fn relocate(&self, offset: StateId) -> Nfa {
        Nfa {
            start: self.start + offset,
            accepting: self.accepting.offset_by(offset),
            rules: self
                .rules
                .iter()
                .map(|rule| {
                    TransitionRule::new(
                        rule.source + offset,
                        rule.symbol,
                        rule.target + offset,
                    )
                })
                .collect(),
            num_states: self.num_states + offset,
        }
    }

    /// Copies the states and rules of `other` into this NFA.
    ///
    /// The states from `other` are relocated after the ones already in this
    /// NFA, so the two state spaces don't overlap. The start and accepting
    /// states of this NFA are not modified. Returns `other` relocated, which
    /// tells where its start and accepting states ended up.
    pub fn embed(&mut self, other: &Nfa) -> Nfa {
        let relocated = other.relocate(self.num_states);
        self.rules.extend_from_slice(relocated.rules());
        self.num_states = relocated.num_states;
        relocated
    }

    /// Converts this NFA into an equivalent [`Automaton`].
    pub fn determinize(&self) -> Automaton {
        subset::subset_construction(self)
    }

    /// Makes sure that `state` is a valid state in this NFA.
    fn reserve(&mut self, state: StateId) {
        if state >= self.num_states {
            self.num_states = state + 1;
        }
    }
}

impl From<&Automaton> for Nfa {
    fn from(automaton: &Automaton) -> Self {
        Nfa {
            start: automaton.start,
            accepting: automaton.accepting.clone(),
            rules: automaton.rules.clone(),
            num_states: automaton.num_states,
        }
    }
}

/// A deterministic finite automaton.
///
/// Automata don't have epsilon rules, and each state has at most one rule
/// for each symbol. Symbols without a rule lead to an implicit dead state.
///
/// An automaton is immutable once built, matching is done by a separate
/// [`Matcher`], so the same automaton can be used by multiple threads at
/// the same time.
#[derive(Clone, Debug)]
pub struct Automaton {
    start: StateId,
    accepting: StateSet,
    rules: Vec<TransitionRule>,
    num_states: u32,
    // Maps (source, symbol) to the target state.
    transitions: FxHashMap<(StateId, Symbol), StateId>,
}

impl Automaton {
    /// Creates an automaton that accepts the single-symbol string `symbol`.
    pub fn literal(symbol: Symbol) -> Self {
        Nfa::literal(symbol).determinize()
    }

    /// Creates an automaton that only accepts the empty string.
    pub fn empty() -> Self {
        Nfa::empty().determinize()
    }

    /// Builds a deterministic automaton equivalent to the non-deterministic
    /// one described by `start`, `accepting` and `rules`, which can contain
    /// epsilon rules.
    pub fn from_nfa(
        start: StateId,
        accepting: StateSet,
        rules: Vec<TransitionRule>,
    ) -> Self {
        Nfa::new(start, accepting, rules).determinize()
    }

    /// Builds an automaton where the states are groups of states from some
    /// other automaton.
    ///
    /// Each distinct group receives a dense identifier, in the order in
    /// which they are first seen: the start group is always state 0, the
    /// rest are numbered while traversing `rules`.
    pub(crate) fn from_groups(
        start: &StateSet,
        accepting: &[StateSet],
        rules: &[TransitionRuleSet],
    ) -> Self {
        let mut groups = FxIndexSet::default();
        groups.insert(start);

        let mut id = |group| groups.insert_full(group).0 as StateId;

        let rules: Vec<TransitionRule> = rules
            .iter()
            .map(|rule| {
                let source = id(&rule.source);
                let target = id(&rule.target);
                TransitionRule::new(source, rule.symbol, target)
            })
            .collect();

        let accepting = accepting.iter().map(&mut id).collect();

        let transitions = rules
            .iter()
            .map(|rule| ((rule.source, rule.symbol), rule.target))
            .collect();

        Self {
            start: 0,
            accepting,
            rules,
            num_states: groups.len() as u32,
            transitions,
        }
    }

    /// Returns the start state.
    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Returns the set of accepting states.
    #[inline]
    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    /// Returns true if `state` is an accepting state.
    #[inline]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the transition rules.
    #[inline]
    pub fn rules(&self) -> &[TransitionRule] {
        self.rules.as_slice()
    }

    /// Returns the number of states.
    #[inline]
    pub fn num_states(&self) -> u32 {
        self.num_states
    }

    /// Returns the state reached from `state` by reading `symbol`, or `None`
    /// if `symbol` leads to the dead state.
    #[inline]
    pub fn transition(
        &self,
        state: StateId,
        symbol: Symbol,
    ) -> Option<StateId> {
        self.transitions.get(&(state, symbol)).copied()
    }

    /// Returns a [`Matcher`] for this automaton.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(self)
    }

    /// Returns true if the automaton accepts the whole `input`.
    pub fn is_match<I: AsRef<[u8]>>(&self, input: I) -> bool {
        self.matcher().matches(input.as_ref())
    }
}

/// Writes a symbol as it would appear in a pattern, escaping non-printable
/// bytes.
pub(crate) fn fmt_symbol(
    f: &mut Formatter<'_>,
    symbol: Symbol,
) -> std::fmt::Result {
    write!(f, "'{}'", std::ascii::escape_default(symbol))
}

impl Display for Automaton {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut rules = self.rules.clone();
        rules.sort_by_key(|rule| (rule.source, rule.symbol));

        let mut rules = rules.iter().peekable();

        for state in 0..self.num_states {
            write!(f, "{}", state)?;
            if state == self.start {
                write!(f, " start")?;
            }
            if self.is_accepting(state) {
                write!(f, " accepting")?;
            }
            writeln!(f)?;
            while let Some(rule) = rules.next_if(|r| r.source == state) {
                write!(f, "  ")?;
                fmt_symbol(f, rule.symbol)?;
                writeln!(f, " -> {}", rule.target)?;
            }
        }

        Ok(())
    }
}
