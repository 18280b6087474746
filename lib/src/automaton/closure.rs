use crate::automaton::{Nfa, Symbol, TransitionRule};
use crate::stateset::{StateId, StateSet};

/// Adds to `states` every state that can be reached from it by following
/// only epsilon rules.
///
/// ```
/// # use regex_dfa::{epsilon_closure, StateSet, TransitionRule};
/// let rules = [
///     TransitionRule::epsilon(0, 1),
///     TransitionRule::epsilon(1, 2),
///     TransitionRule::new(2, b'a', 3),
/// ];
///
/// let mut states = StateSet::singleton(0);
/// epsilon_closure(&rules, &mut states);
///
/// assert_eq!(states, StateSet::from([0, 1, 2]));
/// ```
pub fn epsilon_closure(rules: &[TransitionRule], states: &mut StateSet) {
    let mut pending = states.clone();
    while let Some(state) = pending.pop() {
        for rule in rules {
            if rule.is_epsilon()
                && rule.source == state
                && states.insert(rule.target)
            {
                pending.insert(rule.target);
            }
        }
    }
}

/// Outgoing rules of every state in an NFA, indexed by source state.
///
/// The subset construction computes lots of epsilon-closures and moves over
/// the same NFA, this index avoids scanning the whole rule list each time.
pub(super) struct Successors {
    epsilon: Vec<Vec<StateId>>,
    consuming: Vec<Vec<(Symbol, StateId)>>,
}

impl Successors {
    pub fn new(nfa: &Nfa) -> Self {
        let num_states = nfa.num_states() as usize;
        let mut epsilon = vec![Vec::new(); num_states];
        let mut consuming = vec![Vec::new(); num_states];

        for rule in nfa.rules() {
            let source = rule.source as usize;
            if rule.is_epsilon() {
                epsilon[source].push(rule.target);
            } else {
                consuming[source].push((rule.symbol, rule.target));
            }
        }

        Self { epsilon, consuming }
    }

    /// Rules that consume a symbol when leaving `state`.
    #[inline]
    pub fn consuming(&self, state: StateId) -> &[(Symbol, StateId)] {
        self.consuming
            .get(state as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Same as [`epsilon_closure`], but using the index.
    pub fn close(&self, states: &mut StateSet) {
        let mut pending = states.clone();
        while let Some(state) = pending.pop() {
            let Some(targets) = self.epsilon.get(state as usize) else {
                continue;
            };
            for &target in targets {
                if states.insert(target) {
                    pending.insert(target);
                }
            }
        }
    }
}
