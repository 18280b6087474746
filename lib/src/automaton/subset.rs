use std::collections::BTreeMap;

use log::trace;
use rustc_hash::FxHashSet;

use crate::automaton::closure::Successors;
use crate::automaton::{Automaton, Nfa, Symbol, TransitionRuleSet};
use crate::stateset::StateSet;

/// Converts an NFA into an equivalent DFA using the powerset construction.
///
/// Each state in the resulting DFA corresponds to a group of NFA states,
/// only groups reachable from the start group are created. A group is
/// accepting if it contains at least one accepting NFA state.
pub(super) fn subset_construction(nfa: &Nfa) -> Automaton {
    let successors = Successors::new(nfa);

    let mut start = StateSet::singleton(nfa.start());
    successors.close(&mut start);

    // Groups that were already added to the worklist, including the ones
    // that were processed.
    let mut seen = FxHashSet::default();
    seen.insert(start.clone());

    let mut worklist = vec![start.clone()];
    let mut rules = Vec::new();
    let mut accepting = Vec::new();

    while let Some(group) = worklist.pop() {
        // Symbols are sorted, so that the DFA states are numbered in the
        // same way every time.
        let mut moves: BTreeMap<Symbol, StateSet> = BTreeMap::new();

        for state in group.iter() {
            for &(symbol, target) in successors.consuming(state) {
                moves.entry(symbol).or_default().insert(target);
            }
        }

        for (symbol, mut target) in moves {
            successors.close(&mut target);
            if !seen.contains(&target) {
                seen.insert(target.clone());
                worklist.push(target.clone());
            }
            rules.push(TransitionRuleSet {
                source: group.clone(),
                symbol,
                target,
            });
        }

        if group.intersects(nfa.accepting()) {
            accepting.push(group);
        }
    }

    trace!(
        "subset construction: {} NFA states -> {} DFA states",
        nfa.num_states(),
        seen.len()
    );

    Automaton::from_groups(&start, &accepting, &rules)
}
