use log::trace;

use crate::automaton::{Automaton, Nfa};

impl Automaton {
    /// Returns an automaton that accepts zero or more repetitions of the
    /// strings accepted by this one.
    pub fn kleene_star(&self) -> Automaton {
        let mut nfa = Nfa::from(self);
        let start = nfa.add_state();

        nfa.add_epsilon(start, self.start);
        for state in self.accepting.iter() {
            nfa.add_epsilon(state, self.start);
        }

        nfa.add_accepting(start);
        nfa.set_start(start);

        let result = nfa.determinize();
        trace!(
            "kleene star: {} -> {} states",
            self.num_states,
            result.num_states
        );
        result
    }

    /// Returns an automaton that accepts the strings formed by a string
    /// accepted by this automaton followed by a string accepted by `other`.
    pub fn concatenate(&self, other: &Automaton) -> Automaton {
        let mut nfa = Nfa::from(self);
        let rhs = nfa.embed(&Nfa::from(other));

        for state in self.accepting.iter() {
            nfa.add_epsilon(state, rhs.start());
        }

        nfa.set_accepting(rhs.accepting().clone());

        let result = nfa.determinize();
        trace!(
            "concatenation: {} + {} -> {} states",
            self.num_states,
            other.num_states,
            result.num_states
        );
        result
    }

    /// Returns an automaton that accepts the strings accepted by either this
    /// automaton or `other`.
    pub fn alternate(&self, other: &Automaton) -> Automaton {
        let mut nfa = Nfa::from(self);
        let rhs = nfa.embed(&Nfa::from(other));
        let start = nfa.add_state();

        nfa.add_epsilon(start, self.start);
        nfa.add_epsilon(start, rhs.start());
        nfa.set_start(start);
        nfa.set_accepting(self.accepting.union(rhs.accepting()));

        let result = nfa.determinize();
        trace!(
            "alternation: {} | {} -> {} states",
            self.num_states,
            other.num_states,
            result.num_states
        );
        result
    }
}
