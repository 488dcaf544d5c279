//! Whole-string acceptance over deterministic and non-deterministic automata.

use crate::automaton::{Automaton, Dfa};

/// Something that decides membership of a complete input string.
///
/// Acceptance requires consuming every character; once no move is
/// possible the input is rejected without backtracking.
pub trait Recognizer {
    fn accepts(&self, input: &str) -> bool;
}

impl Recognizer for Automaton {
    fn accepts(&self, input: &str) -> bool {
        let mut current = self.initial_closure();

        for c in input.chars() {
            current = self.step(&current, c);
            if current.is_empty() {
                return false;
            }
        }

        current.intersects(self.accepting_states())
    }
}

impl Recognizer for Dfa {
    fn accepts(&self, input: &str) -> bool {
        let Some(mut state) = self.start_state() else {
            return false;
        };

        for c in input.chars() {
            match self.transition(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }

        self.is_final(state)
    }
}

impl<R: Recognizer + ?Sized> Recognizer for &R {
    fn accepts(&self, input: &str) -> bool {
        (**self).accepts(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::subset_construction;

    /// `ab*` with an ε hop: 0 -a-> 1 -ε-> 2(final), 2 -b-> 1
    fn ab_star() -> Automaton {
        let mut nfa = Automaton::new();
        nfa.add_state(false).unwrap();
        nfa.add_state(true).unwrap();
        nfa.add_transition(0, 1, 'a').unwrap();
        nfa.add_epsilon_transition(1, 2).unwrap();
        nfa.add_transition(2, 1, 'b').unwrap();
        nfa
    }

    #[test]
    fn test_nfa_whole_string() {
        let nfa = ab_star();
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("abbb"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("ba"));
        // accepting prefix followed by garbage is still a rejection
        assert!(!nfa.accepts("abx"));
        assert!(!nfa.accepts("aba"));
    }

    #[test]
    fn test_dfa_whole_string() {
        let dfa = subset_construction(&ab_star()).unwrap();
        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("abb"));
        assert!(!dfa.accepts(""));
        assert!(!dfa.accepts("abx"));
    }

    #[test]
    fn test_empty_dfa_rejects_everything() {
        let dfa = Dfa::new();
        assert!(!dfa.accepts(""));
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn test_accepting_initial_state_accepts_empty_input() {
        let mut nfa = Automaton::new();
        nfa.set_accepting(0, true).unwrap();
        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("x"));
    }

    #[test]
    fn test_trait_object() {
        let nfa = ab_star();
        let dfa = subset_construction(&nfa).unwrap();
        let machines: Vec<&dyn Recognizer> = vec![&nfa, &dfa];
        for machine in machines {
            assert!(machine.accepts("ab"));
        }
    }
}
