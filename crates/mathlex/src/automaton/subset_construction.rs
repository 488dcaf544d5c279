//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::dfa::Dfa;
use crate::automaton::nfa::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::config::Limits;
use crate::error::AutomatonError;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::VecDeque;

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
///
/// DFA state 0 is the ε-closure of the NFA's initial state. A DFA state is
/// final iff its NFA state set contains an accepting NFA state. The NFA's
/// state limit also bounds the number of DFA states; its transition limit
/// does not carry over, since a DFA may need more edges than its NFA.
pub fn subset_construction(nfa: &Automaton) -> Result<Dfa, AutomatonError> {
    // NFA state sets are keyed by content, so discovery order never
    // produces two DFA states for the same set.
    let mut state_mapping: IndexMap<StateSet, StateId> = IndexMap::new();
    let mut dfa = Dfa::with_limits(Limits {
        max_transitions: None,
        ..nfa.limits()
    });
    let mut worklist: VecDeque<StateSet> = VecDeque::new();

    let initial_set = nfa.initial_closure();
    let initial_dfa_state = dfa.add_state()?;
    dfa.set_start_state(initial_dfa_state);
    if initial_set.intersects(nfa.accepting_states()) {
        dfa.add_final_state(initial_dfa_state);
    }
    state_mapping.insert(initial_set.clone(), initial_dfa_state);
    worklist.push_back(initial_set);

    while let Some(current_nfa_set) = worklist.pop_front() {
        let current_dfa_state = state_mapping[&current_nfa_set];

        for &symbol in nfa.alphabet() {
            let next_nfa_set = nfa.step(&current_nfa_set, symbol);

            if next_nfa_set.is_empty() {
                continue;
            }

            let next_dfa_state = match state_mapping.get(&next_nfa_set) {
                Some(&existing) => existing,
                None => {
                    let new_state = dfa.add_state()?;
                    if next_nfa_set.intersects(nfa.accepting_states()) {
                        dfa.add_final_state(new_state);
                    }
                    state_mapping.insert(next_nfa_set.clone(), new_state);
                    worklist.push_back(next_nfa_set);
                    new_state
                }
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state)?;
        }
    }

    tracing::trace!(
        nfa_states = nfa.num_states(),
        dfa_states = dfa.num_states(),
        "subset construction finished"
    );

    let inverse_mapping: HashMap<StateId, Vec<StateId>> = state_mapping
        .into_iter()
        .map(|(nfa_states, dfa_state)| (dfa_state, nfa_states.to_vec()))
        .collect();
    dfa.set_state_mapping(inverse_mapping);

    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_construction_basic() {
        // 0 -a-> 1, 0 -a-> 2, 1 -b-> 3(final), 2 -b-> 3(final)
        let mut nfa = Automaton::new();
        nfa.add_state(false).unwrap();
        nfa.add_state(false).unwrap();
        nfa.add_state(true).unwrap();
        nfa.add_transition(0, 1, 'a').unwrap();
        nfa.add_transition(0, 2, 'a').unwrap();
        nfa.add_transition(1, 3, 'b').unwrap();
        nfa.add_transition(2, 3, 'b').unwrap();

        let dfa = subset_construction(&nfa).unwrap();

        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.start_state(), Some(0));
        let mid = dfa.transition(0, 'a').unwrap();
        let end = dfa.transition(mid, 'b').unwrap();
        assert!(dfa.is_final(end));
        assert_eq!(dfa.state_mapping().unwrap()[&mid], vec![1, 2]);
    }

    #[test]
    fn test_subset_construction_with_epsilon() {
        // 0 -ε-> 1 -a-> 2(final)
        let mut nfa = Automaton::new();
        nfa.add_state(false).unwrap();
        nfa.add_state(true).unwrap();
        nfa.add_epsilon_transition(0, 1).unwrap();
        nfa.add_transition(1, 2, 'a').unwrap();

        let dfa = subset_construction(&nfa).unwrap();

        assert_eq!(dfa.state_mapping().unwrap()[&0], vec![0, 1]);
        let next = dfa.transition(0, 'a').unwrap();
        assert!(dfa.is_final(next));
        assert!(!dfa.is_final(0));
    }

    #[test]
    fn test_equal_sets_reached_in_different_order_merge() {
        // 0 -a-> 1, 0 -b-> 2, 1 -ε-> 2, 2 -ε-> 1: {1,2} is reached on both
        // 'a' and 'b' and must become one DFA state.
        let mut nfa = Automaton::new();
        nfa.add_state(false).unwrap();
        nfa.add_state(true).unwrap();
        nfa.add_transition(0, 1, 'a').unwrap();
        nfa.add_transition(0, 2, 'b').unwrap();
        nfa.add_epsilon_transition(1, 2).unwrap();
        nfa.add_epsilon_transition(2, 1).unwrap();

        let dfa = subset_construction(&nfa).unwrap();
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.transition(0, 'a'), dfa.transition(0, 'b'));
    }

    #[test]
    fn test_accepting_initial_closure() {
        let mut nfa = Automaton::new();
        let s1 = nfa.add_state(true).unwrap();
        nfa.add_epsilon_transition(0, s1).unwrap();

        let dfa = subset_construction(&nfa).unwrap();
        assert!(dfa.is_final(0));
        assert_eq!(dfa.num_transitions(), 0);
    }

    #[test]
    fn test_output_is_deterministic_and_reproducible() {
        let mut nfa = Automaton::new();
        let s1 = nfa.add_state(false).unwrap();
        let s2 = nfa.add_state(true).unwrap();
        nfa.add_class_transition(0, s1, ['x', 'y']).unwrap();
        nfa.add_class_transition(0, s2, ['y', 'z']).unwrap();
        nfa.add_epsilon_transition(s1, s2).unwrap();

        let first = subset_construction(&nfa).unwrap();
        let second = subset_construction(&nfa).unwrap();
        let mut a: Vec<_> = first.transitions().collect();
        let mut b: Vec<_> = second.transitions().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_transition_limit_does_not_bound_dfa() {
        // 0 -ε-> 1, 1 -a,b-> 1: three NFA edges, four DFA edges.
        let limits = Limits {
            max_states: None,
            max_transitions: Some(3),
        };
        let mut nfa = Automaton::with_limits(limits).unwrap();
        let s1 = nfa.add_state(true).unwrap();
        nfa.add_epsilon_transition(0, s1).unwrap();
        nfa.add_class_transition(s1, s1, ['a', 'b']).unwrap();
        assert_eq!(nfa.num_transitions(), 3);

        let dfa = subset_construction(&nfa).unwrap();
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.num_transitions(), 4);
    }

    #[test]
    fn test_state_limit_applies_to_dfa() {
        // (a|b)*a(a|b) needs 4 DFA states but only 4 NFA states.
        let limits = Limits {
            max_states: Some(4),
            max_transitions: None,
        };
        let mut nfa = Automaton::with_limits(limits).unwrap();
        let s1 = nfa.add_state(false).unwrap();
        let s2 = nfa.add_state(false).unwrap();
        let s3 = nfa.add_state(true).unwrap();
        nfa.add_class_transition(0, 0, ['a', 'b']).unwrap();
        nfa.add_transition(0, s1, 'a').unwrap();
        nfa.add_epsilon_transition(s1, s2).unwrap();
        nfa.add_class_transition(s2, s3, ['a', 'b']).unwrap();

        assert!(subset_construction(&nfa).is_ok());

        let tight = Limits {
            max_states: Some(3),
            max_transitions: None,
        };
        let mut small = Automaton::with_limits(tight).unwrap();
        let t1 = small.add_state(false).unwrap();
        let t2 = small.add_state(true).unwrap();
        small.add_class_transition(0, 0, ['a', 'b']).unwrap();
        small.add_transition(0, t1, 'a').unwrap();
        small.add_class_transition(t1, t2, ['a', 'b']).unwrap();

        assert_eq!(
            subset_construction(&small).unwrap_err(),
            AutomatonError::StateLimit { limit: 3 }
        );
    }
}
