//! Epsilon closure and single-symbol moves over an [`Automaton`].

use crate::automaton::nfa::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol};

impl Automaton {
    /// Compute the epsilon closure of a single state using DFS.
    fn epsilon_closure_single(&self, state: StateId) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states());
        let mut stack = vec![state];

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }
            if let Some(destinations) = self.targets(s, EPSILON) {
                stack.extend(destinations.iter().filter(|&d| !closure.contains(d)));
            }
        }

        closure
    }

    /// Compute epsilon closures for all states (cached until the next
    /// structural change).
    pub fn precompute_closures(&mut self) {
        if self.epsilon_closures.is_some() {
            return;
        }

        let closures = (0..self.num_states() as StateId)
            .map(|state| self.epsilon_closure_single(state))
            .collect();
        self.epsilon_closures = Some(closures);
    }

    /// Check whether per-state closures are currently cached.
    pub fn has_cached_closures(&self) -> bool {
        self.epsilon_closures.is_some()
    }

    /// Smallest superset of `states` closed under ε-transitions.
    ///
    /// Terminates on ε-cycles: a state is expanded at most once. IDs that
    /// name no state of this automaton are ignored.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let num_states = self.num_states();
        let mut closure = StateSet::with_capacity(num_states);

        if let Some(cached) = &self.epsilon_closures {
            for state in states.iter() {
                if let Some(single) = cached.get(state as usize) {
                    closure.union_with(single);
                }
            }
            return closure;
        }

        let mut stack: Vec<StateId> = states
            .iter()
            .filter(|&s| (s as usize) < num_states)
            .collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }
            if let Some(destinations) = self.targets(s, EPSILON) {
                stack.extend(destinations.iter().filter(|&d| !closure.contains(d)));
            }
        }

        closure
    }

    /// States reached from `states` by exactly one `symbol`-labeled
    /// transition. No ε-closure is applied.
    pub fn move_on(&self, states: &StateSet, symbol: char) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states());

        for state in states.iter() {
            if let Some(destinations) = self.targets(state, Symbol::Char(symbol)) {
                reached.union_with(destinations);
            }
        }

        reached
    }

    /// `epsilon_closure(move_on(states, symbol))`.
    pub fn step(&self, states: &StateSet, symbol: char) -> StateSet {
        self.epsilon_closure(&self.move_on(states, symbol))
    }

    /// ε-closure of the initial state.
    pub fn initial_closure(&self) -> StateSet {
        self.epsilon_closure(&StateSet::singleton(self.initial(), self.num_states()))
    }
}
