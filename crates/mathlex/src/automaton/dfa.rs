//! Deterministic Finite Automaton (DFA) implementation with Hopcroft minimization.

use crate::automaton::state::{StateId, StateSet};
use crate::config::Limits;
use crate::error::AutomatonError;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, VecDeque};

/// A Deterministic Finite Automaton over characters.
#[derive(Debug, Clone)]
pub struct Dfa {
    num_states: StateId,
    /// Start state (None if empty)
    start_state: Option<StateId>,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, char), StateId>,
    /// Reverse transitions: (destination, symbol) -> set of sources
    reverse_transitions: HashMap<(StateId, char), StateSet>,
    alphabet: IndexSet<char>,
    /// DFA state -> the NFA states it stands for (set by subset construction)
    state_mapping: Option<HashMap<StateId, Vec<StateId>>>,
    limits: Limits,
}

impl Dfa {
    /// Create a new empty DFA.
    pub fn new() -> Self {
        Self::with_limits(Limits::UNBOUNDED)
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            num_states: 0,
            start_state: None,
            final_states: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            reverse_transitions: HashMap::new(),
            alphabet: IndexSet::new(),
            state_mapping: None,
            limits,
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> Result<StateId, AutomatonError> {
        if let Some(limit) = self.limits.max_states {
            if self.num_states as usize >= limit {
                return Err(AutomatonError::StateLimit { limit });
            }
        }
        let id = self.num_states;
        self.num_states += 1;
        Ok(id)
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition, replacing any previous one for `(source, symbol)`.
    pub fn add_transition(
        &mut self,
        source: StateId,
        symbol: char,
        destination: StateId,
    ) -> Result<(), AutomatonError> {
        for state in [source, destination] {
            if state >= self.num_states {
                return Err(AutomatonError::UnknownState {
                    state,
                    num_states: self.num_states as usize,
                });
            }
        }
        if let Some(limit) = self.limits.max_transitions {
            if !self.transitions.contains_key(&(source, symbol)) && self.transitions.len() >= limit
            {
                return Err(AutomatonError::TransitionLimit { limit });
            }
        }

        self.alphabet.insert(symbol);
        if let Some(previous) = self.transitions.insert((source, symbol), destination) {
            if let Some(sources) = self.reverse_transitions.get_mut(&(previous, symbol)) {
                *sources = sources.iter().filter(|&s| s != source).collect();
            }
        }

        let capacity = self.num_states as usize;
        self.reverse_transitions
            .entry((destination, symbol))
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(source);
        Ok(())
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: char) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.num_states as usize
    }

    /// Get the number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Get the start state.
    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Check if a state is final.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    /// Set the DFA state -> NFA states mapping.
    pub fn set_state_mapping(&mut self, mapping: HashMap<StateId, Vec<StateId>>) {
        self.state_mapping = Some(mapping);
    }

    /// Get the DFA state -> NFA states mapping, if recorded.
    pub fn state_mapping(&self) -> Option<&HashMap<StateId, Vec<StateId>>> {
        self.state_mapping.as_ref()
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    /// source -> destination -> symbols, ordered for display.
    pub fn to_transition_map(&self) -> IndexMap<StateId, IndexMap<StateId, Vec<char>>> {
        let mut map: IndexMap<StateId, IndexMap<StateId, Vec<char>>> = IndexMap::new();

        for (src, sym, dst) in self.transitions() {
            map.entry(src).or_default().entry(dst).or_default().push(sym);
        }

        map.sort_keys();
        for targets in map.values_mut() {
            targets.sort_keys();
            for symbols in targets.values_mut() {
                symbols.sort_unstable();
            }
        }
        map
    }

    /// Minimize the DFA using Hopcroft's algorithm.
    /// Returns a new minimized DFA accepting the same language.
    pub fn minimize(&self) -> Dfa {
        if self.start_state.is_none() || self.num_states == 0 {
            return Dfa::with_limits(self.limits);
        }

        // First, remove unreachable states
        let reachable = self.find_reachable_states();

        // Initial partition: final states and non-final states
        let final_reachable = self.final_states.intersection(&reachable);
        let non_final_reachable = reachable.difference(&self.final_states);

        let mut partitions: Vec<StateSet> = Vec::new();

        if !final_reachable.is_empty() {
            partitions.push(final_reachable);
        }
        if !non_final_reachable.is_empty() {
            partitions.push(non_final_reachable);
        }

        // Worklist of (partition_index, symbol) pairs to process
        let mut worklist: VecDeque<(usize, char)> = VecDeque::new();
        for idx in 0..partitions.len() {
            for &symbol in &self.alphabet {
                worklist.push_back((idx, symbol));
            }
        }

        while let Some((splitter_idx, symbol)) = worklist.pop_front() {
            let splitter = partitions[splitter_idx].clone();
            let predecessors = self.find_predecessors(&splitter, symbol);

            if predecessors.is_empty() {
                continue;
            }

            let mut splits = Vec::new();

            for (part_idx, partition) in partitions.iter().enumerate() {
                let intersection = partition.intersection(&predecessors);
                let difference = partition.difference(&predecessors);

                if !intersection.is_empty() && !difference.is_empty() {
                    // Keep the larger part in place, queue the smaller one
                    let (keep, add) = if intersection.len() <= difference.len() {
                        (difference, intersection)
                    } else {
                        (intersection, difference)
                    };

                    splits.push((part_idx, keep, add));
                }
            }

            for (part_idx, keep, add) in splits {
                let new_idx = partitions.len();
                partitions[part_idx] = keep;
                partitions.push(add);

                for &sym in &self.alphabet {
                    worklist.push_back((new_idx, sym));
                }
            }
        }

        self.build_minimized_dfa(&partitions)
    }

    /// Find all states reachable from the start state.
    fn find_reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.num_states as usize);

        let Some(start) = self.start_state else {
            return reachable;
        };

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            if !reachable.insert(state) {
                continue;
            }

            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// Find all states that can reach the target set on a given symbol.
    fn find_predecessors(&self, targets: &StateSet, symbol: char) -> StateSet {
        let mut predecessors = StateSet::with_capacity(self.num_states as usize);

        for target in targets.iter() {
            if let Some(sources) = self.reverse_transitions.get(&(target, symbol)) {
                predecessors.union_with(sources);
            }
        }

        predecessors
    }

    /// Build a minimized DFA from partitions. The partition holding the
    /// start state becomes state 0.
    fn build_minimized_dfa(&self, partitions: &[StateSet]) -> Dfa {
        let mut minimized = Dfa::with_limits(Limits::UNBOUNDED);

        let start = self.start_state.unwrap_or_default();
        let mut order: Vec<usize> = (0..partitions.len()).collect();
        order.sort_by_key(|&idx| (!partitions[idx].contains(start), partitions[idx].iter().next()));

        let mut state_to_partition: HashMap<StateId, StateId> = HashMap::new();
        for (new_id, &part_idx) in order.iter().enumerate() {
            for state in partitions[part_idx].iter() {
                state_to_partition.insert(state, new_id as StateId);
            }
        }

        minimized.num_states = partitions.len() as StateId;
        minimized.set_start_state(0);

        for final_state in self.final_states.iter() {
            if let Some(&new_state) = state_to_partition.get(&final_state) {
                minimized.add_final_state(new_state);
            }
        }

        // Any member of a partition is a valid representative
        for (new_id, &part_idx) in order.iter().enumerate() {
            if let Some(representative) = partitions[part_idx].iter().next() {
                for &symbol in &self.alphabet {
                    if let Some(dest) = self.transition(representative, symbol) {
                        if let Some(&new_dest) = state_to_partition.get(&dest) {
                            minimized.insert_transition(new_id as StateId, symbol, new_dest);
                        }
                    }
                }
            }
        }

        if let Some(orig_mapping) = &self.state_mapping {
            let mut new_mapping: HashMap<StateId, Vec<StateId>> = HashMap::new();
            for (new_id, &part_idx) in order.iter().enumerate() {
                let mut nfa_states = Vec::new();
                for old_dfa_state in partitions[part_idx].iter() {
                    if let Some(states) = orig_mapping.get(&old_dfa_state) {
                        nfa_states.extend(states.iter().copied());
                    }
                }
                nfa_states.sort_unstable();
                nfa_states.dedup();
                new_mapping.insert(new_id as StateId, nfa_states);
            }
            minimized.state_mapping = Some(new_mapping);
        }

        minimized.limits = self.limits;
        minimized
    }

    /// Unchecked insert for states already known to exist.
    fn insert_transition(&mut self, source: StateId, symbol: char, destination: StateId) {
        self.alphabet.insert(symbol);
        self.transitions.insert((source, symbol), destination);
        let capacity = self.num_states as usize;
        self.reverse_transitions
            .entry((destination, symbol))
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(source);
    }
}

impl Default for Dfa {
    fn default() -> Self {
        Self::new()
    }
}
