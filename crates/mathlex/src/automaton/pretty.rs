//! Human-readable rendering of automata for diagnostics.
//!
//! Transitions sharing a source and destination are printed on one line,
//! with consecutive characters folded into ranges:
//!
//! ```text
//! initial: 0
//! accepting: {1}
//! 0 --[0-9]--> 1
//! 1 --[0-9]--> 1
//! ```

use crate::automaton::dfa::Dfa;
use crate::automaton::nfa::Automaton;
use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use indexmap::IndexMap;
use std::fmt;

/// Fold a character list into a label such as `'.'` or `[0-9A-Z_]`.
fn render_chars(chars: &[char]) -> String {
    let mut sorted = chars.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if let [single] = sorted.as_slice() {
        return format!("'{}'", single.escape_debug());
    }

    let mut out = String::from("[");
    let mut i = 0;
    while i < sorted.len() {
        let start = sorted[i];
        let mut end = start;
        while i + 1 < sorted.len() && sorted[i + 1] as u32 == end as u32 + 1 {
            i += 1;
            end = sorted[i];
        }
        if end as u32 >= start as u32 + 2 {
            out.push_str(&format!("{}-{}", start.escape_debug(), end.escape_debug()));
        } else {
            out.extend(start.escape_debug());
            if end != start {
                out.extend(end.escape_debug());
            }
        }
        i += 1;
    }
    out.push(']');
    out
}

fn write_states(f: &mut fmt::Formatter<'_>, label: &str, states: &[StateId]) -> fmt::Result {
    let list: Vec<String> = states.iter().map(ToString::to_string).collect();
    writeln!(f, "{label}: {{{}}}", list.join(", "))
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "initial: {}", self.initial())?;
        write_states(f, "accepting", &self.accepting_states().to_vec())?;

        for (source, by_symbol) in self.to_transition_map() {
            let mut epsilon_targets: Vec<StateId> = Vec::new();
            let mut by_target: IndexMap<StateId, Vec<char>> = IndexMap::new();
            for (symbol, destinations) in by_symbol {
                match symbol {
                    Symbol::Epsilon => epsilon_targets.extend(destinations),
                    Symbol::Char(c) => {
                        for destination in destinations {
                            by_target.entry(destination).or_default().push(c);
                        }
                    }
                }
            }

            epsilon_targets.sort_unstable();
            for destination in epsilon_targets {
                writeln!(f, "{source} --{}--> {destination}", Symbol::Epsilon)?;
            }
            by_target.sort_keys();
            for (destination, chars) in by_target {
                writeln!(f, "{source} --{}--> {destination}", render_chars(&chars))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start_state() {
            Some(start) => writeln!(f, "initial: {start}")?,
            None => writeln!(f, "initial: -")?,
        }
        write_states(f, "accepting", &self.final_states().to_vec())?;

        for (source, by_target) in self.to_transition_map() {
            for (destination, chars) in by_target {
                writeln!(f, "{source} --{}--> {destination}", render_chars(&chars))?;
            }
        }
        Ok(())
    }
}
