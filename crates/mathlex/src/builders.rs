//! One automaton per lexical category, laid out by hand.
//!
//! | category   | language                                               |
//! |------------|--------------------------------------------------------|
//! | identifier | `[A-Za-z_][A-Za-z0-9_]*`                               |
//! | integer    | `[0-9]+`                                               |
//! | real       | `[0-9]+\.[0-9]+`                                       |
//! | complex    | `[0-9]+(\.[0-9]+)?[+-][0-9]+(\.[0-9]+)?i`              |
//! | keyword    | the keyword's exact spelling                           |
//! | assignment | `<-`                                                   |
//!
//! Every language excludes the empty string.

use crate::automaton::{Automaton, StateId};
use crate::category::Category;
use crate::config::Limits;
use crate::error::AutomatonError;

fn digits() -> impl Iterator<Item = char> {
    '0'..='9'
}

fn identifier_start() -> impl Iterator<Item = char> {
    ('A'..='Z').chain('a'..='z').chain(['_'])
}

fn identifier_rest() -> impl Iterator<Item = char> {
    identifier_start().chain(digits())
}

/// Build the automaton recognising `category`.
///
/// `Category::Unknown` yields an automaton with an empty language.
pub fn build(category: Category, limits: Limits) -> Result<Automaton, AutomatonError> {
    let mut nfa = Automaton::with_limits(limits)?;
    match category {
        Category::Keyword(keyword) => literal(&mut nfa, keyword.literal())?,
        Category::Assignment => literal(&mut nfa, "<-")?,
        Category::Complex => complex(&mut nfa)?,
        Category::Real => real(&mut nfa)?,
        Category::Integer => integer(&mut nfa)?,
        Category::Identifier => identifier(&mut nfa)?,
        Category::Unknown => {}
    }

    tracing::trace!(
        %category,
        states = nfa.num_states(),
        transitions = nfa.num_transitions(),
        "built automaton"
    );
    Ok(nfa)
}

/// One state per character; the last one accepts.
fn literal(nfa: &mut Automaton, text: &str) -> Result<(), AutomatonError> {
    let mut current = nfa.initial();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let next = nfa.add_state(chars.peek().is_none())?;
        nfa.add_transition(current, next, c)?;
        current = next;
    }
    if text.is_empty() {
        nfa.set_accepting(current, true)?;
    }
    Ok(())
}

/// ε-chained layout: the tail loop returns through ε moves, so recognition
/// exercises closure computation.
///
/// ```text
/// 0 -start-> 1 -ε-> 2 (accept)
/// 2 -ε-> 3 -rest-> 4
/// 4 -ε-> 3, 4 -ε-> 2
/// ```
fn identifier(nfa: &mut Automaton) -> Result<(), AutomatonError> {
    let start = nfa.initial();
    let first = nfa.add_state(false)?;
    let accept = nfa.add_state(true)?;
    let loop_entry = nfa.add_state(false)?;
    let loop_exit = nfa.add_state(false)?;

    nfa.add_class_transition(start, first, identifier_start())?;
    nfa.add_epsilon_transition(first, accept)?;
    nfa.add_epsilon_transition(accept, loop_entry)?;
    nfa.add_class_transition(loop_entry, loop_exit, identifier_rest())?;
    nfa.add_epsilon_transition(loop_exit, loop_entry)?;
    nfa.add_epsilon_transition(loop_exit, accept)?;
    Ok(())
}

fn integer(nfa: &mut Automaton) -> Result<(), AutomatonError> {
    let start = nfa.initial();
    let accept = nfa.add_state(true)?;
    nfa.add_class_transition(start, accept, digits())?;
    nfa.add_class_transition(accept, accept, digits())?;
    Ok(())
}

fn real(nfa: &mut Automaton) -> Result<(), AutomatonError> {
    let start = nfa.initial();
    let whole = nfa.add_state(false)?;
    let point = nfa.add_state(false)?;
    let fraction = nfa.add_state(true)?;

    nfa.add_class_transition(start, whole, digits())?;
    nfa.add_class_transition(whole, whole, digits())?;
    nfa.add_transition(whole, point, '.')?;
    nfa.add_class_transition(point, fraction, digits())?;
    nfa.add_class_transition(fraction, fraction, digits())?;
    Ok(())
}

/// Lay out `[0-9]+(\.[0-9]+)?` from `entry`, returning the state reached
/// (through ε) once the number is complete.
fn unsigned_number(nfa: &mut Automaton, entry: StateId) -> Result<StateId, AutomatonError> {
    let whole = nfa.add_state(false)?;
    let point = nfa.add_state(false)?;
    let fraction = nfa.add_state(false)?;
    let exit = nfa.add_state(false)?;

    nfa.add_class_transition(entry, whole, digits())?;
    nfa.add_class_transition(whole, whole, digits())?;
    nfa.add_epsilon_transition(whole, exit)?;
    nfa.add_transition(whole, point, '.')?;
    nfa.add_class_transition(point, fraction, digits())?;
    nfa.add_class_transition(fraction, fraction, digits())?;
    nfa.add_epsilon_transition(fraction, exit)?;
    Ok(exit)
}

/// Real part, mandatory sign, imaginary part, then a final `i`.
fn complex(nfa: &mut Automaton) -> Result<(), AutomatonError> {
    let start = nfa.initial();
    let real_part = unsigned_number(nfa, start)?;
    let sign = nfa.add_state(false)?;
    nfa.add_class_transition(real_part, sign, ['+', '-'])?;

    let imaginary_part = unsigned_number(nfa, sign)?;
    let accept = nfa.add_state(true)?;
    nfa.add_transition(imaginary_part, accept, 'i')?;
    Ok(())
}
