use std::collections::BTreeMap;

use serde::Serialize;

use super::{CanonicalLr, Conflict, ItemSet, StateId};
use crate::grammar::{Grammar, Symbol};

/// Cell of the parsing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    Error,
    Shift(StateId),
    Reduce(usize),
}

/// Complete canonical LR(1) automaton: the states, the goto table and the
/// reduce table. State `0` is the start state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<ItemSet>,
    go_table: Vec<BTreeMap<Symbol, StateId>>,
    return_table: Vec<BTreeMap<Symbol, usize>>,
    root_symbol: Symbol,
}

impl Automaton {
    pub(super) fn new(
        states: Vec<ItemSet>,
        go_table: Vec<BTreeMap<Symbol, StateId>>,
        return_table: Vec<BTreeMap<Symbol, usize>>,
        root_symbol: Symbol,
    ) -> Self {
        Self {
            states,
            go_table,
            return_table,
            root_symbol,
        }
    }

    /// Builds the goto table, then the reduce table.
    pub fn build<T>(grammar: &Grammar<T>) -> Result<Self, Conflict> {
        CanonicalLr::new(grammar)
            .build_go_table()
            .build_return_table()
    }

    pub fn start_state(&self) -> StateId {
        0
    }

    pub fn root_symbol(&self) -> Symbol {
        self.root_symbol
    }

    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> &ItemSet {
        &self.states[id]
    }

    pub fn states_count(&self) -> usize {
        self.states.len()
    }

    pub fn goto(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.go_table.get(state)?.get(&symbol).copied()
    }

    pub fn reduce(&self, state: StateId, lookahead: Symbol) -> Option<usize> {
        self.return_table.get(state)?.get(&lookahead).copied()
    }

    /// Outgoing edges of `state` in symbol order.
    pub fn edges(&self, state: StateId) -> impl Iterator<Item = (Symbol, StateId)> + '_ {
        self.go_table[state].iter().map(|(&s, &to)| (s, to))
    }

    /// Reductions of `state` in lookahead order.
    pub fn reductions(&self, state: StateId) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.return_table[state].iter().map(|(&s, &rule)| (s, rule))
    }

    pub fn action(&self, state: StateId, symbol: Symbol) -> Action {
        if let Some(to) = self.goto(state, symbol) {
            Action::Shift(to)
        } else if let Some(rule) = self.reduce(state, symbol) {
            Action::Reduce(rule)
        } else {
            Action::Error
        }
    }

    /// `true` when no cell carries both a shift and a reduction.
    pub fn is_sound(&self) -> bool {
        self.go_table
            .iter()
            .zip(self.return_table.iter())
            .all(|(go, ret)| ret.keys().all(|s| !go.contains_key(s)))
    }
}
