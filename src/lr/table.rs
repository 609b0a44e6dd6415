use std::fmt::Display;

use serde::Serialize;

use super::{Action, Automaton, StateId};
use crate::grammar::{Grammar, Symbol, END_MARK};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SymbolEntry<T> {
    Terminal(T),
    EndMarker,
    Nonterminal(String),
}

/// Flat parsing table for a table-driven shift-reduce runtime.
///
/// `actions[state][column]` where `column = symbol - first_symbol`; the
/// rules are `(left side, right side length)` pairs in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsingTable<T> {
    first_symbol: Symbol,
    actions: Vec<Vec<Action>>,
    rules: Vec<(Symbol, usize)>,
    root_symbol: Symbol,
    start_state: StateId,
    symbols: Vec<(Symbol, SymbolEntry<T>)>,
}

impl<T> ParsingTable<T>
where
    T: Clone,
{
    pub fn new(grammar: &Grammar<T>, automaton: &Automaton) -> Self {
        let actions = (0..automaton.states_count())
            .map(|state| {
                grammar
                    .symbols()
                    .map(|symbol| automaton.action(state, symbol))
                    .collect()
            })
            .collect();

        let rules = grammar
            .rules()
            .iter()
            .map(|rule| (rule.lhs, rule.rhs.len()))
            .collect();

        let symbols = grammar
            .symbols()
            .map(|symbol| {
                let entry = if symbol.is_end_marker() {
                    SymbolEntry::EndMarker
                } else if let Some(token) = grammar.terminal(symbol) {
                    SymbolEntry::Terminal(token.clone())
                } else {
                    SymbolEntry::Nonterminal(
                        grammar
                            .nonterminal_name(symbol)
                            .unwrap_or_default()
                            .to_string(),
                    )
                };
                (symbol, entry)
            })
            .collect();

        Self {
            first_symbol: grammar.first_valid_symbol(),
            actions,
            rules,
            root_symbol: automaton.root_symbol(),
            start_state: automaton.start_state(),
            symbols,
        }
    }
}

impl<T> ParsingTable<T> {
    fn column(&self, symbol: Symbol) -> Option<usize> {
        usize::try_from(symbol.id() - self.first_symbol.id())
            .ok()
            .filter(|&column| column < self.symbols.len())
    }

    /// Action for `symbol` on top of `state`; [`Action::Error`] outside the
    /// table.
    pub fn action(&self, state: StateId, symbol: Symbol) -> Action {
        self.column(symbol)
            .and_then(|column| self.actions.get(state)?.get(column).copied())
            .unwrap_or(Action::Error)
    }

    pub fn rule(&self, index: usize) -> (Symbol, usize) {
        self.rules[index]
    }

    pub fn rules(&self) -> &[(Symbol, usize)] {
        &self.rules
    }

    pub fn root_symbol(&self) -> Symbol {
        self.root_symbol
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn states_count(&self) -> usize {
        self.actions.len()
    }

    pub fn symbols(&self) -> &[(Symbol, SymbolEntry<T>)] {
        &self.symbols
    }

    pub fn row(&self, state: StateId) -> &[Action] {
        &self.actions[state]
    }
}

impl<T> ParsingTable<T>
where
    T: Eq,
{
    /// Terminal for an input token, `None` for a token the grammar does not
    /// know.
    pub fn symbol_of(&self, token: &T) -> Option<Symbol> {
        self.symbols.iter().find_map(|(symbol, entry)| match entry {
            SymbolEntry::Terminal(t) if t == token => Some(*symbol),
            _ => None,
        })
    }
}

impl<T> ParsingTable<T>
where
    T: Display,
{
    pub fn symbol_name(&self, symbol: Symbol) -> String {
        match self.column(symbol).map(|column| &self.symbols[column].1) {
            Some(SymbolEntry::Terminal(token)) => token.to_string(),
            Some(SymbolEntry::EndMarker) => END_MARK.to_string(),
            Some(SymbolEntry::Nonterminal(name)) => name.clone(),
            None => symbol.to_string(),
        }
    }
}

impl<T> ParsingTable<T>
where
    T: Serialize,
{
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
