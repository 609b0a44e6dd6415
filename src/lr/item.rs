use std::collections::BTreeSet;

use serde::Serialize;

use crate::grammar::{Grammar, Symbol};

/// LR(1) item: a rule, a cursor into its right side and one lookahead.
///
/// Field order gives the canonical ordering (rule, cursor, lookahead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Item {
    pub rule: usize,
    pub cursor: usize,
    pub lookahead: Symbol,
}

/// Items kept in canonical order, so equal sets compare and hash equal
/// whatever order they were discovered in.
pub type ItemSet = BTreeSet<Item>;

impl Item {
    pub fn new(rule: usize, cursor: usize, lookahead: Symbol) -> Self {
        Self {
            rule,
            cursor,
            lookahead,
        }
    }

    pub fn advance(&self) -> Self {
        Self {
            cursor: self.cursor + 1,
            ..*self
        }
    }

    /// Symbol right after the cursor, `None` for a complete item.
    pub fn next_symbol<T>(&self, grammar: &Grammar<T>) -> Option<Symbol> {
        grammar.rule(self.rule).rhs.get(self.cursor).copied()
    }

    pub fn is_complete<T>(&self, grammar: &Grammar<T>) -> bool {
        self.cursor == grammar.rule(self.rule).rhs.len()
    }
}
