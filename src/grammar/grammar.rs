use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt,
    hash::Hash,
};

use serde::Serialize;

use super::{eps_first, GrammarError};

/// Integer identity of a grammar symbol.
///
/// Terminals are negative (`-1 - k` for the `k`-th registered terminal), the
/// end marker is `0` and nonterminals are positive (`k + 1` for the `k`-th
/// registered nonterminal). Comparing symbols as integers yields the fixed
/// order used to walk transition tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(i32);

impl Symbol {
    pub const END_MARKER: Symbol = Symbol(0);

    pub fn kth_terminal(k: usize) -> Self {
        Symbol(-1 - k as i32)
    }

    pub fn kth_nonterminal(k: usize) -> Self {
        Symbol(k as i32 + 1)
    }

    pub fn id(self) -> i32 {
        self.0
    }

    /// `true` for registered terminals and for the end marker.
    pub fn is_terminal(self) -> bool {
        self.0 <= 0
    }

    pub fn is_nonterminal(self) -> bool {
        self.0 > 0
    }

    pub fn is_end_marker(self) -> bool {
        self == Self::END_MARKER
    }

    fn terminal_index(self) -> Option<usize> {
        (self.0 < 0).then(|| (-1 - self.0) as usize)
    }

    fn nonterminal_index(self) -> Option<usize> {
        (self.0 > 0).then(|| (self.0 - 1) as usize)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

/// Registration phase of a grammar.
///
/// Symbols and rules can only be added here; [`GrammarBuilder::build`] freezes
/// them into a [`Grammar`].
#[derive(Debug, Clone)]
pub struct GrammarBuilder<T> {
    terminals: Vec<T>,
    nonterminals: Vec<String>,
    rules: Vec<Rule>,
    root_symbol: Option<Symbol>,
}

impl<T> Default for GrammarBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GrammarBuilder<T> {
    pub fn new() -> Self {
        Self {
            terminals: Vec::new(),
            nonterminals: Vec::new(),
            rules: Vec::new(),
            root_symbol: None,
        }
    }

    pub fn new_terminal(&mut self, token: T) -> Symbol {
        self.terminals.push(token);
        Symbol::kth_terminal(self.terminals.len() - 1)
    }

    pub fn new_nonterminal(&mut self, name: &str) -> Symbol {
        self.nonterminals.push(name.to_string());
        Symbol::kth_nonterminal(self.nonterminals.len() - 1)
    }

    /// Appends `lhs -> rhs` and returns its rule index. Symbols are checked
    /// by [`GrammarBuilder::build`].
    pub fn add_rule(&mut self, lhs: Symbol, rhs: Vec<Symbol>) -> usize {
        self.rules.push(Rule { lhs, rhs });
        self.rules.len() - 1
    }

    pub fn set_root_symbol(&mut self, root_symbol: Symbol) {
        self.root_symbol = Some(root_symbol);
    }

    pub fn get_root_symbol(&self) -> Option<Symbol> {
        self.root_symbol
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn is_valid_symbol(&self, symbol: Symbol) -> bool {
        match (symbol.terminal_index(), symbol.nonterminal_index()) {
            (Some(k), _) => k < self.terminals.len(),
            (_, Some(k)) => k < self.nonterminals.len(),
            _ => true,
        }
    }
}

impl<T> GrammarBuilder<T>
where
    T: Eq + Hash,
{
    fn validate(&self) -> Result<Symbol, GrammarError> {
        let root = self.root_symbol.ok_or(GrammarError::MissingRootSymbol)?;
        if !root.is_nonterminal() || !self.is_valid_symbol(root) {
            return Err(GrammarError::RootNotNonterminal(root));
        }

        for (rule, Rule { lhs, rhs }) in self.rules.iter().enumerate() {
            for &symbol in std::iter::once(lhs).chain(rhs.iter()) {
                if symbol.is_end_marker() {
                    return Err(GrammarError::EndMarkerInRule { rule });
                }
                if !self.is_valid_symbol(symbol) {
                    return Err(GrammarError::UnknownSymbol { rule, symbol });
                }
            }
            if !lhs.is_nonterminal() {
                return Err(GrammarError::LhsNotNonterminal { rule, symbol: *lhs });
            }
        }

        if !self.rules.iter().any(|rule| rule.lhs == root) {
            return Err(GrammarError::RootWithoutRules(root));
        }

        let mut seen = HashSet::new();
        for (k, token) in self.terminals.iter().enumerate() {
            if !seen.insert(token) {
                return Err(GrammarError::DuplicateTerminal {
                    symbol: Symbol::kth_terminal(k),
                });
            }
        }

        Ok(root)
    }

    /// Freezes the grammar and computes the epsilon-productive set, then the
    /// FIRST sets.
    pub fn build(self) -> Result<Grammar<T>, GrammarError> {
        let root_symbol = self.validate()?;

        let eps_productive = eps_first::find_eps_productive(&self.rules);
        let first = eps_first::find_first_sets(
            self.terminals.len(),
            self.nonterminals.len(),
            &self.rules,
            &eps_productive,
        );

        Ok(Grammar {
            terminals: self.terminals,
            nonterminals: self.nonterminals,
            rules: self.rules,
            root_symbol,
            eps_productive,
            first,
        })
    }
}

/// A built grammar: rules and symbols are frozen and the derived
/// epsilon-productive and FIRST sets are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar<T> {
    terminals: Vec<T>,
    nonterminals: Vec<String>,
    rules: Vec<Rule>,
    root_symbol: Symbol,
    eps_productive: BTreeSet<Symbol>,
    first: BTreeMap<Symbol, BTreeSet<Symbol>>,
}

impl<T> Grammar<T> {
    /// Returns to the registration phase, dropping the derived data.
    pub fn into_builder(self) -> GrammarBuilder<T> {
        GrammarBuilder {
            terminals: self.terminals,
            nonterminals: self.nonterminals,
            rules: self.rules,
            root_symbol: Some(self.root_symbol),
        }
    }

    pub fn root_symbol(&self) -> Symbol {
        self.root_symbol
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> &Rule {
        &self.rules[index]
    }

    pub fn rules_count(&self) -> usize {
        self.rules.len()
    }

    /// Rules with `lhs` on the left side, with their indices.
    pub fn rules_of(&self, lhs: Symbol) -> impl Iterator<Item = (usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.lhs == lhs)
    }

    pub fn terminals_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn nonterminals_count(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn terminal(&self, symbol: Symbol) -> Option<&T> {
        symbol.terminal_index().and_then(|k| self.terminals.get(k))
    }

    pub fn nonterminal_name(&self, symbol: Symbol) -> Option<&str> {
        symbol
            .nonterminal_index()
            .and_then(|k| self.nonterminals.get(k))
            .map(|name| name.as_str())
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = (Symbol, &T)> {
        self.terminals
            .iter()
            .enumerate()
            .map(|(k, token)| (Symbol::kth_terminal(k), token))
    }

    pub fn nonterminal_iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.nonterminals
            .iter()
            .enumerate()
            .map(|(k, name)| (Symbol::kth_nonterminal(k), name.as_str()))
    }

    pub fn first_valid_symbol(&self) -> Symbol {
        Symbol(-(self.terminals.len() as i32))
    }

    pub fn last_valid_symbol(&self) -> Symbol {
        Symbol(self.nonterminals.len() as i32)
    }

    pub fn is_valid_symbol(&self, symbol: Symbol) -> bool {
        self.first_valid_symbol() <= symbol && symbol <= self.last_valid_symbol()
    }

    /// Every valid symbol in increasing order: terminals, the end marker,
    /// then nonterminals.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> {
        (self.first_valid_symbol().0..=self.last_valid_symbol().0).map(Symbol)
    }

    pub fn symbols_count(&self) -> usize {
        self.terminals.len() + 1 + self.nonterminals.len()
    }

    pub fn is_eps_productive(&self, symbol: Symbol) -> bool {
        self.eps_productive.contains(&symbol)
    }

    pub fn eps_productive(&self) -> &BTreeSet<Symbol> {
        &self.eps_productive
    }

    pub fn get_first(&self, symbol: Symbol) -> Option<&BTreeSet<Symbol>> {
        self.first.get(&symbol)
    }

    /// FIRST set of a single symbol.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` was not registered with this grammar.
    pub fn first(&self, symbol: Symbol) -> &BTreeSet<Symbol> {
        match self.first.get(&symbol) {
            Some(first) => first,
            None => panic!("symbol {} is not registered", symbol),
        }
    }

    /// Terminals that can begin `sequence` followed by `right_context`.
    pub fn first_of(&self, sequence: &[Symbol], right_context: Symbol) -> BTreeSet<Symbol> {
        eps_first::first_of_sequence(
            sequence,
            right_context,
            |s| self.first(s),
            |s| self.is_eps_productive(s),
        )
    }
}

impl<T> Grammar<T>
where
    T: Eq,
{
    /// Looks up the terminal registered for `token`.
    pub fn symbol_of(&self, token: &T) -> Option<Symbol> {
        self.terminals
            .iter()
            .position(|t| t == token)
            .map(Symbol::kth_terminal)
    }
}

impl<T> Grammar<T>
where
    T: fmt::Display,
{
    pub fn symbol_name(&self, symbol: Symbol) -> String {
        if symbol.is_end_marker() {
            super::END_MARK.to_string()
        } else if let Some(token) = self.terminal(symbol) {
            token.to_string()
        } else if let Some(name) = self.nonterminal_name(symbol) {
            name.to_string()
        } else {
            symbol.to_string()
        }
    }

    pub fn rule_to_vec_str(&self, index: usize) -> Vec<String> {
        self.rules[index]
            .rhs
            .iter()
            .map(|&s| self.symbol_name(s))
            .collect()
    }
}
