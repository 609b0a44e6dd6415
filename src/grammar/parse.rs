use std::collections::HashMap;

use super::{
    Grammar, GrammarBuilder, GrammarError, ParseError, Symbol, END_MARK, EPSILON, EPSILON_ALT,
};

impl GrammarBuilder<String> {
    /// Reads grammar text of the form
    ///
    /// ```text
    /// E -> E + T | T
    ///   | ( E )
    /// ```
    ///
    /// Left sides are nonterminals, everything else is a terminal. The first
    /// left side is the start symbol; a fresh `S'` with the rule `S' -> S`
    /// is registered first and becomes the root.
    pub fn parse(grammar: &str) -> Result<Self, ParseError> {
        let mut raw_productions: Vec<(&str, &str)> = Vec::new();

        let mut previous_left: Option<&str> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(ParseError::TooManyArrows(i + 1));
            }
            let (left, rights): (&str, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(ParseError::EmptyLhs(i + 1));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(ParseError::LhsContainsWhitespace(i + 1));
                }
                (left_str, parts[1].trim())
            } else {
                match (previous_left, parts[0].trim().strip_prefix('|')) {
                    (Some(left), Some(rights)) => (left, rights.trim()),
                    _ => return Err(ParseError::MissingLhs(i + 1)),
                }
            };
            if left == END_MARK || rights.split_whitespace().any(|s| s == END_MARK) {
                return Err(ParseError::ReservedEndMark(i + 1));
            }

            previous_left = Some(left);
            raw_productions.push((left, rights));
        }

        let Some(&(start, _)) = raw_productions.first() else {
            return Err(ParseError::NoProductions);
        };

        let mut g = Self::new();
        let mut symbol_table: HashMap<&str, Symbol> = HashMap::new();

        let mut root_name = format!("{}'", start);
        while raw_productions.iter().any(|(left, rights)| {
            *left == root_name || rights.split_whitespace().any(|s| s == root_name)
        }) {
            root_name.push('\'');
        }
        let root = g.new_nonterminal(&root_name);

        for &(left, _) in &raw_productions {
            if !symbol_table.contains_key(left) {
                symbol_table.insert(left, g.new_nonterminal(left));
            }
        }

        let mut productions: Vec<(Symbol, Vec<Symbol>)> = Vec::new();
        for (left, rights) in &raw_productions {
            for right in rights.split('|') {
                let symbols = right
                    .split_whitespace()
                    .filter(|s| *s != EPSILON && *s != EPSILON_ALT)
                    .map(|s| match symbol_table.get(s) {
                        Some(&symbol) => symbol,
                        None => {
                            let symbol = g.new_terminal(s.to_string());
                            symbol_table.insert(s, symbol);
                            symbol
                        }
                    })
                    .collect();
                productions.push((symbol_table[left], symbols));
            }
        }

        g.set_root_symbol(root);
        g.add_rule(root, vec![symbol_table[start]]);
        for (left, right) in productions {
            g.add_rule(left, right);
        }

        Ok(g)
    }
}

impl Grammar<String> {
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        GrammarBuilder::parse(grammar)?.build()
    }
}
