pub mod eps_first;
pub mod error;
pub mod grammar;
pub mod parse;
pub mod pretty_print;
pub mod samples;
pub use error::{GrammarError, ParseError};
pub use grammar::{Grammar, GrammarBuilder, Rule, Symbol};

pub const EPSILON: &str = "ϵ";
pub const EPSILON_ALT: &str = "ε";
pub const END_MARK: &str = "$";

#[cfg(test)]
mod build_tests {
    use super::{GrammarBuilder, GrammarError, Symbol};

    #[test]
    fn symbol_order() {
        let mut g = GrammarBuilder::new();
        let a = g.new_terminal('a');
        let b = g.new_terminal('b');
        let s = g.new_nonterminal("S");
        g.set_root_symbol(s);
        g.add_rule(s, vec![a, b]);
        let g = g.build().unwrap();

        assert!(b < a && a < Symbol::END_MARKER && Symbol::END_MARKER < s);
        assert_eq!(
            g.symbols().collect::<Vec<_>>(),
            vec![b, a, Symbol::END_MARKER, s]
        );
        assert_eq!(g.symbols_count(), 4);
        assert!(!g.is_valid_symbol(Symbol::kth_terminal(2)));
    }

    #[test]
    fn missing_root() {
        let mut g = GrammarBuilder::<char>::new();
        let s = g.new_nonterminal("S");
        g.add_rule(s, vec![]);
        assert_eq!(g.build().unwrap_err(), GrammarError::MissingRootSymbol);
    }

    #[test]
    fn root_must_be_nonterminal_with_rules() {
        let mut g = GrammarBuilder::new();
        let a = g.new_terminal('a');
        let s = g.new_nonterminal("S");
        let t = g.new_nonterminal("T");
        g.add_rule(t, vec![a]);

        g.set_root_symbol(a);
        assert_eq!(
            g.clone().build().unwrap_err(),
            GrammarError::RootNotNonterminal(a)
        );

        g.set_root_symbol(s);
        assert_eq!(g.build().unwrap_err(), GrammarError::RootWithoutRules(s));
    }

    #[test]
    fn rules_are_checked() {
        let mut g = GrammarBuilder::new();
        let a = g.new_terminal('a');
        let s = g.new_nonterminal("S");
        g.set_root_symbol(s);
        g.add_rule(s, vec![a]);

        let mut unknown = g.clone();
        unknown.add_rule(s, vec![Symbol::kth_nonterminal(7)]);
        assert_eq!(
            unknown.build().unwrap_err(),
            GrammarError::UnknownSymbol {
                rule: 1,
                symbol: Symbol::kth_nonterminal(7)
            }
        );

        let mut end = g.clone();
        end.add_rule(s, vec![a, Symbol::END_MARKER]);
        assert_eq!(
            end.build().unwrap_err(),
            GrammarError::EndMarkerInRule { rule: 1 }
        );

        let mut lhs = g.clone();
        lhs.add_rule(a, vec![s]);
        assert_eq!(
            lhs.build().unwrap_err(),
            GrammarError::LhsNotNonterminal { rule: 1, symbol: a }
        );

        let mut duplicate = g;
        let a2 = duplicate.new_terminal('a');
        assert_eq!(
            duplicate.build().unwrap_err(),
            GrammarError::DuplicateTerminal { symbol: a2 }
        );
    }

    #[test]
    #[should_panic]
    fn first_of_unregistered_symbol() {
        let g = super::samples::balanced_parentheses().build().unwrap();
        g.first(Symbol::kth_terminal(10));
    }
}
