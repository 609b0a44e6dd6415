//! Reference grammars, registered in the order their tables are documented
//! against.

use super::GrammarBuilder;

/// `S' -> S`, `S -> ( S ) S`, `S -> ε`
pub fn balanced_parentheses() -> GrammarBuilder<char> {
    let mut g = GrammarBuilder::new();
    let l_brace = g.new_terminal('(');
    let r_brace = g.new_terminal(')');

    let s = g.new_nonterminal("S");
    let s_ = g.new_nonterminal("S'");
    g.set_root_symbol(s_);

    g.add_rule(s_, vec![s]);
    g.add_rule(s, vec![l_brace, s, r_brace, s]);
    g.add_rule(s, vec![]);
    g
}

/// `S' -> S`, `S -> S + T | T`, `T -> T * U | U`, `U -> x | ( S )`
pub fn arithmetic() -> GrammarBuilder<char> {
    let mut g = GrammarBuilder::new();
    let x = g.new_terminal('x');
    let plus = g.new_terminal('+');
    let mul = g.new_terminal('*');
    let l_brace = g.new_terminal('(');
    let r_brace = g.new_terminal(')');

    let s_ = g.new_nonterminal("S'");
    let s = g.new_nonterminal("S");
    let t = g.new_nonterminal("T");
    let u = g.new_nonterminal("U");
    g.set_root_symbol(s_);

    g.add_rule(s_, vec![s]);
    g.add_rule(s, vec![s, plus, t]);
    g.add_rule(s, vec![t]);
    g.add_rule(t, vec![t, mul, u]);
    g.add_rule(t, vec![u]);
    g.add_rule(u, vec![x]);
    g.add_rule(u, vec![l_brace, s, r_brace]);
    g
}
