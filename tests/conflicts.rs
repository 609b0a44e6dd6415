use lr1_table::{
    lr::{CanonicalLr, ItemSet},
    Automaton, Conflict, Grammar, GrammarBuilder, Symbol,
};

/// `E' -> E`, `E -> E + E | x`
fn ambiguous_sum() -> (Grammar<char>, Symbol) {
    let mut g = GrammarBuilder::new();
    let x = g.new_terminal('x');
    let plus = g.new_terminal('+');
    let e_ = g.new_nonterminal("E'");
    let e = g.new_nonterminal("E");
    g.set_root_symbol(e_);
    g.add_rule(e_, vec![e]);
    g.add_rule(e, vec![e, plus, e]);
    g.add_rule(e, vec![x]);
    (g.build().unwrap(), plus)
}

fn completes_on(g: &Grammar<char>, state: &ItemSet, rule: usize, lookahead: Symbol) -> bool {
    state
        .iter()
        .any(|item| item.rule == rule && item.is_complete(g) && item.lookahead == lookahead)
}

#[test]
fn shift_reduce_is_reported() {
    let (g, plus) = ambiguous_sum();
    let conflict = Automaton::build(&g).unwrap_err();

    let Conflict::ShiftReduce {
        state,
        lookahead,
        shift,
        rule,
    } = conflict
    else {
        panic!("expected a shift-reduce conflict, got {:?}", conflict);
    };
    assert_eq!(lookahead, plus);
    assert_eq!(rule, 1);

    // The reported cell really is ambiguous.
    let table = CanonicalLr::new(&g).build_go_table();
    assert_eq!(table.goto(state, plus), Some(shift));
    assert!(completes_on(&g, &table.states()[state], rule, plus));
}

#[test]
fn conflict_display() {
    let (g, _) = ambiguous_sum();
    let message = Automaton::build(&g).unwrap_err().to_string();
    assert!(message.starts_with("shift-reduce conflict in state "));
    assert!(message.contains("on #-2"));
}

#[test]
fn dangling_else() {
    let g = Grammar::parse("S -> if c then S | if c then S else S | a").unwrap();
    let conflict = Automaton::build(&g).unwrap_err();
    let else_ = g.symbol_of(&"else".to_string()).unwrap();

    assert!(matches!(conflict, Conflict::ShiftReduce { .. }));
    assert_eq!(conflict.lookahead(), else_);
}

#[test]
fn reduce_reduce_is_reported() {
    let g = Grammar::parse("S -> A x | B x\nA -> a\nB -> a").unwrap();
    let conflict = Automaton::build(&g).unwrap_err();
    let x = g.symbol_of(&"x".to_string()).unwrap();

    let table = CanonicalLr::new(&g).build_go_table();
    let a = g.symbol_of(&"a".to_string()).unwrap();
    assert_eq!(
        conflict,
        Conflict::ReduceReduce {
            state: table.goto(0, a).unwrap(),
            lookahead: x,
            first: 3,
            second: 4,
        }
    );
}

#[test]
fn lr1_but_not_lalr() {
    // Merging the states after `a e` and `b e` would clash on c/d; the
    // canonical collection keeps them apart.
    let g = Grammar::parse("S -> a E c | a F d | b F c | b E d\nE -> e\nF -> e").unwrap();
    let automaton = Automaton::build(&g).unwrap();
    assert!(automaton.is_sound());
}
