use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::{Rule, Symbol};

/// Nonterminals that derive the empty sequence.
///
/// A rule marks its left side once every symbol of its right side is already
/// marked; passes over all rules repeat until one adds nothing.
pub fn find_eps_productive(rules: &[Rule]) -> BTreeSet<Symbol> {
    let mut eps_productive = BTreeSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for rule in rules {
            if eps_productive.contains(&rule.lhs) {
                continue;
            }
            if rule.rhs.iter().all(|s| eps_productive.contains(s)) {
                eps_productive.insert(rule.lhs);
                changed = true;
            }
        }
    }
    eps_productive
}

/// FIRST set of every symbol.
///
/// Each rule adds edges from its left side to the leading symbols of its
/// right side, up to and including the first symbol that is not
/// epsilon-productive. FIRST of a nonterminal is the set of terminals
/// reachable from it; FIRST of a terminal (or the end marker) is itself.
pub fn find_first_sets(
    terminals_count: usize,
    nonterminals_count: usize,
    rules: &[Rule],
    eps_productive: &BTreeSet<Symbol>,
) -> BTreeMap<Symbol, BTreeSet<Symbol>> {
    let mut graph: Vec<Vec<Symbol>> = vec![Vec::new(); nonterminals_count];
    for rule in rules {
        let edges = &mut graph[node(rule.lhs)];
        for &s in &rule.rhs {
            edges.push(s);
            if !eps_productive.contains(&s) {
                break;
            }
        }
    }

    let mut first: BTreeMap<Symbol, BTreeSet<Symbol>> = BTreeMap::new();
    for k in 0..nonterminals_count {
        let start = Symbol::kth_nonterminal(k);
        let mut reachable: BTreeSet<Symbol> = BTreeSet::new();
        let mut visited: HashSet<Symbol> = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if v.is_terminal() {
                reachable.insert(v);
                continue;
            }
            for &u in &graph[node(v)] {
                if visited.insert(u) {
                    stack.push(u);
                }
            }
        }
        first.insert(start, reachable);
    }

    for k in 0..terminals_count {
        let t = Symbol::kth_terminal(k);
        first.insert(t, BTreeSet::from([t]));
    }
    first.insert(Symbol::END_MARKER, BTreeSet::from([Symbol::END_MARKER]));

    first
}

fn node(nonterminal: Symbol) -> usize {
    nonterminal.id() as usize - 1
}

/// Lookahead composition: FIRST of each symbol of `sequence` up to the first
/// one that is not epsilon-productive. If every symbol is epsilon-productive
/// (or `sequence` is empty), `right_context` is included too.
pub fn first_of_sequence<'a, F, E>(
    sequence: &[Symbol],
    right_context: Symbol,
    first: F,
    is_eps_productive: E,
) -> BTreeSet<Symbol>
where
    F: Fn(Symbol) -> &'a BTreeSet<Symbol>,
    E: Fn(Symbol) -> bool,
{
    let mut answer = BTreeSet::new();
    for &s in sequence {
        answer.extend(first(s).iter().copied());
        if !is_eps_productive(s) {
            return answer;
        }
    }
    answer.insert(right_context);
    answer
}
