use std::collections::{BTreeMap, HashMap, VecDeque};

use super::{Automaton, Conflict, Item, ItemSet, StateId};
use crate::grammar::{Grammar, Symbol};

/// Canonical LR(1) construction over a built grammar, before any table
/// exists.
#[derive(Debug)]
pub struct CanonicalLr<'g, T> {
    grammar: &'g Grammar<T>,
}

impl<T> Clone for CanonicalLr<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CanonicalLr<'_, T> {}

/// States discovered from the initial state and the goto table between
/// them. The reduce table is not built yet.
#[derive(Debug, Clone)]
pub struct GoTable<'g, T> {
    lr: CanonicalLr<'g, T>,
    states: Vec<ItemSet>,
    go_table: Vec<BTreeMap<Symbol, StateId>>,
}

impl<'g, T> CanonicalLr<'g, T> {
    pub fn new(grammar: &'g Grammar<T>) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g Grammar<T> {
        self.grammar
    }

    /// Expands `items` with every `B -> .w, c` implied by an item reading
    /// nonterminal `B`, until nothing new appears.
    pub fn closure(&self, items: ItemSet) -> ItemSet {
        let mut q: VecDeque<Item> = items.iter().copied().collect();
        let mut closed = items;

        while let Some(item) = q.pop_front() {
            let rhs = &self.grammar.rule(item.rule).rhs;
            let Some(&next) = rhs.get(item.cursor) else {
                continue;
            };
            if !next.is_nonterminal() {
                continue;
            }

            let lookaheads = self
                .grammar
                .first_of(&rhs[item.cursor + 1..], item.lookahead);
            for (rule, _) in self.grammar.rules_of(next) {
                for &lookahead in &lookaheads {
                    let new_item = Item::new(rule, 0, lookahead);
                    if closed.insert(new_item) {
                        q.push_back(new_item);
                    }
                }
            }
        }

        closed
    }

    /// State reached from `state` by reading `symbol`; empty when no item
    /// reads it.
    pub fn goto(&self, state: &ItemSet, symbol: Symbol) -> ItemSet {
        let core: ItemSet = state
            .iter()
            .filter(|item| item.next_symbol(self.grammar) == Some(symbol))
            .map(Item::advance)
            .collect();

        if core.is_empty() {
            core
        } else {
            self.closure(core)
        }
    }

    pub fn initial_state(&self) -> ItemSet {
        let core: ItemSet = self
            .grammar
            .rules_of(self.grammar.root_symbol())
            .map(|(rule, _)| Item::new(rule, 0, Symbol::END_MARKER))
            .collect();
        self.closure(core)
    }

    /// Breadth-first discovery of every state reachable from the initial
    /// one. Ids follow discovery order, symbols are tried in increasing
    /// order, so the result only depends on the grammar.
    pub fn build_go_table(self) -> GoTable<'g, T> {
        let initial = self.initial_state();
        let mut ids: HashMap<ItemSet, StateId> = HashMap::from([(initial.clone(), 0)]);
        let mut states: Vec<ItemSet> = vec![initial];
        let mut go_table: Vec<BTreeMap<Symbol, StateId>> = vec![BTreeMap::new()];
        let mut q: VecDeque<StateId> = VecDeque::from([0]);

        while let Some(from) = q.pop_front() {
            for symbol in self.grammar.symbols() {
                let next = self.goto(&states[from], symbol);
                if next.is_empty() {
                    continue;
                }

                let to = match ids.get(&next) {
                    Some(&id) => id,
                    None => {
                        let id = states.len();
                        ids.insert(next.clone(), id);
                        states.push(next);
                        go_table.push(BTreeMap::new());
                        q.push_back(id);
                        id
                    }
                };
                go_table[from].insert(symbol, to);
            }
        }

        GoTable {
            lr: self,
            states,
            go_table,
        }
    }
}

impl<'g, T> GoTable<'g, T> {
    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    pub fn goto(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.go_table.get(state)?.get(&symbol).copied()
    }

    /// Records a reduction for every complete item and fails on the first
    /// cell that would hold two actions.
    ///
    /// A complete item with lookahead `$` never clashes with the goto table,
    /// since the end of input cannot be shifted.
    pub fn build_return_table(self) -> Result<Automaton, Conflict> {
        let grammar = self.lr.grammar;
        let mut return_table: Vec<BTreeMap<Symbol, usize>> =
            vec![BTreeMap::new(); self.states.len()];

        for (state, items) in self.states.iter().enumerate() {
            for item in items.iter().filter(|item| item.is_complete(grammar)) {
                let lookahead = item.lookahead;
                if let Some(&first) = return_table[state].get(&lookahead) {
                    return Err(Conflict::ReduceReduce {
                        state,
                        lookahead,
                        first,
                        second: item.rule,
                    });
                }
                if !lookahead.is_end_marker() {
                    if let Some(&shift) = self.go_table[state].get(&lookahead) {
                        return Err(Conflict::ShiftReduce {
                            state,
                            lookahead,
                            shift,
                            rule: item.rule,
                        });
                    }
                }
                return_table[state].insert(lookahead, item.rule);
            }
        }

        Ok(Automaton::new(
            self.states,
            self.go_table,
            return_table,
            grammar.root_symbol(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::CanonicalLr;
    use crate::grammar::{samples, GrammarBuilder, Symbol};
    use crate::lr::{Conflict, Item, ItemSet};

    #[test]
    fn parentheses_initial_state() {
        let g = samples::balanced_parentheses().build().unwrap();
        let lr = CanonicalLr::new(&g);

        let expected = ItemSet::from([
            Item::new(0, 0, Symbol::END_MARKER),
            Item::new(1, 0, Symbol::END_MARKER),
            Item::new(2, 0, Symbol::END_MARKER),
        ]);
        assert_eq!(lr.initial_state(), expected);
    }

    #[test]
    fn closure_propagates_lookahead() {
        let g = samples::balanced_parentheses().build().unwrap();
        let lr = CanonicalLr::new(&g);
        let r = g.symbol_of(&')').unwrap();

        // S -> ( . S ) S, $
        let state = lr.closure(ItemSet::from([Item::new(1, 1, Symbol::END_MARKER)]));
        let expected = ItemSet::from([
            Item::new(1, 0, r),
            Item::new(1, 1, Symbol::END_MARKER),
            Item::new(2, 0, r),
        ]);
        assert_eq!(state, expected);
    }

    #[test]
    fn closure_is_idempotent() {
        let g = samples::arithmetic().build().unwrap();
        let lr = CanonicalLr::new(&g);
        let table = lr.build_go_table();

        for state in table.states() {
            assert_eq!(&lr.closure(state.clone()), state);
        }
    }

    #[test]
    fn goto_without_core_is_empty() {
        let g = samples::balanced_parentheses().build().unwrap();
        let lr = CanonicalLr::new(&g);
        let r = g.symbol_of(&')').unwrap();

        assert!(lr.goto(&lr.initial_state(), r).is_empty());
        let from_empty = lr.goto(&ItemSet::new(), Symbol::kth_nonterminal(0));
        assert!(from_empty.is_empty());
    }

    #[test]
    fn equal_item_sets_share_a_state() {
        let g = samples::balanced_parentheses().build().unwrap();
        let table = CanonicalLr::new(&g).build_go_table();
        let l = g.symbol_of(&'(').unwrap();

        // `(` from inside a bracket always lands on the same state.
        let inner = table.goto(0, l).unwrap();
        let nested = table.goto(inner, l).unwrap();
        assert_eq!(table.goto(nested, l), Some(nested));

        for (i, a) in table.states().iter().enumerate() {
            for b in &table.states()[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn parentheses_state_count() {
        let g = samples::balanced_parentheses().build().unwrap();
        let table = CanonicalLr::new(&g).build_go_table();
        assert_eq!(table.states().len(), 10);
    }

    #[test]
    fn reduce_reduce_conflict() {
        let mut b = GrammarBuilder::new();
        let a = b.new_terminal('a');
        let x = b.new_terminal('x');
        let s_ = b.new_nonterminal("S'");
        let s = b.new_nonterminal("S");
        let n1 = b.new_nonterminal("A");
        let n2 = b.new_nonterminal("B");
        b.set_root_symbol(s_);
        b.add_rule(s_, vec![s]);
        b.add_rule(s, vec![n1, x]);
        b.add_rule(s, vec![n2, x]);
        b.add_rule(n1, vec![a]);
        b.add_rule(n2, vec![a]);
        let g = b.build().unwrap();

        let table = CanonicalLr::new(&g).build_go_table();
        let after_a = table.goto(0, a).unwrap();
        assert_eq!(
            table.build_return_table().unwrap_err(),
            Conflict::ReduceReduce {
                state: after_a,
                lookahead: x,
                first: 3,
                second: 4
            }
        );
    }

    #[test]
    fn eps_reduction_at_end_marker_is_accepted() {
        // The root derives ε directly: the initial state reduces on `$`.
        let g = samples::balanced_parentheses().build().unwrap();
        let automaton = CanonicalLr::new(&g)
            .build_go_table()
            .build_return_table()
            .unwrap();
        assert_eq!(automaton.reduce(0, Symbol::END_MARKER), Some(2));
    }
}
