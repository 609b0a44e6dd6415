//! Minimal table-driven shift-reduce runtime used to check generated tables.

#![allow(dead_code)]

use lr1_table::{Action, ParsingTable, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree<T> {
    Leaf(T),
    Node(Symbol, Vec<Tree<T>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Input token the grammar has no terminal for.
    Token { pos: usize },
    /// Error cell reached with the token at `pos` (or end of input) as
    /// lookahead.
    Syntax { pos: usize },
}

pub fn run<T>(table: &ParsingTable<T>, input: &[T]) -> Result<Tree<T>, RunError>
where
    T: Clone + Eq,
{
    let mut stack: Vec<(Option<Tree<T>>, usize)> = vec![(None, table.start_state())];
    let mut pos = 0;

    loop {
        let symbol = match input.get(pos) {
            Some(token) => table.symbol_of(token).ok_or(RunError::Token { pos })?,
            None => Symbol::END_MARKER,
        };
        let top = stack.last().map(|(_, state)| *state).unwrap();

        match table.action(top, symbol) {
            Action::Error => return Err(RunError::Syntax { pos }),
            Action::Shift(state) => {
                stack.push((Some(Tree::Leaf(input[pos].clone())), state));
                pos += 1;
            }
            Action::Reduce(rule) => {
                let (lhs, len) = table.rule(rule);
                let children: Vec<Tree<T>> = stack
                    .split_off(stack.len() - len)
                    .into_iter()
                    .map(|(tree, _)| tree.unwrap())
                    .collect();
                let node = Tree::Node(lhs, children);
                if lhs == table.root_symbol() {
                    return Ok(node);
                }

                let top = stack.last().map(|(_, state)| *state).unwrap();
                match table.action(top, lhs) {
                    Action::Shift(state) => stack.push((Some(node), state)),
                    action => panic!("no goto on {} from state {}: {:?}", lhs, top, action),
                }
            }
        }
    }
}

pub fn chars(input: &str) -> Vec<char> {
    input.chars().collect()
}
