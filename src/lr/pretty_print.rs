use std::{collections::BTreeMap, fmt::Display};

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Action, Automaton, ItemSet, ParsingTable, StateId, SymbolEntry};
use crate::grammar::{Grammar, Symbol};

/// An item with its lookaheads merged: `A -> x . y, a/b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DotProduction {
    pub left: String,
    pub production: Vec<String>,
    pub position: usize,
    pub lookahead: Vec<String>,
}

impl DotProduction {
    pub fn to_plaintext(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.left);
        output.push_str(" ->");
        for (i, s) in self.production.iter().enumerate() {
            if i == self.position {
                output.push_str(" .");
            }
            output.push(' ');
            output.push_str(s);
        }
        if self.position == self.production.len() {
            output.push_str(" .");
        }
        output.push_str(", ");
        output.push_str(&self.lookahead.join("/"));

        output
    }

    pub fn to_latex(&self) -> String {
        let mut right: Vec<String> = Vec::new();
        for (i, s) in self.production.iter().enumerate() {
            if i == self.position {
                right.push(".".to_string());
            }
            right.push(escape::tex(s.as_str()).to_string());
        }
        if self.production.is_empty() {
            right.push("\\epsilon".to_string());
        }
        if self.position == self.production.len() {
            right.push(".".to_string());
        }
        let right = right.join(" ");

        let lookahead = self
            .lookahead
            .iter()
            .map(|s| escape::tex(s.as_str()).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "${} \\rightarrow {}$, {}",
            escape::tex(self.left.as_str()),
            right,
            lookahead
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StateOutput {
    pub id: StateId,
    pub items: Vec<DotProduction>,
    pub edges: Vec<(String, StateId)>,
    pub reductions: Vec<(String, usize)>,
}

impl StateOutput {
    pub fn to_plaintext(&self) -> String {
        let items = self
            .items
            .iter()
            .map(|c| c.to_plaintext())
            .collect::<Vec<_>>()
            .join("\n");

        let edges = if !self.edges.is_empty() {
            format!(
                "\n===\n{}",
                self.edges
                    .iter()
                    .map(|(k, v)| format!("- {} -> {}", k, v))
                    .collect::<Vec<_>>()
                    .join("\n")
            )
        } else {
            String::new()
        };

        format!("I{}\n{}{}", self.id, items, edges)
    }

    pub fn node_to_latex(&self) -> String {
        let id = self.id;
        let content = self
            .items
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join(" \\\\ \n");
        format!(
            "\\node [block] (I_{}){}\n{{\n$I_{}$\\\\\n{}\n}};",
            id,
            if id > 0 {
                if id % 2 == 0 {
                    format!(" [below of = I_{}] ", id - 2)
                } else {
                    format!(" [right of = I_{}] ", id - 1)
                }
            } else {
                String::new()
            },
            id,
            content
        )
    }

    pub fn edge_to_latex(&self) -> String {
        self.edges
            .iter()
            .map(|(e, v)| {
                let placement = if self.id == *v {
                    "[loop left]"
                } else {
                    "[right]"
                };
                format!(
                    "\\path [->] (I_{}) edge {} node [above]{{{}}} (I_{});",
                    self.id,
                    placement,
                    escape::tex(e.as_str()),
                    v
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StateOutputVec {
    states: Vec<StateOutput>,
    start: StateId,
}

impl StateOutputVec {
    pub fn to_plaintext(&self) -> String {
        let states = self
            .states
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{}\n\nstart: {}", states, self.start)
    }

    pub fn to_latex(&self) -> String {
        format!(
            "\\begin{{tikzpicture}}[node distance=5cm,block/.style={{state, rectangle, text width=6em}}]\n{}\n\\end{{tikzpicture}}",
            self.states
                .iter()
                .map(|s| s.node_to_latex())
                .chain(self.states.iter().map(|s| s.edge_to_latex()))
                .collect::<Vec<_>>()
                .join("\n")
        )
    }
}

impl<T> Grammar<T>
where
    T: Display,
{
    /// Items of `state` grouped by (rule, cursor), lookaheads joined in
    /// symbol order.
    pub fn item_set_to_dot_productions(&self, state: &ItemSet) -> Vec<DotProduction> {
        let mut grouped: BTreeMap<(usize, usize), Vec<Symbol>> = BTreeMap::new();
        for item in state {
            grouped
                .entry((item.rule, item.cursor))
                .or_default()
                .push(item.lookahead);
        }

        grouped
            .into_iter()
            .map(|((rule, position), lookahead)| DotProduction {
                left: self.symbol_name(self.rule(rule).lhs),
                production: self.rule_to_vec_str(rule),
                position,
                lookahead: lookahead.into_iter().map(|s| self.symbol_name(s)).collect(),
            })
            .collect()
    }
}

impl Automaton {
    pub fn to_state_output_vec<T: Display>(&self, grammar: &Grammar<T>) -> StateOutputVec {
        let states = (0..self.states_count())
            .map(|id| StateOutput {
                id,
                items: grammar.item_set_to_dot_productions(self.state(id)),
                edges: self
                    .edges(id)
                    .map(|(s, to)| (grammar.symbol_name(s), to))
                    .collect(),
                reductions: self
                    .reductions(id)
                    .map(|(s, rule)| (grammar.symbol_name(s), rule))
                    .collect(),
            })
            .collect();

        StateOutputVec {
            states,
            start: self.start_state(),
        }
    }
}

impl Action {
    pub fn to_plaintext(&self) -> String {
        match self {
            Action::Error => String::new(),
            Action::Shift(s) => format!("s{}", s),
            Action::Reduce(r) => format!("r{}", r),
        }
    }

    pub fn to_latex(&self) -> String {
        match self {
            Action::Error => String::new(),
            Action::Shift(s) => format!("shift {}", s),
            Action::Reduce(r) => format!("reduce {}", r),
        }
    }
}

impl<T> ParsingTable<T>
where
    T: Display,
{
    fn header(&self) -> Vec<String> {
        self.symbols()
            .iter()
            .map(|(s, _)| self.symbol_name(*s))
            .collect()
    }

    pub fn to_plaintext(&self) -> String {
        let mut output: Vec<Vec<String>> = vec![std::iter::once(String::new())
            .chain(self.header())
            .collect()];

        for state in 0..self.states_count() {
            let row: Vec<String> = std::iter::once(state.to_string())
                .chain(self.row(state).iter().map(|a| a.to_plaintext()))
                .collect();
            output.push(row);
        }

        let width: Vec<usize> = (0..output[0].len())
            .map(|j| {
                output
                    .iter()
                    .map(|row| row[j].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let terminals = self
            .symbols()
            .iter()
            .filter(|(_, e)| !matches!(e, SymbolEntry::Nonterminal(_)))
            .count();
        let non_terminals = self.symbols().len() - terminals;

        let header: String = format!(
            "\\begin{{tabular}}{{c{}}}\n & \\multicolumn{{{}}}{{c}}{{action}} & \\multicolumn{{{}}}{{|c}}{{goto}}\\\\",
            "|l".repeat(self.symbols().len()),
            terminals,
            non_terminals,
        );

        let first_row = std::iter::once(String::new())
            .chain(self.header().iter().map(|s| escape::tex(s.as_str()).to_string()))
            .collect::<Vec<_>>()
            .join(" & ");

        let content = (0..self.states_count())
            .map(|state| {
                std::iter::once(state.to_string())
                    .chain(self.row(state).iter().map(|a| a.to_latex()))
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect::<Vec<_>>()
            .join(" \\\\\n");

        format!(
            "{}\n{} \\\\\\hline\n{}\n\\end{{tabular}}",
            header, first_row, content
        )
    }
}
