use std::fmt::Display;

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Grammar, EPSILON};

#[derive(Debug, Clone, Serialize)]
pub struct RuleOutput {
    pub index: usize,
    pub left: String,
    pub right: Vec<String>,
}

impl RuleOutput {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        let right = if self.right.is_empty() {
            EPSILON.to_string()
        } else {
            self.right.join(" ")
        };
        format!(
            "{:>3}  {:>width$} -> {}",
            self.index,
            self.left,
            right,
            width = left_width
        )
    }

    pub fn to_latex(&self) -> String {
        let right = if self.right.is_empty() {
            "\\epsilon".to_string()
        } else {
            self.right
                .iter()
                .map(|s| escape::tex(s.as_str()).to_string())
                .collect::<Vec<_>>()
                .join(" \\ ")
        };
        format!(
            "{} & {} & \\rightarrow & {}",
            self.index,
            escape::tex(self.left.as_str()),
            right
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleOutputVec {
    rules: Vec<RuleOutput>,
}

impl RuleOutputVec {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self.rules.iter().map(|r| r.left.len()).max().unwrap_or(0);
        self.rules
            .iter()
            .map(|r| r.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{rlcl}".to_string())
            .chain(self.rules.iter().map(|r| r.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

#[derive(Debug, Clone, Serialize)]
struct NonTerminalOutput {
    name: String,
    eps_productive: bool,
    first: Vec<String>,
}

impl NonTerminalOutput {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {}",
            self.name,
            self.eps_productive,
            self.first.join(", ")
        )
    }

    fn to_latex(&self) -> String {
        let first = self
            .first
            .iter()
            .map(|s| escape::tex(s.as_str()).to_string())
            .collect::<Vec<_>>()
            .join(r"\ ");

        format!(
            "{} & {} & {}",
            escape::tex(self.name.as_str()),
            self.eps_productive,
            first
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NonTerminalOutputVec {
    data: Vec<NonTerminalOutput>,
}

impl NonTerminalOutputVec {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c}\n".to_string()
            + "Symbol & Eps-productive & First\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl<T> Grammar<T>
where
    T: Display,
{
    pub fn to_rule_output_vec(&self) -> RuleOutputVec {
        let rules = (0..self.rules_count())
            .map(|index| RuleOutput {
                index,
                left: self.symbol_name(self.rule(index).lhs),
                right: self.rule_to_vec_str(index),
            })
            .collect();
        RuleOutputVec { rules }
    }

    pub fn to_non_terminal_output_vec(&self) -> NonTerminalOutputVec {
        let data = self
            .nonterminal_iter()
            .map(|(symbol, name)| NonTerminalOutput {
                name: name.to_string(),
                eps_productive: self.is_eps_productive(symbol),
                // FIRST sets are ordered by symbol id
                first: self
                    .first(symbol)
                    .iter()
                    .map(|&s| self.symbol_name(s))
                    .collect(),
            })
            .collect();
        NonTerminalOutputVec { data }
    }

    /// Terminals, nonterminals, rules and FIRST sets with their symbol ids.
    pub fn to_plaintext(&self) -> String {
        let mut output: Vec<String> = vec!["### Terminals:".to_string()];
        output.extend(
            self.terminal_iter()
                .map(|(s, token)| format!("{} '{}'", s.id(), token)),
        );

        output.push("### Nonterminals:".to_string());
        output.extend(self.nonterminal_iter().map(|(s, name)| {
            if self.is_eps_productive(s) {
                format!("{} {} (eps-productive)", s.id(), name)
            } else {
                format!("{} {}", s.id(), name)
            }
        }));

        output.push("### Rules:".to_string());
        output.push(self.to_rule_output_vec().to_plaintext());

        output.push("### First:".to_string());
        output.extend(self.nonterminal_iter().map(|(s, _)| {
            let first = self
                .first(s)
                .iter()
                .map(|f| f.id().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("First({}) = {{{}}}", s.id(), first)
        }));

        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::samples;

    #[test]
    fn parentheses_plaintext() {
        let g = samples::balanced_parentheses().build().unwrap();
        let expected = "### Terminals:\n\
                        -1 '('\n\
                        -2 ')'\n\
                        ### Nonterminals:\n\
                        1 S (eps-productive)\n\
                        2 S' (eps-productive)\n\
                        ### Rules:\n  \
                        0  S' -> S\n  \
                        1   S -> ( S ) S\n  \
                        2   S -> ϵ\n\
                        ### First:\n\
                        First(1) = {-1}\n\
                        First(2) = {-1}";
        assert_eq!(g.to_plaintext(), expected);
    }

    #[test]
    fn first_table() {
        let g = samples::arithmetic().build().unwrap();
        let t = g.to_non_terminal_output_vec();
        assert_eq!(
            t.to_plaintext(),
            "S' | false | (, x\nS | false | (, x\nT | false | (, x\nU | false | (, x"
        );
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["data"][0]["name"], "S'");
        assert_eq!(json["data"][0]["first"], serde_json::json!(["(", "x"]));
    }
}
