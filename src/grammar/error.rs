use thiserror::Error;

use super::Symbol;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("root symbol is not set")]
    MissingRootSymbol,
    #[error("root symbol {0} is not a nonterminal")]
    RootNotNonterminal(Symbol),
    #[error("root symbol {0} has no rules")]
    RootWithoutRules(Symbol),
    #[error("rule {rule} references unregistered symbol {symbol}")]
    UnknownSymbol { rule: usize, symbol: Symbol },
    #[error("left side {symbol} of rule {rule} is not a nonterminal")]
    LhsNotNonterminal { rule: usize, symbol: Symbol },
    #[error("rule {rule} mentions the end marker")]
    EndMarkerInRule { rule: usize },
    #[error("terminal {symbol} repeats the token of an earlier terminal")]
    DuplicateTerminal { symbol: Symbol },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Line {0}: too many \"->\"")]
    TooManyArrows(usize),
    #[error("Line {0}: empty left side")]
    EmptyLhs(usize),
    #[error("Line {0}: left side contains whitespace")]
    LhsContainsWhitespace(usize),
    #[error("Line {0}: cannot find left side")]
    MissingLhs(usize),
    #[error("Line {0}: \"$\" is reserved for the end of input")]
    ReservedEndMark(usize),
    #[error("grammar has no productions")]
    NoProductions,
}
