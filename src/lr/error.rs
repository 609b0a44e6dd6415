use thiserror::Error;

use super::StateId;
use crate::grammar::Symbol;

/// The grammar is not LR(1): a state admits two actions on one lookahead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Conflict {
    #[error("shift-reduce conflict in state {state} on {lookahead}: shift to {shift} or reduce by rule {rule}")]
    ShiftReduce {
        state: StateId,
        lookahead: Symbol,
        shift: StateId,
        rule: usize,
    },
    /// `first` is the rule already recorded for the cell, `second` the one
    /// that collided with it.
    #[error("reduce-reduce conflict in state {state} on {lookahead}: rules {first} and {second}")]
    ReduceReduce {
        state: StateId,
        lookahead: Symbol,
        first: usize,
        second: usize,
    },
}

impl Conflict {
    pub fn state(&self) -> StateId {
        match self {
            Conflict::ShiftReduce { state, .. } | Conflict::ReduceReduce { state, .. } => *state,
        }
    }

    pub fn lookahead(&self) -> Symbol {
        match self {
            Conflict::ShiftReduce { lookahead, .. } | Conflict::ReduceReduce { lookahead, .. } => {
                *lookahead
            }
        }
    }
}
