pub mod automaton;
pub mod canonical;
pub mod error;
pub mod item;
pub mod pretty_print;
pub mod table;
pub use automaton::{Action, Automaton};
pub use canonical::{CanonicalLr, GoTable};
pub use error::Conflict;
pub use item::{Item, ItemSet};
pub use table::{ParsingTable, SymbolEntry};

/// Index of a state in discovery order; `0` is the start state.
pub type StateId = usize;
