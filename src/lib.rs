extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub mod lr;
pub use grammar::{Grammar, GrammarBuilder, GrammarError, Symbol};
pub use lr::{Action, Automaton, CanonicalLr, Conflict, ParsingTable};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Conflict(#[from] Conflict),
}

/// Parses grammar text and builds its LR(1) parsing table.
pub fn lr1_table(grammar: &str) -> Result<(Grammar<String>, ParsingTable<String>), Error> {
    let g = Grammar::parse(grammar)?;
    let automaton = Automaton::build(&g)?;
    let table = ParsingTable::new(&g, &automaton);
    Ok((g, table))
}

#[wasm_bindgen]
pub fn lr1_table_to_json(grammar: &str) -> String {
    let result = lr1_table(grammar)
        .map_err(|e| e.to_string())
        .and_then(|(_, table)| table.to_json().map_err(|e| e.to_string()));
    match result {
        Ok(json) => json,
        Err(e) => serde_json::json!({ "error": e }).to_string(),
    }
}

#[cfg(test)]
mod json_tests {
    #[test]
    fn table_json() {
        let json: serde_json::Value =
            serde_json::from_str(&crate::lr1_table_to_json("S -> ( S ) S | ε")).unwrap();
        assert_eq!(json["start_state"], 0);
        assert_eq!(json["actions"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn conflict_json() {
        let json: serde_json::Value =
            serde_json::from_str(&crate::lr1_table_to_json("E -> E + E | x")).unwrap();
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("shift-reduce conflict"));
    }

    #[test]
    fn parse_error_json() {
        let json: serde_json::Value =
            serde_json::from_str(&crate::lr1_table_to_json("-> a")).unwrap();
        assert_eq!(json["error"], "Line 1: empty left side");
    }
}
