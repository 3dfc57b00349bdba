//! JSON input loading for the CLI.
//!
//! A pair file is either `{ "pairs": [...] }` or a bare array of pairs. A
//! sequence file is a JSON array of symbols. The path `-` reads stdin.

use std::io::Read;
use std::path::Path;

use cisc_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::batch::VariablePair;
use crate::symbol::Symbol;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PairFile {
    Wrapped { pairs: Vec<VariablePair<Symbol>> },
    Bare(Vec<VariablePair<Symbol>>),
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn parse<T: DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            Error::Json(e)
        } else {
            Error::InvalidInput(format!("{what}: {e}"))
        }
    })
}

/// Parse pairs from JSON text. Unnamed pairs are named by position.
pub fn parse_pairs(text: &str) -> Result<Vec<VariablePair<Symbol>>> {
    let mut pairs = match parse::<PairFile>(text, "expected a list of {name, x, y, truth} pairs")? {
        PairFile::Wrapped { pairs } | PairFile::Bare(pairs) => pairs,
    };
    for (i, pair) in pairs.iter_mut().enumerate() {
        if pair.name.is_empty() {
            pair.name = format!("pair-{i}");
        }
    }
    Ok(pairs)
}

/// Load pairs from a file, or stdin for `-`.
pub fn load_pairs(path: &Path) -> Result<Vec<VariablePair<Symbol>>> {
    parse_pairs(&read_source(path)?)
}

/// Parse one sequence of symbols from JSON text.
pub fn parse_sequence(text: &str) -> Result<Vec<Symbol>> {
    parse(text, "expected an array of integers, booleans, strings or tuples")
}

/// Load one sequence from a file, or stdin for `-`.
pub fn load_sequence(path: &Path) -> Result<Vec<Symbol>> {
    parse_sequence(&read_source(path)?)
}
