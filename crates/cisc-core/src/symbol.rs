//! Symbols read from JSON input.
//!
//! The scoring code is generic over any `Eq + Hash` type. This is the
//! concrete type the CLI decodes into: integers, booleans, strings, and
//! tuples of those. Floats are rejected; discretizing continuous data is
//! the caller's job.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbol {
    Bool(bool),
    Int(i64),
    Text(String),
    Tuple(Vec<Symbol>),
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Bool(b) => write!(f, "{b}"),
            Symbol::Int(i) => write!(f, "{i}"),
            Symbol::Text(s) => write!(f, "{s}"),
            Symbol::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
