//! Grammar building blocks: nonterminals, symbols, and productions.
//!
//! A [`Production`] is an immutable rewrite rule mapping a left-hand-side
//! [`Nonterminal`] to an ordered sequence of right-hand-side [`Symbol`]s.
//! Productions are extracted from syntax trees with multiplicity preserved;
//! duplicate occurrences drive the frequency estimation in [`pcfg`].

use std::fmt;

use serde::Serialize;

pub mod pcfg;

pub use pcfg::{induce_pcfg, InduceError, Pcfg, WeightedProduction};

/// A grammar variable, e.g. `S`, `NP`, or a synthesized label like
/// `VP|<NP-PP>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Nonterminal(String);

impl Nonterminal {
    /// Create a nonterminal from its symbol text.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// The symbol text.
    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Nonterminal {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

/// One right-hand-side element: a nonterminal or a terminal word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Nonterminal(Nonterminal),
    Terminal(String),
}

impl Symbol {
    /// Shorthand for a nonterminal symbol.
    pub fn nt(symbol: impl Into<String>) -> Self {
        Self::Nonterminal(Nonterminal::new(symbol))
    }

    /// Shorthand for a terminal word.
    pub fn t(word: impl Into<String>) -> Self {
        Self::Terminal(word.into())
    }

    /// Returns `true` for [`Symbol::Terminal`].
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nonterminal(nt) => write!(f, "{nt}"),
            Self::Terminal(word) => write!(f, "'{word}'"),
        }
    }
}

/// An immutable rewrite rule `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Production {
    lhs: Nonterminal,
    rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Nonterminal, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }

    pub fn lhs(&self) -> &Nonterminal {
        &self.lhs
    }

    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    /// A lexical production rewrites to terminals only, e.g. `NN -> 'dog'`.
    pub fn is_lexical(&self) -> bool {
        !self.rhs.is_empty() && self.rhs.iter().all(Symbol::is_terminal)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}
