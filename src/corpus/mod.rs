//! Treebank corpus access.
//!
//! The corpus is addressed by a fixed identifier rather than a file path:
//! [`Treebank::load`] resolves [`TREEBANK_ID`] to a sample of bracketed
//! Penn-style parses embedded in the binary. [`Treebank::from_bracketed`]
//! parses arbitrary bracketed text, which is what the tests use.

use thiserror::Error;

use crate::tree::Tree;

pub mod reader;

/// Identifier of the built-in annotated corpus.
pub const TREEBANK_ID: &str = "treebank";

const TREEBANK_SAMPLE: &str = include_str!("../../data/treebank.mrg");

/// A loaded corpus of parsed sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Treebank {
    trees: Vec<Tree>,
}

impl Treebank {
    /// Load a corpus by its well-known identifier.
    pub fn load(id: &str) -> Result<Self, CorpusError> {
        if id == TREEBANK_ID {
            Self::from_bracketed(TREEBANK_SAMPLE)
        } else {
            Err(CorpusError::UnknownCorpus { id: id.to_string() })
        }
    }

    /// Parse a corpus from bracketed-parse text.
    pub fn from_bracketed(text: &str) -> Result<Self, CorpusError> {
        Ok(Self {
            trees: reader::parse_trees(text)?,
        })
    }

    /// The parsed sentences, in corpus order.
    pub fn parsed_sents(&self) -> &[Tree] {
        &self.trees
    }

    /// Consume the corpus, yielding its trees.
    pub fn into_trees(self) -> Vec<Tree> {
        self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

/// Failed corpus lookup or parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorpusError {
    #[error("unknown corpus identifier {id:?}")]
    UnknownCorpus { id: String },

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
}
