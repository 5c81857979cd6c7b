//! Induce a probabilistic context-free grammar from a treebank corpus.
//!
//! The crate runs a single batch pipeline: load the built-in corpus of
//! parsed sentences, collapse unary chains and binarize each tree
//! (horizontal Markov order 2 by default), accumulate every tree's
//! productions into one sequence, and estimate rule probabilities by
//! relative frequency per left-hand side. The result is a [`Pcfg`] rooted
//! at `S`.
//!
//! # Quick start
//!
//! ```
//! use treebank_pcfg::{induce_treebank_grammar, InduceConfig};
//!
//! let grammar = induce_treebank_grammar(&InduceConfig::default()).unwrap();
//! assert_eq!(grammar.start().symbol(), "S");
//! println!("{grammar}");
//! ```
//!
//! For custom corpora or alternative stage implementations, compose a
//! pipeline explicitly via [`pipeline::PipelineBuilder`].

pub mod corpus;
pub mod grammar;
pub mod pipeline;
pub mod tree;
pub mod types;

pub use corpus::Treebank;
pub use grammar::{induce_pcfg, InduceError, Nonterminal, Pcfg, Production, Symbol};
pub use pipeline::{GrammarReport, PipelineError, TreebankPipeline};
pub use tree::Tree;
pub use types::{Factor, InduceConfig};

use pipeline::NoopObserver;

/// Run the default pipeline over the built-in corpus and return the
/// induced grammar.
///
/// This is the whole program as a function: it takes no external mutable
/// state and performs no output. Callers decide what to do with the
/// grammar — the `induce-pcfg` binary prints it.
pub fn induce_treebank_grammar(cfg: &InduceConfig) -> Result<Pcfg, PipelineError> {
    let report = TreebankPipeline::penn_treebank().run(cfg, &mut NoopObserver)?;
    Ok(report.grammar)
}
