//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary. Implementations are
//! statically dispatched; the default stack reproduces the classic treebank
//! induction recipe end to end.

use thiserror::Error;

use crate::corpus::{CorpusError, Treebank, TREEBANK_ID};
use crate::grammar::{induce_pcfg, InduceError, Nonterminal, Pcfg, Production};
use crate::tree::{chomsky_normal_form, collapse_unary, TransformError, Tree};
use crate::types::InduceConfig;

// ============================================================================
// CorpusSource — supplies parsed sentences (stage 0)
// ============================================================================

/// A source of already-parsed syntax trees.
///
/// # Contract
///
/// - **Output**: every tree of the corpus, in corpus order. The pipeline
///   takes ownership; trees are mutated in place downstream.
/// - **Errors**: corpus lookup or parse failures. The pipeline never
///   recovers from them.
pub trait CorpusSource {
    fn load(&self) -> Result<Vec<Tree>, CorpusError>;
}

/// Loads the built-in annotated corpus by its fixed identifier.
#[derive(Debug, Clone)]
pub struct TreebankSource {
    corpus_id: String,
}

impl TreebankSource {
    /// Source for the default corpus ([`TREEBANK_ID`]).
    pub fn new() -> Self {
        Self {
            corpus_id: TREEBANK_ID.to_string(),
        }
    }

    /// Source for another registered corpus identifier.
    pub fn with_corpus(id: impl Into<String>) -> Self {
        Self {
            corpus_id: id.into(),
        }
    }
}

impl Default for TreebankSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusSource for TreebankSource {
    fn load(&self) -> Result<Vec<Tree>, CorpusError> {
        Ok(Treebank::load(&self.corpus_id)?.into_trees())
    }
}

// ============================================================================
// TreeNormalizer — per-tree preprocessing (stage 1)
// ============================================================================

/// Normalizes one tree in place before production extraction.
///
/// # Contract
///
/// - **Input**: a mutable tree (modify in place; each tree is processed
///   once and discarded after its productions are extracted).
/// - **Idempotent**: normalizing an already-normalized tree must leave it
///   unchanged under the same configuration.
pub trait TreeNormalizer {
    fn normalize(&self, tree: &mut Tree, cfg: &InduceConfig) -> Result<(), TransformError>;
}

/// The standard recipe: collapse unary chains, then binarize with the
/// configured horizontal Markov bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkovNormalizer;

impl TreeNormalizer for MarkovNormalizer {
    fn normalize(&self, tree: &mut Tree, cfg: &InduceConfig) -> Result<(), TransformError> {
        collapse_unary(tree, cfg);
        chomsky_normal_form(tree, cfg)
    }
}

/// No-op normalizer — induces a grammar over the raw treebank productions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNormalizer;

impl TreeNormalizer for NoopNormalizer {
    #[inline]
    fn normalize(&self, _tree: &mut Tree, _cfg: &InduceConfig) -> Result<(), TransformError> {
        Ok(())
    }
}

// ============================================================================
// GrammarInducer — PCFG estimation (stage 3)
// ============================================================================

/// Induces a grammar from the accumulated production sequence.
///
/// # Contract
///
/// - **Input**: the start symbol and the full sequence, duplicates
///   retained — multiplicity is the frequency signal.
/// - **Guarantee**: per-LHS probabilities of the returned grammar form a
///   distribution.
/// - **Errors**: empty sequence, or start symbol absent from every LHS.
pub trait GrammarInducer {
    fn induce(
        &self,
        start: Nonterminal,
        productions: &[Production],
    ) -> Result<Pcfg, InduceError>;
}

/// Relative-frequency estimation: `P(rule) = count(rule) / count(lhs)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeFrequencyInducer;

impl GrammarInducer for RelativeFrequencyInducer {
    fn induce(
        &self,
        start: Nonterminal,
        productions: &[Production],
    ) -> Result<Pcfg, InduceError> {
        induce_pcfg(start, productions)
    }
}

// ============================================================================
// GrammarFormatter — final rendering (stage 4)
// ============================================================================

/// Renders the induced grammar for output. Printing itself is left to the
/// caller.
pub trait GrammarFormatter {
    fn format(&self, grammar: &Pcfg) -> Result<String, FormatError>;
}

/// One rule per line with its probability, preceded by a summary header.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl GrammarFormatter for TextFormatter {
    fn format(&self, grammar: &Pcfg) -> Result<String, FormatError> {
        Ok(grammar.to_string())
    }
}

/// Pretty-printed JSON for machine consumers.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl GrammarFormatter for JsonFormatter {
    fn format(&self, grammar: &Pcfg) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(grammar)?)
    }
}

/// Failed grammar rendering.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to serialize grammar: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_corpus() -> Vec<Tree> {
        Treebank::from_bracketed(
            "( (S (NP (DT the) (NN dog)) (VP (VBZ barks))) )\n\
             ( (S (NP (NNS dogs)) (VP (VBP bark))) )",
        )
        .unwrap()
        .into_trees()
    }

    #[test]
    fn test_treebank_source_loads_builtin_corpus() {
        let trees = TreebankSource::new().load().unwrap();
        assert!(!trees.is_empty());
    }

    #[test]
    fn test_treebank_source_unknown_corpus_fails() {
        let err = TreebankSource::with_corpus("brown").load().unwrap_err();
        assert!(matches!(err, CorpusError::UnknownCorpus { .. }));
    }

    #[test]
    fn test_markov_normalizer_applies_both_passes() {
        let cfg = InduceConfig::default();
        let mut tree = Treebank::from_bracketed(
            "(S (NP (PRP she)) (VP (VP2 (VB gave) (NP (PRP him)) (NP (NN food)))))",
        )
        .unwrap()
        .into_trees()
        .remove(0);

        MarkovNormalizer.normalize(&mut tree, &cfg).unwrap();
        assert_eq!(
            tree.to_string(),
            "(S (NP (PRP she)) (VP+VP2 (VB gave) (VP+VP2|<NP-NP> (NP (PRP him)) (NP (NN food)))))"
        );
    }

    #[test]
    fn test_noop_normalizer_preserves_trees() {
        let cfg = InduceConfig::default();
        let mut trees = sample_corpus();
        let before = trees.clone();
        for tree in &mut trees {
            NoopNormalizer.normalize(tree, &cfg).unwrap();
        }
        assert_eq!(trees, before);
    }

    #[test]
    fn test_relative_frequency_inducer() {
        let productions: Vec<Production> = sample_corpus()
            .iter()
            .flat_map(Tree::productions)
            .collect();
        let grammar = RelativeFrequencyInducer
            .induce("S".into(), &productions)
            .unwrap();

        let s = Nonterminal::new("S");
        let s_rules: Vec<_> = grammar.productions_for(&s).collect();
        assert_eq!(s_rules.len(), 1); // S -> NP VP in both trees
        assert!((s_rules[0].prob() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_text_formatter_renders_display_form() {
        let productions: Vec<Production> = sample_corpus()
            .iter()
            .flat_map(Tree::productions)
            .collect();
        let grammar = induce_pcfg("S".into(), &productions).unwrap();

        let text = TextFormatter.format(&grammar).unwrap();
        assert!(text.starts_with("Grammar with"));
        assert!(text.contains("S -> NP VP [1.0]"));
    }

    #[test]
    fn test_json_formatter_emits_valid_json() {
        let productions: Vec<Production> = sample_corpus()
            .iter()
            .flat_map(Tree::productions)
            .collect();
        let grammar = induce_pcfg("S".into(), &productions).unwrap();

        let json = JsonFormatter.format(&grammar).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["start"], "S");
        assert!(value["productions"].as_array().is_some_and(|a| !a.is_empty()));
    }

    #[test]
    fn test_formatters_as_trait_objects() {
        let formatters: Vec<Box<dyn GrammarFormatter>> =
            vec![Box::new(TextFormatter), Box::new(JsonFormatter)];
        let productions: Vec<Production> = sample_corpus()
            .iter()
            .flat_map(Tree::productions)
            .collect();
        let grammar = induce_pcfg("S".into(), &productions).unwrap();

        for formatter in formatters {
            assert!(!formatter.format(&grammar).unwrap().is_empty());
        }
    }
}
