//! Probabilistic context-free grammars and relative-frequency induction.
//!
//! [`induce_pcfg`] turns a flat production sequence into a [`Pcfg`]: each
//! distinct production's probability is its frequency divided by the total
//! frequency of productions sharing its left-hand side, so the probabilities
//! under every left-hand side form a distribution. [`Pcfg::new`] re-checks
//! that guarantee for grammars built by hand.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use super::{Nonterminal, Production};

/// Tolerance when checking that per-LHS probabilities sum to 1.
pub const EPSILON: f64 = 0.01;

/// A production annotated with an estimated probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedProduction {
    #[serde(flatten)]
    production: Production,
    prob: f64,
}

impl WeightedProduction {
    pub fn new(production: Production, prob: f64) -> Self {
        Self { production, prob }
    }

    pub fn production(&self) -> &Production {
        &self.production
    }

    pub fn lhs(&self) -> &Nonterminal {
        self.production.lhs()
    }

    pub fn prob(&self) -> f64 {
        self.prob
    }
}

impl fmt::Display for WeightedProduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug-format the rounded probability: shortest round-trip form,
        // so 1.0 prints as "1.0" and 2/3 as "0.666667".
        write!(f, "{} [{:?}]", self.production, round6(self.prob))
    }
}

fn round6(p: f64) -> f64 {
    (p * 1e6).round() / 1e6
}

/// A probabilistic context-free grammar rooted at a start symbol.
///
/// Construction validates the per-LHS probability distributions, so a
/// `Pcfg` value always satisfies the sum-to-1 guarantee within [`EPSILON`].
#[derive(Debug, Clone, Serialize)]
pub struct Pcfg {
    start: Nonterminal,
    productions: Vec<WeightedProduction>,
}

impl Pcfg {
    /// Build a grammar from explicitly weighted productions.
    ///
    /// Fails if the start symbol never occurs as a left-hand side or if the
    /// probabilities under some left-hand side do not sum to 1 within
    /// [`EPSILON`].
    pub fn new(
        start: Nonterminal,
        productions: Vec<WeightedProduction>,
    ) -> Result<Self, InduceError> {
        if !productions.iter().any(|wp| wp.lhs() == &start) {
            return Err(InduceError::MissingStartSymbol { start });
        }

        let mut sums: FxHashMap<&Nonterminal, f64> = FxHashMap::default();
        for wp in &productions {
            *sums.entry(wp.lhs()).or_insert(0.0) += wp.prob();
        }
        for (lhs, sum) in sums {
            if (sum - 1.0).abs() > EPSILON {
                return Err(InduceError::InvalidDistribution {
                    lhs: lhs.clone(),
                    sum,
                });
            }
        }

        Ok(Self { start, productions })
    }

    pub fn start(&self) -> &Nonterminal {
        &self.start
    }

    pub fn productions(&self) -> &[WeightedProduction] {
        &self.productions
    }

    /// Number of distinct productions in the grammar.
    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// All productions whose left-hand side is `lhs`, in grammar order.
    pub fn productions_for<'a>(
        &'a self,
        lhs: &'a Nonterminal,
    ) -> impl Iterator<Item = &'a WeightedProduction> {
        self.productions.iter().filter(move |wp| wp.lhs() == lhs)
    }
}

impl fmt::Display for Pcfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grammar with {} productions (start state = {})",
            self.productions.len(),
            self.start
        )?;
        for wp in &self.productions {
            write!(f, "\n    {wp}")?;
        }
        Ok(())
    }
}

/// Induce a PCFG from a production sequence by relative frequency.
///
/// Duplicates in `productions` are the signal: each distinct production's
/// probability is `count(production) / count(lhs)`. Distinct productions
/// keep their first-seen order, so induction is deterministic.
pub fn induce_pcfg(
    start: Nonterminal,
    productions: &[Production],
) -> Result<Pcfg, InduceError> {
    if productions.is_empty() {
        return Err(InduceError::EmptyProductions);
    }

    let mut prod_counts: FxHashMap<&Production, usize> = FxHashMap::default();
    let mut lhs_counts: FxHashMap<&Nonterminal, usize> = FxHashMap::default();
    let mut order: Vec<&Production> = Vec::new();

    for prod in productions {
        *lhs_counts.entry(prod.lhs()).or_insert(0) += 1;
        let count = prod_counts.entry(prod).or_insert(0);
        if *count == 0 {
            order.push(prod);
        }
        *count += 1;
    }

    let weighted = order
        .into_iter()
        .map(|prod| {
            let prob = prod_counts[prod] as f64 / lhs_counts[prod.lhs()] as f64;
            WeightedProduction::new(prod.clone(), prob)
        })
        .collect();

    Pcfg::new(start, weighted)
}

/// Failed grammar induction or construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InduceError {
    #[error("cannot induce a grammar from an empty production sequence")]
    EmptyProductions,

    #[error("start symbol {start} does not appear as a left-hand side")]
    MissingStartSymbol { start: Nonterminal },

    #[error("productions for {lhs} have probabilities summing to {sum}, expected 1")]
    InvalidDistribution { lhs: Nonterminal, sum: f64 },
}
